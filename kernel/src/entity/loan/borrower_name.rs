use vodca::{AsRefln, Fromln};

#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct BorrowerName(String);

impl BorrowerName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}
