use vodca::{AsRefln, Fromln};

/// Natural key used to locate an active loan on return. Free-form text,
/// no address validation.
#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct BorrowerEmail(String);

impl BorrowerEmail {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }
}
