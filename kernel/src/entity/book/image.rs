use vodca::{AsRefln, Fromln};

/// Cover image location. Opaque free-form text, usually a URL.
#[derive(Debug, Clone, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookImage(String);

impl BookImage {
    pub fn new(image: impl Into<String>) -> Self {
        Self(image.into())
    }
}
