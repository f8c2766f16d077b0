use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Units currently available to borrow. Never negative; the stores enforce
/// the bound through a conditional adjust, not this type.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct BookQuantity(i32);

impl BookQuantity {
    pub fn new(quantity: impl Into<i32>) -> Self {
        Self(quantity.into())
    }
}
