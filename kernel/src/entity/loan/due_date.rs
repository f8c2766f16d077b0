use serde::{Deserialize, Serialize};
use vodca::{AsRefln, Fromln};

/// Caller-supplied due date, stored as given and never validated.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize, Fromln, AsRefln)]
pub struct ReturnDueDate(String);

impl ReturnDueDate {
    pub fn new(date: impl Into<String>) -> Self {
        Self(date.into())
    }
}
