use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Envelope returned by mutating endpoints: a human readable result
/// message next to the affected record.
#[derive(Serialize, Debug)]
pub struct ActionResult<T: Serialize> {
    pub message: String,
    pub data: T,
}

impl<T: Serialize> ActionResult<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data }
    }
}
