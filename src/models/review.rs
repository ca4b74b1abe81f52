use serde::{Deserialize, Serialize};

/// One delete-marked item awaiting confirmation; flipping `confirmed` off
/// reprieves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub identity: String,
    pub confirmed: bool,
}

impl ReviewItem {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            confirmed: true,
        }
    }
}
