use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFailure {
    pub identity: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitReport {
    pub moved: usize,
    pub reprieved: usize,
    pub failures: Vec<MoveFailure>,
    pub executed_at: String,
}

impl CommitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
