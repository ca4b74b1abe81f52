use crate::data::store::SessionState;
use crate::models::decision::Decision;

/// Current decision state for the active root: the cursor plus two
/// duplicate-free, disjoint identity lists. Undecided is absence from both.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    cursor: usize,
    kept: Vec<String>,
    deleted: Vec<String>,
}

impl Ledger {
    /// Rebuilds from a persisted blob, dropping duplicates; an identity a
    /// corrupt file put in both lists counts as deleted.
    pub fn from_state(state: SessionState) -> Self {
        let mut deleted = Vec::new();
        for id in state.deleted {
            if !deleted.contains(&id) {
                deleted.push(id);
            }
        }
        let mut kept = Vec::new();
        for id in state.kept {
            if !kept.contains(&id) && !deleted.contains(&id) {
                kept.push(id);
            }
        }
        Self {
            cursor: state.index,
            kept,
            deleted,
        }
    }

    pub fn to_state(&self) -> SessionState {
        SessionState {
            index: self.cursor,
            kept: self.kept.clone(),
            deleted: self.deleted.clone(),
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
    }

    pub fn kept(&self) -> &[String] {
        &self.kept
    }

    pub fn deleted(&self) -> &[String] {
        &self.deleted
    }

    pub fn decision_for(&self, identity: &str) -> Decision {
        if self.deleted.iter().any(|id| id == identity) {
            Decision::Delete
        } else if self.kept.iter().any(|id| id == identity) {
            Decision::Keep
        } else {
            Decision::Undecided
        }
    }

    /// The identity leaves the opposing list and joins the target list if
    /// not already present; re-applying the current decision changes nothing.
    pub fn set_decision(&mut self, identity: &str, decision: Decision) {
        match decision {
            Decision::Keep => {
                self.deleted.retain(|id| id != identity);
                if !self.kept.iter().any(|id| id == identity) {
                    self.kept.push(identity.to_string());
                }
            }
            Decision::Delete => {
                self.kept.retain(|id| id != identity);
                if !self.deleted.iter().any(|id| id == identity) {
                    self.deleted.push(identity.to_string());
                }
            }
            Decision::Undecided => {
                self.kept.retain(|id| id != identity);
                self.deleted.retain(|id| id != identity);
            }
        }
    }

    pub fn remove_deleted(&mut self, identity: &str) {
        self.deleted.retain(|id| id != identity);
    }

    pub fn clear_deleted(&mut self) {
        self.deleted.clear();
    }

    pub fn clear(&mut self) {
        self.cursor = 0;
        self.kept.clear();
        self.deleted.clear();
    }
}
