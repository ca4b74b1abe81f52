use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::data::store::StateStore;
use crate::error::AppError;
use crate::models::decision::Decision;
use crate::services::history::{History, HistoryEntry};
use crate::services::ledger::Ledger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionPhase {
    /// Stepping through the sequence; the cursor points at the current item.
    Browsing,
    /// Walked past the last item; the delete review is available.
    EndOfSequence,
    /// The root produced no items. Terminal display state, not an error.
    Empty,
}

/// One triage run over one root. All state lives on this value, so
/// sessions over different roots can coexist; every mutation is flushed
/// to the root's sidecar before the call returns.
pub struct TriageSession {
    pub(crate) root: PathBuf,
    pub(crate) items: Vec<String>,
    pub(crate) ledger: Ledger,
    pub(crate) history: History,
    pub(crate) phase: SessionPhase,
}

impl TriageSession {
    /// Starts a fresh session, overwriting any previously persisted
    /// progress for this root.
    pub fn open_root(root: impl Into<PathBuf>, items: Vec<String>) -> Result<Self, AppError> {
        let mut session = Self {
            root: root.into(),
            items: dedup_preserving_order(items),
            ledger: Ledger::default(),
            history: History::default(),
            phase: SessionPhase::Browsing,
        };
        session.phase = session.initial_phase();
        session.persist()?;
        Ok(session)
    }

    /// Resumes from the root's sidecar. A missing or corrupt sidecar reads
    /// as a fresh session; a stale cursor is clamped into range.
    pub fn resume(root: impl Into<PathBuf>, items: Vec<String>) -> Self {
        let root = root.into();
        let mut session = Self {
            ledger: Ledger::from_state(StateStore::load(&root)),
            root,
            items: dedup_preserving_order(items),
            history: History::default(),
            phase: SessionPhase::Browsing,
        };
        session.clamp_cursor();
        session.phase = session.initial_phase();
        session
    }

    /// Throws away all persisted and in-memory progress for this root.
    pub fn reset(&mut self) -> Result<(), AppError> {
        StateStore::delete(&self.root)?;
        self.ledger.clear();
        self.history.clear();
        self.phase = self.initial_phase();
        self.persist()
    }

    /// Records `Keep` or `Delete` for the current item and advances. The
    /// previous decision and cursor go onto the undo stack first, so even
    /// re-applying the same decision stays safely undoable.
    pub fn decide(&mut self, decision: Decision) -> Result<(), AppError> {
        if decision == Decision::Undecided {
            return Err(AppError::General(
                "undecided is not a recordable decision".to_string(),
            ));
        }
        if self.phase != SessionPhase::Browsing || self.items.is_empty() {
            return Ok(());
        }

        let cursor = self.ledger.cursor();
        let identity = self.items[cursor].clone();
        self.history.push(HistoryEntry {
            identity: identity.clone(),
            before: self.ledger.decision_for(&identity),
            cursor,
        });
        self.ledger.set_decision(&identity, decision);
        self.persist()?;
        self.next()
    }

    pub fn next(&mut self) -> Result<(), AppError> {
        if self.phase != SessionPhase::Browsing {
            return Ok(());
        }
        let cursor = self.ledger.cursor();
        if cursor + 1 < self.items.len() {
            self.ledger.set_cursor(cursor + 1);
            self.persist()
        } else {
            self.phase = SessionPhase::EndOfSequence;
            Ok(())
        }
    }

    /// No-op at the first item; from the end of the sequence it returns
    /// to the last one.
    pub fn prev(&mut self) -> Result<(), AppError> {
        match self.phase {
            SessionPhase::EndOfSequence => {
                self.phase = SessionPhase::Browsing;
                Ok(())
            }
            SessionPhase::Browsing if self.ledger.cursor() > 0 => {
                self.ledger.set_cursor(self.ledger.cursor() - 1);
                self.persist()
            }
            _ => Ok(()),
        }
    }

    /// Reverts the newest decision, restoring the item's prior decision
    /// and the cursor it was taken at; `false` when there is nothing to
    /// undo.
    pub fn undo(&mut self) -> Result<bool, AppError> {
        let Some(entry) = self.history.pop() else {
            return Ok(false);
        };
        self.ledger.set_decision(&entry.identity, entry.before);
        self.ledger.set_cursor(entry.cursor);
        self.clamp_cursor();
        if !self.items.is_empty() {
            self.phase = SessionPhase::Browsing;
        }
        self.persist()?;
        Ok(true)
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn position(&self) -> (usize, usize) {
        (self.ledger.cursor(), self.items.len())
    }

    pub fn current(&self) -> Option<&str> {
        self.items.get(self.ledger.cursor()).map(String::as_str)
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn decision_for(&self, identity: &str) -> Decision {
        self.ledger.decision_for(identity)
    }

    pub fn kept(&self) -> &[String] {
        self.ledger.kept()
    }

    pub fn deleted(&self) -> &[String] {
        self.ledger.deleted()
    }

    pub(crate) fn persist(&self) -> Result<(), AppError> {
        StateStore::save(&self.root, &self.ledger.to_state())
    }

    pub(crate) fn clamp_cursor(&mut self) {
        let max = self.items.len().saturating_sub(1);
        if self.ledger.cursor() > max {
            self.ledger.set_cursor(max);
        }
    }

    fn initial_phase(&self) -> SessionPhase {
        if self.items.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Browsing
        }
    }
}

fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
