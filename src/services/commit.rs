use std::path::Path;

use crate::error::AppError;
use crate::models::decision::Decision;
use crate::models::report::{CommitReport, MoveFailure};
use crate::models::review::ReviewItem;
use crate::services::file_service::{self, FileOps};
use crate::services::session::{SessionPhase, TriageSession};

/// The pending delete set: every delete-marked identity whose file still
/// exists, each entering review confirmed.
pub fn pending_deletes<F>(deleted: &[String], exists: F) -> Vec<ReviewItem>
where
    F: Fn(&str) -> bool,
{
    deleted
        .iter()
        .filter(|id| exists(id))
        .map(ReviewItem::new)
        .collect()
}

impl TriageSession {
    /// Opens the review phase. When nothing is pending the review is
    /// vacuously complete and stale delete entries (files gone since
    /// marking) are dropped from the ledger.
    pub fn begin_review(&mut self, ops: &dyn FileOps) -> Result<Vec<ReviewItem>, AppError> {
        let review = pending_deletes(self.ledger.deleted(), |id| {
            ops.exists(&self.root.join(id))
        });
        if review.is_empty() && !self.ledger.deleted().is_empty() {
            self.ledger.clear_deleted();
            self.persist()?;
        }
        Ok(review)
    }

    /// Executes the batch: confirmed items move into the quarantine with
    /// collision-safe names, reprieved items flip back to keep. One failed
    /// move never aborts its siblings; the full failure list comes back in
    /// the report. Committed state is not undoable, so the history is
    /// cleared.
    pub fn commit(
        &mut self,
        review: &[ReviewItem],
        ops: &dyn FileOps,
    ) -> Result<CommitReport, AppError> {
        let quarantine = file_service::quarantine_dir(&self.root);
        let mut moved: Vec<String> = Vec::new();
        let mut failures: Vec<MoveFailure> = Vec::new();
        let mut reprieved = 0usize;

        for item in review {
            if !item.confirmed {
                if self.ledger.decision_for(&item.identity) == Decision::Delete {
                    self.ledger.set_decision(&item.identity, Decision::Keep);
                    reprieved += 1;
                }
                continue;
            }

            // Only items still delete-marked move, and each at most once;
            // a keep-marked identity never does.
            if moved.contains(&item.identity)
                || self.ledger.decision_for(&item.identity) != Decision::Delete
            {
                continue;
            }

            let source = self.root.join(&item.identity);
            let file_name = Path::new(&item.identity)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| item.identity.clone());
            let destination = file_service::unique_destination(ops, &quarantine, &file_name);

            match ops.move_item(&source, &destination) {
                Ok(()) => moved.push(item.identity.clone()),
                Err(e) => failures.push(MoveFailure {
                    identity: item.identity.clone(),
                    reason: e.to_string(),
                }),
            }
        }

        for identity in &moved {
            self.ledger.remove_deleted(identity);
        }
        self.items.retain(|item| !moved.contains(item));
        self.clamp_cursor();
        self.history.clear();
        self.phase = if self.items.is_empty() {
            SessionPhase::Empty
        } else {
            SessionPhase::Browsing
        };
        self.persist()?;

        Ok(CommitReport {
            moved: moved.len(),
            reprieved,
            failures,
            executed_at: chrono::Utc::now().to_rfc3339(),
        })
    }
}
