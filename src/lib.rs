pub mod data;
pub mod error;
pub mod models;
pub mod services;

pub use data::store::{SessionState, StateStore, STATE_FILENAME};
pub use error::AppError;
pub use models::decision::Decision;
pub use models::report::{CommitReport, MoveFailure};
pub use models::review::ReviewItem;
pub use services::commit::pending_deletes;
pub use services::file_service::{FileOps, StdFileOps, QUARANTINE_DIRNAME};
pub use services::scan_service::list_items;
pub use services::session::{SessionPhase, TriageSession};
