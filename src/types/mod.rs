mod issue;
mod priority;
mod team;

pub use issue::{Issue, WorkflowState};
pub use priority::{Priority, label_for};
pub use team::Team;
