pub mod config;
pub mod events;
pub mod state;

pub use config::SessionConfig;
pub use events::{NodeEvent, WorkflowEvent, UNKNOWN};
pub use state::{NodeRecord, WorkflowState, WorkflowStatus};
