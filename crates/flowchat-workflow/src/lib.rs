pub mod types;
pub mod render;
pub mod observer;
pub mod reducer;
pub mod session;

pub use render::{node_type_icon, render_workflow, NodeRow, RenderOptions, WorkflowView};
pub use observer::{NoopObserver, TurnObserver};
pub use reducer::{Applied, EventReducer, TurnSummary};
pub use session::{ChatSession, TurnOutcome};
pub use types::{decode_frame, FrameError, FrameEvent};

// Re-export key types from flowchat-types
pub use flowchat_types::{
    NodeEvent, NodeRecord, SessionConfig, WorkflowEvent, WorkflowState, WorkflowStatus,
};
