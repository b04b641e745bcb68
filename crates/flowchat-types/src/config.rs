use serde::{Deserialize, Serialize};

/// Per-session settings of the chat orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub model: String,
    /// Clear the workflow panel before every turn instead of accumulating
    /// nodes for the whole session
    #[serde(default)]
    pub reset_workflow_each_turn: bool,
}

impl SessionConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            reset_workflow_each_turn: false,
        }
    }

    pub fn with_workflow_reset(mut self, enabled: bool) -> Self {
        self.reset_workflow_each_turn = enabled;
        self
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new("mcu-dify")
    }
}
