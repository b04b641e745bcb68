use flowchat_types::{NodeRecord, WorkflowState, WorkflowStatus};
use std::fmt;

const WAITING_TEXT: &str = "Waiting for workflow events...";
const STARTED_GLYPH: &str = "🟢";
const COMPLETED_GLYPH: &str = "✅";
const DEFAULT_ICON: &str = "🔹";

/// Icon for a workflow node type
pub fn node_type_icon(node_type: &str) -> &'static str {
    match node_type {
        "start" => "🏠",
        "llm" => "🧠",
        "code" => "⚙️",
        "knowledge-retrieval" => "📚",
        "if-else" => "🔀",
        "rag" => "🧩",
        "answer" => "💬",
        _ => DEFAULT_ICON,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Include each node's output under its row
    pub show_outputs: bool,
}

impl RenderOptions {
    pub fn with_outputs(mut self, enabled: bool) -> Self {
        self.show_outputs = enabled;
        self
    }
}

/// One rendered line of the workflow panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRow {
    pub status_glyph: &'static str,
    pub icon: &'static str,
    pub title: String,
    pub node_type: String,
    pub elapsed: Option<String>,
    pub output: Option<String>,
}

impl NodeRow {
    fn from_record(record: &NodeRecord, options: &RenderOptions) -> Self {
        Self {
            status_glyph: if record.is_started() {
                STARTED_GLYPH
            } else {
                COMPLETED_GLYPH
            },
            icon: node_type_icon(record.node_type()),
            title: record.title().to_string(),
            node_type: record.node_type().to_string(),
            elapsed: record.elapsed_ms.map(|ms| format!("{} ms", ms)),
            output: if options.show_outputs {
                record.output_text()
            } else {
                None
            },
        }
    }
}

/// Snapshot of the workflow panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowView {
    /// No node has been seen yet
    Waiting,
    Panel {
        status: WorkflowStatus,
        rows: Vec<NodeRow>,
    },
}

/// Render the workflow panel for the current state
pub fn render_workflow(state: &WorkflowState, options: &RenderOptions) -> WorkflowView {
    if state.is_empty() {
        return WorkflowView::Waiting;
    }

    WorkflowView::Panel {
        status: state.status(),
        rows: state
            .nodes()
            .map(|record| NodeRow::from_record(record, options))
            .collect(),
    }
}

impl fmt::Display for NodeRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {} {} {} ({})",
            self.status_glyph, self.icon, self.title, self.node_type
        )?;
        if let Some(elapsed) = &self.elapsed {
            write!(f, "  {}", elapsed)?;
        }
        if let Some(output) = &self.output {
            for line in output.lines() {
                write!(f, "\n      │ {}", line)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for WorkflowView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Waiting => write!(f, "{}", WAITING_TEXT),
            Self::Panel { status, rows } => {
                write!(f, "Workflow: {}", status.as_str())?;
                for row in rows {
                    write!(f, "\n{}", row)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(events: &[&str]) -> WorkflowState {
        let mut state = WorkflowState::new();
        for raw in events {
            state.apply_node_event(serde_json::from_str(raw).unwrap());
        }
        state
    }

    #[test]
    fn test_waiting_placeholder() {
        let view = render_workflow(&WorkflowState::new(), &RenderOptions::default());
        assert_eq!(view, WorkflowView::Waiting);
        assert_eq!(view.to_string(), "Waiting for workflow events...");
    }

    #[test]
    fn test_rows_follow_first_seen_order() {
        let state = state_with(&[
            r#"{"node_id":"s","title":"Start","node_type":"start","status":"started"}"#,
            r#"{"node_id":"l","title":"Think","node_type":"llm","status":"started"}"#,
            r#"{"node_id":"s","status":"succeeded","elapsed_ms":5}"#,
        ]);

        let text = render_workflow(&state, &RenderOptions::default()).to_string();
        assert_eq!(
            text,
            "Workflow: running\n  ✅ 🏠 Start (start)  5 ms\n  🟢 🧠 Think (llm)"
        );
    }

    #[test]
    fn test_unknown_type_and_missing_fields() {
        let state = state_with(&[r#"{"node_id":"x","node_type":"tool"}"#, r#"{"node_id":"y"}"#]);

        let view = render_workflow(&state, &RenderOptions::default());
        let WorkflowView::Panel { rows, .. } = view else {
            panic!("Expected a panel");
        };
        assert_eq!(rows[0].icon, "🔹");
        assert_eq!(rows[0].title, "unknown");
        assert_eq!(rows[1].node_type, "unknown");
        assert_eq!(rows[1].status_glyph, "✅");
    }

    #[test]
    fn test_output_only_when_expanded() {
        let state = state_with(&[r#"{"node_id":"a","title":"Answer","node_type":"answer","output":"line 1\nline 2"}"#]);

        let collapsed = render_workflow(&state, &RenderOptions::default()).to_string();
        assert!(!collapsed.contains("line 1"));

        let expanded = render_workflow(&state, &RenderOptions::default().with_outputs(true)).to_string();
        assert!(expanded.ends_with("💬 Answer (answer)\n      │ line 1\n      │ line 2"));
    }

    #[test]
    fn test_finished_caption() {
        let mut state = state_with(&[r#"{"node_id":"a"}"#]);
        state.mark_finished();

        let text = render_workflow(&state, &RenderOptions::default()).to_string();
        assert!(text.starts_with("Workflow: finished"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let state = state_with(&[
            r#"{"node_id":"a","title":"A","node_type":"code","elapsed_ms":3,"output":"ok"}"#,
        ]);
        let options = RenderOptions::default().with_outputs(true);

        assert_eq!(render_workflow(&state, &options), render_workflow(&state, &options));
        assert_eq!(
            render_workflow(&state, &options).to_string(),
            render_workflow(&state, &options).to_string()
        );
    }

    #[test]
    fn test_icon_table() {
        assert_eq!(node_type_icon("knowledge-retrieval"), "📚");
        assert_eq!(node_type_icon("if-else"), "🔀");
        assert_eq!(node_type_icon("rag"), "🧩");
        assert_eq!(node_type_icon("http-request"), "🔹");
    }
}
