use crate::events::{NodeEvent, UNKNOWN};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Lifecycle of the server-side workflow as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    #[default]
    Running,
    Finished,
}

impl WorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Finished => "finished",
        }
    }
}

/// Accumulated view of one workflow node
///
/// Built from every `node` event sharing the same id. A field set by an
/// earlier event survives until a later event carries a new value for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub node_id: String,
    pub title: Option<String>,
    pub node_type: Option<String>,
    pub status: Option<String>,
    pub elapsed_ms: Option<u64>,
    pub output: Option<Value>,
    #[serde(default)]
    pub extra: Map<String, Value>,
}

impl NodeRecord {
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Default::default()
        }
    }

    /// Overwrite every field the event carries, keep the rest
    pub fn merge(&mut self, event: NodeEvent) {
        let NodeEvent {
            node_id: _,
            title,
            node_type,
            status,
            elapsed_ms,
            output,
            extra,
        } = event;

        if title.is_some() {
            self.title = title;
        }
        if node_type.is_some() {
            self.node_type = node_type;
        }
        if status.is_some() {
            self.status = status;
        }
        if elapsed_ms.is_some() {
            self.elapsed_ms = elapsed_ms;
        }
        if output.is_some() {
            self.output = output;
        }
        self.extra.extend(extra);
    }

    /// Only `"started"` means in progress; any other status counts as done
    pub fn is_started(&self) -> bool {
        self.status.as_deref() == Some("started")
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn node_type(&self) -> &str {
        self.node_type.as_deref().unwrap_or(UNKNOWN)
    }

    /// Output as display text: strings verbatim, other JSON pretty-printed
    pub fn output_text(&self) -> Option<String> {
        match self.output.as_ref()? {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s.clone()),
            other => serde_json::to_string_pretty(other).ok(),
        }
    }
}

/// Workflow progress for a whole session
///
/// `order` holds each node id once, in first-seen order, and has exactly
/// the same ids as `nodes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkflowState {
    status: WorkflowStatus,
    nodes: HashMap<String, NodeRecord>,
    order: Vec<String>,
}

impl WorkflowState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> WorkflowStatus {
        self.status
    }

    /// One-way transition; there is no way back to running short of `clear`
    pub fn mark_finished(&mut self) {
        self.status = WorkflowStatus::Finished;
    }

    /// Record a node event, creating the node on first sighting
    ///
    /// Returns the id the event was filed under.
    pub fn apply_node_event(&mut self, event: NodeEvent) -> String {
        let node_id = event.resolved_id();

        let record = match self.nodes.entry(node_id.clone()) {
            std::collections::hash_map::Entry::Occupied(entry) => entry.into_mut(),
            std::collections::hash_map::Entry::Vacant(entry) => {
                self.order.push(node_id.clone());
                entry.insert(NodeRecord::new(node_id.clone()))
            }
        };
        record.merge(event);

        node_id
    }

    pub fn node(&self, node_id: &str) -> Option<&NodeRecord> {
        self.nodes.get(node_id)
    }

    /// Node ids in first-seen order
    pub fn order(&self) -> &[String] {
        &self.order
    }

    /// Nodes in first-seen order
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Forget every node and go back to running
    pub fn clear(&mut self) {
        self.status = WorkflowStatus::Running;
        self.nodes.clear();
        self.order.clear();
    }
}
