use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Placeholder for a missing node title or type
pub const UNKNOWN: &str = "unknown";

/// Payload of a `workflow` event
///
/// Only `status` carries meaning for the client; everything else the
/// adapter sends is kept in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WorkflowEvent {
    pub fn is_finished(&self) -> bool {
        self.status.as_deref() == Some("finished")
    }
}

/// Payload of a `node` event
///
/// Every field is optional and a value of the wrong type never fails the
/// whole event:
/// - `node_id`: synthesized from title and type, see [`NodeEvent::resolved_id`]
/// - text fields: numbers and booleans become their string form, arrays and
///   objects their JSON text
/// - `elapsed_ms`: fractional numbers are rounded, negative ones clamp to 0,
///   numeric strings are parsed, anything else counts as absent
/// - unrecognised fields land in `extra`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeEvent {
    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub node_id: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub node_type: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<String>,

    #[serde(
        default,
        deserialize_with = "lenient_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub elapsed_ms: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeEvent {
    /// Identity of the node this event belongs to
    ///
    /// The explicit `node_id` when present and non-empty, otherwise
    /// `"{title}-{node_type}"` with `"unknown"` for a missing part.
    pub fn resolved_id(&self) -> String {
        match self.node_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => format!(
                "{}-{}",
                self.title.as_deref().unwrap_or(UNKNOWN),
                self.node_type.as_deref().unwrap_or(UNKNOWN)
            ),
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let millis = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => match n.as_u64() {
            Some(ms) => return Ok(Some(ms)),
            None => n.as_f64(),
        },
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    Ok(millis
        .filter(|ms| ms.is_finite())
        .map(|ms| ms.max(0.0).round() as u64))
}
