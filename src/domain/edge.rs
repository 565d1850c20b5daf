use crate::domain::node::NodeId;
use serde::{Deserialize, Serialize};

/// Edge kind - structural and data-flow relationships of the SoT graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    // ============ Structure ============
    Contains, // Method → Value/Call it owns

    // ============ Control Flow ============
    Calls, // Call → Method it invokes

    // ============ Data Flow ============
    Produces,     // expression/Call → Value it writes into
    AssignedFrom, // Value → node its content originates from

    // ============ Consumption ============
    UsedBy,   // Value → Call reading it
    Receiver, // Call → Value used as its receiver
    Argument, // Call → Value passed as one of its arguments

    /// Relationship types this crate does not reason about (extends, implements, ...)
    #[serde(other)]
    Other,
}

impl EdgeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeKind::Contains => "contains",
            EdgeKind::Calls => "calls",
            EdgeKind::Produces => "produces",
            EdgeKind::AssignedFrom => "assigned_from",
            EdgeKind::UsedBy => "used_by",
            EdgeKind::Receiver => "receiver",
            EdgeKind::Argument => "argument",
            EdgeKind::Other => "other",
        }
    }
}

/// A typed, directed relationship between two node ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
    /// Positional/named role on `used_by`, `receiver` and `argument` edges
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

impl Edge {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>, kind: EdgeKind) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            parameter: None,
        }
    }

    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.parameter = Some(parameter.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_json_shape() {
        let edge: Edge = serde_json::from_str(
            r#"{"source":"a","target":"b","type":"assigned_from"}"#,
        )
        .unwrap();
        assert_eq!(edge.kind, EdgeKind::AssignedFrom);
        assert_eq!(edge.parameter, None);

        let edge: Edge = serde_json::from_str(
            r#"{"source":"v","target":"c","type":"used_by","parameter":"arg0"}"#,
        )
        .unwrap();
        assert_eq!(edge.kind, EdgeKind::UsedBy);
        assert_eq!(edge.parameter.as_deref(), Some("arg0"));

        let edge: Edge =
            serde_json::from_str(r#"{"source":"a","target":"b","type":"extends"}"#).unwrap();
        assert_eq!(edge.kind, EdgeKind::Other);
    }

    #[test]
    fn test_edge_serializes_type_field() {
        let json = serde_json::to_value(Edge::new("a", "b", EdgeKind::UsedBy)).unwrap();
        assert_eq!(json["type"], "used_by");
        assert!(json.get("parameter").is_none());
    }
}
