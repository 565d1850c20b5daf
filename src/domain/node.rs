use serde::{Deserialize, Serialize};

/// Opaque node identifier as it appears in the SoT document
pub type NodeId = String;

/// Marker the indexer appends to the fqn of a call-result Value
pub const CALL_RESULT_MARKER: &str = "(result)";

/// Name of a method's implicit return-value slot
pub const RETURN_SLOT_NAME: &str = "return";

/// Entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Class,
    Interface,
    Method,
    Property,
    Value,
    Call,
    /// Any kind this crate does not reason about (File, Function, Enum, ...)
    #[serde(other)]
    Other,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Class => "Class",
            NodeKind::Interface => "Interface",
            NodeKind::Method => "Method",
            NodeKind::Property => "Property",
            NodeKind::Value => "Value",
            NodeKind::Call => "Call",
            NodeKind::Other => "Other",
        }
    }
}

/// Sub-kind of a `Value` node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Parameter,
    Local,
    Result,
    #[serde(other)]
    Other,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Parameter => "parameter",
            ValueKind::Local => "local",
            ValueKind::Result => "result",
            ValueKind::Other => "other",
        }
    }
}

/// Source range (line-based; columns optional)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start_line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_col: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_line: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_col: Option<u32>,
}

/// A program entity of the code-property graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fqn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SourceRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_kind: Option<ValueKind>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            kind,
            fqn: None,
            name: None,
            file: None,
            range: None,
            value_kind: None,
        }
    }

    pub fn with_fqn(mut self, fqn: impl Into<String>) -> Self {
        self.fqn = Some(fqn.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn with_value_kind(mut self, value_kind: ValueKind) -> Self {
        self.value_kind = Some(value_kind);
        self
    }

    pub fn is_value(&self) -> bool {
        self.kind == NodeKind::Value
    }

    /// fqn, else name, else id
    pub fn display_name(&self) -> &str {
        self.fqn
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(self.id.as_str())
    }

    fn has_call_result_marker(&self) -> bool {
        self.fqn
            .as_deref()
            .is_some_and(|fqn| fqn.contains(CALL_RESULT_MARKER))
    }

    /// A Value holding some call's (or method's) result.
    pub fn is_result_value(&self) -> bool {
        self.is_value()
            && (self.value_kind == Some(ValueKind::Result) || self.has_call_result_marker())
    }

    /// A Value explicitly named `return`
    pub fn is_named_return_slot(&self) -> bool {
        self.is_value() && self.name.as_deref() == Some(RETURN_SLOT_NAME)
    }

    /// A possible return slot: named `return`, or a `result` Value without the call marker.
    ///
    /// Call-result Values live inside the *calling* method and may also carry
    /// `value_kind = result`, sometimes without an fqn. Prefer
    /// [`Node::is_named_return_slot`] when both are present.
    pub fn is_return_slot(&self) -> bool {
        self.is_named_return_slot()
            || (self.is_value()
                && self.value_kind == Some(ValueKind::Result)
                && !self.has_call_result_marker())
    }

    /// A local variable. Without an explicit `value_kind`, PHP `$name` values count.
    pub fn is_local_value(&self) -> bool {
        if !self.is_value() {
            return false;
        }
        match self.value_kind {
            Some(kind) => kind == ValueKind::Local,
            None => {
                self.name.as_deref().is_some_and(|n| n.starts_with('$'))
                    && !self.is_result_value()
            }
        }
    }
}
