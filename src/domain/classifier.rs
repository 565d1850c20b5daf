use crate::domain::index::GraphIndex;
use crate::domain::node::Node;
use crate::domain::returns::ReturnAnalyzer;
use rmcp::schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a method's return path(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnPattern {
    /// `return expr;` on every path
    Inline,
    /// `$x = ...; return $x;` on every path
    Local,
    /// Some paths inline, others through a local
    Mixed,
    /// No return slot, or a slot nothing writes into
    Void,
}

impl ReturnPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnPattern::Inline => "INLINE",
            ReturnPattern::Local => "LOCAL",
            ReturnPattern::Mixed => "MIXED",
            ReturnPattern::Void => "VOID",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ReturnPattern::Inline => "return expr directly",
            ReturnPattern::Local => "$x = ...; return $x",
            ReturnPattern::Mixed => "multiple return points",
            ReturnPattern::Void => "no tracked return value",
        }
    }
}

impl fmt::Display for ReturnPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pure classification over the set of producer kinds; order does not matter.
pub fn classify_producers(producers: &[&Node]) -> ReturnPattern {
    let any_value = producers.iter().any(|p| p.is_value());
    let any_expression = producers.iter().any(|p| !p.is_value());
    match (any_value, any_expression) {
        (false, false) => ReturnPattern::Void,
        (true, false) => ReturnPattern::Local,
        (false, true) => ReturnPattern::Inline,
        (true, true) => ReturnPattern::Mixed,
    }
}

/// Pattern Classifier - total over every id: unknown ids and non-methods are VOID.
pub struct PatternClassifier<'g> {
    returns: ReturnAnalyzer<'g>,
}

impl<'g> PatternClassifier<'g> {
    pub fn new(index: &'g GraphIndex) -> Self {
        Self {
            returns: ReturnAnalyzer::new(index),
        }
    }

    pub fn classify(&self, method_id: &str) -> ReturnPattern {
        classify_producers(&self.returns.return_producers_of(method_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::node::NodeKind;

    #[test]
    fn test_classification_is_order_independent() {
        let call = Node::new("c", NodeKind::Call);
        let local = Node::new("v", NodeKind::Value);
        let prop = Node::new("p", NodeKind::Property);

        assert_eq!(classify_producers(&[]), ReturnPattern::Void);
        assert_eq!(classify_producers(&[&call, &prop]), ReturnPattern::Inline);
        assert_eq!(classify_producers(&[&local, &local]), ReturnPattern::Local);
        assert_eq!(classify_producers(&[&call, &local]), ReturnPattern::Mixed);
        assert_eq!(classify_producers(&[&local, &call]), ReturnPattern::Mixed);
    }

    #[test]
    fn test_serialized_form() {
        assert_eq!(
            serde_json::to_string(&ReturnPattern::Inline).unwrap(),
            "\"INLINE\""
        );
        assert_eq!(ReturnPattern::Void.to_string(), "VOID");
    }
}
