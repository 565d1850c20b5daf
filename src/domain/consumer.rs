use crate::domain::edge::EdgeKind;
use crate::domain::index::GraphIndex;
use crate::domain::node::Node;

/// How a consumer reads the value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsumerRole<'g> {
    pub via: EdgeKind,
    pub parameter: Option<&'g str>,
}

impl<'g> ConsumerRole<'g> {
    /// Parameter name/position when the edge carries one, else the edge type.
    pub fn label(&self) -> &'g str {
        self.parameter.unwrap_or(self.via.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Consumer<'g> {
    pub role: ConsumerRole<'g>,
    pub node: &'g Node,
}

/// Consumer Resolver - finds every reader of a value.
///
/// The graph encodes consumption in two directions: `receiver`/`argument` edges run from
/// the Call to the Value, `used_by` edges run from the Value to the Call. Both are
/// needed for the complete set.
pub struct ConsumerResolver<'g> {
    index: &'g GraphIndex,
}

impl<'g> ConsumerResolver<'g> {
    pub fn new(index: &'g GraphIndex) -> Self {
        Self { index }
    }

    /// `receiver`/`argument` readers first, then `used_by` readers, each in edge order.
    /// An empty result means the value is dead within the visible graph.
    pub fn consumers_of(&self, value_id: &str) -> Vec<Consumer<'g>> {
        let index = self.index;

        let by_call = index
            .incoming(value_id)
            .filter(|e| matches!(e.kind, EdgeKind::Receiver | EdgeKind::Argument))
            .filter_map(|e| Some((e, index.node(&e.source)?)));

        let by_value = index
            .outgoing_of_kind(value_id, EdgeKind::UsedBy)
            .filter_map(|e| Some((e, index.node(&e.target)?)));

        by_call
            .chain(by_value)
            .map(|(edge, node)| Consumer {
                role: ConsumerRole {
                    via: edge.kind,
                    parameter: edge.parameter.as_deref(),
                },
                node,
            })
            .collect()
    }

    pub fn is_dead(&self, value_id: &str) -> bool {
        self.consumers_of(value_id).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::edge::Edge;
    use crate::domain::graph::SotGraph;
    use crate::domain::node::{NodeKind, ValueKind};

    fn index() -> GraphIndex {
        GraphIndex::build(SotGraph::new(
            vec![
                Node::new("v", NodeKind::Value).with_value_kind(ValueKind::Local),
                Node::new("dead", NodeKind::Value).with_value_kind(ValueKind::Local),
                Node::new("c1", NodeKind::Call),
                Node::new("c2", NodeKind::Call),
                Node::new("c3", NodeKind::Call),
            ],
            vec![
                Edge::new("v", "c3", EdgeKind::UsedBy).with_parameter("arg0"),
                Edge::new("c1", "v", EdgeKind::Receiver),
                Edge::new("c2", "v", EdgeKind::Argument).with_parameter("$order"),
                Edge::new("c2", "v", EdgeKind::Produces),
                Edge::new("v", "ghost", EdgeKind::UsedBy),
            ],
        ))
    }

    #[test]
    fn test_both_directions_are_collected() {
        let index = index();
        let resolver = ConsumerResolver::new(&index);
        let found: Vec<(&str, &str)> = resolver
            .consumers_of("v")
            .iter()
            .map(|c| (c.role.label(), c.node.id.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![("receiver", "c1"), ("$order", "c2"), ("arg0", "c3")]
        );
    }

    #[test]
    fn test_dead_value() {
        let index = index();
        let resolver = ConsumerResolver::new(&index);
        assert!(resolver.is_dead("dead"));
        assert!(resolver.is_dead("unknown"));
        assert!(!resolver.is_dead("v"));
    }
}
