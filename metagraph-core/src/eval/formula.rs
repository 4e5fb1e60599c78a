//! Formulas
//!
//! The closed set of rules a cell may use to compute its value. A formula
//! holds only the ids it reads; the evaluator resolves them through the
//! graph store at evaluation time.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::Result;
use crate::graph::{CellRef, EdgeId, GraphStore, NodeId};

/// How a cell's value is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "arg", rename_all = "snake_case")]
pub enum Formula {
    /// A fixed value.
    Literal(f64),

    /// The value of another node.
    CopyNode(NodeId),

    /// The value of another edge.
    CopyEdge(EdgeId),

    /// Minimum over the edges entering the node. NaN if there are none.
    MinIncoming(NodeId),

    /// The edge's source node multiplied by every edge entering that
    /// source node.
    ProductIncoming(EdgeId),
}

impl Formula {
    /// Check if this formula is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Formula::Literal(_))
    }

    /// The entity this formula is anchored on, if any.
    ///
    /// Every id a formula reads is either this cell or reachable from it
    /// through the adjacency indices.
    pub fn target(&self) -> Option<CellRef> {
        match *self {
            Formula::Literal(_) => None,
            Formula::CopyNode(n) | Formula::MinIncoming(n) => Some(CellRef::Node(n)),
            Formula::CopyEdge(e) | Formula::ProductIncoming(e) => Some(CellRef::Edge(e)),
        }
    }

    /// The cells this formula reads, in evaluation order.
    pub fn dependencies(&self, graph: &GraphStore) -> Result<SmallVec<[CellRef; 4]>> {
        let mut deps = SmallVec::new();
        match *self {
            Formula::Literal(_) => {}
            Formula::CopyNode(n) => deps.push(CellRef::Node(n)),
            Formula::CopyEdge(e) => deps.push(CellRef::Edge(e)),
            Formula::MinIncoming(n) => {
                deps.extend(graph.edges_to(n)?.iter().copied().map(CellRef::Edge));
            }
            Formula::ProductIncoming(e) => {
                let src = graph.edge(e)?.from();
                deps.push(CellRef::Node(src));
                deps.extend(graph.edges_to(src)?.iter().copied().map(CellRef::Edge));
            }
        }
        Ok(deps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> GraphStore {
        // 0 -> 1, 2 -> 1, 1 -> 2
        let mut graph = GraphStore::new();
        for i in 0..3 {
            graph.add_node(NodeId::from(i)).unwrap();
        }
        graph.add_edge(EdgeId::from(0), NodeId::from(0), NodeId::from(1)).unwrap();
        graph.add_edge(EdgeId::from(1), NodeId::from(2), NodeId::from(1)).unwrap();
        graph.add_edge(EdgeId::from(2), NodeId::from(1), NodeId::from(2)).unwrap();
        graph
    }

    #[test]
    fn literal_has_no_dependencies() {
        let graph = triangle();
        let formula = Formula::Literal(1.0);
        assert!(formula.is_literal());
        assert!(formula.target().is_none());
        assert!(formula.dependencies(&graph).unwrap().is_empty());
    }

    #[test]
    fn min_incoming_reads_incoming_edges_in_order() {
        let graph = triangle();
        let deps = Formula::MinIncoming(NodeId::from(1)).dependencies(&graph).unwrap();
        assert_eq!(
            deps.as_slice(),
            &[CellRef::Edge(EdgeId::from(0)), CellRef::Edge(EdgeId::from(1))]
        );
    }

    #[test]
    fn product_incoming_reads_source_node_then_its_incoming_edges() {
        let graph = triangle();
        // Edge 2 leaves node 1, which is entered by edges 0 and 1.
        let deps = Formula::ProductIncoming(EdgeId::from(2))
            .dependencies(&graph)
            .unwrap();
        assert_eq!(
            deps.as_slice(),
            &[
                CellRef::Node(NodeId::from(1)),
                CellRef::Edge(EdgeId::from(0)),
                CellRef::Edge(EdgeId::from(1)),
            ]
        );
    }

    #[test]
    fn dependencies_of_unknown_target_fail() {
        let graph = triangle();
        assert!(Formula::MinIncoming(NodeId::from(9)).dependencies(&graph).is_err());
        assert!(Formula::ProductIncoming(EdgeId::from(9)).dependencies(&graph).is_err());
    }

    #[test]
    fn serde_shape_is_tagged() {
        let json = serde_json::to_string(&Formula::CopyNode(NodeId::from(3))).unwrap();
        assert_eq!(json, r#"{"kind":"copy_node","arg":3}"#);

        let back: Formula = serde_json::from_str(r#"{"kind":"min_incoming","arg":2}"#).unwrap();
        assert_eq!(back, Formula::MinIncoming(NodeId::from(2)));
    }
}
