//! Graph Store
//!
//! The store owns every node and edge and the two adjacency indices. Ids are
//! dense, so entities live in plain vectors indexed by id and the adjacency
//! indices are per-node lists of edge ids.
//!
//! The store is built once (nodes, then edges, then formulas) and afterwards
//! only the cells change, through the evaluator.

use smallvec::SmallVec;
use tracing::debug;

use super::node::{CellRef, Edge, EdgeId, Node, NodeId};
use crate::error::{GraphError, Result};
use crate::eval::{AttributeCell, Formula};

/// Edge ids adjacent to one node, in insertion order.
pub type EdgeList = SmallVec<[EdgeId; 4]>;

/// Owns all nodes, edges and adjacency indices.
#[derive(Debug, Default)]
pub struct GraphStore {
    /// All nodes, indexed by id.
    nodes: Vec<Node>,

    /// All edges, indexed by id.
    edges: Vec<Edge>,

    /// Outgoing edge ids per node.
    edges_from: Vec<EdgeList>,

    /// Incoming edge ids per node.
    edges_to: Vec<EdgeList>,
}

impl GraphStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for the given entity counts.
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
            edges_from: Vec::with_capacity(nodes),
            edges_to: Vec::with_capacity(nodes),
        }
    }

    /// Add a node with an unresolved cell.
    ///
    /// `id` must be the next unused node id.
    pub fn add_node(&mut self, id: NodeId) -> Result<NodeId> {
        if id.index() != self.nodes.len() {
            return Err(GraphError::unknown_node(id.index(), self.nodes.len()));
        }
        self.nodes.push(Node::new(id));
        self.edges_from.push(EdgeList::new());
        self.edges_to.push(EdgeList::new());
        Ok(id)
    }

    /// Add an edge with an unresolved cell and index it in both directions.
    ///
    /// `id` must be the next unused edge id and both endpoints must exist.
    pub fn add_edge(&mut self, id: EdgeId, from: NodeId, to: NodeId) -> Result<EdgeId> {
        if id.index() != self.edges.len() {
            return Err(GraphError::unknown_edge(id.index(), self.edges.len()));
        }
        self.check_node(from)?;
        self.check_node(to)?;

        self.edges.push(Edge::new(id, from, to));
        self.edges_from[from.index()].push(id);
        self.edges_to[to.index()].push(id);
        Ok(id)
    }

    /// Install a formula on a node's cell.
    pub fn set_node_formula(&mut self, id: NodeId, formula: Formula) -> Result<()> {
        self.set_formula(CellRef::Node(id), formula)
    }

    /// Install a formula on an edge's cell.
    pub fn set_edge_formula(&mut self, id: EdgeId, formula: Formula) -> Result<()> {
        self.set_formula(CellRef::Edge(id), formula)
    }

    /// Install a formula on any cell, validating the ids it references.
    pub fn set_formula(&mut self, cell: CellRef, formula: Formula) -> Result<()> {
        if let Some(target) = formula.target() {
            self.check(target)?;
        }
        self.cell_mut(cell)?.set_formula(formula);
        debug!(%cell, ?formula, "formula installed");
        Ok(())
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes
            .get(id.index())
            .ok_or_else(|| GraphError::unknown_node(id.index(), self.nodes.len()))
    }

    /// Get an edge by id.
    pub fn edge(&self, id: EdgeId) -> Result<&Edge> {
        self.edges
            .get(id.index())
            .ok_or_else(|| GraphError::unknown_edge(id.index(), self.edges.len()))
    }

    /// Edges leaving a node, in insertion order.
    pub fn edges_from(&self, id: NodeId) -> Result<&[EdgeId]> {
        self.edges_from
            .get(id.index())
            .map(|list| list.as_slice())
            .ok_or_else(|| GraphError::unknown_node(id.index(), self.nodes.len()))
    }

    /// Edges entering a node, in insertion order.
    pub fn edges_to(&self, id: NodeId) -> Result<&[EdgeId]> {
        self.edges_to
            .get(id.index())
            .map(|list| list.as_slice())
            .ok_or_else(|| GraphError::unknown_node(id.index(), self.nodes.len()))
    }

    /// Get the cell behind a reference.
    pub fn cell(&self, cell: CellRef) -> Result<&AttributeCell> {
        match cell {
            CellRef::Node(id) => self.node(id).map(Node::cell),
            CellRef::Edge(id) => self.edge(id).map(Edge::cell),
        }
    }

    /// Get the cell behind a reference, mutably.
    pub(crate) fn cell_mut(&mut self, cell: CellRef) -> Result<&mut AttributeCell> {
        match cell {
            CellRef::Node(id) => {
                let count = self.nodes.len();
                self.nodes
                    .get_mut(id.index())
                    .map(Node::cell_mut)
                    .ok_or_else(|| GraphError::unknown_node(id.index(), count))
            }
            CellRef::Edge(id) => {
                let count = self.edges.len();
                self.edges
                    .get_mut(id.index())
                    .map(Edge::cell_mut)
                    .ok_or_else(|| GraphError::unknown_edge(id.index(), count))
            }
        }
    }

    /// Fail with `UnknownId` unless the reference is populated.
    pub fn check(&self, cell: CellRef) -> Result<()> {
        match cell {
            CellRef::Node(id) => self.check_node(id),
            CellRef::Edge(id) => self.edge(id).map(|_| ()),
        }
    }

    fn check_node(&self, id: NodeId) -> Result<()> {
        self.node(id).map(|_| ())
    }

    /// Iterate over nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Iterate over edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the total number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Forget every computed value so the graph can be evaluated again.
    pub fn reset(&mut self) {
        for node in &mut self.nodes {
            node.cell_mut().reset();
        }
        for edge in &mut self.edges {
            edge.cell_mut().reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IdKind;

    fn nodes(n: usize) -> GraphStore {
        let mut graph = GraphStore::with_capacity(n, 0);
        for i in 0..n {
            graph.add_node(NodeId::from(i)).unwrap();
        }
        graph
    }

    #[test]
    fn add_nodes_and_edges() {
        let mut graph = nodes(3);
        graph.add_edge(EdgeId::from(0), NodeId::from(0), NodeId::from(1)).unwrap();
        graph.add_edge(EdgeId::from(1), NodeId::from(1), NodeId::from(2)).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let edge = graph.edge(EdgeId::from(1)).unwrap();
        assert_eq!(edge.from(), NodeId::from(1));
        assert_eq!(edge.to(), NodeId::from(2));
    }

    #[test]
    fn adjacency_follows_insertion_order() {
        let mut graph = nodes(3);
        graph.add_edge(EdgeId::from(0), NodeId::from(2), NodeId::from(0)).unwrap();
        graph.add_edge(EdgeId::from(1), NodeId::from(0), NodeId::from(1)).unwrap();
        graph.add_edge(EdgeId::from(2), NodeId::from(2), NodeId::from(1)).unwrap();
        graph.add_edge(EdgeId::from(3), NodeId::from(1), NodeId::from(1)).unwrap();

        let into_1 = graph.edges_to(NodeId::from(1)).unwrap();
        assert_eq!(into_1, &[EdgeId::from(1), EdgeId::from(2), EdgeId::from(3)]);

        let out_of_2 = graph.edges_from(NodeId::from(2)).unwrap();
        assert_eq!(out_of_2, &[EdgeId::from(0), EdgeId::from(2)]);

        assert!(graph.edges_to(NodeId::from(2)).unwrap().is_empty());
    }

    #[test]
    fn out_of_range_access_fails() {
        let graph = nodes(2);

        match graph.node(NodeId::from(2)) {
            Err(GraphError::UnknownId { kind, id, count }) => {
                assert_eq!(kind, IdKind::Node);
                assert_eq!(id, 2);
                assert_eq!(count, 2);
            }
            other => panic!("expected UnknownId, got {other:?}"),
        }
        assert!(graph.edge(EdgeId::from(0)).is_err());
        assert!(graph.edges_to(NodeId::from(5)).is_err());
        assert!(graph.edges_from(NodeId::from(5)).is_err());
    }

    #[test]
    fn edge_endpoints_must_exist() {
        let mut graph = nodes(2);
        let err = graph
            .add_edge(EdgeId::from(0), NodeId::from(0), NodeId::from(4))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownId { kind: IdKind::Node, id: 4, .. }));
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn ids_must_be_dense() {
        let mut graph = nodes(1);
        assert!(graph.add_node(NodeId::from(3)).is_err());
        assert!(graph
            .add_edge(EdgeId::from(1), NodeId::from(0), NodeId::from(0))
            .is_err());
    }

    #[test]
    fn formulas_referencing_unknown_ids_are_rejected() {
        let mut graph = nodes(2);
        graph.add_edge(EdgeId::from(0), NodeId::from(0), NodeId::from(1)).unwrap();

        assert!(graph
            .set_node_formula(NodeId::from(0), Formula::CopyNode(NodeId::from(2)))
            .is_err());
        assert!(graph
            .set_edge_formula(EdgeId::from(0), Formula::CopyEdge(EdgeId::from(1)))
            .is_err());
        assert!(graph
            .set_node_formula(NodeId::from(7), Formula::Literal(1.0))
            .is_err());

        graph
            .set_node_formula(NodeId::from(1), Formula::CopyEdge(EdgeId::from(0)))
            .unwrap();
        assert_eq!(
            graph.node(NodeId::from(1)).unwrap().cell().formula(),
            Some(Formula::CopyEdge(EdgeId::from(0)))
        );
    }

    #[test]
    fn literal_formula_resolves_immediately() {
        let mut graph = nodes(1);
        graph
            .set_node_formula(NodeId::from(0), Formula::Literal(3.5))
            .unwrap();
        let cell = graph.cell(CellRef::Node(NodeId::from(0))).unwrap();
        assert_eq!(cell.cached_value(), Some(3.5));
    }

    #[test]
    fn iterates_entities_in_id_order() {
        let mut graph = nodes(3);
        graph.add_edge(EdgeId::from(0), NodeId::from(2), NodeId::from(0)).unwrap();
        graph.add_edge(EdgeId::from(1), NodeId::from(0), NodeId::from(2)).unwrap();

        let node_ids: Vec<_> = graph.nodes().map(|n| n.id().index()).collect();
        assert_eq!(node_ids, vec![0, 1, 2]);

        let endpoints: Vec<_> = graph.edges().map(|e| (e.from(), e.to())).collect();
        assert_eq!(
            endpoints,
            vec![
                (NodeId::from(2), NodeId::from(0)),
                (NodeId::from(0), NodeId::from(2)),
            ]
        );
    }
}
