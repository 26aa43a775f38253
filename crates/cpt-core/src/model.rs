//! The SUT data model: a simple directed graph plus start/end designations
//! and an ordered constraint list.
//!
//! Mirrors the two-pass build discipline used elsewhere in this crate's
//! reference ecosystem (nodes first, then edges, with explicit errors for
//! dangling references): vertices and edges are added incrementally and
//! infallibly via [`Graph`], while [`SutBuilder::build`] performs the one
//! fallible validation step — every constraint must reference vertices
//! already present in the graph.
use std::collections::HashMap;

use indexmap::IndexMap;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};

use crate::vertex::VertexId;

/// A test path: a finite ordered sequence of vertices with no further
/// structure attached. See §3 of the specification for the validity
/// conditions ("starts at `start`, ends in `ends`, every consecutive pair is
/// an edge") — those are properties a `TestPath` may or may not have, not
/// invariants enforced by the type itself.
pub type TestPath = Vec<VertexId>;

/// An ordered list of test paths, as produced by a single `generate()` call.
pub type TestSet = Vec<TestPath>;

/// The kind of ordered-pair relationship a [`Constraint`] enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// The pair must occur at least once across the whole test set.
    Positive,
    /// The pair must occur exactly once, and only within one path.
    Once,
    /// The pair must never occur in any emitted path.
    Negative,
    /// The pair may occur at most once across the whole test set.
    MaxOnce,
}

/// An ordered vertex-pair constraint: `(from, to, kind)`.
///
/// Immutable once created. Refers to vertices by identity; a [`Sut`] built
/// via [`SutBuilder::build`] guarantees both endpoints exist in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub from: VertexId,
    pub to: VertexId,
    pub kind: ConstraintKind,
}

impl Constraint {
    pub fn new(from: VertexId, to: VertexId, kind: ConstraintKind) -> Self {
        Self { from, to, kind }
    }
}

/// A simple directed graph: at most one edge per ordered vertex pair, no
/// self-loops.
///
/// Wraps a `petgraph` [`StableDiGraph`] for storage, but enumeration of
/// vertices/edges and of a vertex's incoming/outgoing edges is driven by
/// separate insertion-order indices (`edge_order`, `outgoing`, `incoming`)
/// rather than petgraph's own iteration order, which is not guaranteed to
/// match insertion order. Determinism (§4.7, §9) depends on this.
#[derive(Debug, Default)]
pub struct Graph {
    inner: StableDiGraph<VertexId, ()>,
    index: IndexMap<VertexId, NodeIndex>,
    edge_order: Vec<EdgeIndex>,
    edge_lookup: HashMap<(NodeIndex, NodeIndex), EdgeIndex>,
    outgoing: IndexMap<VertexId, Vec<EdgeIndex>>,
    incoming: IndexMap<VertexId, Vec<EdgeIndex>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex if it is not already present. Idempotent.
    pub fn add_vertex(&mut self, id: &VertexId) -> NodeIndex {
        if let Some(&idx) = self.index.get(id) {
            return idx;
        }
        let idx = self.inner.add_node(id.clone());
        self.index.insert(id.clone(), idx);
        self.outgoing.insert(id.clone(), Vec::new());
        self.incoming.insert(id.clone(), Vec::new());
        idx
    }

    /// Adds an edge `(from, to)`, inserting both endpoints first.
    ///
    /// A no-op if the edge already exists, or if `from == to` (self-loops are
    /// not permitted in a simple directed graph, §3).
    pub fn add_edge(&mut self, from: &VertexId, to: &VertexId) {
        if from == to {
            return;
        }
        let from_idx = self.add_vertex(from);
        let to_idx = self.add_vertex(to);
        if self.edge_lookup.contains_key(&(from_idx, to_idx)) {
            return;
        }
        let edge_idx = self.inner.add_edge(from_idx, to_idx, ());
        self.edge_lookup.insert((from_idx, to_idx), edge_idx);
        self.edge_order.push(edge_idx);
        if let Some(out) = self.outgoing.get_mut(from) {
            out.push(edge_idx);
        }
        if let Some(inc) = self.incoming.get_mut(to) {
            inc.push(edge_idx);
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_order.len()
    }

    pub fn contains_vertex(&self, id: &VertexId) -> bool {
        self.index.contains_key(id)
    }

    /// Returns `true` if the ordered pair `(from, to)` is an edge.
    pub fn contains_edge(&self, from: &VertexId, to: &VertexId) -> bool {
        let (Some(&fi), Some(&ti)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        self.edge_lookup.contains_key(&(fi, ti))
    }

    /// All vertices, in insertion order.
    pub fn vertices(&self) -> impl Iterator<Item = &VertexId> {
        self.index.keys()
    }

    /// All edges as `(from, to)` pairs, in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (&VertexId, &VertexId)> {
        self.edge_order.iter().map(|&idx| self.endpoints(idx))
    }

    /// The outgoing edges of `v` as `(from, to)` pairs, in the order they
    /// were added to the graph.
    pub fn outgoing_edges(&self, v: &VertexId) -> Vec<(VertexId, VertexId)> {
        self.outgoing
            .get(v)
            .map(|edges| edges.iter().map(|&idx| self.owned_endpoints(idx)).collect())
            .unwrap_or_default()
    }

    /// The incoming edges of `v` as `(from, to)` pairs, in the order they
    /// were added to the graph.
    pub fn incoming_edges(&self, v: &VertexId) -> Vec<(VertexId, VertexId)> {
        self.incoming
            .get(v)
            .map(|edges| edges.iter().map(|&idx| self.owned_endpoints(idx)).collect())
            .unwrap_or_default()
    }

    fn endpoints(&self, idx: EdgeIndex) -> (&VertexId, &VertexId) {
        // `edge_order` only ever holds indices this `Graph` itself assigned in
        // `add_edge`, and nothing in this type's API removes an edge, so the
        // index is always live.
        #[allow(clippy::expect_used)]
        let (a, b) = self
            .inner
            .edge_endpoints(idx)
            .expect("edge_order only holds live edge indices");
        (&self.inner[a], &self.inner[b])
    }

    fn owned_endpoints(&self, idx: EdgeIndex) -> (VertexId, VertexId) {
        let (a, b) = self.endpoints(idx);
        (a.clone(), b.clone())
    }
}

/// Errors detected when freezing a [`SutBuilder`] into a [`Sut`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SutBuildError {
    /// No start vertex was designated.
    MissingStart,
    /// The end-vertex set was empty.
    EmptyEnds,
    /// A constraint referenced a vertex absent from the graph.
    UnknownConstraintVertex {
        constraint_index: usize,
        vertex: VertexId,
    },
}

impl std::fmt::Display for SutBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStart => write!(f, "no start vertex was designated"),
            Self::EmptyEnds => write!(f, "the end-vertex set is empty"),
            Self::UnknownConstraintVertex {
                constraint_index,
                vertex,
            } => write!(
                f,
                "constraint #{constraint_index} references unknown vertex {vertex:?}"
            ),
        }
    }
}

impl std::error::Error for SutBuildError {}

/// Builder for a [`Sut`]. Accumulates the graph, start vertex, end-vertex
/// set, and constraint list before a single validation pass in [`build`].
///
/// [`build`]: SutBuilder::build
#[derive(Debug, Default)]
pub struct SutBuilder {
    graph: Graph,
    start: Option<VertexId>,
    ends: IndexMap<VertexId, ()>,
    constraints: Vec<Constraint>,
}

impl SutBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, id: &VertexId) -> &mut Self {
        self.graph.add_vertex(id);
        self
    }

    pub fn add_edge(&mut self, from: &VertexId, to: &VertexId) -> &mut Self {
        self.graph.add_edge(from, to);
        self
    }

    pub fn set_start(&mut self, start: VertexId) -> &mut Self {
        self.graph.add_vertex(&start);
        self.start = Some(start);
        self
    }

    pub fn add_end(&mut self, end: VertexId) -> &mut Self {
        self.graph.add_vertex(&end);
        self.ends.insert(end, ());
        self
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> &mut Self {
        self.constraints.push(constraint);
        self
    }

    /// Validates and freezes the builder into a [`Sut`].
    ///
    /// # Errors
    ///
    /// - [`SutBuildError::MissingStart`] if no start vertex was set.
    /// - [`SutBuildError::EmptyEnds`] if the end-vertex set is empty.
    /// - [`SutBuildError::UnknownConstraintVertex`] if any constraint
    ///   references a vertex not present in the graph.
    pub fn build(self) -> Result<Sut, SutBuildError> {
        let start = self.start.ok_or(SutBuildError::MissingStart)?;
        if self.ends.is_empty() {
            return Err(SutBuildError::EmptyEnds);
        }
        for (i, c) in self.constraints.iter().enumerate() {
            if !self.graph.contains_vertex(&c.from) {
                return Err(SutBuildError::UnknownConstraintVertex {
                    constraint_index: i,
                    vertex: c.from.clone(),
                });
            }
            if !self.graph.contains_vertex(&c.to) {
                return Err(SutBuildError::UnknownConstraintVertex {
                    constraint_index: i,
                    vertex: c.to.clone(),
                });
            }
        }

        Ok(Sut {
            graph: self.graph,
            start,
            ends: self.ends.into_keys().collect(),
            constraints: self.constraints,
        })
    }
}

/// The System Under Test: a frozen, read-only graph plus start/end
/// designations and constraint list.
///
/// Constructed via [`SutBuilder::build`]. Generators and metrics treat a
/// `Sut` as immutable; nothing in this crate mutates one after construction.
#[derive(Debug)]
pub struct Sut {
    graph: Graph,
    start: VertexId,
    ends: Vec<VertexId>,
    constraints: Vec<Constraint>,
}

impl Sut {
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn start(&self) -> &VertexId {
        &self.start
    }

    pub fn ends(&self) -> &[VertexId] {
        &self.ends
    }

    pub fn is_end(&self, v: &VertexId) -> bool {
        self.ends.iter().any(|e| e == v)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;

    fn v(s: &str) -> VertexId {
        VertexId::new(s)
    }

    #[test]
    fn add_edge_is_idempotent() {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"));
        g.add_edge(&v("A"), &v("B"));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.vertex_count(), 2);
    }

    #[test]
    fn add_edge_rejects_self_loops() {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("A"));
        assert_eq!(g.edge_count(), 0);
        assert_eq!(g.vertex_count(), 0);
    }

    #[test]
    fn edges_preserve_insertion_order() {
        let mut g = Graph::new();
        g.add_edge(&v("A"), &v("B"));
        g.add_edge(&v("A"), &v("C"));
        g.add_edge(&v("B"), &v("C"));
        let order: Vec<(String, String)> = g
            .edges()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect();
        assert_eq!(
            order,
            vec![
                ("A".to_owned(), "B".to_owned()),
                ("A".to_owned(), "C".to_owned()),
                ("B".to_owned(), "C".to_owned()),
            ]
        );
    }

    #[test]
    fn builder_requires_start_and_ends() {
        let mut b = SutBuilder::new();
        b.add_edge(&v("A"), &v("B"));
        assert_eq!(b.build().unwrap_err(), SutBuildError::MissingStart);

        let mut b = SutBuilder::new();
        b.add_edge(&v("A"), &v("B"));
        b.set_start(v("A"));
        assert_eq!(b.build().unwrap_err(), SutBuildError::EmptyEnds);
    }

    #[test]
    fn builder_rejects_constraint_on_unknown_vertex() {
        let mut b = SutBuilder::new();
        b.add_edge(&v("A"), &v("B"));
        b.set_start(v("A"));
        b.add_end(v("B"));
        b.add_constraint(Constraint::new(v("A"), v("GHOST"), ConstraintKind::Positive));
        let err = b.build().unwrap_err();
        assert_eq!(
            err,
            SutBuildError::UnknownConstraintVertex {
                constraint_index: 0,
                vertex: v("GHOST"),
            }
        );
    }

    #[test]
    fn start_may_equal_an_end() {
        let mut b = SutBuilder::new();
        b.set_start(v("START"));
        b.add_end(v("START"));
        let sut = b.build().expect("should build");
        assert_eq!(sut.start(), &v("START"));
        assert!(sut.is_end(&v("START")));
    }
}
