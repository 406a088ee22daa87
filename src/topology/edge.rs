use hashbrown::HashSet;

use super::vertex::VertexId;

/// An undirected edge between two vertices.
///
/// Always stored with the lower id first, so two edges over the same pair
/// compare and hash equal regardless of the order they were given in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    a: VertexId,
    b: VertexId,
}

impl Edge {
    /// Creates the canonical edge over `u` and `v`.
    #[must_use]
    pub fn new(u: VertexId, v: VertexId) -> Self {
        if u <= v {
            Self { a: u, b: v }
        } else {
            Self { a: v, b: u }
        }
    }

    /// The lower endpoint.
    #[must_use]
    pub fn a(&self) -> VertexId {
        self.a
    }

    /// The higher endpoint.
    #[must_use]
    pub fn b(&self) -> VertexId {
        self.b
    }

    /// Both endpoints, lower id first.
    #[must_use]
    pub fn endpoints(&self) -> [VertexId; 2] {
        [self.a, self.b]
    }
}

/// Insertion-ordered set of canonical edges.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    edges: Vec<Edge>,
    keys: HashSet<Edge>,
}

impl EdgeList {
    /// Creates an empty edge list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty edge list with room for `capacity` edges.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
            keys: HashSet::with_capacity(capacity),
        }
    }

    /// Adds an edge. Returns `false` if an edge with the same key was already present.
    pub fn insert(&mut self, edge: Edge) -> bool {
        if !self.keys.insert(edge) {
            return false;
        }
        self.edges.push(edge);
        true
    }

    #[must_use]
    pub fn contains(&self, edge: &Edge) -> bool {
        self.keys.contains(edge)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// The edges in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns `true` if both lists hold the same keys, ignoring order.
    #[must_use]
    pub fn same_edges(&self, other: &Self) -> bool {
        self.keys == other.keys
    }
}

impl FromIterator<Edge> for EdgeList {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        let mut list = Self::new();
        for edge in iter {
            list.insert(edge);
        }
        list
    }
}
