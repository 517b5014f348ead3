//! Adjacency-list graphs, undirected and directed.

use std::io::{self, Write};

#[allow(unused)]
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::loader::GraphFile;

pub mod distribution;
pub mod survey;
pub mod topology_sort;

pub type Vertex = usize;

/// Operations shared by the undirected and the directed graph.
///
/// Vertices are the integers `0..vertex_size()`. Adjacency lists keep the
/// order in which edges were added, and an edge is never stored twice.
pub trait Graph {
    fn vertex_size(&self) -> usize;
    fn edge_size(&self) -> usize;

    /// Grow or shrink the vertex set. Shrinking drops every edge touching a
    /// removed vertex. Fails when the vertex table cannot be allocated.
    fn set_vertex_size(&mut self, n: usize) -> Result<()>;

    /// Fails when either endpoint is not a vertex; the graph is then unchanged.
    fn add_edge(&mut self, from: Vertex, to: Vertex) -> Result<()>;

    fn has_edge(&self, from: Vertex, to: Vertex) -> bool {
        from < self.vertex_size() && self.adjacent(from).contains(&to)
    }

    /// Neighbours of `v`, or the empty slice when `v` is not a vertex.
    fn adjacent(&self, v: Vertex) -> &[Vertex];

    fn in_degree(&self, v: Vertex) -> usize;

    /// In-degree of every vertex, indexed by vertex.
    fn in_degrees(&self) -> Vec<usize> {
        (0..self.vertex_size()).map(|v| self.in_degree(v)).collect()
    }

    fn out_degree(&self, v: Vertex) -> usize {
        self.adjacent(v).len()
    }

    /// One line per vertex: `[v]: a b c`.
    fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        for v in 0..self.vertex_size() {
            write!(out, "[{}]:", v)?;
            for w in self.adjacent(v) {
                write!(out, " {}", w)?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    /// Build a graph with every edge of `file`, in file order.
    fn from_file(file: &GraphFile) -> Result<Self>
    where
        Self: Sized + Default,
    {
        let mut graph = Self::default();
        graph.set_vertex_size(file.vertex_count)?;
        for &(from, to) in &file.edges {
            graph.add_edge(from, to)?;
        }
        Ok(graph)
    }
}

/// Storage common to both graph kinds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct AdjacencyList {
    adjacency_list: Vec<Vec<Vertex>>,
}

impl AdjacencyList {
    fn len(&self) -> usize {
        self.adjacency_list.len()
    }

    fn with_vertices(n: usize) -> Self {
        AdjacencyList {
            adjacency_list: vec![Vec::new(); n],
        }
    }

    fn resize(&mut self, n: usize) -> Result<()> {
        let additional = n.saturating_sub(self.len());
        self.adjacency_list.try_reserve_exact(additional).map_err(|e| {
            warn!("cannot allocate {} vertices: {}", n, e);
            Error::TooManyVertices { count: n }
        })?;
        self.adjacency_list.resize_with(n, Vec::new);
        for row in self.adjacency_list.iter_mut() {
            row.retain(|&w| w < n);
        }
        Ok(())
    }

    fn check(&self, v: Vertex) -> Result<()> {
        if v < self.len() {
            Ok(())
        } else {
            warn!("vertex {} out of range", v);
            Err(Error::VertexOutOfRange {
                vertex: v,
                size: self.len(),
            })
        }
    }

    fn row(&self, v: Vertex) -> &[Vertex] {
        self.adjacency_list.get(v).map(Vec::as_slice).unwrap_or_default()
    }

    fn contains(&self, from: Vertex, to: Vertex) -> bool {
        self.row(from).contains(&to)
    }

    /// Append unless present. Returns whether the list changed.
    fn push(&mut self, from: Vertex, to: Vertex) -> bool {
        if self.contains(from, to) {
            return false;
        }
        self.adjacency_list[from].push(to);
        true
    }

    fn entries(&self) -> usize {
        self.adjacency_list.iter().map(Vec::len).sum()
    }
}

/// Undirected graph: each edge `{v, w}` is listed under both endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnGraph {
    lists: AdjacencyList,
    edges: usize,
}

impl UnGraph {
    pub fn new(vertices: usize) -> Self {
        UnGraph {
            lists: AdjacencyList::with_vertices(vertices),
            edges: 0,
        }
    }

    /// Degree of `v`; a self loop counts once.
    pub fn degree(&self, v: Vertex) -> usize {
        self.lists.row(v).len()
    }
}

impl Graph for UnGraph {
    fn vertex_size(&self) -> usize {
        self.lists.len()
    }

    fn edge_size(&self) -> usize {
        self.edges
    }

    fn set_vertex_size(&mut self, n: usize) -> Result<()> {
        self.lists.resize(n)?;
        // each edge is seen from its smaller endpoint
        self.edges = (0..n)
            .map(|v| self.lists.row(v).iter().filter(|&&w| w >= v).count())
            .sum();
        Ok(())
    }

    fn add_edge(&mut self, from: Vertex, to: Vertex) -> Result<()> {
        self.lists.check(from)?;
        self.lists.check(to)?;
        if self.lists.push(from, to) {
            self.lists.push(to, from);
            self.edges += 1;
        } else {
            debug!("undirected edge [{},{}] already present", from, to);
        }
        Ok(())
    }

    fn adjacent(&self, v: Vertex) -> &[Vertex] {
        self.lists.row(v)
    }

    fn in_degree(&self, v: Vertex) -> usize {
        self.degree(v)
    }
}

/// Directed graph: edge `(v, w)` is listed under `v` only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DiGraph {
    lists: AdjacencyList,
}

impl DiGraph {
    pub fn new(vertices: usize) -> Self {
        DiGraph {
            lists: AdjacencyList::with_vertices(vertices),
        }
    }

    /// The same vertices with every edge flipped.
    pub fn reverse(&self) -> DiGraph {
        let mut reverse = DiGraph::new(self.vertex_size());
        for (from, row) in self.lists.adjacency_list.iter().enumerate() {
            for &to in row {
                reverse.lists.push(to, from);
            }
        }
        reverse
    }
}

impl Graph for DiGraph {
    fn vertex_size(&self) -> usize {
        self.lists.len()
    }

    fn edge_size(&self) -> usize {
        self.lists.entries()
    }

    fn set_vertex_size(&mut self, n: usize) -> Result<()> {
        self.lists.resize(n)
    }

    fn add_edge(&mut self, from: Vertex, to: Vertex) -> Result<()> {
        self.lists.check(from)?;
        self.lists.check(to)?;
        if !self.lists.push(from, to) {
            debug!("directed edge ({},{}) already present", from, to);
        }
        Ok(())
    }

    fn adjacent(&self, v: Vertex) -> &[Vertex] {
        self.lists.row(v)
    }

    fn in_degree(&self, v: Vertex) -> usize {
        self.lists
            .adjacency_list
            .iter()
            .map(|row| row.iter().filter(|&&w| w == v).count())
            .sum()
    }

    /// One pass over the adjacency lists.
    fn in_degrees(&self) -> Vec<usize> {
        let mut in_degree = vec![0; self.vertex_size()];
        for row in &self.lists.adjacency_list {
            for &w in row {
                in_degree[w] += 1;
            }
        }
        in_degree
    }
}
