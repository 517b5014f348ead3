//! Breadth-first and depth-first surveys.
//!
//! A survey walks a graph from one or more roots and records, for every
//! vertex it reaches, the parent in the search tree, the discovery and finish
//! times, and (breadth-first only) the distance from the root.

use std::collections::VecDeque;
use std::fmt;

use clap::ValueEnum;
#[allow(unused)]
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::graph::{Graph, Vertex};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Kind {
    Bfs,
    Dfs,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

pub struct Survey<'g, G: Graph + ?Sized> {
    graph: &'g G,
    time: usize,
    color: Vec<Color>,
    parent: Vec<Option<Vertex>>,
    distance: Vec<Option<usize>>,
    discovery: Vec<Option<usize>>,
    finish: Vec<Option<usize>>,
    order: Vec<Vertex>,
}

impl<'g, G: Graph + ?Sized> Survey<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        let n = graph.vertex_size();
        Survey {
            graph,
            time: 0,
            color: vec![Color::White; n],
            parent: vec![None; n],
            distance: vec![None; n],
            discovery: vec![None; n],
            finish: vec![None; n],
            order: Vec::with_capacity(n),
        }
    }

    pub fn run(&mut self, kind: Kind, start: Option<Vertex>) -> Result<()> {
        match (kind, start) {
            (Kind::Bfs, Some(v)) => self.bfs(v),
            (Kind::Bfs, None) => {
                self.bfs_all();
                Ok(())
            }
            (Kind::Dfs, Some(v)) => self.dfs(v),
            (Kind::Dfs, None) => {
                self.dfs_all();
                Ok(())
            }
        }
    }

    pub fn bfs(&mut self, start: Vertex) -> Result<()> {
        self.check(start)?;
        if self.color[start] == Color::White {
            self.bfs_from(start);
        }
        Ok(())
    }

    /// Breadth-first from every still unvisited vertex, smallest first.
    pub fn bfs_all(&mut self) {
        for v in 0..self.graph.vertex_size() {
            if self.color[v] == Color::White {
                self.bfs_from(v);
            }
        }
    }

    pub fn dfs(&mut self, start: Vertex) -> Result<()> {
        self.check(start)?;
        if self.color[start] == Color::White {
            self.dfs_from(start);
        }
        Ok(())
    }

    /// Depth-first from every still unvisited vertex, smallest first.
    pub fn dfs_all(&mut self) {
        for v in 0..self.graph.vertex_size() {
            if self.color[v] == Color::White {
                self.dfs_from(v);
            }
        }
    }

    fn check(&self, v: Vertex) -> Result<()> {
        if v < self.graph.vertex_size() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                vertex: v,
                size: self.graph.vertex_size(),
            })
        }
    }

    fn discover(&mut self, v: Vertex, parent: Option<Vertex>) {
        self.color[v] = Color::Gray;
        self.parent[v] = parent;
        self.discovery[v] = Some(self.time);
        self.time += 1;
        self.order.push(v);
    }

    fn finish(&mut self, v: Vertex) {
        self.color[v] = Color::Black;
        self.finish[v] = Some(self.time);
        self.time += 1;
    }

    fn bfs_from(&mut self, root: Vertex) {
        debug!("bfs from {}", root);
        self.discover(root, None);
        self.distance[root] = Some(0);

        let mut queue = VecDeque::from([root]);
        while let Some(u) = queue.pop_front() {
            let graph = self.graph;
            for &v in graph.adjacent(u) {
                if self.color[v] == Color::White {
                    self.discover(v, Some(u));
                    self.distance[v] = self.distance[u].map(|d| d + 1);
                    queue.push_back(v);
                }
            }
            self.finish(u);
        }
    }

    fn dfs_from(&mut self, root: Vertex) {
        debug!("dfs from {}", root);
        self.discover(root, None);

        // vertex and index of its next neighbour to examine
        let mut stack = vec![(root, 0)];
        let graph = self.graph;
        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            let neighbours = graph.adjacent(u);
            match neighbours[next..]
                .iter()
                .position(|&v| self.color[v] == Color::White)
            {
                Some(offset) => {
                    top.1 = next + offset + 1;
                    let v = neighbours[next + offset];
                    self.discover(v, Some(u));
                    stack.push((v, 0));
                }
                None => {
                    stack.pop();
                    self.finish(u);
                }
            }
        }
    }

    /// Vertices in discovery order.
    pub fn order(&self) -> &[Vertex] {
        &self.order
    }

    pub fn parent(&self, v: Vertex) -> Option<Vertex> {
        self.parent.get(v).copied().flatten()
    }

    /// Edges from the root; breadth-first surveys only.
    pub fn distance(&self, v: Vertex) -> Option<usize> {
        self.distance.get(v).copied().flatten()
    }

    pub fn discovery_time(&self, v: Vertex) -> Option<usize> {
        self.discovery.get(v).copied().flatten()
    }

    pub fn finish_time(&self, v: Vertex) -> Option<usize> {
        self.finish.get(v).copied().flatten()
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_owned(), |x| x.to_string())
}

impl<G: Graph + ?Sized> fmt::Display for Survey<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  order:")?;
        for v in &self.order {
            write!(f, " {}", v)?;
        }
        writeln!(f)?;
        writeln!(f, "  vertex  parent  distance  discovery  finish")?;
        for v in 0..self.graph.vertex_size() {
            writeln!(
                f,
                "  {:>6}  {:>6}  {:>8}  {:>9}  {:>6}",
                v,
                or_dash(self.parent(v)),
                or_dash(self.distance(v)),
                or_dash(self.discovery_time(v)),
                or_dash(self.finish_time(v)),
            )?;
        }
        Ok(())
    }
}
