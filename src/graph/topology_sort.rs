use std::collections::VecDeque;

use clap::ValueEnum;
use thiserror::Error;
#[allow(unused)]
use tracing::{debug, info};

use crate::graph::{DiGraph, Graph, Vertex};

/// The digraph has a cycle. `partial` holds the vertices that were ordered
/// before the sort got stuck.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("digraph has cycle")]
pub struct Cycle {
    pub partial: Vec<Vertex>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// queue of in-degree 0 vertices
    #[default]
    Kahn,
    /// reverse depth-first finish order
    Dfs,
}

pub fn sort(graph: &DiGraph, method: Method) -> Result<Vec<Vertex>, Cycle> {
    match method {
        Method::Kahn => topological_sort(graph),
        Method::Dfs => topological_sort_dfs(graph),
    }
}

/// Performs topological sort on a directed graph using Kahn's algorithm
///
/// Vertices of in-degree 0 enter the queue in increasing order, their
/// successors in adjacency-list order.
///
/// # Returns
/// * `Ok(order)` - Topologically sorted order if graph is acyclic
/// * `Err(Cycle)` - The vertices sorted before the cycle blocked the queue
pub fn topological_sort(graph: &DiGraph) -> Result<Vec<Vertex>, Cycle> {
    let n = graph.vertex_size();
    let mut in_degree = graph.in_degrees();

    let mut queue: VecDeque<Vertex> = (0..n).filter(|&v| in_degree[v] == 0).collect();
    let mut result = Vec::with_capacity(n);

    while let Some(u) = queue.pop_front() {
        result.push(u);

        for &v in graph.adjacent(u) {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                queue.push_back(v);
            }
        }
    }

    if result.len() == n {
        Ok(result)
    } else {
        info!("cycle: sorted {} of {} vertices", result.len(), n);
        Err(Cycle { partial: result })
    }
}

/// Alternative implementation using DFS-based approach
///
/// Roots are tried in increasing order. On a back edge the vertices already
/// finished are returned, latest finish first.
pub fn topological_sort_dfs(graph: &DiGraph) -> Result<Vec<Vertex>, Cycle> {
    let n = graph.vertex_size();
    let mut visited = vec![false; n];
    let mut rec_stack = vec![false; n];
    let mut result = Vec::with_capacity(n);

    for root in 0..n {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        rec_stack[root] = true;

        // vertex and index of its next successor to examine
        let mut stack = vec![(root, 0)];
        while let Some(top) = stack.last_mut() {
            let (u, next) = *top;
            match graph.adjacent(u).get(next) {
                Some(&v) => {
                    top.1 += 1;
                    if rec_stack[v] {
                        debug!("back edge ({},{})", u, v);
                        result.reverse();
                        return Err(Cycle { partial: result });
                    }
                    if !visited[v] {
                        visited[v] = true;
                        rec_stack[v] = true;
                        stack.push((v, 0));
                    }
                }
                None => {
                    stack.pop();
                    rec_stack[u] = false;
                    result.push(u);
                }
            }
        }
    }

    result.reverse();
    Ok(result)
}
