use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::graph::Vertex;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot open file {}: {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Cannot create file {}: {source}", .path.display())]
    Create { path: PathBuf, source: io::Error },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The vertex table for `count` vertices cannot be allocated.
    #[error("too many vertices: {count}")]
    TooManyVertices { count: usize },

    #[error("vertex {vertex} out of range [0..{size})")]
    VertexOutOfRange { vertex: Vertex, size: usize },
}
