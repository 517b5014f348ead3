pub mod error;
pub mod graph;
pub mod loader;
pub mod report;
pub mod utils;

pub use error::{Error, Result};
pub use graph::{DiGraph, Graph, UnGraph, Vertex};
pub use loader::GraphFile;
