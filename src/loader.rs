//! Reading graph description files.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

#[allow(unused)]
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::graph::Vertex;

/// Printed when the input is missing or unreadable.
pub const FILE_FORMAT: &str = "\
  File format:

    Lines at the top of the file beginning with '#' are file documentation.
    Once those lines are passed, the remainder of the file is data.

    The data in the file consists of unsigned integers.
    The first number (after documentation) is the vertex count.
    Then there are numbers in pairs representing \"from to\" edges.
    The numbers (which represent vertices) must be in the range [0..VertexCount).

    For example:
      #
      # yada dada
      #
      3
      1 2 1 0
      2 0
      0 1 0 2
    represents a graph with 3 vertices (enumerated 0, 1, 2) and edges
    [1 2] [1 0] [2 0] [0 1] [0 2].
";

/// Vertex count and edges, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphFile {
    pub vertex_count: usize,
    pub edges: Vec<(Vertex, Vertex)>,
}

/// Open a graph file for reading.
pub fn open_input(path: &Path) -> Result<File> {
    let file = File::open(path).map_err(|source| Error::Open {
        path: path.to_owned(),
        source,
    })?;
    info!("loading {}", path.display());
    Ok(file)
}

impl GraphFile {
    pub fn read<R: Read>(mut reader: R) -> Result<GraphFile> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// The data tokens as they appear in the file: `V a b c d ...`.
    pub fn echo(&self) -> String {
        let mut line = self.vertex_count.to_string();
        for (from, to) in &self.edges {
            line.push_str(&format!(" {} {}", from, to));
        }
        line
    }
}

/// Skip the documentation block: consecutive lines starting with `#`.
fn skip_documentation(text: &str) -> &str {
    let mut rest = text;
    while rest.starts_with('#') {
        rest = match rest.find('\n') {
            Some(end) => &rest[end + 1..],
            None => "",
        };
    }
    rest
}

/// Unsigned integers read one after another, each after optional
/// whitespace. A read takes the leading digits of what follows, so `12ab`
/// yields 12 and the next read fails on `ab`. After the first failed read
/// nothing more is produced.
struct Numbers<'a> {
    rest: &'a str,
}

impl Iterator for Numbers<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let text = self.rest.trim_start();
        let end = text
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(text.len());
        match text[..end].parse() {
            Ok(value) => {
                self.rest = &text[end..];
                Some(value)
            }
            Err(_) => {
                if !text.is_empty() {
                    debug!("stop reading at {:?}", text.split_whitespace().next());
                }
                self.rest = "";
                None
            }
        }
    }
}

impl FromStr for GraphFile {
    type Err = Error;

    /// Reading stops at the first failed read, and an unpaired last number
    /// is dropped. Without a vertex count the graph is empty.
    fn from_str(text: &str) -> Result<GraphFile> {
        let mut numbers = Numbers {
            rest: skip_documentation(text),
        };

        let Some(vertex_count) = numbers.next() else {
            warn!("no vertex count, loading an empty graph");
            return Ok(GraphFile::default());
        };

        let mut edges = Vec::new();
        while let Some(from) = numbers.next() {
            match numbers.next() {
                Some(to) => edges.push((from, to)),
                None => warn!("ignoring unpaired vertex {}", from),
            }
        }

        debug!("{} vertices, {} edges", vertex_count, edges.len());
        Ok(GraphFile {
            vertex_count,
            edges,
        })
    }
}
