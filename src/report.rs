//! The graph functionality test: load, exercise and report.
//!
//! Everything goes to the given output; a log file, when requested, gets
//! the complete data (dumps and per-vertex degrees) in addition.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{Error, Result};
use crate::graph::distribution::out_degree_distribution;
use crate::graph::survey::{Kind, Survey};
use crate::graph::topology_sort::{self, Cycle, Method};
use crate::graph::{DiGraph, Graph, UnGraph, Vertex};
use crate::loader::{GraphFile, open_input};
use crate::utils::underline;

#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: PathBuf,
    pub log: Option<PathBuf>,
    pub method: Method,
    pub survey: Option<Kind>,
    /// Survey root; all components when absent.
    pub start: Option<Vertex>,
}

/// What a run computed.
#[derive(Debug)]
pub struct Summary {
    pub undirected: UnGraph,
    pub directed: DiGraph,
    pub top_sort: std::result::Result<Vec<Vertex>, Cycle>,
}

fn create_log(path: &Path) -> Result<BufWriter<File>> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| Error::Create {
            path: path.to_owned(),
            source,
        })
}

fn join(vertices: &[Vertex]) -> String {
    vertices
        .iter()
        .map(Vertex::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_graph_data<G: Graph>(log: &mut dyn Write, name: &str, graph: &G) -> Result<()> {
    writeln!(log, "\n{}graph data:\n", name)?;
    writeln!(log, "{}Graph.VrtxSize(): {}", name, graph.vertex_size())?;
    writeln!(log, "{}Graph.EdgeSize(): {}", name, graph.edge_size())?;
    writeln!(log, "{}Graph.Dump(): ", name)?;
    graph.dump(log)?;
    for (v, in_degree) in graph.in_degrees().into_iter().enumerate() {
        writeln!(log, "{}Graph.InDegree({})  == {}", name, v, in_degree)?;
        writeln!(log, "{}Graph.OutDegree({}) == {}", name, v, graph.out_degree(v))?;
    }
    Ok(())
}

pub fn run(options: &Options, out: &mut dyn Write) -> Result<Summary> {
    let input = options.input.display().to_string();

    writeln!(out, "\n  Welcome to fgraph - a graph functionality test")?;
    writeln!(out, "  Input file: {}", input)?;
    match &options.log {
        Some(log) => writeln!(out, "    Log file: {}", log.display())?,
        None => writeln!(out, "    No log file")?,
    }

    let input_file = open_input(&options.input)?;
    let mut log = options.log.as_deref().map(create_log).transpose()?;

    if let (Some(log), Some(path)) = (log.as_mut(), &options.log) {
        writeln!(log, "{}\n", underline(&path.display().to_string()))?;
    }

    write!(out, "Loading from file {}...", input)?;
    out.flush()?;
    let file = GraphFile::read(BufReader::new(input_file))?;
    if let Some(log) = log.as_mut() {
        writeln!(log, "input from file {}:", input)?;
        writeln!(log, "{}", file.echo())?;
    }
    let undirected = UnGraph::from_file(&file)?;
    let directed = DiGraph::from_file(&file)?;
    writeln!(out, "\nLoad complete.")?;
    info!(
        "loaded {} vertices, {} edges",
        file.vertex_count,
        file.edges.len()
    );

    writeln!(out, "unGraph.VrtxSize(): {}", undirected.vertex_size())?;
    writeln!(out, "unGraph.EdgeSize(): {}", undirected.edge_size())?;
    writeln!(out, "diGraph.VrtxSize(): {}", directed.vertex_size())?;
    writeln!(out, "diGraph.EdgeSize(): {}", directed.edge_size())?;

    let reverse = directed.reverse();
    writeln!(out, "diGraph.Dump():")?;
    directed.dump(out)?;
    writeln!(out, "reverse.Dump():")?;
    reverse.dump(out)?;

    if let Some(log) = log.as_mut() {
        write_graph_data(log, "un", &undirected)?;
        write_graph_data(log, "di", &directed)?;
    }

    let top_sort = topology_sort::sort(&directed, options.method);
    let (heading, order) = match &top_sort {
        Ok(order) => ("Top Sort: ".to_owned(), order),
        Err(cycle) => (
            format!("No Top Sort: {}\nPartial Top Sort: ", cycle),
            &cycle.partial,
        ),
    };
    writeln!(out, "{}{}", heading, join(order))?;

    writeln!(out, " Undirected Graph:")?;
    write!(out, "{}", out_degree_distribution(&undirected))?;
    writeln!(out, " Directed Graph:")?;
    write!(out, "{}", out_degree_distribution(&directed))?;

    if let Some(kind) = options.survey {
        let mut un_survey = Survey::new(&undirected);
        un_survey.run(kind, options.start)?;
        let mut di_survey = Survey::new(&directed);
        di_survey.run(kind, options.start)?;

        writeln!(out, " Undirected Graph {:?} survey:", kind)?;
        write!(out, "{}", un_survey)?;
        writeln!(out, " Directed Graph {:?} survey:", kind)?;
        write!(out, "{}", di_survey)?;
    }

    if let Some(mut log) = log {
        writeln!(log, "{}{}", heading, join(order))?;
        log.flush()?;
    }

    if let Some(path) = &options.log {
        writeln!(out, "See file {} for complete test data", path.display())?;
    }

    Ok(Summary {
        undirected,
        directed,
        top_sort,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const EXAMPLE: &str = "#\n# yada dada\n#\n3\n1 2 1 0\n2 0\n0 1 0 2\n";

    fn options(dir: &TempDir, input: &str) -> Options {
        let path = dir.path().join("graph.txt");
        fs::write(&path, input).unwrap();
        Options {
            input: path,
            ..Options::default()
        }
    }

    fn run_to_string(options: &Options) -> (Result<Summary>, String) {
        let mut out = Vec::new();
        let summary = run(options, &mut out);
        (summary, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_example_without_log() {
        let dir = TempDir::new().unwrap();
        let options = options(&dir, EXAMPLE);
        let (summary, text) = run_to_string(&options);
        let summary = summary.unwrap();

        assert_eq!(summary.undirected.edge_size(), 3);
        assert_eq!(summary.directed.edge_size(), 5);
        assert!(summary.top_sort.is_err());

        assert!(text.contains("    No log file\n"));
        assert!(text.contains("unGraph.VrtxSize(): 3\n"));
        assert!(text.contains("unGraph.EdgeSize(): 3\n"));
        assert!(text.contains("diGraph.EdgeSize(): 5\n"));
        assert!(text.contains("diGraph.Dump():\n[0]: 1 2\n[1]: 2 0\n[2]: 0\n"));
        assert!(text.contains("reverse.Dump():\n[0]: 1 2\n[1]: 0\n[2]: 0 1\n"));
        assert!(text.contains("No Top Sort: digraph has cycle\nPartial Top Sort: \n"));
        assert!(text.contains(" Undirected Graph:\n"));
        assert!(!text.contains("See file"));
    }

    #[test]
    fn test_dag_with_log() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir, "4\n0 1 0 2\n1 3 2 3\n");
        let log_path = dir.path().join("fgraph.log");
        options.log = Some(log_path.clone());

        let (summary, text) = run_to_string(&options);
        assert_eq!(summary.unwrap().top_sort, Ok(vec![0, 1, 2, 3]));
        assert!(text.contains("Top Sort: 0 1 2 3\n"));
        assert!(text.contains(&format!("See file {} for complete test data", log_path.display())));

        let log = fs::read_to_string(&log_path).unwrap();
        let name = log_path.display().to_string();
        assert!(log.starts_with(&format!("{}\n{}\n\n", name, "-".repeat(name.len()))));
        assert!(log.contains("input from file"));
        assert!(log.contains("\n4 0 1 0 2 1 3 2 3\n"));
        assert!(log.contains("unGraph.InDegree(3)  == 2\n"));
        assert!(log.contains("diGraph.InDegree(3)  == 2\n"));
        assert!(log.contains("diGraph.OutDegree(3) == 0\n"));
        assert!(log.ends_with("Top Sort: 0 1 2 3\n"));
    }

    #[test]
    fn test_survey_section() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir, "3\n0 1\n");
        options.survey = Some(Kind::Dfs);
        options.method = Method::Dfs;

        let (summary, text) = run_to_string(&options);
        assert_eq!(summary.unwrap().top_sort, Ok(vec![2, 0, 1]));
        assert!(text.contains(" Undirected Graph Dfs survey:\n  order: 0 1 2\n"));
        assert!(text.contains(" Directed Graph Dfs survey:\n"));
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let options = Options {
            input: dir.path().join("nothing.txt"),
            ..Options::default()
        };
        let (summary, text) = run_to_string(&options);
        assert!(matches!(summary, Err(Error::Open { .. })));
        assert!(text.contains("Welcome to fgraph"));
    }

    #[test]
    fn test_unwritable_log() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir, EXAMPLE);
        options.log = Some(dir.path().join("no/such/dir/fgraph.log"));
        let (summary, _) = run_to_string(&options);
        assert!(matches!(summary, Err(Error::Create { .. })));
    }

    #[test]
    fn test_unwritable_log_reported_before_reading() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir, "2\n0 1 1 2\n");
        options.log = Some(dir.path().join("no/such/dir/fgraph.log"));
        let (summary, text) = run_to_string(&options);
        assert!(matches!(summary, Err(Error::Create { .. })));
        assert!(!text.contains("Loading from file"));
    }

    #[test]
    fn test_input_without_vertex_count() {
        let dir = TempDir::new().unwrap();
        let options = options(&dir, "# only docs\n");
        let (summary, text) = run_to_string(&options);
        let summary = summary.unwrap();
        assert_eq!(summary.directed.vertex_size(), 0);
        assert_eq!(summary.top_sort, Ok(vec![]));
        assert!(text.contains("unGraph.VrtxSize(): 0\n"));
        assert!(text.contains("Top Sort: \n"));
    }

    #[test]
    fn test_huge_vertex_count() {
        let dir = TempDir::new().unwrap();
        let options = options(&dir, "1000000000000000000\n0 1\n");
        let (summary, _) = run_to_string(&options);
        assert!(matches!(summary, Err(Error::TooManyVertices { .. })));
    }

    #[test]
    fn test_vertex_out_of_range() {
        let dir = TempDir::new().unwrap();
        let options = options(&dir, "2\n0 1 1 2\n");
        let (summary, _) = run_to_string(&options);
        assert!(matches!(
            summary,
            Err(Error::VertexOutOfRange { vertex: 2, size: 2 })
        ));
    }

    #[test]
    fn test_survey_start_out_of_range() {
        let dir = TempDir::new().unwrap();
        let mut options = options(&dir, "2\n0 1\n");
        options.survey = Some(Kind::Bfs);
        options.start = Some(7);
        let (summary, _) = run_to_string(&options);
        assert!(matches!(summary, Err(Error::VertexOutOfRange { vertex: 7, .. })));
    }
}
