// fgraph - a graph functionality test
// load a graph file into an undirected and a directed graph,
// - sizes, dumps, degrees
// - reverse, toposort, degree distribution

use std::ffi::OsString;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::error::ErrorKind;
use colored::Colorize;

use fgraph::{Error, Graph};
use fgraph::graph::Vertex;
use fgraph::graph::survey::Kind;
use fgraph::graph::topology_sort::Method;
use fgraph::loader::FILE_FORMAT;
use fgraph::report::{self, Options, Summary};
use fgraph::utils::init_tracing;

#[allow(unused)]
use tracing::{debug, error, info};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// graph description file
    input: PathBuf,

    /// receives the complete test data
    log: Option<PathBuf>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, short = 'm', value_enum, default_value_t = Method::Kahn)]
    method: Method,

    #[arg(long, short = 's', value_enum)]
    survey: Option<Kind>,

    /// survey root; without it every component is surveyed
    #[arg(long, requires = "survey")]
    start: Option<Vertex>,
}

const EXIT_SUCCESS: u8 = 0;
const EXIT_FAILURE: u8 = 1;

fn usage() -> String {
    format!(
        "  Arguments expected:\n                      1: input filename (required)\n                      2: log filename   (optional)\n{}",
        FILE_FORMAT
    )
}

/// A missing input argument prints the usage text and fails; help, version
/// and other clap errors exit through clap.
fn parse_cli<I, T>(args: I, out: &mut dyn Write) -> Result<Cli, u8>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    match Cli::try_parse_from(args) {
        Ok(cli) => Ok(cli),
        Err(e) if e.kind() == ErrorKind::MissingRequiredArgument => {
            writeln!(out, "{}", usage().red().bold()).ok();
            Err(EXIT_FAILURE)
        }
        Err(e) => e.exit(),
    }
}

/// Report a failed run and choose the process exit status.
fn exit_code(result: &fgraph::Result<Summary>, out: &mut dyn Write, err: &mut dyn Write) -> io::Result<u8> {
    match result {
        Ok(summary) => {
            info!(
                "{} vertices, acyclic: {}",
                summary.directed.vertex_size(),
                summary.top_sort.is_ok()
            );
            Ok(EXIT_SUCCESS)
        }
        Err(e @ Error::Open { .. }) => {
            writeln!(out, "{}. Please try again.", e)?;
            writeln!(out, "{}", FILE_FORMAT)?;
            Ok(EXIT_FAILURE)
        }
        Err(e @ Error::Create { .. }) => {
            writeln!(err, "{}. Please try again", e)?;
            Ok(EXIT_FAILURE)
        }
        Err(e) => {
            error!("{}", e);
            writeln!(err, "fgraph: {}", e)?;
            Ok(EXIT_FAILURE)
        }
    }
}

fn main() -> ExitCode {
    let cli = match parse_cli(std::env::args_os(), &mut io::stdout()) {
        Ok(cli) => cli,
        Err(code) => return ExitCode::from(code),
    };

    init_tracing(cli.verbose);
    debug!("{:?}", cli);

    let options = Options {
        input: cli.input,
        log: cli.log,
        method: cli.method,
        survey: cli.survey,
        start: cli.start,
    };

    let result = report::run(&options, &mut io::stdout().lock());
    let code = exit_code(&result, &mut io::stdout(), &mut io::stderr()).unwrap_or(EXIT_FAILURE);
    ExitCode::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgraph::graph::topology_sort::Cycle;
    use fgraph::{DiGraph, UnGraph};

    fn run_exit_code(result: &fgraph::Result<Summary>) -> (u8, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = exit_code(result, &mut out, &mut err).unwrap();
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_missing_input_argument() {
        let mut out = Vec::new();
        let code = parse_cli(["fgraph"], &mut out).unwrap_err();
        assert_eq!(code, EXIT_FAILURE);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Arguments expected"));
        assert!(text.contains(FILE_FORMAT));
    }

    #[test]
    fn test_arguments() {
        let mut out = Vec::new();
        let cli = parse_cli(["fgraph", "in.txt", "out.log", "-vv", "--method", "dfs"], &mut out).unwrap();
        assert_eq!(cli.input, PathBuf::from("in.txt"));
        assert_eq!(cli.log, Some(PathBuf::from("out.log")));
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.method, Method::Dfs);
        assert!(cli.survey.is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_success_even_with_cycle() {
        let summary = Summary {
            undirected: UnGraph::new(1),
            directed: DiGraph::new(1),
            top_sort: Err(Cycle { partial: vec![] }),
        };
        let (code, out, err) = run_exit_code(&Ok(summary));
        assert_eq!(code, EXIT_SUCCESS);
        assert!(out.is_empty());
        assert!(err.is_empty());
    }

    #[test]
    fn test_unopened_input() {
        let result = Err(Error::Open {
            path: PathBuf::from("missing.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        let (code, out, err) = run_exit_code(&result);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.starts_with("Cannot open file missing.txt"));
        assert!(out.contains(". Please try again.\n"));
        assert!(out.contains(FILE_FORMAT));
        assert!(err.is_empty());
    }

    #[test]
    fn test_uncreated_log() {
        let result = Err(Error::Create {
            path: PathBuf::from("no/dir/fgraph.log"),
            source: io::Error::from(io::ErrorKind::NotFound),
        });
        let (code, out, err) = run_exit_code(&result);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert!(err.starts_with("Cannot create file no/dir/fgraph.log"));
        assert!(err.ends_with(". Please try again\n"));
    }

    #[test]
    fn test_load_failure() {
        let result = Err(Error::VertexOutOfRange { vertex: 4, size: 2 });
        let (code, out, err) = run_exit_code(&result);
        assert_eq!(code, EXIT_FAILURE);
        assert!(out.is_empty());
        assert_eq!(err, "fgraph: vertex 4 out of range [0..2)\n");
    }
}
