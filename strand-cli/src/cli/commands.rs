//! Command implementations and argument parsing for the strand CLI.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use strand_core::{
    ClusterReport, ExecutionStrategy, PointStore, SpanReport, StrandBuilder, StrandError,
    StrandErrorCode,
};
use strand_providers_text::{TextPointSource, TextPointSourceError, TextPointSourceErrorCode};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_CONNECTIONS: usize = 1000;
const DEFAULT_TOP_K: usize = 3;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "strand",
    about = "Cluster 3-d points by joining their closest pairs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Join the shortest connections and report the largest components.
    Circuits(CircuitsCommand),
    /// Report the connection that first joins every point.
    Span(SpanCommand),
}

/// Options accepted by the `circuits` command.
#[derive(Debug, Args, Clone)]
pub struct CircuitsCommand {
    /// Number of shortest connections to make.
    #[arg(long, default_value_t = DEFAULT_CONNECTIONS)]
    pub connections: usize,

    /// Number of largest components to report.
    #[arg(long = "top-k", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Input configuration.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Options accepted by the `span` command.
#[derive(Debug, Args, Clone)]
pub struct SpanCommand {
    /// Input configuration.
    #[command(flatten)]
    pub input: InputArgs,
}

/// Input arguments shared by every command.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Path to a UTF-8 text file with one `x,y,z` record per line.
    pub path: PathBuf,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,

    /// How neighbour queries are executed.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    pub strategy: StrategyArg,
}

/// Execution strategies selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Use parallel queries when compiled in.
    Auto,
    /// Run on the calling thread.
    Sequential,
    /// Require parallel queries.
    Parallel,
}

impl From<StrategyArg> for ExecutionStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Sequential => Self::Sequential,
            StrategyArg::Parallel => Self::Parallel,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while opening the input.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Point record ingestion failed.
    #[error(transparent)]
    Text(#[from] TextPointSourceError),
    /// Core query failed.
    #[error(transparent)]
    Core(#[from] StrandError),
}

impl CliError {
    /// Returns the stable code of a core failure.
    #[must_use]
    pub const fn code(&self) -> Option<StrandErrorCode> {
        match self {
            Self::Core(err) => Some(err.code()),
            Self::Io { .. } | Self::Text(_) => None,
        }
    }

    /// Returns the stable code of a point ingestion failure.
    #[must_use]
    pub const fn data_source_code(&self) -> Option<TextPointSourceErrorCode> {
        match self {
            Self::Text(err) => Some(err.code()),
            Self::Io { .. } | Self::Core(_) => None,
        }
    }
}

/// Outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionSummary {
    /// Result of the `circuits` command.
    Circuits(ClusterReport),
    /// Result of the `span` command.
    Span(SpanReport),
}

impl ExecutionSummary {
    /// Returns the name of the data source the command ran against.
    #[must_use]
    pub fn data_source(&self) -> &str {
        match self {
            Self::Circuits(report) => report.data_source(),
            Self::Span(report) => report.data_source(),
        }
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or running the query fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use strand_cli::cli::{
/// #     Cli, Command, ExecutionSummary, InputArgs, SpanCommand, StrategyArg, run_cli,
/// # };
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "2,0,0\n3,0,0\n")?;
/// let cli = Cli {
///     command: Command::Span(SpanCommand {
///         input: InputArgs {
///             path: file.path().to_path_buf(),
///             name: None,
///             strategy: StrategyArg::Sequential,
///         },
///     }),
/// };
/// let ExecutionSummary::Span(report) = run_cli(cli)? else {
///     unreachable!("span command yields a span summary");
/// };
/// assert_eq!(report.x_product(), Some(6));
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let summary = match cli.command {
        Command::Circuits(command) => {
            span.record("command", field::display("circuits"));
            ExecutionSummary::Circuits(run_circuits(command)?)
        }
        Command::Span(command) => {
            span.record("command", field::display("span"));
            ExecutionSummary::Span(run_span(command)?)
        }
    };
    info!(data_source = summary.data_source(), "command completed");
    Ok(summary)
}

#[instrument(
    name = "cli.circuits",
    err,
    skip(command),
    fields(
        connections = command.connections,
        top_k = command.top_k,
        strategy = ?command.input.strategy
    ),
)]
pub(super) fn run_circuits(command: CircuitsCommand) -> Result<ClusterReport, CliError> {
    let strand = StrandBuilder::new()
        .with_connections(command.connections)
        .with_top_k(command.top_k)
        .with_execution_strategy(command.input.strategy.into())
        .build()?;
    let store = load_points(&command.input)?;
    Ok(strand.cluster(&store)?)
}

#[instrument(
    name = "cli.span",
    err,
    skip(command),
    fields(strategy = ?command.input.strategy),
)]
pub(super) fn run_span(command: SpanCommand) -> Result<SpanReport, CliError> {
    let strand = StrandBuilder::new()
        .with_execution_strategy(command.input.strategy.into())
        .build()?;
    let store = load_points(&command.input)?;
    Ok(strand.span(&store)?)
}

#[instrument(
    name = "cli.load_points",
    err,
    skip(input),
    fields(
        path = %input.path.display(),
        override_name = field::Empty,
        points = field::Empty
    ),
)]
pub(super) fn load_points(input: &InputArgs) -> Result<PointStore, CliError> {
    let span = Span::current();
    span.record(
        "override_name",
        field::display(input.name.as_deref().unwrap_or("<derived>")),
    );
    let name = derive_data_source_name(&input.path, input.name.as_deref());
    let reader = open_point_reader(&input.path)?;
    let store = TextPointSource::try_from_reader(name, reader)?.into_store();
    span.record("points", store.len());
    Ok(store)
}

pub(super) fn open_point_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "data_source".to_owned())
}

/// Renders `summary` to `writer` as `key: value` lines.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source())?;
    match summary {
        ExecutionSummary::Circuits(report) => {
            writeln!(writer, "points: {}", report.point_count())?;
            writeln!(writer, "edges consumed: {}", report.edges_consumed())?;
            let sizes = report
                .sizes()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            if sizes.is_empty() {
                writeln!(writer, "sizes: none")?;
            } else {
                writeln!(writer, "sizes: {}", sizes.join(", "))?;
            }
            writeln!(writer, "product: {}", report.product())?;
        }
        ExecutionSummary::Span(report) => {
            writeln!(writer, "points: {}", report.point_count())?;
            match report.spanning() {
                Some(pair) => {
                    let (source, target) = pair.edge().endpoints();
                    writeln!(writer, "edge: {source}-{target}")?;
                    writeln!(writer, "rank: {}", pair.rank())?;
                    writeln!(writer, "x product: {}", pair.x_product())?;
                }
                None => writeln!(writer, "edge: none")?,
            }
        }
    }
    Ok(())
}
