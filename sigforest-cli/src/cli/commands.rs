use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use sigforest_core::{
    ConnectReport, ConnectorBuilder, ConnectorError, FormatError, KeySetErrorCode,
    KeyedDisjointSet, ReconstructionError,
};
use sigforest_providers_necklace::{NecklaceCodec, NecklaceError, NecklaceWalkBuilder};
use thiserror::Error;
use tracing::info;

const DEFAULT_ATTEMPTS: usize = 100;
const DEFAULT_COARSE_THRESHOLD: usize = 10;
const DEFAULT_MAX_ROUNDS: usize = 1_000;
const DEFAULT_STEP_LIMIT: u64 = 5_000_000;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "sigforest", about = "Connect components of a necklace census.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Join the census components with biased random walks.
    Connect(ConnectCommand),
    /// Load the census and report its components without searching.
    Components(CensusArgs),
}

/// Census input shared by every command.
#[derive(Debug, Args, Clone)]
pub struct CensusArgs {
    /// Path to a file of whitespace-separated necklace keys.
    pub path: PathBuf,

    /// Override name for the census (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `connect` command.
#[derive(Debug, Args, Clone)]
pub struct ConnectCommand {
    /// Census to connect.
    #[command(flatten)]
    pub census: CensusArgs,

    /// Number of ones walks aim for (defaults from the first component).
    #[arg(long = "target-ones")]
    pub target_ones: Option<usize>,

    /// Number of beads walks aim for (defaults from the first component).
    #[arg(long = "target-len")]
    pub target_len: Option<usize>,

    /// Seed for reproducible runs.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Walks per component and round.
    #[arg(long, default_value_t = DEFAULT_ATTEMPTS)]
    pub attempts: usize,

    /// Component count at which the final phase takes over.
    #[arg(long = "coarse-threshold", default_value_t = DEFAULT_COARSE_THRESHOLD)]
    pub coarse_threshold: usize,

    /// Maximum rounds in each of the coarse and final phases.
    #[arg(long = "max-rounds", default_value_t = DEFAULT_MAX_ROUNDS)]
    pub max_rounds: usize,

    /// Maximum moves per walk.
    #[arg(long = "step-limit", default_value_t = DEFAULT_STEP_LIMIT)]
    pub step_limit: u64,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The census file could not be opened.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// The census could not be read.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The census holds no keys.
    #[error("census `{name}` contains no keys")]
    EmptyCensus {
        /// Name of the empty census.
        name: String,
    },
    /// A stored key is not a valid necklace.
    #[error(transparent)]
    Reconstruction(#[from] ReconstructionError),
    /// The walk configuration was rejected.
    #[error(transparent)]
    Walk(#[from] NecklaceError),
    /// The search failed.
    #[error(transparent)]
    Connector(#[from] ConnectorError),
}

impl CliError {
    /// Stable code of the underlying library error, when there is one.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Format(error) => Some(error.code().as_str()),
            Self::Connector(error) => Some(error.code().as_str()),
            Self::Reconstruction(_) => Some(KeySetErrorCode::Reconstruction.as_str()),
            Self::Io { .. } | Self::EmptyCensus { .. } | Self::Walk(_) => None,
        }
    }
}

/// One line of the rendered component listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentSummary {
    /// Key of the component's representative.
    pub key: String,
    /// Number of items in the component.
    pub size: usize,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name of the census.
    pub source: String,
    /// Distinct items known after the command.
    pub items: usize,
    /// Components in list order.
    pub components: Vec<ComponentSummary>,
    /// Search statistics; absent for `components`.
    pub report: Option<ConnectReport>,
}

impl ExecutionSummary {
    /// Returns whether a single component remains.
    #[must_use]
    pub fn connected(&self) -> bool {
        self.components.len() == 1
    }
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the census or running the search fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sigforest_cli::cli::{CensusArgs, Cli, Command, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "001\n011 0011\n")?;
/// let cli = Cli {
///     command: Command::Components(CensusArgs {
///         path: file.path().to_path_buf(),
///         name: Some("demo".into()),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.components.len(), 3);
/// # Ok(())
/// # }
/// ```
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Connect(command) => run_connect(command),
        Command::Components(census) => run_components(&census),
    }
}

pub(super) fn run_connect(command: ConnectCommand) -> Result<ExecutionSummary, CliError> {
    let mut set = load_census(&command.census)?;

    let first = set
        .components()
        .ok_or_else(|| CliError::EmptyCensus {
            name: set.name().to_owned(),
        })?
        .representative(&set)?;
    let target_ones = command.target_ones.unwrap_or(first.ones().max(1));
    let target_len = command.target_len.unwrap_or(first.len());

    let walk = NecklaceWalkBuilder::new(target_ones, target_len).build()?;
    let mut builder = ConnectorBuilder::new()
        .with_target_size(target_len)
        .with_attempts(command.attempts)
        .with_coarse_threshold(command.coarse_threshold)
        .with_max_rounds(command.max_rounds)
        .with_step_limit(command.step_limit);
    if let Some(seed) = command.seed {
        builder = builder.with_seed(seed);
    }
    let connector = builder.build()?;

    info!(target_ones, target_len, "connecting census");
    let report = connector.run(&mut set, &walk)?;
    Ok(summarise(&set, Some(report)))
}

fn run_components(census: &CensusArgs) -> Result<ExecutionSummary, CliError> {
    let set = load_census(census)?;
    Ok(summarise(&set, None))
}

fn load_census(census: &CensusArgs) -> Result<KeyedDisjointSet<NecklaceCodec>, CliError> {
    let name = derive_census_name(&census.path, census.name.as_deref());
    let file = File::open(&census.path).map_err(|source| CliError::Io {
        path: census.path.clone(),
        source,
    })?;
    let set = KeyedDisjointSet::from_reader(NecklaceCodec, name, BufReader::new(file))?;
    if set.is_empty() {
        return Err(CliError::EmptyCensus {
            name: set.name().to_owned(),
        });
    }
    info!(
        census = set.name(),
        items = set.len(),
        components = set.component_count(),
        "census loaded"
    );
    Ok(set)
}

fn summarise(
    set: &KeyedDisjointSet<NecklaceCodec>,
    report: Option<ConnectReport>,
) -> ExecutionSummary {
    let components = set
        .iter_components()
        .map(|handle| ComponentSummary {
            key: handle.representative_key(set).to_owned(),
            size: handle.size(set),
        })
        .collect();
    ExecutionSummary {
        source: set.name().to_owned(),
        items: set.len(),
        components,
        report,
    }
}

pub(super) fn derive_census_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "census".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sigforest_cli::cli::{ComponentSummary, ExecutionSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     source: "demo".into(),
///     items: 3,
///     components: vec![ComponentSummary { key: "001".into(), size: 3 }],
///     report: None,
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "census: demo\nitems: 3\ncomponents: 1\nconnected: yes\n001\t3\n"
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "census: {}", summary.source)?;
    writeln!(writer, "items: {}", summary.items)?;
    writeln!(writer, "components: {}", summary.components.len())?;
    writeln!(
        writer,
        "connected: {}",
        if summary.connected() { "yes" } else { "no" }
    )?;
    if let Some(report) = &summary.report {
        writeln!(
            writer,
            "rounds: coarse {}, final {}",
            report.coarse_rounds, report.final_rounds
        )?;
        writeln!(writer, "merges: {}", report.merges)?;
        writeln!(writer, "stalled walks: {}", report.stalled_walks)?;
    }
    for component in &summary.components {
        writeln!(writer, "{}\t{}", component.key, component.size)?;
    }
    Ok(())
}
