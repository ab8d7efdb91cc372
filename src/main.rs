use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use phpslice::config::parse_mapping;
use phpslice::core::{Framework, ProjectSession};
use phpslice::formatters::{JsonFormatter, ManifestFormatter};
use phpslice::parsers::common::normalize_relative;
use phpslice::parsers::{extract_includes, extract_references};
use phpslice::Settings;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "phpslice",
    version = "0.1.0",
    author = "phpslice developers",
    about = "Extract the minimal file slice of a legacy PHP project"
)]
struct Cli {
    /// Write output to a file instead of stdout
    #[arg(short, long, value_name = "FILE", global = true)]
    output: Option<PathBuf>,

    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Scan a project and print its file list and class index
    Scan {
        /// Project root directory
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        #[command(flatten)]
        project: ProjectArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Resolve the dependencies of selected files
    Analyze {
        /// Project root directory
        #[arg(value_name = "ROOT")]
        root: PathBuf,

        /// Selected files, relative to ROOT
        #[arg(value_name = "FILES", required = true)]
        files: Vec<String>,

        /// Also extract require/include statements
        #[arg(long)]
        includes: bool,

        #[command(flatten)]
        project: ProjectArgs,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Print the class references of one file
    Refs {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Print the include statements of one file
    Includes {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Project root used to resolve include paths
        #[arg(short, long, value_name = "ROOT")]
        root: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct ProjectArgs {
    /// Path convention used to name classes
    #[arg(long, value_enum)]
    framework: Option<FrameworkArg>,

    /// Legacy prefix mapping PREFIX=DIR, in precedence order (repeatable)
    #[arg(short, long = "mapping", value_name = "PREFIX=DIR")]
    mappings: Vec<String>,

    /// TOML settings file with framework and mappings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

impl ProjectArgs {
    fn settings(&self) -> Result<Settings> {
        let base = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };
        let mappings = self
            .mappings
            .iter()
            .map(|arg| parse_mapping(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(base.with_overrides(self.framework.map(Framework::from), mappings))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
enum FrameworkArg {
    Zf1,
    Cakephp,
    Laravel,
}

impl From<FrameworkArg> for Framework {
    fn from(arg: FrameworkArg) -> Self {
        match arg {
            FrameworkArg::Zf1 => Framework::Zf1,
            FrameworkArg::Cakephp => Framework::CakePhp,
            FrameworkArg::Laravel => Framework::Laravel,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum OutputFormat {
    Json,
    JsonCompact,
    /// Sorted file list of the slice (analyze only)
    Manifest,
}

impl OutputFormat {
    fn json_formatter(self) -> JsonFormatter {
        match self {
            OutputFormat::JsonCompact => JsonFormatter::compact(),
            OutputFormat::Json | OutputFormat::Manifest => JsonFormatter::new(),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    run(cli)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        output, command, ..
    } = cli;

    let start_time = Instant::now();

    let rendered = match command {
        Command::Scan {
            root,
            project,
            format,
        } => {
            if format == OutputFormat::Manifest {
                warn!("manifest format applies to analyze; printing JSON");
            }
            let session = ProjectSession::new(project.settings()?);
            let state = session
                .scan(&root)
                .with_context(|| format!("scan failed for {}", root.display()))?;
            format.json_formatter().format_scan(&state.summary())?
        }
        Command::Analyze {
            root,
            files,
            includes,
            project,
            format,
        } => {
            let session = ProjectSession::new(project.settings()?);
            session
                .scan(&root)
                .with_context(|| format!("scan failed for {}", root.display()))?;

            let selected = normalize_selection(&files);
            let result = session.analyze(&selected, includes)?;

            match format {
                OutputFormat::Manifest => ManifestFormatter::new().format(&selected, &result),
                _ => format.json_formatter().format_result(&result)?,
            }
        }
        Command::Refs { file } => {
            let refs = extract_references(&file)?;
            JsonFormatter::new().format_value(&refs)?
        }
        Command::Includes { file, root } => {
            let root = fs::canonicalize(&root)
                .with_context(|| format!("project root is unreachable: {}", root.display()))?;
            let file = fs::canonicalize(&file)
                .with_context(|| format!("file is unreachable: {}", file.display()))?;
            let includes = extract_includes(&file, &root)?;
            JsonFormatter::new().format_value(&includes)?
        }
    };

    emit(&rendered, output.as_deref())?;

    info!(
        "Total execution time: {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(())
}

/// Selection paths as root-relative `/` paths; unusable entries are dropped.
fn normalize_selection(files: &[String]) -> Vec<String> {
    files
        .iter()
        .filter_map(|file| {
            let normalized = normalize_relative(file);
            if normalized.is_none() {
                warn!(file = %file, "ignoring selection outside the project root");
            }
            normalized
        })
        .collect()
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!("Generated {}", path.display());
        }
        None => {
            println!("{}", rendered.trim_end());
        }
    }
    Ok(())
}
