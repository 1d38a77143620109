use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use schedule_normalizer::feed::FeedExport;
use schedule_normalizer::normalize::{NormalizeConfig, NormalizeError, Normalizer};
use schedule_normalizer::tables::TableError;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Normalize a transit feed export into rider-facing routes, trips and stops.
///
/// Tables are read from $NORMALIZER_TABLES when set, else the built-in set is used.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Feed export to normalize
    #[arg(required_unless_present = "print_tables")]
    input: Option<PathBuf>,

    /// Where to write the canonical feed; stdout when omitted
    output: Option<PathBuf>,

    /// Print the active tables as JSON and exit
    #[arg(long, conflicts_with_all = ["input", "output"])]
    print_tables: bool,
}

impl Args {
    fn task(self) -> Option<Task> {
        if self.print_tables {
            return Some(Task::PrintTables);
        }
        self.input.map(|input| Task::Normalize {
            input,
            output: self.output,
        })
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid feed export: {0}")]
    Feed(#[source] serde_json::Error),

    #[error("failed to serialize output: {0}")]
    Output(#[source] serde_json::Error),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error(transparent)]
    Table(#[from] TableError),
}

#[derive(Debug)]
enum Task {
    PrintTables,
    Normalize {
        input: PathBuf,
        output: Option<PathBuf>,
    },
}

fn run(task: Task, config: NormalizeConfig) -> Result<(), CliError> {
    match task {
        Task::PrintTables => {
            let tables = config.load_tables()?;
            println!("{}", tables.to_json()?);
        }
        Task::Normalize { input, output } => {
            let normalizer = Normalizer::from_config(config)?;

            let contents = std::fs::read_to_string(&input).map_err(|source| CliError::Read {
                path: input.clone(),
                source,
            })?;
            let export: FeedExport = serde_json::from_str(&contents).map_err(CliError::Feed)?;
            info!(path = %input.display(), trips = export.trips.len(), "read feed export");

            let feed = normalizer.run(&export)?;
            let json = feed.to_json().map_err(CliError::Output)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json).map_err(|source| CliError::Write {
                        path: path.clone(),
                        source,
                    })?;
                    info!(path = %path.display(), "wrote canonical feed");
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(task) = Args::parse().task() else {
        Args::command()
            .error(ErrorKind::MissingRequiredArgument, "a feed export is required")
            .exit()
    };

    match run(task, NormalizeConfig::from_env()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
