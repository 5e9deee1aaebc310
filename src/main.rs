use std::io;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};

use unitdash::cache::UnitCache;
use unitdash::clock::{Clock, SystemClock};
use unitdash::commands::{cmd_create, cmd_ls, cmd_show, cmd_status};
use unitdash::mutation::StatusMutator;
use unitdash::remote::{Config, HttpUnitService, UnitService};
use unitdash::types::{UnitStatus, UnitType, VALID_STATUSES, VALID_TYPES};

#[derive(Parser)]
#[command(name = "unitdash")]
#[command(about = "Dashboard client for remote unit management")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List units, optionally filtered
    #[command(visible_alias = "l")]
    Ls {
        /// Filter by name
        #[arg(long)]
        name: Option<String>,

        /// Type: capsule, cabin, room, tent (case-insensitive)
        #[arg(short = 't', long = "type", value_parser = parse_type)]
        unit_type: Option<UnitType>,

        /// Status: available, occupied, cleaning, maintenance
        #[arg(short, long, value_parser = parse_status)]
        status: Option<UnitStatus>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show details for a unit
    #[command(visible_alias = "s")]
    Show {
        /// Unit id
        id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a new unit
    #[command(visible_alias = "c")]
    Create {
        /// Unit name
        name: String,

        /// Type: capsule, cabin, room, tent (default: capsule)
        #[arg(short = 't', long = "type", default_value = "capsule", value_parser = parse_type)]
        unit_type: UnitType,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change a unit's status
    Status {
        /// Unit id
        id: u64,

        /// New status: available, occupied, cleaning, maintenance
        #[arg(value_parser = parse_status)]
        status: UnitStatus,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn parse_type(s: &str) -> Result<UnitType, String> {
    UnitType::from_str(s)
        .map_err(|_| format!("invalid type '{s}', expected one of: {}", VALID_TYPES.join(", ")))
}

fn parse_status(s: &str) -> Result<UnitStatus, String> {
    UnitStatus::from_str(s).map_err(|_| {
        format!(
            "invalid status '{s}', expected one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> unitdash::Result<()> {
    if let Commands::Completions { shell } = cli.command {
        generate(shell, &mut Cli::command(), "unitdash", &mut io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let service: Arc<dyn UnitService> = Arc::new(HttpUnitService::from_config(&config)?);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = UnitCache::new(Arc::clone(&service), Arc::clone(&clock));
    let mutator = StatusMutator::new(Arc::clone(&service), cache.clone(), clock);

    match cli.command {
        Commands::Ls {
            name,
            unit_type,
            status,
            json,
        } => cmd_ls(&cache, name.as_deref(), unit_type, status, json).await,
        Commands::Show { id, json } => cmd_show(service.as_ref(), id, json).await,
        Commands::Create {
            name,
            unit_type,
            json,
        } => cmd_create(&mutator, &name, unit_type, json).await,
        Commands::Status { id, status, json } => cmd_status(&mutator, id, status, json).await,
        Commands::Completions { .. } => unreachable!("handled above"),
    }
}
