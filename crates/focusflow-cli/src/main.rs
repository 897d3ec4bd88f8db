use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "focusflow", version, about = "FocusFlow study, work and health planner")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Study timetable generation
    Study {
        #[command(subcommand)]
        action: commands::study::StudyAction,
    },
    /// Meetings, deadlines and the balanced work schedule
    Work {
        #[command(subcommand)]
        action: commands::work::WorkAction,
    },
    /// Daily health tracking and wellness score
    Health {
        #[command(subcommand)]
        action: commands::health::HealthAction,
    },
    /// Per-day completion and wellness history
    Stats,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FOCUSFLOW_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Study { action } => commands::study::run(action),
        Commands::Work { action } => commands::work::run(action),
        Commands::Health { action } => commands::health::run(action),
        Commands::Stats => commands::stats::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
