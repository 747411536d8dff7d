//! CLI frontend for the Blackwood interactive fiction engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "bw",
    about = "Blackwood: an interactive fiction engine and its Blackwood Manor mystery",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the investigation
    Play {
        /// Story file (JSON); the built-in Blackwood Manor story if omitted
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Engine config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Hours on the clock at the start (overrides the config file)
        #[arg(short, long)]
        time: Option<i32>,

        /// Unset flags fail every flag requirement, including `= false`
        #[arg(long)]
        strict_flags: bool,

        /// Milliseconds per character when printing story text
        #[arg(long, default_value = "0")]
        typing_delay: u64,

        /// Emit one JSON object per turn instead of formatted text
        #[arg(long)]
        json: bool,

        /// Also list choices whose requirements are not met
        #[arg(long)]
        show_locked: bool,
    },

    /// Validate a story file and report problems
    Check {
        /// Story file (JSON); the built-in story if omitted
        #[arg(short, long)]
        content: Option<PathBuf>,
    },

    /// List the locations of a story
    List {
        /// Story file (JSON); the built-in story if omitted
        #[arg(short, long)]
        content: Option<PathBuf>,
    },

    /// Show a location with its choices, requirements, and effects
    Show {
        /// Location id
        location: String,

        /// Story file (JSON); the built-in story if omitted
        #[arg(short, long)]
        content: Option<PathBuf>,
    },

    /// Display the choice graph as ASCII edges
    Graph {
        /// Only show edges into and out of this location
        #[arg(short, long)]
        focus: Option<String>,

        /// Story file (JSON); the built-in story if omitted
        #[arg(short, long)]
        content: Option<PathBuf>,
    },

    /// List the endings in resolution priority
    Endings {
        /// Story file (JSON); the built-in story if omitted
        #[arg(short, long)]
        content: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            content,
            config,
            time,
            strict_flags,
            typing_delay,
            json,
            show_locked,
        } => commands::play::run(
            content.as_deref(),
            &commands::play::PlayOptions {
                config,
                time,
                strict_flags,
                typing_delay,
                json,
                show_locked,
            },
        ),
        Commands::Check { content } => commands::check::run(content.as_deref()),
        Commands::List { content } => commands::list::run(content.as_deref()),
        Commands::Show { location, content } => commands::show::run(content.as_deref(), &location),
        Commands::Graph { focus, content } => {
            commands::graph::run(content.as_deref(), focus.as_deref())
        }
        Commands::Endings { content } => commands::endings::run(content.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
