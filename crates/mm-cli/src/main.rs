//! MindMapper CLI: headless export, share links, and saved-map management.

mod commands;

use clap::{Parser, Subcommand};
use mm_export::ExportKind;
use std::path::PathBuf;
use std::process::ExitCode;

/// MindMapper - export and share mind maps from the command line
#[derive(Parser)]
#[command(name = "mm")]
#[command(about = "Command-line host for MindMapper mind maps")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a map file as an image or a one-page document
    Export {
        /// Map JSON: `{nodes, connections}`, optionally with a `title`
        map: PathBuf,
        /// Output format: png or pdf
        #[arg(short, long, default_value = "png")]
        format: ExportKind,
        /// Directory to write into
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Document title (defaults to the map's title)
        #[arg(short, long)]
        title: Option<String>,
        /// Export settings JSON
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Encode or decode share links
    Share {
        #[command(subcommand)]
        action: ShareAction,
    },

    /// Manage maps in a map store file
    Maps {
        /// Map store JSON file
        #[arg(short, long)]
        store: PathBuf,

        #[command(subcommand)]
        action: MapsAction,
    },
}

#[derive(Subcommand)]
enum ShareAction {
    /// Print the share segment (or full URL with --origin) for a map file
    Encode {
        map: PathBuf,
        #[arg(short, long)]
        title: Option<String>,
        /// Site origin, e.g. https://example.com
        #[arg(long)]
        origin: Option<String>,
    },
    /// Decode a share segment or URL and print the map JSON
    Decode { segment: String },
}

#[derive(Subcommand)]
enum MapsAction {
    /// List saved maps; the current map is marked with `*`
    List,
    /// Delete a saved map by id
    Delete { id: String },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let result = match cli.command {
        Commands::Export {
            map,
            format,
            out_dir,
            title,
            config,
        } => commands::export(&map, format, &out_dir, title, config.as_deref()).await,
        Commands::Share { action } => match action {
            ShareAction::Encode { map, title, origin } => {
                commands::share_encode(&map, title, origin.as_deref())
            }
            ShareAction::Decode { segment } => commands::share_decode(&segment),
        },
        Commands::Maps { store, action } => match action {
            MapsAction::List => commands::maps_list(&store),
            MapsAction::Delete { id } => commands::maps_delete(&store, &id),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::debug!("{err:?}");
            eprintln!("error: {}", err.user_message());
            ExitCode::FAILURE
        }
    }
}
