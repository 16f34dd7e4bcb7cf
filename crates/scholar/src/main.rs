//! Scholar CLI - Main entry point

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scholar_cli::app::App;
use scholar_cli::commands;
use scholar_config::SearchPaths;
use scholar_core::{Format, SortBy};

#[derive(Parser)]
#[command(name = "scholar")]
#[command(version = scholar_util::cli_version())]
#[command(about = "A command-line reference manager", long_about = None)]
struct Cli {
    /// Library to use instead of the configured default
    #[arg(short, long, global = true)]
    library: Option<String>,

    /// Configuration file (default: ./config.yaml, then ~/.config/scholar/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Entry types file (default: ./types.yaml, then ~/.config/scholar/types.yaml)
    #[arg(long, global = true)]
    types: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Do not ask for confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe the available entry types
    Types {
        /// 0: names, 1: required fields, 2: optional fields
        #[arg(default_value_t = 0)]
        level: u8,
    },

    /// Add a new entry
    Add {
        /// Entry type (default: misc, or the type implied by --work)
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,

        /// Metadata record to build the entry from (JSON or YAML)
        #[arg(short, long)]
        work: Option<PathBuf>,

        /// Set a field (FIELD=VALUE)
        #[arg(short, long)]
        set: Vec<String>,

        /// Attach a file to the entry
        #[arg(short, long)]
        attach: Option<PathBuf>,

        /// Open the new entry in the editor
        #[arg(short, long)]
        edit: bool,
    },

    /// Change the type of an entry, attach a file, or edit its record
    Edit {
        /// Search terms selecting one entry
        query: Vec<String>,

        /// Convert the entry to this type
        #[arg(short = 't', long = "type")]
        entry_type: Option<String>,

        /// Attach a file to the entry
        #[arg(short, long)]
        attach: Option<PathBuf>,
    },

    /// Import every entry of a BibTeX or BibLaTeX file
    Import {
        /// File to import
        file: PathBuf,

        /// Library to import into
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Print entries in a bibliography format
    Export {
        /// Search terms (all entries when empty)
        query: Vec<String>,

        /// Output format: biblatex, bibtex or ris (unknown names fall back to biblatex)
        #[arg(short, long, default_value = "biblatex")]
        format: String,
    },

    /// List entries, one per line
    List {
        /// Search terms (all entries when empty)
        query: Vec<String>,

        /// Sort by "modified" or by a required field
        #[arg(short, long, default_value = "modified")]
        sort: String,

        /// Line width
        #[arg(short, long, default_value_t = commands::list::DEFAULT_WIDTH)]
        width: usize,
    },

    /// Show the details of an entry
    Show {
        /// Search terms selecting one entry
        query: Vec<String>,
    },

    /// Remove an entry
    Remove {
        /// Search terms selecting one entry
        query: Vec<String>,
    },

    /// Open the attachment, url or DOI of an entry
    Open {
        /// Search terms selecting one entry
        query: Vec<String>,
    },

    /// Report entries with malformed dates
    Check {
        /// Search terms (all entries when empty)
        query: Vec<String>,
    },

    /// Edit the configuration file
    Config {
        /// Print the configuration and types files in use
        #[arg(long)]
        which: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.quiet {
        "scholar_cli=warn,scholar_core=warn,scholar_config=warn"
    } else {
        "scholar_cli=info,scholar_core=info,scholar_config=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let settings = scholar_config::load_settings(
        &SearchPaths::from_env()?,
        cli.config.as_deref(),
        cli.types.as_deref(),
    )?;
    let app = App::new(settings, cli.library, cli.yes);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Types { level } => {
            commands::types::execute(&app, commands::types::TypesArgs { level }, &mut out)?
        }
        Commands::Add {
            entry_type,
            work,
            set,
            attach,
            edit,
        } => {
            let args = commands::add::AddArgs {
                entry_type,
                work,
                set,
                attach,
                edit,
            };
            commands::add::execute(&app, args, &mut out)?;
        }
        Commands::Edit {
            query,
            entry_type,
            attach,
        } => {
            let args = commands::edit::EditArgs {
                query,
                entry_type,
                attach,
            };
            commands::edit::execute(&app, args, &mut out).await?;
        }
        Commands::Import { file, to } => {
            let args = commands::import::ImportArgs { file, to };
            commands::import::execute(&app, args, &mut out)?;
        }
        Commands::Export { query, format } => {
            let args = commands::export::ExportArgs {
                query,
                format: Format::from_name(&format),
            };
            commands::export::execute(&app, args, &mut out).await?;
        }
        Commands::List { query, sort, width } => {
            let args = commands::list::ListArgs {
                query,
                sort: SortBy::parse(&sort),
                width,
            };
            commands::list::execute(&app, args, &mut out).await?;
        }
        Commands::Show { query } => commands::show::execute(&app, &query, &mut out).await?,
        Commands::Remove { query } => {
            commands::remove::execute(&app, &query, &mut out).await?;
        }
        Commands::Open { query } => commands::open::execute(&app, &query).await?,
        Commands::Check { query } => {
            commands::check::execute(&app, &query, &mut out).await?;
        }
        Commands::Config { which } => {
            let args = commands::config::ConfigArgs { which };
            commands::config::execute(&app, args, &mut out)?
        }
    }

    out.flush()?;
    Ok(())
}
