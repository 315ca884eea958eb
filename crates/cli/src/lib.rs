use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use viewer_core::{Home, RecentFileEntry, Storage, ViewerConfig};

#[derive(Debug, Parser)]
#[command(name = "pdf-viewer")]
#[command(about = "Open PDFs and manage recently opened documents")]
pub struct Cli {
    /// Directory holding persisted state.
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// JSON configuration file; environment variables are used when omitted.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Open a local PDF or an http(s) URL and record it.
    Open {
        #[arg(value_name = "PATH_OR_URL")]
        input: String,
    },
    /// Open the bundled sample document.
    Sample,
    /// List recently opened documents, most recent first.
    Recent {
        #[arg(long)]
        json: bool,
    },
    /// Forget a document by path or URL.
    Remove {
        #[arg(value_name = "PATH_OR_URL")]
        identifier: String,
    },
    /// Forget all documents.
    Clear,
    /// Print CLI version.
    Version,
}

#[derive(Debug, Serialize)]
struct RecentOutput {
    title: String,
    identifier: String,
    is_remote: bool,
    opened_at: String,
    size_bytes: Option<u64>,
    subtitle: String,
}

impl From<&RecentFileEntry> for RecentOutput {
    fn from(entry: &RecentFileEntry) -> Self {
        Self {
            title: entry.title().to_owned(),
            identifier: entry.identifier().to_owned(),
            is_remote: entry.is_remote(),
            opened_at: entry.opened_at().to_rfc3339_opts(SecondsFormat::Millis, true),
            size_bytes: entry.size_bytes(),
            subtitle: entry.subtitle(),
        }
    }
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let Cli { data_dir, config, command } = Cli::parse_from(args);

    // Version needs no configuration.
    if let Commands::Version = command {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = load_config(config.as_deref(), data_dir.as_deref())?;
    log::debug!("using data directory {}", config.data_dir.display());
    let mut home = Home::from_config(config);

    run_command(&mut home, command)
}

fn run_command(home: &mut Home<Storage>, command: Commands) -> Result<()> {
    match command {
        Commands::Open { input } => {
            let (entry, _session) =
                home.open_input(&input).with_context(|| format!("failed to open {input}"))?;
            println!("open:{}", entry.identifier());
        }
        Commands::Sample => {
            let (entry, _session) = home.open_sample().context("failed to open sample")?;
            println!("open:{}", entry.identifier());
        }
        Commands::Recent { json } => print_recent(&home.recent(), json)?,
        Commands::Remove { identifier } => {
            home.remove(&identifier);
            println!("removed:{identifier}");
        }
        Commands::Clear => {
            home.clear();
            println!("cleared");
        }
        Commands::Version => {}
    }

    Ok(())
}

fn load_config(config_file: Option<&Path>, data_dir: Option<&Path>) -> Result<ViewerConfig> {
    let config = match config_file {
        Some(path) => ViewerConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ViewerConfig::from_env().context("invalid environment configuration")?,
    };

    Ok(match data_dir {
        Some(dir) => config.with_data_dir(dir),
        None => config,
    })
}

fn print_recent(entries: &[RecentFileEntry], json: bool) -> Result<()> {
    if json {
        let payload: Vec<RecentOutput> = entries.iter().map(RecentOutput::from).collect();
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("no recent files");
        return Ok(());
    }

    for entry in entries {
        println!("{} • {}", entry.title(), entry.subtitle());
        println!("    {}", entry.identifier());
    }

    Ok(())
}
