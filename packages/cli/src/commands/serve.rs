use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::Document;
use folio_server::Config;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Config file (defaults to folio.config.json in the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exported article to open; starts from an empty article if omitted
    pub article: Option<PathBuf>,
}

pub fn serve(args: ServeArgs, cwd: &str) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => Config::load_file(path)?,
        None => Config::load(cwd)?,
    };
    if let Some(port) = args.port {
        config.http_port = port;
    }
    tracing::debug!(?config, "loaded config");

    let document = match &args.article {
        Some(path) => Document::load(path)
            .with_context(|| format!("Failed to open {}", path.display()))?,
        None => Document::default(),
    };

    println!("{}", "📝 Starting Folio editor...".bright_blue().bold());
    if let Some(path) = &args.article {
        println!("   Article: {}", path.display());
    }
    println!("   Listening on {}", format!("http://{}", config.addr()).cyan());
    println!(
        "   Uploads:  {}",
        display_storage(&config, Path::new(cwd)).bright_white()
    );
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(folio_server::serve(config, document))?;
    Ok(())
}

fn display_storage(config: &Config, cwd: &Path) -> String {
    match config.storage.kind {
        folio_server::StorageKind::Fs => cwd.join(&config.storage.root).display().to_string(),
        folio_server::StorageKind::Memory => "in memory".to_string(),
    }
}
