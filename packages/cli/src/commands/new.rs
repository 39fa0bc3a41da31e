use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use folio_model::Article;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct NewArgs {
    /// Article id; also the exported file name
    pub id: String,

    /// Article title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Overwrite an existing file
    #[arg(short, long)]
    pub force: bool,
}

/// The id names a file directly under `--out`, so it must be a single
/// path segment.
fn check_id(id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(anyhow!("Article id must not be empty"));
    }
    if id.contains(|c: char| c == '/' || c == '\\') || id == "." || id == ".." {
        return Err(anyhow!("Article id {:?} must not contain path separators", id));
    }
    Ok(())
}

pub fn new(args: NewArgs, _cwd: &str) -> Result<()> {
    check_id(&args.id)?;

    let mut article = Article::with_id(args.id.clone());
    if let Some(title) = args.title {
        article.title = title;
    }

    let path = args.out.join(article.export_file_name());
    if path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            path.display().to_string().bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    fs::create_dir_all(&args.out)?;
    fs::write(&path, article.to_export_json()?)?;

    println!("  {} Created {}", "✓".green(), path.display());
    println!();
    println!("Next steps:");
    println!("  1. Run: folio serve {}", path.display());
    println!("  2. Fill in the description and cover image, then add blocks");

    Ok(())
}
