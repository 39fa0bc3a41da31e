use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use folio_compiler_html::{compile_article, compile_raw_article, CompileOptions};
use folio_editor::Document;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Exported article ({id}.txt)
    pub input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Render unknown block types as headings instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Emit HTML without indentation
    #[arg(long)]
    pub compact: bool,
}

pub fn render(args: RenderArgs, _cwd: &str) -> Result<()> {
    let options = CompileOptions {
        pretty: !args.compact,
        ..Default::default()
    };
    let html = render_file(&args.input, args.lenient, options)?;

    match &args.out {
        Some(out) => {
            fs::write(out, html)?;
            println!(
                "  {} {} → {}",
                "✓".green(),
                args.input.display(),
                out.display()
            );
        }
        None => print!("{}", html),
    }

    Ok(())
}

pub fn render_file(input: &Path, lenient: bool, options: CompileOptions) -> Result<String> {
    if lenient {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read {}", input.display()))?;
        let value: serde_json::Value = serde_json::from_str(&text)?;
        return Ok(compile_raw_article(&value, options)?);
    }

    let document = Document::load(input)
        .with_context(|| format!("Failed to open {}", input.display()))?;
    Ok(compile_article(document.article(), options))
}
