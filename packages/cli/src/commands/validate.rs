use anyhow::{anyhow, Context, Result};
use clap::Args;
use colored::Colorize;
use folio_editor::Document;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Exported article ({id}.txt)
    pub input: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn validate(args: ValidateArgs, _cwd: &str) -> Result<()> {
    let document = Document::load(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let report = document.validate();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("🔍 {} {}", "Validating".green().bold(), args.input.display());
        for error in &report.errors {
            println!(
                "   {} {} {}",
                "✗".red(),
                error.path.to_string().bright_white(),
                error.message
            );
        }
    }

    if report.is_valid() {
        if !args.json {
            println!("   {} {} blocks, no errors", "✓".green(), document.article().body.len());
        }
        Ok(())
    } else {
        Err(anyhow!("{} invalid field(s)", report.errors.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_article_fails() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("x.txt");
        std::fs::write(
            &input,
            r#"{ "id": "x", "title": "", "category": "case",
                 "meta": { "description": "d", "coverImage": "https://a.example/c.png" },
                 "body": [] }"#,
        )
        .unwrap();

        let err = validate(ValidateArgs { input, json: false }, ".").unwrap_err();
        assert_eq!(err.to_string(), "1 invalid field(s)");
    }
}
