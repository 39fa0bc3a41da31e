mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    blocks, new, render, serve, validate, BlocksArgs, NewArgs, RenderArgs, ServeArgs,
    ValidateArgs,
};
use tracing_subscriber::EnvFilter;

/// Folio CLI - block-based article editor
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the editor server
    Serve(ServeArgs),

    /// Render an exported article to HTML
    Render(RenderArgs),

    /// Check an exported article for invalid fields
    Validate(ValidateArgs),

    /// Create an empty article
    New(NewArgs),

    /// List the block types
    Blocks(BlocksArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir.display().to_string(),
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Serve(args) => serve(args, &cwd),
        Command::Render(args) => render(args, &cwd),
        Command::Validate(args) => validate(args, &cwd),
        Command::New(args) => new(args, &cwd),
        Command::Blocks(args) => blocks(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
