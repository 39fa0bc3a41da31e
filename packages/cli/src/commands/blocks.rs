use anyhow::Result;
use clap::Args;
use colored::Colorize;
use folio_model::{default_block, BlockKind};

#[derive(Debug, Args)]
pub struct BlocksArgs {
    /// Also print each type's default content as JSON
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn blocks(args: BlocksArgs, _cwd: &str) -> Result<()> {
    println!("{}", "Block types".bright_blue().bold());
    for kind in BlockKind::ALL {
        println!("  {:<14} {}", kind.as_str().cyan(), kind.label());
        if args.verbose {
            println!("    {}", serde_json::to_string(&default_block(kind))?);
        }
    }
    Ok(())
}
