//! Init command - writes the built-in configuration as a starting point

use anyhow::{Context, Result};

use super::InitArgs;
use crate::config::BUILTIN_YAML;
use crate::output;

pub fn execute(args: InitArgs) -> Result<()> {
    output::create(&args.output, BUILTIN_YAML, args.force)
        .with_context(|| format!("Failed to initialize {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
