//! Layout command - prints the computed scene as JSON

use anyhow::{Context, Result};

use super::render::prepare;
use super::LayoutArgs;
use crate::error::OutputError;
use crate::output;

pub fn execute(args: LayoutArgs) -> Result<()> {
    let prepared = prepare(&args.render)?;
    let mut json =
        serde_json::to_string_pretty(&prepared.scene()).map_err(OutputError::Serialize)?;
    json.push('\n');

    output::emit(args.render.output.as_deref(), &json).context("Failed to write layout")?;
    Ok(())
}
