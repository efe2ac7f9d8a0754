//! Schema command - JSON Schema of the configuration document, for editors

use anyhow::Result;
use schemars::schema_for;

use crate::config::Config;
use crate::error::OutputError;
use crate::output;

pub fn execute() -> Result<()> {
    let mut json =
        serde_json::to_string_pretty(&schema_for!(Config)).map_err(OutputError::Serialize)?;
    json.push('\n');
    output::emit(None, &json)?;
    Ok(())
}
