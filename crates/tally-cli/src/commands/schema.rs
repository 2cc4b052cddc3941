use tally_core::SessionState;

/// Handle `tally schema`.
pub fn handle() -> anyhow::Result<()> {
    let schema = schemars::schema_for!(SessionState);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
