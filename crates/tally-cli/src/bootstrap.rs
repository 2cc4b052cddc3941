use anyhow::Context;

/// Load `.env`, the TOML layers and `TALLY_*` overrides.
pub fn load_config() -> anyhow::Result<tally_config::TallyConfig> {
    tally_config::TallyConfig::load_with_dotenv().context("failed to load tally configuration")
}
