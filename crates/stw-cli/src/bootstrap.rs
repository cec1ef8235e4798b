use anyhow::Context;

/// Load configuration, picking up a `.env` in the working directory first.
pub fn load_config() -> anyhow::Result<stw_config::StewardConfig> {
    stw_config::StewardConfig::load_with_dotenv().context("failed to load steward configuration")
}
