use apache_catalog::CabinLayout;
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_airline_name")]
    pub airline_name: String,
    #[serde(default)]
    pub cabin: CabinLayout,
}

fn default_airline_name() -> String { "Apache Airlines".to_string() }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Shipped defaults
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides, optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Untracked local overrides
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `APACHE__CABIN__ROWS=60` sets `cabin.rows`
            .add_source(config::Environment::with_prefix("APACHE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
