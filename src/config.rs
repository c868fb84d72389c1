use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub aws: AwsConfig,
    #[serde(default)]
    pub forecast: ForecastConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".into()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Deserialize, Clone)]
pub struct AwsConfig {
    #[serde(default = "default_region")]
    pub region: String,
    pub sns_topic_arn: String,
}

fn default_region() -> String {
    "us-east-1".into()
}

#[derive(Debug, Deserialize, Clone)]
pub struct ForecastConfig {
    /// Future periods to extrapolate.
    #[serde(default = "default_horizon")]
    pub horizon: usize,
    /// History window for the forecast and dashboard endpoints.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: i64,
    /// History window for the suggestions endpoints.
    #[serde(default = "default_suggestion_days")]
    pub suggestion_days: i64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: default_horizon(),
            lookback_days: default_lookback_days(),
            suggestion_days: default_suggestion_days(),
        }
    }
}

fn default_horizon() -> usize {
    3
}

fn default_lookback_days() -> i64 {
    180
}

fn default_suggestion_days() -> i64 {
    30
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("COSTWATCH").separator("__"))
            .build()?;

        let app_config: AppConfig = config.try_deserialize()?;
        Ok(app_config)
    }
}
