use clap::Parser;
use once_cell::sync::Lazy;

pub static APP_CONFIG: Lazy<Config> = Lazy::new(Config::parse);

#[derive(Debug, Parser, Clone)]
pub struct Config {
    #[clap(long, env, default_value_t = 8080)]
    pub port: u16,

    #[clap(long, env, default_value = "info")]
    pub log_level: String,

    #[clap(long, env, default_value = "sqlite://StudentManager.db?mode=rwc")]
    pub database_url: String,

    #[clap(long, env, default_value_t = 5)]
    pub database_max_connections: u32,

    /// Raw admin token to provision on first start. Generated when unset.
    #[clap(long, env)]
    pub admin_api_key: Option<String>,

    /// Raw assessment token to provision on first start. Generated when
    /// unset.
    #[clap(long, env)]
    pub assessment_api_key: Option<String>,

    #[clap(long, env, default_value = "*")]
    pub cors_allowed_origins: String,

    #[clap(long, env, default_value = "local")]
    pub app_env: String,
}
