pub mod collector;
pub mod domain;
pub mod inference;
pub mod model;
pub mod risk;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    pub const DEFAULT_MODEL_PATH: &str = "loan_default_model.json";
    pub const DEFAULT_PORT: u16 = 3000;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub model_path: PathBuf,
        pub port: u16,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let model_path = std::env::var("MODEL_PATH")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());

            let port = match std::env::var("PORT") {
                Ok(v) => v
                    .trim()
                    .parse::<u16>()
                    .with_context(|| format!("PORT must be a valid port number (got {v:?})"))?,
                Err(_) => DEFAULT_PORT,
            };

            Ok(Self {
                model_path: PathBuf::from(model_path),
                port,
                sentry_dsn: std::env::var("SENTRY_DSN")
                    .ok()
                    .filter(|s| !s.trim().is_empty()),
            })
        }
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                model_path: PathBuf::from(DEFAULT_MODEL_PATH),
                port: DEFAULT_PORT,
                sentry_dsn: None,
            }
        }
    }
}
