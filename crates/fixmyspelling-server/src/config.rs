use miette::miette;
use serde::{Deserialize, Serialize};
use std::{env, fs, time::Duration};

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct CoreConfig {
    pub listen_addr: String,
    pub request_timeout_secs: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8787".into(),
            request_timeout_secs: 30,
        }
    }
}

impl CoreConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct ModelConfig {
    /// Generative Language API root, without the model path.
    pub api_base: String,
    pub model: String,
    pub api_key: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-3-flash-preview".into(),
            api_key: String::new(),
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub core: CoreConfig,
    pub model: ModelConfig,
}

impl Config {
    pub fn load(config_file: &str) -> miette::Result<Config> {
        let config_string = fs::read_to_string(config_file)
            .map_err(|e| miette!("error reading config file {}", e))?;
        Self::parse(&config_string, env::vars())
    }

    /// Parse a config file after substituting `$VAR` with the given variables.
    pub fn parse(
        contents: &str,
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> miette::Result<Config> {
        let mut config_string = contents.to_string();
        // Longest names first so `$API_KEY_2` is not clobbered by `$API_KEY`.
        let mut vars: Vec<_> = vars.into_iter().collect();
        vars.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
        for (k, v) in vars {
            config_string = config_string.replace(&format!("${}", k), &v);
        }

        toml::from_str(&config_string).map_err(|e| miette!("error parsing config file {}", e))
    }
}
