use crate::countries;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name of the environment variable holding the Gemini API key. The key
    /// itself never lives in the config file.
    pub api_key_env: String,
    pub endpoint: String,
    pub model: String,
    pub timeout_seconds: u64,
    /// How many keyword suggestions to request per topic.
    pub keyword_count: u32,
    pub keyword_temperature: f32,
    pub keyword_top_p: f32,
    pub ideas_temperature: f32,
    pub default_country: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_key_env: "GEMINI_API_KEY".to_string(),
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 60,
            keyword_count: 100,
            keyword_temperature: 0.7,
            keyword_top_p: 0.95,
            ideas_temperature: 0.8,
            default_country: countries::DEFAULT_COUNTRY.to_string(),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> anyhow::Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
