use std::{
    env,
    path::PathBuf,
};

const MEDIA_DIR_FALLBACK: &str = "media_files";
const DATA_DIR_NAME: &str = ".daneo";

/// Explicit configuration passed into every component that needs it.
/// There is no process-global state; construct one of these at startup
/// and hand out references.
#[derive(Debug, Clone)]
pub struct Config {
    /// KRDict open-API key. Category fetching fails fast without one.
    pub api_key: Option<String>,
    /// Where downloaded images and synthesized audio land.
    pub media_dir: PathBuf,
    /// Root for exported CSV collections.
    pub data_dir: PathBuf,
    /// Prepended to every image-search query.
    pub query_prefix: String,
    /// Appended to every image-search query.
    pub query_suffix: String,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .map(|home| home.join(DATA_DIR_NAME))
            .unwrap_or_else(|| PathBuf::from(DATA_DIR_NAME));

        Config {
            api_key: None,
            media_dir: PathBuf::from(MEDIA_DIR_FALLBACK),
            data_dir,
            query_prefix: String::new(),
            query_suffix: String::new(),
        }
    }
}

impl Config {
    /// Builds a config from the environment, reading a `.env` file first
    /// when one is present. Missing variables keep their defaults.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let mut config = Config::default();

        if let Ok(key) = env::var("KRDICT_API_KEY") {
            if !key.is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Ok(dir) = env::var("DANEO_MEDIA_DIR") {
            if !dir.is_empty() {
                config.media_dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = env::var("DANEO_DATA_DIR") {
            if !dir.is_empty() {
                config.data_dir = PathBuf::from(dir);
            }
        }
        if let Ok(prefix) = env::var("DANEO_QUERY_PREFIX") {
            config.query_prefix = prefix;
        }
        if let Ok(suffix) = env::var("DANEO_QUERY_SUFFIX") {
            config.query_suffix = suffix;
        }

        config
    }

    /// Wraps an image-search query with the configured prefix and suffix.
    pub fn wrap_query(&self, query: &str) -> String {
        format!("{} {} {}", self.query_prefix, query, self.query_suffix).trim().to_string()
    }
}
