use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "SONAR_DATA_DIR";
pub const RECEIVER_URL_VAR: &str = "RECEIVER_URL";
const DEFAULT_DATA_DIR: &str = "./data";

/// Where surveys and responses live, and where creatives report to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub receiver_url: Option<String>,
}

impl Config {
    /// Command-line values win over the environment.
    pub fn resolve(
        data_dir: Option<PathBuf>,
        receiver_url: Option<String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let data_dir = data_dir
            .or_else(|| env(DATA_DIR_VAR).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let receiver_url = receiver_url
            .or_else(|| env(RECEIVER_URL_VAR))
            .filter(|url| !url.trim().is_empty());

        Self {
            data_dir,
            receiver_url,
        }
    }

    pub fn from_env(data_dir: Option<PathBuf>, receiver_url: Option<String>) -> Self {
        Self::resolve(data_dir, receiver_url, |key| dotenv::var(key).ok())
    }

    pub fn surveys_dir(&self) -> PathBuf {
        self.data_dir.join("surveys")
    }

    pub fn responses_file(&self) -> PathBuf {
        self.data_dir.join("responses.jsonl")
    }
}
