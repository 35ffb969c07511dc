use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub storage: StorageConfig,
    pub speech: SpeechConfig,
    pub generation: GenerationConfig,
    pub docs: DocsConfig,
    pub sessions: SessionsConfig,
    pub identity: IdentityConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    /// Upper bound for one whole pipeline run, external API latency included
    #[serde(default = "default_pipeline_timeout_secs")]
    pub pipeline_timeout_secs: u64,
    /// Directory for per-invocation scratch audio files
    #[serde(default = "default_scratch_dir")]
    pub scratch_dir: String,
    /// ffmpeg binary used for audio normalization
    #[serde(default = "default_ffmpeg_path")]
    pub ffmpeg_path: String,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Object storage holding the uploaded session recordings
#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub api_base: String,
    pub bucket: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    pub api_base: String,
    pub api_key: String,
    #[serde(default = "default_language_code")]
    pub language_code: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerationConfig {
    pub api_base: String,
    pub api_key: String,
    pub model: String,
}

/// Document service used to publish clinical notes
#[derive(Debug, Deserialize)]
pub struct DocsConfig {
    pub docs_api_base: String,
    pub drive_api_base: String,
    /// Destination folder for every exported note
    pub folder_id: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct SessionsConfig {
    pub api_base: String,
    pub project_id: String,
    pub collection: String,
    pub access_token: String,
}

#[derive(Debug, Deserialize)]
pub struct IdentityConfig {
    pub api_base: String,
    pub api_key: String,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            // Credentials can come in as THERASCRIBE__SPEECH__API_KEY etc.
            .add_source(config::Environment::with_prefix("THERASCRIBE").separator("__"))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_pipeline_timeout_secs() -> u64 {
    540
}

fn default_scratch_dir() -> String {
    std::env::temp_dir().display().to_string()
}

fn default_ffmpeg_path() -> String {
    "ffmpeg".to_string()
}

fn default_language_code() -> String {
    "en-US".to_string()
}
