//! Application configuration: an optional RON file plus environment overrides.
//!
//! Lookup order for the file is `$SHOWCASE_CONFIG`, then `./showcase.ron`.
//! A missing file is not an error; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use log::LevelFilter;
use serde::Deserialize;
use showcase_core::ResolutionPolicy;
use showcase_engine::{Endpoints, TransportSettings, DEFAULT_BASE_URL};
use showcase_logging::{parse_level, showcase_warn};

use super::logging::LogDestination;

const CONFIG_FILE: &str = "showcase.ron";
const CONFIG_PATH_VAR: &str = "SHOWCASE_CONFIG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PolicySetting {
    #[default]
    LastResolutionWins,
    LatestSubmissionWins,
}

impl From<PolicySetting> for ResolutionPolicy {
    fn from(setting: PolicySetting) -> Self {
        match setting {
            PolicySetting::LastResolutionWins => ResolutionPolicy::LastResolutionWins,
            PolicySetting::LatestSubmissionWins => ResolutionPolicy::LatestSubmissionWins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    pub vision_url: String,
    pub file_extractor_url: String,
    pub music_url: String,
    pub search_url: String,
    pub connect_timeout_secs: u64,
    /// No deadline when unset.
    pub request_timeout_secs: Option<u64>,
    pub max_response_bytes: u64,
    pub resolution_policy: PolicySetting,
    /// Image file read on every live capture.
    pub live_frame_path: Option<PathBuf>,
    pub start_live: bool,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            vision_url: DEFAULT_BASE_URL.to_string(),
            file_extractor_url: DEFAULT_BASE_URL.to_string(),
            music_url: DEFAULT_BASE_URL.to_string(),
            search_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout_secs: 30,
            request_timeout_secs: None,
            max_response_bytes: 8 * 1024 * 1024,
            resolution_policy: PolicySetting::default(),
            live_frame_path: None,
            start_live: false,
            log_level: "info".to_string(),
            log_destination: LogDestination::default(),
        }
    }
}

impl ShowcaseConfig {
    /// Loads from the process environment and working directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_from(&path, |key| std::env::var(key).ok())
    }

    pub fn load_from(
        path: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))?
        } else {
            Self::default()
        };
        config.apply_env(env);
        config.trim_urls();
        Ok(config)
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(ron::from_str(text)?)
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        let overrides: [(&str, &mut String); 5] = [
            ("SHOWCASE_VISION_URL", &mut self.vision_url),
            ("SHOWCASE_FILE_EXTRACTOR_URL", &mut self.file_extractor_url),
            ("SHOWCASE_MUSIC_URL", &mut self.music_url),
            ("SHOWCASE_SEARCH_URL", &mut self.search_url),
            ("SHOWCASE_LOG_LEVEL", &mut self.log_level),
        ];
        for (key, field) in overrides {
            if let Some(value) = env(key).filter(|value| !value.trim().is_empty()) {
                *field = value.trim().to_string();
            }
        }
    }

    fn trim_urls(&mut self) {
        for url in [
            &mut self.vision_url,
            &mut self.file_extractor_url,
            &mut self.music_url,
            &mut self.search_url,
        ] {
            let trimmed = url.trim_end_matches('/').len();
            url.truncate(trimmed);
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        parse_level(&self.log_level).unwrap_or_else(|| {
            showcase_warn!("Unknown log level {:?}; using info", self.log_level);
            LevelFilter::Info
        })
    }

    pub fn transport_settings(&self) -> TransportSettings {
        TransportSettings {
            endpoints: Endpoints {
                vision: self.vision_url.clone(),
                file_extractor: self.file_extractor_url.clone(),
                music: self.music_url.clone(),
                search: self.search_url.clone(),
            },
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: self.request_timeout_secs.map(Duration::from_secs),
            max_bytes: self.max_response_bytes,
        }
    }
}
