use anyhow::{Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const APP_NAME: &str = "attendance-tracker";
pub const DATABASE_FILE: &str = "attendance.db";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const DATABASE_URL_ENV: &str = "ATTENDANCE_TRACKER_DATABASE_URL";
pub const LOG_FILTER_ENV: &str = "ATTENDANCE_TRACKER_LOG";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub database_url: String,
    /// `EnvFilter` directive string
    pub log_filter: String,
}

impl AppConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        let database_url = format!("sqlite://{}", data_dir.join(DATABASE_FILE).display());
        Self {
            data_dir,
            database_url,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }

    /// Platform data directory, overridden by the environment where set.
    pub fn from_env() -> Self {
        Self::new(default_data_dir()).with_overrides(
            env::var(DATABASE_URL_ENV).ok(),
            env::var(LOG_FILTER_ENV).ok(),
        )
    }

    pub fn with_overrides(
        mut self,
        database_url: Option<String>,
        log_filter: Option<String>,
    ) -> Self {
        if let Some(url) = database_url.filter(|u| !u.trim().is_empty()) {
            self.database_url = url;
        }
        if let Some(filter) = log_filter.filter(|f| !f.trim().is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).with_context(|| {
                format!(
                    "Failed to create data directory {}",
                    self.data_dir.display()
                )
            })?;
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(dir) => dir.join(APP_NAME),
        None => PathBuf::from(".").join(APP_NAME),
    }
}
