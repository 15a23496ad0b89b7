//! Test utilities for on-disk storage tests.
//!
//! The temporary directory is removed when the environment is dropped, even
//! if the test panics.

use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::config::AppConfig;

/// Test environment with a configuration rooted in a temporary directory
pub struct TestEnvironment {
    pub config: AppConfig,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let config = AppConfig::new(temp_dir.path().join("data"));
        Ok(Self {
            config,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
            assert!(env.config.data_dir.starts_with(&base_path));
        }
        assert!(!base_path.exists());
        Ok(())
    }
}
