use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use once_cell::sync::OnceCell;

use super::output::OutputFormat;
use crate::config::Config;
use crate::engine::GrievanceEngine;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
    output: OutputFormat,
    engine: OnceCell<Arc<GrievanceEngine>>,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf, output: OutputFormat) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
            output,
            engine: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// Engine wired to the configured backend, built on first use.
    pub fn engine(&self) -> Result<Arc<GrievanceEngine>> {
        self.engine
            .get_or_try_init(|| GrievanceEngine::from_config(&self.config).map(Arc::new))
            .map(Arc::clone)
    }
}
