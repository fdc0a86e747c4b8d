//! Writer configuration loaded from an optional TOML file.

use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::batch::{BatchOptions, DEFAULT_CONTENTS, DEFAULT_COUNT};
use crate::dirs::OUTPUT_SUBDIR;
use crate::fault::{DEFAULT_FAILURE_PROBABILITY, FaultInjector};

/// Writer configuration (TOML).
///
/// Missing fields fall back to the defaults: ten `Hello, World!` files in
/// `./out`, each failing half of the time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FanoutConfig {
    /// Parent of the output directory. Defaults to the working directory.
    pub base_dir: Option<PathBuf>,

    /// Name of the output directory under `base_dir`.
    pub subdir: String,

    /// Number of concurrent write tasks.
    pub count: usize,

    /// Text written to every file.
    pub contents: String,

    /// Chance in `[0, 1]` that a completed write reports a simulated failure.
    pub failure_probability: f64,
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            subdir: OUTPUT_SUBDIR.to_string(),
            count: DEFAULT_COUNT,
            contents: DEFAULT_CONTENTS.to_string(),
            failure_probability: DEFAULT_FAILURE_PROBABILITY,
        }
    }
}

impl FanoutConfig {
    pub fn validate(&self) -> Result<()> {
        let mut components = Path::new(&self.subdir).components();
        let single_normal = matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        );
        if !single_normal {
            return Err(anyhow!(
                "subdir must be a single directory name, got {:?}",
                self.subdir
            ));
        }
        if !(0.0..=1.0).contains(&self.failure_probability) {
            return Err(anyhow!(
                "failure_probability must be within [0, 1], got {}",
                self.failure_probability
            ));
        }
        Ok(())
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            count: self.count,
            contents: Arc::from(self.contents.as_str()),
            faults: FaultInjector::new(self.failure_probability),
        }
    }
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_dir: Option<PathBuf>,
    pub count: Option<usize>,
    pub failure_probability: Option<f64>,
}

/// Apply CLI overrides on top of a loaded config.
pub fn apply_overrides(mut base: FanoutConfig, overrides: &ConfigOverrides) -> Result<FanoutConfig> {
    if let Some(base_dir) = &overrides.base_dir {
        base.base_dir = Some(base_dir.clone());
    }
    if let Some(count) = overrides.count {
        base.count = count;
    }
    if let Some(probability) = overrides.failure_probability {
        base.failure_probability = probability;
    }
    base.validate()?;
    Ok(base)
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `FanoutConfig::default()`.
pub fn load_config(path: &Path) -> Result<FanoutConfig> {
    if !path.exists() {
        let cfg = FanoutConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FanoutConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
