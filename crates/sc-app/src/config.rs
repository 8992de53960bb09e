//! YAML configuration.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sc_cycle::{DomeSweep, RankineInputs};
use sc_props::{If97Engine, PropertyEngine};

use crate::error::{AppError, AppResult};

/// Which property engine backs calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    #[default]
    If97,
    CoolProp,
}

impl EngineKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::If97 => "if97",
            Self::CoolProp => "coolprop",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EngineKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "if97" | "iapws97" | "native" => Ok(Self::If97),
            "coolprop" => Ok(Self::CoolProp),
            other => Err(AppError::InvalidInput(format!("unknown engine '{other}'"))),
        }
    }
}

/// Build the engine for `kind`.
pub fn build_engine(kind: EngineKind) -> AppResult<Box<dyn PropertyEngine>> {
    match kind {
        EngineKind::If97 => Ok(Box::new(If97Engine::new())),
        #[cfg(feature = "coolprop")]
        EngineKind::CoolProp => Ok(Box::new(sc_props::CoolPropEngine::new())),
        #[cfg(not(feature = "coolprop"))]
        EngineKind::CoolProp => Err(AppError::EngineUnavailable(
            "built without the `coolprop` feature".to_string(),
        )),
    }
}

/// Application settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub engine: EngineKind,
    /// JSON-lines audit file; no audit trail when unset.
    pub audit_log: Option<PathBuf>,
    pub dome: DomeSweep,
    /// Used for cycle form fields that are absent.
    pub rankine_defaults: RankineInputs,
}

/// Load config from a YAML file.
pub fn load_config(path: &Path) -> AppResult<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> AppResult<AppConfig> {
    if content.trim().is_empty() {
        return Ok(AppConfig::default());
    }
    let config: AppConfig = serde_yaml::from_str(content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    if config.dome.sample_count().is_none() {
        return Err(AppError::Config(format!(
            "dome sweep must have finite bounds, a positive step and at most {} samples",
            DomeSweep::MAX_SAMPLES
        )));
    }
    Ok(config)
}

/// Save config to a YAML file.
pub fn save_config(path: &Path, config: &AppConfig) -> AppResult<()> {
    let content = serde_yaml::to_string(config)?;
    std::fs::write(path, content).map_err(|e| AppError::ConfigWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
