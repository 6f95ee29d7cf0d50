//! Analysis configuration: typed settings read from a `ConfigPort` and
//! validated before any data is loaded.

use crate::domain::error::PricelensError;
use crate::domain::indicator::BackendKind;
use crate::ports::config_port::ConfigPort;
use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "data/yfinance_data/Data";
pub const DEFAULT_FIGURES_DIR: &str = "demo/figures";

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub data_dir: PathBuf,
    pub figures_dir: PathBuf,
    pub charts: bool,
    pub metrics_csv: Option<PathBuf>,
    pub backend: BackendKind,
    pub max_drawdown: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            figures_dir: PathBuf::from(DEFAULT_FIGURES_DIR),
            charts: true,
            metrics_csv: None,
            backend: BackendKind::Auto,
            max_drawdown: true,
        }
    }
}

impl AnalysisConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PricelensError> {
        validate_analysis_config(config)?;
        let defaults = Self::default();

        let backend = match config.get_string("engine", "backend") {
            Some(name) => name.parse()?,
            None => defaults.backend,
        };

        Ok(Self {
            data_dir: config
                .get_string("data", "dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            figures_dir: config
                .get_string("output", "figures_dir")
                .map(PathBuf::from)
                .unwrap_or(defaults.figures_dir),
            charts: config.get_bool("output", "charts", defaults.charts),
            metrics_csv: config.get_string("output", "metrics_csv").map(PathBuf::from),
            backend,
            max_drawdown: config.get_bool("metrics", "max_drawdown", defaults.max_drawdown),
        })
    }
}

pub fn validate_analysis_config(config: &dyn ConfigPort) -> Result<(), PricelensError> {
    validate_path(config, "data", "dir")?;
    validate_path(config, "output", "figures_dir")?;
    validate_path(config, "output", "metrics_csv")?;
    validate_backend(config)?;
    Ok(())
}

fn validate_path(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), PricelensError> {
    if let Some(value) = config.get_string(section, key) {
        if value.trim().is_empty() {
            return Err(PricelensError::ConfigInvalid {
                section: section.to_string(),
                key: key.to_string(),
                reason: format!("{} must not be empty", key),
            });
        }
    }
    Ok(())
}

fn validate_backend(config: &dyn ConfigPort) -> Result<(), PricelensError> {
    if let Some(name) = config.get_string("engine", "backend") {
        name.parse::<BackendKind>()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct MapConfig(HashMap<(String, String), String>);

    impl MapConfig {
        fn new(entries: &[(&str, &str, &str)]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(s, k, v)| ((s.to_string(), k.to_string()), v.to_string()))
                    .collect(),
            )
        }
    }

    impl ConfigPort for MapConfig {
        fn get_string(&self, section: &str, key: &str) -> Option<String> {
            self.0.get(&(section.to_string(), key.to_string())).cloned()
        }

        fn get_bool(&self, section: &str, key: &str, default: bool) -> bool {
            match self.get_string(section, key).as_deref() {
                Some("true") => true,
                Some("false") => false,
                _ => default,
            }
        }
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = AnalysisConfig::from_config(&MapConfig::new(&[])).unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.data_dir, PathBuf::from("data/yfinance_data/Data"));
        assert_eq!(config.figures_dir, PathBuf::from("demo/figures"));
    }

    #[test]
    fn reads_all_sections() {
        let config = AnalysisConfig::from_config(&MapConfig::new(&[
            ("data", "dir", "/srv/prices"),
            ("output", "figures_dir", "/tmp/figs"),
            ("output", "charts", "false"),
            ("output", "metrics_csv", "/tmp/metrics.csv"),
            ("engine", "backend", "recurrence"),
            ("metrics", "max_drawdown", "false"),
        ]))
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/srv/prices"));
        assert_eq!(config.figures_dir, PathBuf::from("/tmp/figs"));
        assert!(!config.charts);
        assert_eq!(config.metrics_csv, Some(PathBuf::from("/tmp/metrics.csv")));
        assert_eq!(config.backend, BackendKind::Recurrence);
        assert!(!config.max_drawdown);
    }

    #[test]
    fn rejects_unknown_backend() {
        let err = AnalysisConfig::from_config(&MapConfig::new(&[("engine", "backend", "gpu")]))
            .unwrap_err();
        assert!(matches!(err, PricelensError::ConfigInvalid { key, .. } if key == "backend"));
    }

    #[test]
    fn rejects_empty_data_dir() {
        let err = validate_analysis_config(&MapConfig::new(&[("data", "dir", "  ")])).unwrap_err();
        assert!(matches!(err, PricelensError::ConfigInvalid { section, .. } if section == "data"));
    }
}
