use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::AnalysisError;
use crate::metrics::ThemeKeywords;
use crate::market::CompetitivenessWeights;
use crate::report::ReportFormat;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub formats: Vec<ReportFormat>,
    pub file_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            formats: vec![ReportFormat::Json, ReportFormat::Markdown, ReportFormat::Csv],
            file_prefix: "competitor_analysis".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub competitiveness: CompetitivenessWeights,
    pub themes: ThemeKeywords,
    pub reports: ReportConfig,
}

impl AnalyzerConfig {
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), AnalysisError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => {
                let contents =
                    std::fs::read_to_string(path).map_err(|err| AnalysisError::io(path, err))?;
                toml::from_str(&contents).map_err(|err| {
                    AnalysisError::Config(format!(
                        "failed to parse {}: {}",
                        path.display(),
                        err
                    ))
                })?
            }
            _ => AnalyzerConfig::default(),
        };

        config.apply_env_overrides();
        Ok((config, config_path))
    }

    pub fn write(&self, path: &Path) -> Result<(), AnalysisError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| AnalysisError::io(parent, err))?;
        }
        let payload = toml::to_string_pretty(self)
            .map_err(|err| AnalysisError::Config(format!("failed to serialize config: {}", err)))?;
        std::fs::write(path, payload).map_err(|err| AnalysisError::io(path, err))?;
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = env::var("COMPETITOR_OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.reports.output_dir = PathBuf::from(dir.trim());
            }
        }
        if let Ok(formats) = env::var("COMPETITOR_REPORT_FORMATS") {
            let parsed: Vec<ReportFormat> = formats
                .split(',')
                .filter_map(|value| ReportFormat::from_str(value.trim()))
                .collect();
            if !parsed.is_empty() {
                self.reports.formats = parsed;
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("COMPETITOR_CONFIG_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/analyzer.toml")))
}
