use super::UnusedCodeReport;
use crate::error::{DetectError, Result};
use std::path::PathBuf;

/// JSON reporter for programmatic output
pub struct JsonReporter {
    output_path: Option<PathBuf>,
}

impl JsonReporter {
    pub fn new(output_path: Option<PathBuf>) -> Self {
        Self { output_path }
    }

    pub fn render(report: &UnusedCodeReport) -> serde_json::Result<String> {
        serde_json::to_string_pretty(report)
    }

    pub fn report(&self, report: &UnusedCodeReport) -> Result<()> {
        let destination = self
            .output_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("<stdout>"));
        let json = Self::render(report).map_err(|e| DetectError::Output {
            path: destination.clone(),
            source: e.into(),
        })?;

        match &self.output_path {
            Some(path) => {
                std::fs::write(path, &json).map_err(|source| DetectError::Output {
                    path: path.clone(),
                    source,
                })?;
                eprintln!("Report written to: {}", path.display());
            }
            None => println!("{}", json),
        }

        Ok(())
    }
}
