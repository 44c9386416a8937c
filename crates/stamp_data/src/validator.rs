//! Data file validation.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{DataError, DataResult};
use crate::models::{DataFile, REQUIRED_KEYS};
use crate::reader::DataFileReader;

/// Non-fatal findings from validating a data file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_warning(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Validator for data files.
pub struct DataFileValidator;

impl DataFileValidator {
    /// Read and validate a data file in one step.
    pub fn load(path: impl AsRef<Path>) -> DataResult<(DataFile, ValidationReport)> {
        let path = path.as_ref();
        info!("Loading data file {:?}", path);

        let data = DataFileReader::read(path)?;
        let report = Self::validate(&data)?;
        Ok((data, report))
    }

    /// Check the required keys and flag blank values.
    ///
    /// Missing or blank required keys are an error naming every offending
    /// key. Any other blank value only produces a warning.
    pub fn validate(data: &DataFile) -> DataResult<ValidationReport> {
        let missing = Self::missing_required(data);
        if !missing.is_empty() {
            return Err(DataError::MissingRequiredKeys {
                path: data.path().to_path_buf(),
                keys: missing,
            });
        }

        let name = data.stack_name();
        if !Self::is_valid_stack_name(name) {
            return Err(DataError::InvalidStackName {
                path: data.path().to_path_buf(),
                name: name.to_string(),
            });
        }

        let mut report = ValidationReport::new();
        for key in data.blank_keys() {
            report.add_warning(format!("Key '{}' is an empty string", key));
        }

        debug!(
            "Validated {:?}: {} value(s), {} warning(s)",
            data.path(),
            data.values().len(),
            report.warnings.len()
        );
        Ok(report)
    }

    /// The rendered template is written to `<STACK_NAME>.json`, so the name
    /// must stay a single path component.
    pub fn is_valid_stack_name(name: &str) -> bool {
        !name.contains(|c| c == '/' || c == '\\') && name != "." && name != ".."
    }

    /// Required keys that are absent or blank.
    pub fn missing_required(data: &DataFile) -> Vec<String> {
        REQUIRED_KEYS
            .iter()
            .filter(|key| data.get(key).map_or(true, |v| v.trim().is_empty()))
            .map(|key| key.to_string())
            .collect()
    }
}
