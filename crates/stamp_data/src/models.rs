//! Data file model.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Key holding the template path.
pub const CF_TEMPLATE: &str = "CF_TEMPLATE";
/// Key holding the stack name.
pub const STACK_NAME: &str = "STACK_NAME";
/// Key holding the stack region.
pub const STACK_REGION: &str = "STACK_REGION";
/// Key listing further data files to merge.
pub const IMPORT: &str = "IMPORT";

/// Keys every data file must define with a non-blank value, in report order.
pub const REQUIRED_KEYS: [&str; 3] = [CF_TEMPLATE, STACK_NAME, STACK_REGION];

/// A loaded data file with its imports already merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFile {
    path: PathBuf,
    values: BTreeMap<String, String>,
    imports: Vec<PathBuf>,
    template_path: Option<PathBuf>,
}

impl DataFile {
    pub fn new(path: impl Into<PathBuf>, values: BTreeMap<String, String>) -> Self {
        Self {
            path: path.into(),
            values,
            imports: Vec::new(),
            template_path: None,
        }
    }

    pub fn with_imports(mut self, imports: Vec<PathBuf>) -> Self {
        self.imports = imports;
        self
    }

    /// Record where `CF_TEMPLATE` points once resolved against the file
    /// that declared it.
    pub fn with_template_path(mut self, template_path: impl Into<PathBuf>) -> Self {
        self.template_path = Some(template_path.into());
        self
    }

    /// Path the data file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory relative paths in this data file resolve against.
    pub fn base_dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// Data files imported directly by this one.
    pub fn imports(&self) -> &[PathBuf] {
        &self.imports
    }

    /// The merged substitution context.
    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn stack_name(&self) -> &str {
        self.get(STACK_NAME).unwrap_or_default().trim()
    }

    pub fn stack_region(&self) -> &str {
        self.get(STACK_REGION).unwrap_or_default().trim()
    }

    /// Template path as written in the data file.
    pub fn template_ref(&self) -> Option<&str> {
        self.get(CF_TEMPLATE).map(str::trim)
    }

    /// Template path resolved against the directory of the data file that
    /// declares `CF_TEMPLATE`, which may be an imported one.
    pub fn template_path(&self) -> Option<PathBuf> {
        self.template_path
            .clone()
            .or_else(|| self.template_ref().map(|t| self.base_dir().join(t)))
    }

    /// Keys whose value is blank after trimming.
    pub fn blank_keys(&self) -> Vec<&str> {
        self.values
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// The merged context as a JSON object.
    pub fn to_json(&self) -> Value {
        let map: Map<String, Value> = self
            .values
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        Value::Object(map)
    }
}
