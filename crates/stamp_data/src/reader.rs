//! Data file reading and IMPORT resolution.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{DataError, DataResult};
use crate::models::{DataFile, CF_TEMPLATE, IMPORT};

/// Values merged from a data file and everything it imports.
struct Merged {
    values: BTreeMap<String, String>,
    imports: Vec<PathBuf>,
    /// `CF_TEMPLATE` resolved against the file that declared it.
    template: Option<PathBuf>,
}

/// Reader for data files.
pub struct DataFileReader;

impl DataFileReader {
    /// Read a data file and merge everything it imports.
    ///
    /// Imported values are layered first, in the order listed, and the
    /// importing file's own keys win over anything it imports.
    pub fn read(path: impl AsRef<Path>) -> DataResult<DataFile> {
        let path = path.as_ref();
        let mut chain = Vec::new();
        let merged = Self::read_merged(path, &mut chain)?;
        let data = DataFile::new(path, merged.values).with_imports(merged.imports);
        Ok(match merged.template {
            Some(template) => data.with_template_path(template),
            None => data,
        })
    }

    fn read_merged(path: &Path, chain: &mut Vec<PathBuf>) -> DataResult<Merged> {
        if !path.is_file() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }

        let canonical = fs::canonicalize(path)?;
        if chain.contains(&canonical) {
            return Err(DataError::ImportCycle(path.to_path_buf()));
        }
        chain.push(canonical);

        debug!("Reading data file {:?}", path);
        let object = Self::parse_object(path)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let imports: Vec<PathBuf> = Self::import_refs(path, &object)?
            .into_iter()
            .map(|r| base.join(r))
            .collect();

        let mut values = BTreeMap::new();
        let mut template = None;
        for import in &imports {
            let imported = Self::read_merged(import, chain)?;
            debug!("Merged {} value(s) from {:?}", imported.values.len(), import);
            values.extend(imported.values);
            if imported.template.is_some() {
                template = imported.template;
            }
        }

        for (key, value) in object {
            if key == IMPORT {
                continue;
            }
            let text = Self::scalar_text(path, &key, value)?;
            if key == CF_TEMPLATE {
                template = Some(base.join(text.trim()));
            }
            values.insert(key, text);
        }

        chain.pop();
        Ok(Merged {
            values,
            imports,
            template,
        })
    }

    fn parse_object(path: &Path) -> DataResult<Map<String, Value>> {
        let content = fs::read_to_string(path)?;
        let value: Value = serde_json::from_str(&content).map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DataError::InvalidFormat {
                path: path.to_path_buf(),
                message: "top level must be a JSON object".to_string(),
            }),
        }
    }

    /// `IMPORT` may be a single path or a list of paths.
    fn import_refs(path: &Path, object: &Map<String, Value>) -> DataResult<Vec<String>> {
        let invalid = || DataError::InvalidFormat {
            path: path.to_path_buf(),
            message: format!("{} must be a string or a list of strings", IMPORT),
        };

        match object.get(IMPORT) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| item.as_str().map(str::to_string).ok_or_else(invalid))
                .collect(),
            Some(_) => Err(invalid()),
        }
    }

    fn scalar_text(path: &Path, key: &str, value: Value) -> DataResult<String> {
        match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(DataError::InvalidFormat {
                path: path.to_path_buf(),
                message: format!("value of '{}' must be a string", key),
            }),
        }
    }
}
