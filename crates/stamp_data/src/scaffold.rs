//! Data file skeleton generation from a template's tags.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::info;

use stamp_template::TagExtractor;

use crate::error::{DataError, DataResult};
use crate::models::{CF_TEMPLATE, REQUIRED_KEYS};

/// An ordered data file skeleton: required keys first, then one blank entry
/// per template tag in sorted order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataFileScaffold {
    entries: Vec<(String, String)>,
}

impl DataFileScaffold {
    /// Build a skeleton for a template referenced as `template_ref`.
    pub fn build(template_ref: &str, tags: &BTreeSet<String>) -> Self {
        let mut entries: Vec<(String, String)> = REQUIRED_KEYS
            .iter()
            .map(|key| {
                let value = if *key == CF_TEMPLATE { template_ref } else { "" };
                (key.to_string(), value.to_string())
            })
            .collect();

        entries.extend(
            tags.iter()
                .filter(|tag| !REQUIRED_KEYS.contains(&tag.as_str()))
                .map(|tag| (tag.clone(), String::new())),
        );

        Self { entries }
    }

    /// Extract tags from `template` and write a skeleton to `outfile`.
    pub fn generate(template: &Path, outfile: &Path, force: bool) -> DataResult<Self> {
        if outfile.exists() && !force {
            return Err(DataError::AlreadyExists(outfile.to_path_buf()));
        }

        let tags = TagExtractor::new().extract_file(template)?;

        if let Some(parent) = outfile.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let template_ref = relative_template_ref(template, outfile)?;

        let scaffold = Self::build(&template_ref, &tags);
        fs::write(outfile, scaffold.to_json()?)?;

        info!(
            "Generated data file {:?} with {} tag(s) from {:?}",
            outfile,
            tags.len(),
            template
        );
        Ok(scaffold)
    }

    pub fn entries(&self) -> &[(String, String)] {
        &self.entries
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Serialize with 4-space indentation, preserving entry order.
    pub fn to_json(&self) -> DataResult<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Serialize for DataFileScaffold {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Path to `template` as seen from the directory `outfile` lives in, so the
/// generated file resolves its `CF_TEMPLATE` the same way the reader does.
fn relative_template_ref(template: &Path, outfile: &Path) -> DataResult<String> {
    let target = fs::canonicalize(template)?;
    let base_dir = match outfile.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => fs::canonicalize(parent)?,
        None => std::env::current_dir()?,
    };

    let relative = relative_path(&target, &base_dir);
    Ok(relative.to_string_lossy().into_owned())
}

fn relative_path(target: &Path, base: &Path) -> PathBuf {
    let target: Vec<Component> = target.components().collect();
    let base: Vec<Component> = base.components().collect();

    // Different roots (e.g. another drive): fall back to the absolute path.
    if target.first() != base.first() {
        return target.iter().collect();
    }

    let common = target
        .iter()
        .zip(base.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base.len() {
        relative.push("..");
    }
    for component in &target[common..] {
        relative.push(component);
    }
    relative
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn tags(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_orders_required_then_tags() {
        let scaffold = DataFileScaffold::build("t.json", &tags(&["image_id", "cidr_ip"]));

        let keys: Vec<_> = scaffold.keys().collect();
        assert_eq!(
            keys,
            vec!["CF_TEMPLATE", "STACK_NAME", "STACK_REGION", "cidr_ip", "image_id"]
        );
        assert_eq!(scaffold.entries()[0].1, "t.json");
        assert!(scaffold.entries()[1..].iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_build_does_not_duplicate_required_keys() {
        let scaffold = DataFileScaffold::build("t.json", &tags(&["STACK_NAME", "phase"]));
        let keys: Vec<_> = scaffold.keys().collect();
        assert_eq!(keys, vec!["CF_TEMPLATE", "STACK_NAME", "STACK_REGION", "phase"]);
    }

    #[test]
    fn test_to_json_uses_four_space_indent() {
        let scaffold = DataFileScaffold::build("t.json", &tags(&["AMI"]));
        let json = scaffold.to_json().unwrap();
        assert_eq!(
            json,
            "{\n    \"CF_TEMPLATE\": \"t.json\",\n    \"STACK_NAME\": \"\",\n    \"STACK_REGION\": \"\",\n    \"AMI\": \"\"\n}"
        );
    }

    #[test]
    fn test_relative_path() {
        assert_eq!(
            relative_path(Path::new("/a/templates/t.json"), Path::new("/a/data")),
            PathBuf::from("../templates/t.json")
        );
        assert_eq!(
            relative_path(Path::new("/a/t.json"), Path::new("/a")),
            PathBuf::from("t.json")
        );
    }

    #[test]
    fn test_generate_refuses_overwrite() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("t.json");
        let outfile = dir.path().join("data.json");
        fs::write(&template, r#"{"Type": "{{ kind }}"}"#).unwrap();
        fs::write(&outfile, "{}").unwrap();

        let err = DataFileScaffold::generate(&template, &outfile, false).unwrap_err();
        assert!(matches!(err, DataError::AlreadyExists(_)));

        DataFileScaffold::generate(&template, &outfile, true).unwrap();
        assert!(fs::read_to_string(&outfile).unwrap().contains("\"kind\": \"\""));
    }
}
