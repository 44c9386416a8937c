//! Integration tests for data file loading.

use std::fs;
use std::path::Path;

use stamp_data::{DataError, DataFileReader, DataFileScaffold, DataFileValidator};
use stamp_template::TagExtractor;
use tempfile::tempdir;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_imports_merge_with_local_precedence() {
    let dir = tempdir().unwrap();
    write(dir.path(), "common/base.json", r#"{"phase": "Dev", "cidr_ip": "0.0.0.0/0"}"#);
    write(dir.path(), "common/prod.json", r#"{"phase": "Prod", "image_id": "ami-1"}"#);
    write(
        dir.path(),
        "stack.json",
        r#"{
            "IMPORT": ["common/base.json", "common/prod.json"],
            "CF_TEMPLATE": "t.json",
            "STACK_NAME": "TestStack",
            "STACK_REGION": "us-west-2",
            "image_id": "ami-4dbf9e7d"
        }"#,
    );

    let data = DataFileReader::read(dir.path().join("stack.json")).unwrap();

    assert_eq!(data.get("phase"), Some("Prod"));
    assert_eq!(data.get("cidr_ip"), Some("0.0.0.0/0"));
    assert_eq!(data.get("image_id"), Some("ami-4dbf9e7d"));
    assert_eq!(data.imports().len(), 2);
    assert!(data.get("IMPORT").is_none());
}

#[test]
fn test_nested_imports_resolve_relative_to_importer() {
    let dir = tempdir().unwrap();
    write(dir.path(), "shared/network/vpc.json", r#"{"vpc_id": "vpc-123"}"#);
    write(dir.path(), "shared/region.json", r#"{"IMPORT": "network/vpc.json", "az": "us-west-2a"}"#);
    write(dir.path(), "stacks/web.json", r#"{"IMPORT": ["../shared/region.json"]}"#);

    let data = DataFileReader::read(dir.path().join("stacks/web.json")).unwrap();
    assert_eq!(data.get("vpc_id"), Some("vpc-123"));
    assert_eq!(data.get("az"), Some("us-west-2a"));
}

#[test]
fn test_import_cycle_is_an_error() {
    let dir = tempdir().unwrap();
    write(dir.path(), "a.json", r#"{"IMPORT": "b.json"}"#);
    write(dir.path(), "b.json", r#"{"IMPORT": ["a.json"]}"#);

    let err = DataFileReader::read(dir.path().join("a.json")).unwrap_err();
    assert!(matches!(err, DataError::ImportCycle(_)));
}

#[test]
fn test_shared_import_is_not_a_cycle() {
    let dir = tempdir().unwrap();
    write(dir.path(), "common.json", r#"{"owner": "ops"}"#);
    write(dir.path(), "left.json", r#"{"IMPORT": "common.json"}"#);
    write(dir.path(), "right.json", r#"{"IMPORT": "common.json"}"#);
    write(dir.path(), "top.json", r#"{"IMPORT": ["left.json", "right.json"]}"#);

    let data = DataFileReader::read(dir.path().join("top.json")).unwrap();
    assert_eq!(data.get("owner"), Some("ops"));
}

#[test]
fn test_missing_import_is_not_found() {
    let dir = tempdir().unwrap();
    write(dir.path(), "stack.json", r#"{"IMPORT": "absent.json"}"#);

    let err = DataFileReader::read(dir.path().join("stack.json")).unwrap_err();
    assert!(matches!(err, DataError::NotFound(ref p) if p.ends_with("absent.json")));
}

#[test]
fn test_load_missing_file() {
    let dir = tempdir().unwrap();
    let err = DataFileValidator::load(dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, DataError::NotFound(_)));
    assert!(err.to_string().contains("does not exist"));
}

#[test]
fn test_load_reports_blank_values() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "stack.json",
        r#"{"CF_TEMPLATE": "t.json", "STACK_NAME": "Test", "STACK_REGION": "us-west-2", "phase": ""}"#,
    );

    let (data, report) = DataFileValidator::load(dir.path().join("stack.json")).unwrap();
    assert_eq!(data.stack_name(), "Test");
    assert_eq!(report.warnings, vec!["Key 'phase' is an empty string"]);
    assert_eq!(data.template_path(), Some(dir.path().join("t.json")));
}

#[test]
fn test_load_missing_required_keys() {
    let dir = tempdir().unwrap();
    write(dir.path(), "stack.json", r#"{"instance_type": "t2.micro"}"#);

    let err = DataFileValidator::load(dir.path().join("stack.json")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("CF_TEMPLATE"));
    assert!(message.contains("STACK_NAME"));
    assert!(message.contains("STACK_REGION"));
}

#[test]
fn test_scaffold_covers_every_tag_and_loads_back() {
    let dir = tempdir().unwrap();
    write(
        dir.path(),
        "templates/web.json",
        r#"{"ImageId": "{{ image_id }}", "CidrIp": "{{cidr_ip}}", "Name": "{{ STACK_NAME }}"}"#,
    );
    let template = dir.path().join("templates/web.json");
    let outfile = dir.path().join("data/web.json");

    let scaffold = DataFileScaffold::generate(&template, &outfile, false).unwrap();
    let keys: Vec<_> = scaffold.keys().collect();
    assert_eq!(
        keys,
        vec!["CF_TEMPLATE", "STACK_NAME", "STACK_REGION", "cidr_ip", "image_id"]
    );

    let data = DataFileReader::read(&outfile).unwrap();
    assert_eq!(data.get("CF_TEMPLATE"), Some("../templates/web.json"));
    for tag in TagExtractor::new().extract_file(&template).unwrap() {
        assert!(data.values().contains_key(&tag));
    }

    let resolved = data.template_path().unwrap();
    assert_eq!(
        fs::canonicalize(resolved).unwrap(),
        fs::canonicalize(&template).unwrap()
    );
}

#[test]
fn test_imported_template_resolves_against_declaring_file() {
    let dir = tempdir().unwrap();
    write(dir.path(), "common/t.json", r#"{"Type": "{{ instance_type }}"}"#);
    write(dir.path(), "common/base.json", r#"{"CF_TEMPLATE": "t.json"}"#);
    write(
        dir.path(),
        "stack.json",
        r#"{"IMPORT": "common/base.json", "STACK_NAME": "Test", "STACK_REGION": "us-west-2"}"#,
    );

    let (data, _) = DataFileValidator::load(dir.path().join("stack.json")).unwrap();
    assert_eq!(data.template_ref(), Some("t.json"));

    let resolved = data.template_path().unwrap();
    assert!(resolved.is_file(), "resolved to {:?}", resolved);
    assert_eq!(resolved, dir.path().join("common").join("t.json"));
}

#[test]
fn test_local_template_overrides_imported_one() {
    let dir = tempdir().unwrap();
    write(dir.path(), "common/base.json", r#"{"CF_TEMPLATE": "t.json"}"#);
    write(
        dir.path(),
        "stack.json",
        r#"{"IMPORT": "common/base.json", "CF_TEMPLATE": "local.json", "STACK_NAME": "Test", "STACK_REGION": "us-west-2"}"#,
    );

    let data = DataFileReader::read(dir.path().join("stack.json")).unwrap();
    assert_eq!(data.template_path(), Some(dir.path().join("local.json")));
}
