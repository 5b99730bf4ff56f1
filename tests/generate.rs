//! End-to-end runs over a temp descriptor tree.

use std::path::{Path, PathBuf};

use swaggen::analyzer::Warning;
use swaggen::pipeline::{generate, GenerateOptions};
use swaggen::writer::DocumentInfo;

fn write(path: &Path, body: &str) {
    std::fs::write(path, body).unwrap();
}

fn options(types: &Path, out: PathBuf) -> GenerateOptions {
    GenerateOptions {
        inputs: vec![types.to_string_lossy().into_owned()],
        out,
        fragment: None,
        exclusions: None,
        descriptions: None,
        info: DocumentInfo::default(),
        strict: false,
    }
}

#[test]
fn person_scenario_renders_all_models() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types");
    std::fs::create_dir(&types).unwrap();
    write(
        &types.join("person.json"),
        r#"{
            "name": "Person",
            "namespace": "com.acme.model",
            "fields": [
                {"name": "name", "type": "String"},
                {"name": "age", "type": "int"},
                {"name": "address", "type": "Address"},
                {"name": "pets", "type": "List<Pet>"}
            ]
        }"#,
    );
    write(
        &types.join("address.json"),
        r#"{"name": "Address", "fields": [{"name": "city", "type": "String"}]}"#,
    );
    write(
        &types.join("pet.json"),
        r#"{"name": "Pet", "fields": [{"name": "name", "type": "String"}]}"#,
    );

    let opts = options(&types, dir.path().join("swagger.yaml"));
    let report = generate(&opts).unwrap();
    assert_eq!(report.types, 3);
    assert!(report.warnings.is_empty());

    let doc = std::fs::read_to_string(&opts.out).unwrap();
    assert!(doc.starts_with("swagger: '2.0'\n"));
    assert!(doc.contains("  Person:\n    type: object\n    properties:\n"));
    assert!(doc.contains("      name:\n        type: string\n"));
    assert!(doc.contains("      age:\n        type: integer\n        format: int32\n"));
    assert!(doc.contains("      address:\n        $ref: '#/definitions/Address'\n"));
    assert!(doc.contains(
        "      pets:\n        type: array\n        items:\n          $ref: '#/definitions/Pet'\n"
    ));
    assert!(doc.contains("  Address:\n"));
    assert!(doc.contains("  Pet:\n"));
}

#[test]
fn self_referencing_node_stays_finite() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types");
    std::fs::create_dir(&types).unwrap();
    write(
        &types.join("node.json"),
        r#"{"name": "Node", "fields": [{"name": "next", "type": "Node"}]}"#,
    );

    let opts = options(&types, dir.path().join("swagger.yaml"));
    let report = generate(&opts).unwrap();
    assert!(report.warnings.is_empty());

    let doc = std::fs::read_to_string(&opts.out).unwrap();
    assert!(doc.contains("      next:\n        $ref: '#/definitions/Node'\n"));
    // One Node definition, not an unbounded expansion.
    assert_eq!(doc.matches("  Node:\n").count(), 1);
}

#[test]
fn excluded_model_is_absent_even_with_valid_fields() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types");
    std::fs::create_dir(&types).unwrap();
    write(
        &types.join("dates.json"),
        r#"{"name": "Dates", "fields": [{"name": "from", "type": "Date"}]}"#,
    );
    write(
        &types.join("keep.json"),
        r#"{"name": "Keep", "fields": [{"name": "x", "type": "String"}, {"name": "serialVersionUID", "type": "long"}]}"#,
    );

    let opts = options(&types, dir.path().join("swagger.yaml"));
    generate(&opts).unwrap();

    let doc = std::fs::read_to_string(&opts.out).unwrap();
    assert!(!doc.contains("Dates"));
    assert!(doc.contains("  Keep:\n"));
    assert!(!doc.contains("serialVersionUID"));
}

#[test]
fn fragment_and_descriptions_are_woven_in() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types");
    std::fs::create_dir(&types).unwrap();
    write(
        &types.join("person.json"),
        r#"{"name": "Person", "fields": [{"name": "firstName", "type": "String"}]}"#,
    );
    let fragment = dir.path().join("fragment.txt");
    write(&fragment, "  Legacy:\n    type: object\n    properties:\n      id:\n        type: string\n");
    let descriptions = dir.path().join("descriptions.json");
    write(&descriptions, r#"{"FIRST_NAME": "Given name"}"#);

    let mut opts = options(&types, dir.path().join("swagger.yaml"));
    opts.fragment = Some(fragment);
    opts.descriptions = Some(descriptions);
    generate(&opts).unwrap();

    let doc = std::fs::read_to_string(&opts.out).unwrap();
    let at_legacy = doc.find("  Legacy:\n").unwrap();
    let at_person = doc.find("  Person:\n").unwrap();
    assert!(at_legacy < at_person, "fragment precedes generated models");
    assert!(doc.contains(
        "      firstName:\n        type: string\n        description: Given name\n"
    ));
}

#[test]
fn dangling_reference_is_reported_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types");
    std::fs::create_dir(&types).unwrap();
    write(
        &types.join("person.json"),
        r#"{"name": "Person", "fields": [{"name": "address", "type": "Address"}]}"#,
    );

    let opts = options(&types, dir.path().join("swagger.yaml"));
    let report = generate(&opts).unwrap();
    assert_eq!(
        report.warnings,
        vec![Warning::DanglingReference {
            model: "Person".into(),
            field: "address".into(),
            target: "Address".into(),
        }]
    );
    // The reference is still emitted; dangling is a documented contract.
    let doc = std::fs::read_to_string(&opts.out).unwrap();
    assert!(doc.contains("      address:\n        $ref: '#/definitions/Address'\n"));
}

#[test]
fn custom_exclusion_config_replaces_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path().join("types");
    std::fs::create_dir(&types).unwrap();
    write(
        &types.join("dates.json"),
        r#"{"name": "Dates", "fields": [{"name": "from", "type": "Date"}]}"#,
    );
    write(
        &types.join("secret.json"),
        r#"{"name": "Secret", "fields": [{"name": "token", "type": "String"}]}"#,
    );
    let exclusions = dir.path().join("exclusions.json");
    write(&exclusions, r#"{"models": ["Secret"], "fields": []}"#);

    let mut opts = options(&types, dir.path().join("swagger.yaml"));
    opts.exclusions = Some(exclusions);
    generate(&opts).unwrap();

    let doc = std::fs::read_to_string(&opts.out).unwrap();
    assert!(!doc.contains("Secret"));
    // `Dates` is only on the built-in list, which the file replaced.
    assert!(doc.contains("  Dates:\n"));
}
