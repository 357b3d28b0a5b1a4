//! CLI Tests
//!
//! Discovery, per-file compilation and output layout of `wgc` runs.

use std::fs;
use std::path::{Path, PathBuf};

use widget_compiler_cli::compile::discover_files;
use widget_compiler_cli::{output_path, run, RunOptions};

const ORDER_FORM: &str = r#"{
    "page": "orders.edit",
    "widget": {
        "widget_type": "Form",
        "id": "frmOrder",
        "widgets": [{"widget_type": "Input", "id": "inpName"}]
    }
}"#;

const BROKEN_FORM: &str = r#"{
    "widget_type": "Form",
    "id": "frmBroken",
    "widgets": [{"widget_type": "Display", "id": "dspName", "value": "=inpMissing"}]
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn should_compile_included_pages_into_the_out_dir() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "pages/orders.edit.json", ORDER_FORM);
    write(dir.path(), "pages/draft/ignored.json", ORDER_FORM);
    let config = write(
        dir.path(),
        "wgc.json",
        r#"{
            "include": ["pages/**/*.json"],
            "exclude": ["pages/draft/*"],
            "outDir": "dist"
        }"#,
    );

    let summary = run(&RunOptions {
        config: Some(config),
        ..RunOptions::default()
    })
    .unwrap();

    assert!(summary.is_success());
    let expected = dir.path().join("dist").join("orders.edit.js");
    assert_eq!(summary.written, vec![expected.clone()]);
    let module = fs::read_to_string(expected).unwrap();
    assert!(module.contains("ui.defineController('frmOrder', {"));
    assert!(!dir.path().join("dist").join("ignored.js").exists());
}

#[test]
fn should_report_failing_pages_and_keep_compiling_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "a_order.json", ORDER_FORM);
    let broken = write(dir.path(), "b_broken.json", BROKEN_FORM);
    let out_dir = dir.path().join("out");

    let summary = run(&RunOptions {
        inputs: vec![
            good.to_string_lossy().to_string(),
            broken.to_string_lossy().to_string(),
        ],
        out_dir: Some(out_dir.clone()),
        ..RunOptions::default()
    })
    .unwrap();

    assert!(!summary.is_success());
    assert_eq!(summary.written, vec![out_dir.join("a_order.js")]);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].0, broken);
    assert!(summary.failed[0].1.contains("inpMissing"));
}

#[test]
fn should_render_placeholders_in_lenient_runs() {
    let dir = tempfile::tempdir().unwrap();
    let broken = write(dir.path(), "broken.json", BROKEN_FORM);

    let summary = run(&RunOptions {
        inputs: vec![broken.to_string_lossy().to_string()],
        lenient: true,
        ..RunOptions::default()
    })
    .unwrap();

    assert!(summary.is_success());
    let module = fs::read_to_string(dir.path().join("broken.js")).unwrap();
    assert!(module.contains("Broken widget link: =inpMissing"));
}

#[test]
fn should_fail_when_nothing_matches() {
    let dir = tempfile::tempdir().unwrap();
    let pattern = dir.path().join("*.json").to_string_lossy().to_string();
    let err = run(&RunOptions {
        inputs: vec![pattern],
        ..RunOptions::default()
    })
    .unwrap_err();
    assert!(err.to_string().contains("no page descriptions matched"));
}

#[test]
fn should_discover_files_sorted_and_once() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "b.json", "{}");
    write(dir.path(), "a.json", "{}");
    let files = discover_files(
        dir.path(),
        &["*.json".to_string(), "a.*".to_string()],
        &[],
    )
    .unwrap();
    assert_eq!(files, vec![dir.path().join("a.json"), dir.path().join("b.json")]);
}

#[test]
fn should_keep_dotted_stems_in_output_names() {
    assert_eq!(
        output_path(Path::new("pages/orders.edit.json"), Some(Path::new("dist"))),
        PathBuf::from("dist/orders.edit.js")
    );
    assert_eq!(
        output_path(Path::new("pages/orders.json"), None),
        PathBuf::from("pages/orders.js")
    );
}
