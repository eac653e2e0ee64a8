//! End-to-end pipeline tests against a temporary directory.

use camino::{Utf8Path, Utf8PathBuf};
use mcmaker_core::adapters::{FsWritePort, InMemoryWritePort};
use mcmaker_core::pipeline::{Destination, ToolError, run_build};
use mcmaker_core::settings::{BuildSettings, OutputTarget};
use mcmaker_core::{BuildError, ConflictError};
use mcmaker_types::ops::Operation;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn workspace() -> (TempDir, Utf8PathBuf) {
    let temp = TempDir::new().expect("temp dir");
    let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 path");
    std::fs::write(root.join("hello.txt"), "hello").expect("write file");
    std::fs::write(
        root.join("example.service"),
        "[Unit]\nDescription=Not a real unit\n",
    )
    .expect("write unit");
    std::fs::write(root.join("10-limits.conf"), "[Service]\nLimitNOFILE=65536\n")
        .expect("write dropin");
    (temp, root)
}

fn settings(root: &Utf8Path) -> BuildSettings {
    BuildSettings {
        base_dir: root.to_path_buf(),
        output: OutputTarget::Dir(root.join("out")),
        ..BuildSettings::new("test")
    }
}

fn file_op(source: &str, path: &str) -> Operation {
    Operation::File {
        source: source.into(),
        path: path.to_string(),
        mode: None,
    }
}

fn unit_op(source: &str) -> Operation {
    Operation::Unit {
        source: source.into(),
        name: None,
        enabled: None,
    }
}

fn dropin_op(source: &str, unit: &str) -> Operation {
    Operation::Dropin {
        source: source.into(),
        unit: unit.to_string(),
        name: None,
    }
}

#[test]
fn writes_document_named_after_role() {
    let (_temp, root) = workspace();
    let settings = BuildSettings {
        role: Some("worker".to_string()),
        ..settings(&root)
    };

    let outcome = run_build(&settings, &[file_op("hello.txt", "/some/path")], &FsWritePort)
        .expect("build");

    let expected = root.join("out").join("test-worker.yaml");
    assert_eq!(outcome.name, "test-worker");
    assert_eq!(outcome.destination, Destination::File(expected.clone()));

    let yaml = std::fs::read_to_string(&expected).expect("read output");
    assert_eq!(outcome.bytes_written, yaml.len() as u64);
    assert!(yaml.contains("name: test-worker"));
    assert!(yaml.contains("machineconfiguration.openshift.io/role: worker"));
    assert!(yaml.contains("mode: 420"));
    assert!(yaml.contains("source: data:text/plain;charset=utf-8;base64,aGVsbG8="));
}

#[test]
fn defaults_fill_unset_fields() {
    let (_temp, root) = workspace();
    let settings = BuildSettings {
        default_mode: 0o600,
        default_enabled: false,
        ..settings(&root)
    };
    let ops = [file_op("hello.txt", "/etc/hello"), unit_op("example.service")];

    let maker = mcmaker_core::pipeline::build_document(&settings, &ops).expect("build");

    assert_eq!(maker.ignition().storage.files[0].mode, Some(0o600));
    let unit = maker.unit("example.service").expect("unit");
    assert_eq!(unit.enabled, Some(false));
}

#[test]
fn dropin_order_does_not_change_output() {
    let (_temp, root) = workspace();
    let port_a = InMemoryWritePort::new();
    let port_b = InMemoryWritePort::new();
    let settings = BuildSettings {
        output: OutputTarget::Stdout,
        ..settings(&root)
    };

    run_build(
        &settings,
        &[unit_op("example.service"), dropin_op("10-limits.conf", "example.service")],
        &port_a,
    )
    .expect("unit first");
    run_build(
        &settings,
        &[dropin_op("10-limits.conf", "example.service"), unit_op("example.service")],
        &port_b,
    )
    .expect("dropin first");

    assert_eq!(
        String::from_utf8(port_a.stdout()).expect("utf8"),
        String::from_utf8(port_b.stdout()).expect("utf8")
    );
}

#[test]
fn first_failure_aborts_without_output() {
    let (_temp, root) = workspace();
    let port = InMemoryWritePort::new();
    let ops = [
        unit_op("example.service"),
        Operation::Unit {
            source: "example.service".into(),
            name: None,
            enabled: Some(false),
        },
    ];

    let err = run_build(&settings(&root), &ops, &port).expect_err("collision");

    assert!(matches!(
        err,
        ToolError::Build(BuildError::Conflict(ConflictError::UnitContents { .. }))
    ));
    assert_eq!(err.exit_code(), 2);
    assert!(port.paths().is_empty());
}
