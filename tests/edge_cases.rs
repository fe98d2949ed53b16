//! Edge case and error handling tests for treedoc


use std::fs;

use harness::{TestProject, run_treedoc, run_treedoc_from};

#[test]
fn test_empty_project_renders_placeholder() {
    let project = TestProject::new();

    let (_stdout, _stderr, success) = run_treedoc(project.path(), &[]);
    assert!(success);

    let doc = project.read_document();
    assert!(
        doc.contains("Project directory is empty or contains no accessible files."),
        "placeholder expected: {}",
        doc
    );
}

#[test]
fn test_everything_ignored_renders_placeholder() {
    let project = TestProject::new();
    project.add_file("keep/a.txt", "");
    project.add_file("also/b.txt", "");
    project.write_config(r#"{"ignore": ["keep", "also"], "descriptions": {}}"#);

    let (_stdout, _stderr, success) = run_treedoc(project.path(), &[]);
    assert!(success);

    let doc = project.read_document();
    assert!(doc.contains("Project directory is empty or contains no accessible files."));
}

#[test]
fn test_malformed_config_recovers_with_warning() {
    let project = TestProject::new();
    project.add_file("src/main.rs", "");
    project.write_config("{not valid json");

    let (_stdout, stderr, success) = run_treedoc(project.path(), &[]);
    assert!(success, "malformed config must not abort the run");
    assert!(
        stderr.contains("warning"),
        "should warn about the config: {}",
        stderr
    );
    assert!(project.read_document().contains("main.rs"));

    // The completed run rewrites a well-formed document.
    let config = fs::read_to_string(project.config_path()).unwrap();
    assert!(serde_json::from_str::<serde_json::Value>(&config).is_ok());
}

#[test]
fn test_root_detected_from_config_directory() {
    let project = TestProject::new();
    project.add_file("src/main.rs", "");
    let config_dir = project.add_dir(".treedoc");

    let (_stdout, _stderr, success) = run_treedoc_from(&config_dir, &[]);
    assert!(success);
    assert!(
        project.document_path().exists(),
        "document should land at the enclosing project root"
    );
    assert!(project.read_document().contains("main.rs"));
}

#[test]
fn test_root_detected_from_tools_directory() {
    let project = TestProject::new();
    project.add_file("src/main.rs", "");
    let tools_dir = project.add_dir(".treedoc/tools");

    let (_stdout, _stderr, success) = run_treedoc_from(&tools_dir, &[]);
    assert!(success);
    assert!(project.document_path().exists());
}

#[test]
fn test_unicode_names_and_descriptions() {
    let project = TestProject::new();
    project.add_file("docs/目录.md", "");

    let (_stdout, _stderr, success) =
        run_treedoc(project.path(), &["--add", "docs/目录.md", "目录结构说明"]);
    assert!(success);

    let (_stdout, _stderr, success) = run_treedoc(project.path(), &[]);
    assert!(success);

    let doc = project.read_document();
    assert!(doc.contains("目录.md"));
    assert!(doc.contains("# 目录结构说明"));
}

#[cfg(unix)]
#[test]
fn test_unreadable_directory_is_skipped_with_warning() {
    use std::os::unix::fs::PermissionsExt;

    let project = TestProject::new();
    project.add_file("open/visible.txt", "");
    let locked = project.add_dir("locked");
    project.add_file("locked/hidden.txt", "");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Permission bits are not enforced for this user (e.g. root).
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }
    let (_stdout, stderr, success) = run_treedoc(project.path(), &[]);
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(success, "permission error must be non-fatal");
    assert!(
        stderr.contains("warning") && stderr.contains("locked"),
        "should warn about the unreadable directory: {}",
        stderr
    );

    let doc = project.read_document();
    assert!(doc.contains("locked/"), "the directory itself stays listed");
    assert!(!doc.contains("hidden.txt"), "children are skipped");
    assert!(doc.contains("visible.txt"), "walk continues with siblings");
}

#[cfg(unix)]
#[test]
fn test_symlinked_directory_is_not_descended() {
    use std::os::unix::fs::symlink;

    let project = TestProject::new();
    project.add_file("real/file.txt", "");
    symlink(project.path().join("real"), project.path().join("link")).unwrap();

    let (_stdout, _stderr, success) = run_treedoc(project.path(), &[]);
    assert!(success);

    let doc = project.read_document();
    assert!(doc.contains("real/"));
    assert!(doc.contains("link"));
    assert_eq!(
        doc.matches("file.txt").count(),
        1,
        "symlink must not duplicate the subtree: {}",
        doc
    );
}
