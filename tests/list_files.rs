// tests/list_files.rs

use std::fs;
use std::path::Path;

use serde_json::Value;
use tempfile::TempDir;

use cmdkit::{
    get_files, run_command, FileFilter, ListFilesCommand,
};
use cmdkit_test_utils::init_tracing;

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// dir1/ with a spread of extensions plus a subdirectory of text files.
fn sample_tree() -> TempDir {
    let base = tempfile::tempdir().expect("create temp dir");
    let dir1 = base.path().join("dir1");
    fs::create_dir_all(&dir1).expect("create dir1");

    for name in [
        "file1.yml",
        "file2.yaml",
        "file1.dev.yml",
        "file2.dev.yaml",
        "file3.txt",
        "file4.py",
        "file5.yamld",
    ] {
        fs::write(dir1.join(name), "content").expect("write file");
    }

    let sub = dir1.join("dir1_sub1");
    fs::create_dir_all(&sub).expect("create subdir");
    fs::write(sub.join("file1.txt"), "content").expect("write file");
    fs::write(sub.join("file2.txt"), "content").expect("write file");

    base
}

#[test]
fn lists_every_file_recursively() -> TestResult {
    init_tracing();

    let base = sample_tree();
    let files = get_files(base.path(), &FileFilter::match_all(), true)?;
    assert_eq!(files.len(), 9);

    // Unknown directory yields an empty list, not an error.
    let files = get_files("unknown", &FileFilter::match_all(), true)?;
    assert!(files.is_empty());
    Ok(())
}

#[test]
fn non_recursive_stays_in_the_top_directory() -> TestResult {
    init_tracing();

    let base = sample_tree();
    let dir1 = base.path().join("dir1");
    let files = get_files(&dir1, &FileFilter::match_all(), false)?;
    assert_eq!(files.len(), 7);
    Ok(())
}

#[test]
fn filters_by_name_patterns() -> TestResult {
    init_tracing();

    let base = sample_tree();
    let dir1 = base.path().join("dir1");

    // All the yaml files ("yamld" does not match the anchored pattern).
    let filter = FileFilter::new(&[r".*\.ya?ml$"], &[])?;
    let files = get_files(&dir1, &filter, true)?;
    assert_eq!(files.len(), 4);

    // Everything except txt and py files.
    let filter = FileFilter::new(&[], &[r".*\.txt", r".*\.py"])?;
    let files = get_files(&dir1, &filter, true)?;
    assert_eq!(files.len(), 5);

    // Yaml files without "dev" in the name.
    let filter = FileFilter::new(&[r".*\.ya?ml$"], &[r".*dev.*"])?;
    let files = get_files(&dir1, &filter, true)?;
    assert_eq!(files.len(), 2);

    // No matches.
    let filter = FileFilter::new(&[r".*\.cpp"], &[])?;
    let files = get_files(&dir1, &filter, true)?;
    assert!(files.is_empty());

    // All txt files, including the subdirectory.
    let filter = FileFilter::new(&[r".*\.txt"], &[])?;
    let files = get_files(&dir1, &filter, true)?;
    assert_eq!(files.len(), 3);

    // One specific file.
    let filter = FileFilter::new(&[r"file3\.txt"], &[])?;
    let files = get_files(&dir1, &filter, true)?;
    assert_eq!(files.len(), 1);
    assert!(files[0].ends_with(Path::new("file3.txt")));
    Ok(())
}

#[test]
fn results_are_sorted() -> TestResult {
    init_tracing();

    let base = sample_tree();
    let files = get_files(base.path(), &FileFilter::match_all(), true)?;
    let mut sorted = files.clone();
    sorted.sort();
    assert_eq!(files, sorted);
    Ok(())
}

#[test]
fn list_files_command_conforms_to_the_contract() -> TestResult {
    init_tracing();

    let base = sample_tree();
    let filter = FileFilter::new(&[r".*\.txt"], &[])?;
    let cmd = ListFilesCommand::new(base.path())
        .with_filter(filter)
        .recursive(true);

    let res = run_command(&cmd, None);
    assert!(res.succeeded);
    let paths = res.output.as_array().expect("array output");
    assert_eq!(paths.len(), 3);
    assert!(paths
        .iter()
        .all(|p| matches!(p, Value::String(s) if s.ends_with(".txt"))));
    Ok(())
}
