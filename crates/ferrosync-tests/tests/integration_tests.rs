//! Integration tests for ferrosync
//!
//! These tests drive comparison and sync together on real directory trees.

use ferrosync_config::ConfigBuilder;
use ferrosync_core::{
    CompareOptions, ComparisonResult, DiffEngine, Phase, ProgressTally, Report, SyncExecutor,
};
use ferrosync_tests::test_utils::{
    as_strings, generate_test_data, snapshot, Node, TestDataPattern, TreeBuilder,
};
use ferrosync_types::{ErrorKind, Side, SyncPolicy};
use rstest::rstest;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn compare(left: &Path, right: &Path) -> ComparisonResult {
    DiffEngine::new(CompareOptions::default())
        .diff(left, right)
        .unwrap()
}

fn roots() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn test_scenario_a_add_missing_file() {
    let (left, right) = roots();
    TreeBuilder::new().file("a.txt", "hi").build(left.path()).unwrap();

    let result = compare(left.path(), right.path());
    assert_eq!(as_strings(&result.left_only_relative().unwrap()), vec!["a.txt"]);
    assert!(result.right().entries().is_empty());
    assert!(result.paired().is_empty());

    SyncExecutor::new()
        .sync(&result, &SyncPolicy::add_only())
        .unwrap();
    assert_eq!(fs::read_to_string(right.path().join("a.txt")).unwrap(), "hi");
}

#[test]
fn test_scenario_b_overwrite_differing_file() {
    let (left, right) = roots();
    TreeBuilder::new().file("f.txt", "foo").build(left.path()).unwrap();
    TreeBuilder::new().file("f.txt", "bar").build(right.path()).unwrap();

    let result = compare(left.path(), right.path());
    assert_eq!(result.paired().len(), 1);
    let pair = &result.paired()[0];
    assert!(pair.left().path().starts_with(result.left().root()));
    assert!(pair.right().path().starts_with(result.right().root()));
    assert_eq!(pair.left().name(), "f.txt");

    let policy = SyncPolicy {
        overwrite: true,
        ..SyncPolicy::default()
    };
    let stats = SyncExecutor::new().sync(&result, &policy).unwrap();
    assert_eq!(stats.files_overwritten, 1);
    assert_eq!(fs::read_to_string(right.path().join("f.txt")).unwrap(), "foo");
}

#[test]
fn test_scenario_c_directory_recorded_whole() {
    let (left, right) = roots();
    TreeBuilder::new()
        .file("sub/x.txt", "x")
        .file("sub/nested/y.txt", "y")
        .build(left.path())
        .unwrap();

    let result = compare(left.path(), right.path());
    assert_eq!(as_strings(&result.left_only_relative().unwrap()), vec!["sub"]);

    SyncExecutor::new()
        .sync(&result, &SyncPolicy::add_only())
        .unwrap();
    assert_eq!(snapshot(left.path()), snapshot(right.path()));
}

#[test]
fn test_scenario_d_mirror() {
    let (left, right) = roots();
    TreeBuilder::new()
        .file("a", "A")
        .file("b", "left b")
        .build(left.path())
        .unwrap();
    TreeBuilder::new()
        .file("b", "right b")
        .file("c", "C")
        .build(right.path())
        .unwrap();

    let result = compare(left.path(), right.path());
    SyncExecutor::new()
        .sync(&result, &SyncPolicy::mirror())
        .unwrap();

    let tree = snapshot(right.path());
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.get(Path::new("a")), Some(&Node::text("A")));
    assert_eq!(tree.get(Path::new("b")), Some(&Node::text("left b")));
    assert!(!right.path().join("c").exists());
}

#[test]
fn test_reverse_direction_mirror() {
    let (left, right) = roots();
    TreeBuilder::new()
        .file("only_left.txt", "l")
        .file("shared.txt", "left")
        .build(left.path())
        .unwrap();
    TreeBuilder::new()
        .file("only_right/deep.txt", "r")
        .file("shared.txt", "right")
        .build(right.path())
        .unwrap();

    let result = compare(left.path(), right.path());
    let stats = SyncExecutor::new()
        .sync(&result, &SyncPolicy::mirror().reversed())
        .unwrap();

    assert_eq!(stats.directories_copied, 1);
    assert_eq!(stats.entries_removed, 1);
    assert_eq!(stats.files_overwritten, 1);
    assert_eq!(snapshot(left.path()), snapshot(right.path()));
    assert_eq!(fs::read_to_string(left.path().join("shared.txt")).unwrap(), "right");
}

#[test]
fn test_mirror_sync_is_idempotent() {
    let (left, right) = roots();
    TreeBuilder::new()
        .file("a.txt", "a")
        .file("docs/readme.md", "# readme")
        .dir("empty")
        .file("x", "file on the left")
        .build(left.path())
        .unwrap();
    TreeBuilder::new()
        .file("a.txt", "changed")
        .file("docs/old.md", "old")
        .file("x/inside.txt", "directory on the right")
        .build(right.path())
        .unwrap();

    let executor = SyncExecutor::new();
    let policy = SyncPolicy::mirror();
    executor
        .sync(&compare(left.path(), right.path()), &policy)
        .unwrap();

    let again = compare(left.path(), right.path());
    assert!(again.is_in_sync(), "still different: {again:?}");
    assert_eq!(SyncExecutor::planned_operations(&again, &policy), 0);

    let stats = executor.sync(&again, &policy).unwrap();
    assert_eq!(stats.operations(), 0);
    assert_eq!(snapshot(left.path()), snapshot(right.path()));
}

#[test]
fn test_report_text_matches_format() {
    let (left, right) = roots();
    TreeBuilder::new()
        .file("b.txt", "1")
        .file("only_left.txt", "l")
        .build(left.path())
        .unwrap();
    TreeBuilder::new()
        .file("b.txt", "2")
        .dir("only_right")
        .build(right.path())
        .unwrap();

    let result = compare(left.path(), right.path());
    let expected = format!(
        "Left directory: \"{}\"\n\
         Right directory: \"{}\"\n\
         \n\
         Comparison report:\n\
         \n\
         xxxxxxxxxxxxxxx\n\
         Hashes different: (1)\n\
         - b.txt\n\
         ---------------\n\
         \n\
         [[[[[[[[[[[[[[[\n\
         Extra in left: (1)\n\
         - only_left.txt\n\
         ---------------\n\
         \n\
         ]]]]]]]]]]]]]]]\n\
         Extra in right: (1)\n\
         - only_right\n\
         ---------------\n\
         \n",
        result.left().root().display(),
        result.right().root().display()
    );
    assert_eq!(Report::new(&result).render().unwrap(), expected);
}

#[rstest]
#[case(Side::Left)]
#[case(Side::Right)]
fn test_invalid_root_aborts_before_traversal(#[case] side: Side) {
    let (left, right) = roots();
    let missing = left.path().join("does-not-exist");
    let (l, r) = match side {
        Side::Left => (missing.as_path(), right.path()),
        Side::Right => (left.path(), missing.as_path()),
    };

    let err = DiffEngine::new(CompareOptions::default())
        .diff(l, r)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(err.to_string().starts_with(&format!("{side} path")));
}

#[test]
fn test_large_binary_shortcut_versus_exact() {
    let (left, right) = roots();
    let size = 2048;
    TreeBuilder::new()
        .bytes("media.bin", generate_test_data(size, TestDataPattern::Binary, 1))
        .bytes("notes.txt", generate_test_data(size, TestDataPattern::Text, 1))
        .build(left.path())
        .unwrap();
    TreeBuilder::new()
        .bytes("media.bin", generate_test_data(size, TestDataPattern::Binary, 2))
        .bytes("notes.txt", generate_test_data(size, TestDataPattern::Text, 2))
        .build(right.path())
        .unwrap();

    let options = CompareOptions {
        large_file_threshold: 1024,
        ..CompareOptions::default()
    };
    let shortcut = DiffEngine::new(options)
        .diff(left.path(), right.path())
        .unwrap();
    assert_eq!(as_strings(&shortcut.paired_relative().unwrap()), vec!["notes.txt"]);

    let exact = DiffEngine::new(CompareOptions {
        large_binary_shortcut: false,
        ..options
    })
    .diff(left.path(), right.path())
    .unwrap();
    assert_eq!(
        as_strings(&exact.paired_relative().unwrap()),
        vec!["media.bin", "notes.txt"]
    );
}

#[test]
fn test_compare_options_from_layered_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ferrosync.toml");
    fs::write(
        &path,
        "[compare]\nlarge_file_threshold = 10\nlarge_binary_shortcut = false\n",
    )
    .unwrap();

    let config = ConfigBuilder::new()
        .add_defaults()
        .add_source_file(&path)
        .build()
        .unwrap();
    let options = CompareOptions::from(&config.compare);
    assert_eq!(options.large_file_threshold, 10);
    assert!(!options.large_binary_shortcut);
    assert_eq!(options.text_probe_len, 3);
}

#[test]
fn test_progress_for_full_run() {
    let (left, right) = roots();
    TreeBuilder::new()
        .file("a.txt", "a")
        .file("same.txt", "same")
        .build(left.path())
        .unwrap();
    TreeBuilder::new()
        .file("same.txt", "same")
        .file("z.txt", "z")
        .build(right.path())
        .unwrap();

    let tally = ProgressTally::with_totals();
    let result = DiffEngine::new(CompareOptions::default())
        .diff_with_progress(left.path(), right.path(), &tally)
        .unwrap();
    assert_eq!(tally.total(Phase::Comparing), Some(4));
    assert_eq!(tally.units(Phase::Comparing), 4);

    SyncExecutor::new()
        .sync_with_progress(&result, &SyncPolicy::mirror(), &tally)
        .unwrap();
    assert_eq!(tally.total(Phase::Syncing), Some(2));
    assert_eq!(tally.units(Phase::Syncing), 2);
    assert_eq!(tally.phases_finished(), 2);
}
