//! Batch-level behaviour: paths, directories, errors.

use std::fs;

use raft_scenarios::{generate, BatchDriver, ScenarioConfig, ScenarioError};

#[test]
fn test_paths_are_ordered_and_canonical() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let set = generate(scratch.path(), 4, 3, 5).expect("generation failed");

    let canonical_dir = fs::canonicalize(scratch.path()).unwrap();
    for (index, entry) in set.iter().enumerate() {
        assert_eq!(entry.index, index);
        assert_eq!(entry.path, canonical_dir.join(format!("scenario-{index}")));
    }
}

#[test]
fn test_creates_target_directory() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let target = scratch.path().join("a").join("b");

    let set = generate(&target, 2, 3, 5).expect("generation failed");
    assert!(target.is_dir());
    assert_eq!(set.len(), 2);
}

#[test]
fn test_only_scenario_files_are_published() {
    let scratch = tempfile::tempdir().expect("tempdir");
    generate(scratch.path(), 3, 3, 25).expect("generation failed");

    let mut names: Vec<String> = fs::read_dir(scratch.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(names, vec!["scenario-0", "scenario-1", "scenario-2"]);
}

#[test]
fn test_invalid_parameters_fail_fast() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let target = scratch.path().join("out");

    for (scenarios, nodes) in [(0, 3), (3, 0)] {
        let err = generate(&target, scenarios, nodes, 25).unwrap_err();
        assert!(
            matches!(err, ScenarioError::InvalidParameters { .. }),
            "unexpected error: {}",
            err
        );
    }
    assert!(!target.exists(), "no directory should be created");
}

#[test]
fn test_unwritable_target() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let blocker = scratch.path().join("file");
    fs::write(&blocker, "not a directory").unwrap();

    let err = BatchDriver::new(ScenarioConfig::default())
        .generate(blocker.join("nested"))
        .unwrap_err();
    assert!(matches!(err, ScenarioError::DirectoryUnwritable { .. }));
}
