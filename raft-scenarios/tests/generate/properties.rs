//! File-level properties of generated scenarios.
//!
//! These checks read the raw text back and inspect it line by line, without
//! going through the crate's own decoder.

use std::collections::HashSet;
use std::fs;

use raft_scenarios::{generate, BatchDriver, ScenarioConfig};

const BLOCK: [&str; 8] = [
    "periodic_one,{node},100",
    "dispatch_all",
    "replicate,latest,CommitConfirmer",
    "periodic_all,10",
    "dispatch_all",
    "periodic_all,10",
    "dispatch_all",
    "state_all",
];

const PRIMING: [&str; 5] = [
    "periodic_one,0,110",
    "dispatch_all",
    "periodic_all,30",
    "dispatch_all",
    "state_all",
];

/// Check every documented property of one scenario file.
fn check_scenario(text: &str, k: usize, steps: usize) {
    assert!(text.ends_with("assert_state_sync\n"), "missing final assertion");
    assert!(!text.ends_with("\n\n"), "more than one trailing newline");

    let lines: Vec<&str> = text.lines().collect();

    // topology
    let expected_nodes = format!(
        "nodes,{}",
        (0..k).map(|n| n.to_string()).collect::<Vec<_>>().join(",")
    );
    assert_eq!(lines[0], expected_nodes);

    let links = k * (k - 1) / 2;
    let connect: Vec<&str> = lines[1..1 + links].to_vec();
    assert!(connect.iter().all(|l| l.starts_with("connect,")));
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("connect,")).count(),
        links
    );
    let mut seen = HashSet::new();
    for line in &connect {
        let fields: Vec<usize> = line
            .split(',')
            .skip(1)
            .map(|f| f.parse().unwrap())
            .collect();
        assert_eq!(fields.len(), 2);
        assert_ne!(fields[0], fields[1], "self-loop in {}", line);
        let pair = (fields[0].min(fields[1]), fields[0].max(fields[1]));
        assert!(seen.insert(pair), "duplicate link {}", line);
    }

    // priming
    let priming_start = 1 + links;
    assert_eq!(&lines[priming_start..priming_start + 5], &PRIMING);

    // exploration
    let exploration_start = priming_start + 5;
    let exploration = &lines[exploration_start..exploration_start + steps];
    let mut last_label = 0u64;
    for line in exploration {
        if let Some(payload) = line.strip_prefix("replicate,latest,hello ") {
            let label: u64 = payload.parse().unwrap();
            assert!(label > last_label, "label {} after {}", label, last_label);
            last_label = label;
        } else if let Some(ms) = line.strip_prefix("periodic_all,") {
            let ms: u64 = ms.parse().unwrap();
            assert!(ms < 20 || (100..500).contains(&ms), "tick {}", ms);
        } else {
            assert_eq!(*line, "dispatch_all");
        }
    }

    // convergence
    let epilogue_start = exploration_start + steps;
    assert_eq!(lines.len(), epilogue_start + 8 * k + 1);
    for node in 0..k {
        let block = &lines[epilogue_start + 8 * node..epilogue_start + 8 * (node + 1)];
        let expected: Vec<String> = BLOCK
            .iter()
            .map(|l| l.replace("{node}", &node.to_string()))
            .collect();
        assert_eq!(block, expected.as_slice(), "block for node {}", node);
    }
    assert_eq!(
        lines.iter().filter(|l| **l == "assert_state_sync").count(),
        1
    );
    assert_eq!(lines.last(), Some(&"assert_state_sync"));
}

#[test]
fn test_default_batch_satisfies_properties() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let set = generate(scratch.path(), 3, 3, 25).expect("generation failed");

    assert_eq!(set.len(), 3);
    for path in set.paths() {
        assert!(path.is_absolute());
        assert!(path.is_file());
        check_scenario(&fs::read_to_string(path).unwrap(), 3, 25);
    }
}

#[test]
fn test_single_node_cluster() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let set = generate(scratch.path(), 1, 1, 25).expect("generation failed");

    let text = fs::read_to_string(set.get(0).unwrap()).unwrap();
    assert!(!text.contains("connect,"));
    assert!(text.starts_with("nodes,0\nperiodic_one,0,110\n"));
    check_scenario(&text, 1, 25);
}

#[test]
fn test_larger_clusters_and_many_seeds() {
    for k in [2, 4, 5, 7] {
        for seed in 0..5 {
            let scratch = tempfile::tempdir().expect("tempdir");
            let set = BatchDriver::new(ScenarioConfig::new(2, k, 40).with_seed(seed))
                .generate(scratch.path())
                .expect("generation failed");
            for path in set.paths() {
                check_scenario(&fs::read_to_string(path).unwrap(), k, 40);
            }
        }
    }
}

#[test]
fn test_zero_steps() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let set = generate(scratch.path(), 1, 3, 0).expect("generation failed");
    check_scenario(&fs::read_to_string(set.get(0).unwrap()).unwrap(), 3, 0);
}

#[test]
fn test_exploration_snapshot_adds_one_line() {
    let scratch = tempfile::tempdir().expect("tempdir");
    let config = ScenarioConfig::new(1, 3, 10)
        .with_seed(3)
        .with_exploration_snapshot(true);
    let set = BatchDriver::new(config).generate(scratch.path()).unwrap();

    let text = fs::read_to_string(set.get(0).unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    // 4 topology + 5 priming + 10 exploration, then the checkpoint
    assert_eq!(lines[19], "state_all");
    assert_eq!(lines[20], "periodic_one,0,100");
    assert_eq!(lines.len(), 4 + 5 + 10 + 1 + 8 * 3 + 1);
}
