//! Integration tests for recording messages on the ledger

use std::io::Write;
use v2vchain::blockchain::{Block, Ledger, GENESIS_PREVIOUS_DIGEST};
use v2vchain::config::load_config_from;
use v2vchain::hash::meets_difficulty;
use v2vchain::messages::compose;

/// Helper to build a one-message payload
fn record(text: &str) -> Vec<String> {
    vec![text.to_string()]
}

#[test]
fn test_two_vehicle_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(2);
    ledger.add_member("A");
    ledger.add_member("B");

    let message = compose(ledger.members(), 1, 2, "hello")?;
    assert_eq!(message, "From A to B: hello");
    ledger.add_record(vec![message]);

    assert_eq!(ledger.len(), 2);
    let chain = ledger.blocks();
    assert!(chain[1].digest().starts_with("00"));
    assert_eq!(chain[1].previous_digest(), chain[0].digest());
    assert!(ledger.is_valid());

    Ok(())
}

#[test]
fn test_genesis_for_any_difficulty() {
    for difficulty in [0, 1, 5, 64] {
        let ledger = Ledger::new(difficulty);
        assert_eq!(ledger.difficulty(), difficulty);
        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
        assert_eq!(ledger.tip().index(), 0);
        assert_eq!(ledger.tip().previous_digest(), GENESIS_PREVIOUS_DIGEST);
        assert!(ledger.is_valid());
        assert!(ledger.validate().is_ok());
    }
}

#[test]
fn test_append_monotonicity_and_mining_postcondition() {
    let mut ledger = Ledger::new(2);
    for i in 1..=4u64 {
        let before = ledger.len();
        let digest = ledger
            .add_record(record(&format!("From A to B: position {}", i)))
            .digest()
            .to_string();
        assert_eq!(ledger.len(), before + 1);
        assert_eq!(ledger.tip().index(), i);
        assert!(meets_difficulty(&digest, 2));
    }

    for pair in ledger.blocks().windows(2) {
        assert_eq!(pair[1].index(), pair[0].index() + 1);
        assert_eq!(pair[1].previous_digest(), pair[0].digest());
    }
    assert!(ledger.is_valid());
}

#[test]
fn test_appending_leaves_earlier_blocks_untouched() {
    let mut ledger = Ledger::new(1);
    ledger.add_record(record("first"));
    let before = ledger.snapshot();

    ledger.add_record(record("second"));
    let after = ledger.snapshot();
    assert_eq!(&after[..before.len()], before.as_slice());
}

#[test]
fn test_determinism_of_block_digest() {
    let payload = vec!["From A to B: hello".to_string(), "From B to A: hi".to_string()];
    let a = Block::new(1, 1_700_000_000_000, "abc", payload.clone());
    let b = Block::new(1, 1_700_000_000_000, "abc", payload);
    assert_eq!(a.digest(), b.digest());

    let mined_a = a.mine(1);
    let mined_b = b.mine(1);
    assert_eq!(mined_a.nonce(), mined_b.nonce());
    assert_eq!(mined_a.digest(), mined_b.digest());
}

#[test]
fn test_empty_and_multi_message_records() {
    let mut ledger = Ledger::new(1);
    ledger.add_record(Vec::new());
    ledger.add_record(vec!["one".to_string(), "two".to_string()]);

    let snapshot = ledger.snapshot();
    assert!(snapshot[1].payload.is_empty());
    assert_eq!(snapshot[2].payload, vec!["one", "two"]);
    assert!(ledger.is_valid());
}

#[test]
fn test_snapshot_serializes() -> Result<(), Box<dyn std::error::Error>> {
    let mut ledger = Ledger::new(1);
    ledger.add_record(record("From A to B: hello"));

    let json = serde_json::to_value(ledger.snapshot())?;
    assert_eq!(json[0]["index"], 0);
    assert_eq!(json[0]["previous_digest"], "0");
    assert_eq!(json[1]["payload"][0], "From A to B: hello");
    assert_eq!(json[1]["digest"], ledger.tip().digest());
    Ok(())
}

#[test]
fn test_ledger_from_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("v2vchain.toml");
    let mut file = std::fs::File::create(&path)?;
    writeln!(file, "[ledger]\ndifficulty = 1\n\n[logging]\nlevel = \"warn\"")?;

    let config = load_config_from(&path)?;
    let mut ledger = Ledger::new(config.ledger.difficulty);
    ledger.add_record(record("configured"));
    assert!(ledger.tip().digest().starts_with('0'));
    assert_eq!(config.log_level()?, tracing::Level::WARN);
    Ok(())
}
