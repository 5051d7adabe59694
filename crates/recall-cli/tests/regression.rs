//! Scoring regression tests.
//!
//! Pins the default scoring policy end-to-end through the public library
//! API, and checks that the bundled drill sets still hold.

use std::path::Path;

use recall_core::align::AlignmentStrategy;
use recall_core::config::EngineConfig;
use recall_core::drill::{load_drills, run_drill_set};
use recall_core::{compare, ComparisonEngine};

const DECLARATION: &str =
    "We hold these truths to be self-evident, that all men are created equal.";
const DECLARATION_PARTIAL: &str = "These truths are self-evident, that all men are created equal.";

fn engine_with(alignment: AlignmentStrategy) -> ComparisonEngine {
    let mut config = EngineConfig::default();
    config.scoring.alignment = alignment;
    ComparisonEngine::from_config(&config).unwrap()
}

#[test]
fn bundled_drills_pass() {
    let sets = load_drills(Path::new("../../drills")).unwrap();
    assert!(!sets.is_empty());
    for set in &sets {
        let outcomes = run_drill_set(set, &EngineConfig::default()).unwrap();
        for o in &outcomes {
            assert!(o.passed(), "{}/{}: {:?}", o.set_id, o.case_id, o.failures);
        }
    }
}

#[test]
fn positional_and_sequence_disagree_on_dropped_phrase() {
    let positional = engine_with(AlignmentStrategy::Positional).compare(DECLARATION, DECLARATION_PARTIAL);
    let sequence = engine_with(AlignmentStrategy::Sequence).compare(DECLARATION, DECLARATION_PARTIAL);

    assert_eq!(positional.correct_words, 0);
    assert_eq!(sequence.correct_words, 9);
    assert!(sequence.accuracy > positional.accuracy);

    // Word lists and format score do not depend on alignment.
    assert_eq!(positional.missing_words, sequence.missing_words);
    assert_eq!(positional.incorrect_words, sequence.incorrect_words);
    assert_eq!(positional.format_accuracy, sequence.format_accuracy);
}

#[test]
fn default_compare_matches_default_engine() {
    let engine = ComparisonEngine::default();
    for (reference, attempt) in [
        (DECLARATION, DECLARATION),
        (DECLARATION, DECLARATION_PARTIAL),
        (DECLARATION, ""),
        ("", ""),
    ] {
        assert_eq!(compare(reference, attempt), engine.compare(reference, attempt));
    }
}

#[test]
fn scores_stay_in_range_for_odd_input() {
    let long = "word ".repeat(500);
    let cases = [
        ("", "anything at all"),
        ("...", "!!!"),
        ("Ünïcödé wörds", "unicode words"),
        ("Don't stop", "dont stop"),
        ("a", long.as_str()),
        (long.as_str(), "a"),
    ];
    for (reference, attempt) in cases {
        let result = compare(reference, attempt);
        assert!(result.accuracy <= 100);
        assert!(result.correct_words <= result.total_words);
        assert!((0.0..=100.0).contains(&result.content_accuracy));
        assert!((0.0..=100.0).contains(&result.format_accuracy));
    }
}
