//! The comparison engine.
//!
//! Runs normalization and tokenization on both strings, aligns the words,
//! scores format fidelity independently, then blends the two scores.
//! Comparisons are pure: the only state carried between calls is the
//! optional edit-distance cache inside a configured [`FuzzyMatcher`].

use std::sync::Arc;

use crate::align::{Aligner, AlignmentStrategy, ExactMatcher, WordMatcher};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::format::format_accuracy;
use crate::fuzzy::{DistanceCache, FuzzyMatcher, LruDistanceCache};
use crate::normalize::scoring_words;
use crate::results::ComparisonResult;
use crate::score::{content_accuracy, ScoringWeights, WordListMode};
use crate::token::tokenize;

/// Compare with the default policy: strict positional alignment, exact word
/// matching, set-based word lists, 80/20 weighting.
pub fn compare(reference: &str, attempt: &str) -> ComparisonResult {
    ComparisonEngine::default().compare(reference, attempt)
}

/// A configured scorer. Cheap to share across threads.
pub struct ComparisonEngine {
    weights: ScoringWeights,
    word_lists: WordListMode,
    aligner: Box<dyn Aligner>,
    matcher: Arc<dyn WordMatcher>,
}

impl Default for ComparisonEngine {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            word_lists: WordListMode::default(),
            aligner: AlignmentStrategy::default().aligner(),
            matcher: Arc::new(ExactMatcher),
        }
    }
}

impl std::fmt::Debug for ComparisonEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComparisonEngine")
            .field("weights", &self.weights)
            .field("word_lists", &self.word_lists)
            .field("aligner", &self.aligner.name())
            .finish_non_exhaustive()
    }
}

impl ComparisonEngine {
    pub fn new(weights: ScoringWeights) -> Self {
        Self {
            weights,
            ..Self::default()
        }
    }

    /// Build an engine from configuration, with a fresh bounded cache.
    pub fn from_config(config: &EngineConfig) -> Result<Self, ConfigError> {
        let cache: Arc<dyn DistanceCache> = Arc::new(LruDistanceCache::new(config.cache.capacity));
        Self::from_config_with_cache(config, cache)
    }

    /// Build an engine from configuration, sharing the given distance cache.
    pub fn from_config_with_cache(
        config: &EngineConfig,
        cache: Arc<dyn DistanceCache>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut engine = Self::new(config.weights()?)
            .with_aligner(config.scoring.alignment.aligner())
            .with_word_lists(config.scoring.word_lists);
        if let Some(threshold) = config.scoring.fuzzy_threshold {
            engine = engine.with_matcher(Arc::new(FuzzyMatcher::with_cache(threshold, cache)?));
        }
        Ok(engine)
    }

    pub fn with_aligner(mut self, aligner: Box<dyn Aligner>) -> Self {
        self.aligner = aligner;
        self
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn WordMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    pub fn with_word_lists(mut self, mode: WordListMode) -> Self {
        self.word_lists = mode;
        self
    }

    pub fn weights(&self) -> ScoringWeights {
        self.weights
    }

    pub fn aligner_name(&self) -> &str {
        self.aligner.name()
    }

    /// Score `attempt` against `reference`. Never fails.
    pub fn compare(&self, reference: &str, attempt: &str) -> ComparisonResult {
        let original_words = scoring_words(reference);
        let attempt_words = scoring_words(attempt);

        let word_comparisons =
            self.aligner
                .align(&original_words, &attempt_words, self.matcher.as_ref());

        let total_words = original_words.len();
        let correct_words = word_comparisons
            .iter()
            .filter(|c| c.is_correct && c.original.is_some())
            .count();
        debug_assert!(
            correct_words <= total_words,
            "{} credited {correct_words} of {total_words} passage words",
            self.aligner.name()
        );

        let content = content_accuracy(correct_words, total_words);
        let format = format_accuracy(reference, attempt);

        // An exact reproduction is perfect even when nothing normalizes to a word.
        let accuracy = if reference == attempt {
            100
        } else {
            self.weights.combine(content, format)
        };

        let missing_words = self.word_lists.difference(&original_words, &attempt_words);
        let incorrect_words = self.word_lists.difference(&attempt_words, &original_words);

        tracing::debug!(
            aligner = self.aligner.name(),
            total_words,
            correct_words,
            content_accuracy = content,
            format_accuracy = format,
            accuracy,
            "scored attempt"
        );

        ComparisonResult {
            accuracy,
            content_accuracy: content,
            format_accuracy: format,
            total_words,
            correct_words,
            missing_words,
            incorrect_words,
            original_tokens: tokenize(reference),
            attempt_tokens: tokenize(attempt),
            word_comparisons,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::SequenceAligner;

    const GETTYSBURG: &str = "Four score and seven years ago.";
    const DECLARATION: &str =
        "We hold these truths to be self-evident, that all men are created equal.";
    const DECLARATION_PARTIAL: &str =
        "These truths are self-evident, that all men are created equal.";

    fn words(list: &[crate::normalize::NormalizedWord]) -> Vec<&str> {
        list.iter().map(|w| w.as_str()).collect()
    }

    #[test]
    fn identical_text_is_perfect() {
        let result = compare(DECLARATION, DECLARATION);
        assert_eq!(result.accuracy, 100);
        assert_eq!(result.correct_words, result.total_words);
        assert!(result.missing_words.is_empty());
        assert!(result.incorrect_words.is_empty());
        assert!(result.is_word_perfect());
    }

    #[test]
    fn empty_attempt_scores_zero() {
        let result = compare(GETTYSBURG, "");
        assert_eq!(result.total_words, 6);
        assert_eq!(result.correct_words, 0);
        assert_eq!(result.content_accuracy, 0.0);
        assert_eq!(result.format_accuracy, 0.0);
        assert_eq!(result.accuracy, 0);
        assert_eq!(result.missing_words.len(), 6);
        assert!(result.attempt_tokens.is_empty());
    }

    #[test]
    fn case_only_variance() {
        let result = compare(GETTYSBURG, "four score and seven years ago.");
        assert_eq!(result.content_accuracy, 100.0);
        assert!(result.format_accuracy < 100.0);
        assert!(result.accuracy > 80 && result.accuracy < 100);
        assert_eq!(result.accuracy, 99);
    }

    #[test]
    fn dropped_leading_phrase_is_positional_zero() {
        let result = compare(DECLARATION, DECLARATION_PARTIAL);
        assert_eq!(result.total_words, 13);
        assert_eq!(result.correct_words, 0);
        assert_eq!(result.content_accuracy, 0.0);
        assert_eq!(words(&result.missing_words), vec!["we", "hold", "to", "be"]);
        assert!(result.incorrect_words.is_empty());
    }

    #[test]
    fn sequence_aligner_softens_dropped_phrase() {
        let engine = ComparisonEngine::default().with_aligner(Box::new(SequenceAligner));
        let result = engine.compare(DECLARATION, DECLARATION_PARTIAL);
        assert_eq!(result.total_words, 13);
        assert_eq!(result.correct_words, 9);
        assert!((result.content_accuracy - 9.0 / 13.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn empty_inputs_resolve_to_numbers() {
        let both_empty = compare("", "");
        assert_eq!(both_empty.accuracy, 100);
        assert_eq!(both_empty.total_words, 0);
        assert_eq!(both_empty.content_accuracy, 0.0);

        let empty_reference = compare("", "some words here");
        assert_eq!(empty_reference.total_words, 0);
        assert_eq!(empty_reference.accuracy, 0);
        assert_eq!(empty_reference.incorrect_words.len(), 3);

        let punctuation_only = compare("...", "!!!");
        assert_eq!(punctuation_only.total_words, 0);
        assert_eq!(punctuation_only.accuracy, 0);
        assert!(!punctuation_only.format_accuracy.is_nan());
    }

    #[test]
    fn very_long_attempt_cannot_exceed_total() {
        let attempt = "four score and seven years ago ".repeat(50);
        let result = compare(GETTYSBURG, &attempt);
        assert_eq!(result.correct_words, 6);
        assert!(result.correct_words <= result.total_words);
        assert!(result.accuracy <= 100);
        assert_eq!(result.word_comparisons.len(), 300);
    }

    struct DoubleCounting;

    impl Aligner for DoubleCounting {
        fn name(&self) -> &str {
            "double-counting"
        }

        fn align(
            &self,
            original: &[crate::normalize::NormalizedWord],
            attempt: &[crate::normalize::NormalizedWord],
            matcher: &dyn WordMatcher,
        ) -> Vec<crate::align::WordComparison> {
            let mut pairs = crate::align::PositionalAligner.align(original, attempt, matcher);
            pairs.extend(pairs.clone());
            pairs
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "double-counting credited 12 of 6")]
    fn aligner_crediting_a_word_twice_is_caught() {
        let engine = ComparisonEngine::default().with_aligner(Box::new(DoubleCounting));
        engine.compare(GETTYSBURG, GETTYSBURG);
    }

    #[test]
    fn fuzzy_matching_credits_typos() {
        let config = EngineConfig::from_toml_str("[scoring]\nfuzzy_threshold = 0.75\n").unwrap();
        let engine = ComparisonEngine::from_config(&config).unwrap();
        let strict = compare(GETTYSBURG, "Four scroe and seven years ago.");
        let fuzzy = engine.compare(GETTYSBURG, "Four scroe and seven years ago.");
        assert_eq!(strict.correct_words, 5);
        // "scroe" is two edits from "score" (0.6 similarity), still wrong.
        assert_eq!(fuzzy.correct_words, 5);

        let fuzzy = engine.compare(GETTYSBURG, "Four score and seven yeers ago.");
        assert_eq!(fuzzy.correct_words, 6);
        // Word lists stay exact.
        assert_eq!(words(&fuzzy.incorrect_words), vec!["yeers"]);
    }

    #[test]
    fn from_config_shares_injected_cache() {
        let config = EngineConfig::from_toml_str("[scoring]\nfuzzy_threshold = 0.8\n").unwrap();
        let cache: Arc<dyn DistanceCache> = Arc::new(LruDistanceCache::new(8));
        let engine = ComparisonEngine::from_config_with_cache(&config, Arc::clone(&cache)).unwrap();
        engine.compare("alpha beta", "alpha betta");
        assert!(!cache.is_empty());
        assert!(cache.len() <= 8);
    }

    #[test]
    fn from_config_rejects_invalid_settings() {
        let config = EngineConfig::from_toml_str("[scoring]\ncontent_weight = 0.5\n").unwrap();
        assert!(matches!(
            ComparisonEngine::from_config(&config),
            Err(ConfigError::WeightSum(_))
        ));
    }

    #[test]
    fn custom_weights_change_blend() {
        let engine = ComparisonEngine::new(ScoringWeights::new(1.0, 0.0).unwrap());
        let result = engine.compare(GETTYSBURG, "four score and seven years ago");
        assert_eq!(result.accuracy, 100);
        assert_eq!(engine.weights().content(), 1.0);
    }

    #[test]
    fn multiset_word_lists() {
        let engine = ComparisonEngine::default().with_word_lists(WordListMode::Multiset);
        let result = engine.compare("never never never give up", "never give up");
        assert_eq!(words(&result.missing_words), vec!["never", "never"]);
        let strict = compare("never never never give up", "never give up");
        assert!(strict.missing_words.is_empty());
    }

    #[test]
    fn tokens_round_trip_and_highlight() {
        let result = compare(DECLARATION, DECLARATION_PARTIAL);
        let rebuilt: String = result.original_tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(rebuilt, DECLARATION);
        let hold = result
            .original_tokens
            .iter()
            .find(|t| t.text == "hold")
            .unwrap();
        assert!(result.is_missing(hold));
        let these = result
            .attempt_tokens
            .iter()
            .find(|t| t.text == "These")
            .unwrap();
        assert!(!result.is_incorrect(these));
    }

    #[test]
    fn engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ComparisonEngine>();

        let engine = Arc::new(ComparisonEngine::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = Arc::clone(&engine);
                std::thread::spawn(move || engine.compare(GETTYSBURG, GETTYSBURG).accuracy)
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), 100);
        }
    }
}
