//! The `recall compare` command.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use recall_core::align::AlignmentStrategy;
use recall_core::config::load_config_from;
use recall_core::format::{char_diff, CharMark};
use recall_core::{ComparisonEngine, ComparisonResult};

use crate::feedback::{encouragement, Grade};
use crate::report::ScoreReport;

const MAX_CHAR_ROWS: usize = 20;

pub fn execute(
    passage_path: PathBuf,
    attempt_path: Option<PathBuf>,
    format: String,
    alignment: Option<String>,
    min_accuracy: Option<u8>,
    chars: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let passage = std::fs::read_to_string(&passage_path)
        .with_context(|| format!("failed to read passage: {}", passage_path.display()))?;
    let attempt = match &attempt_path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read attempt: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read attempt from stdin")?;
            buf
        }
    };
    // Files and pipes usually end with a newline the learner never typed.
    let passage = passage.trim_end_matches(['\n', '\r']);
    let attempt = attempt.trim_end_matches(['\n', '\r']);

    let mut config = load_config_from(config_path.as_deref())?;
    if let Some(name) = alignment {
        config.scoring.alignment = name.parse::<AlignmentStrategy>()?;
    }
    let engine = ComparisonEngine::from_config(&config)?;
    tracing::debug!(?engine, "scoring {}", passage_path.display());

    let result = engine.compare(passage, attempt);
    let accuracy = result.accuracy;

    match format.as_str() {
        "json" => {
            let report = ScoreReport::new(passage_path, config.scoring.alignment.to_string(), result);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        _ => {
            print_text(&result);
            if chars {
                print_char_diff(passage, attempt);
            }
        }
    }

    if let Some(min) = min_accuracy {
        if accuracy < min {
            anyhow::bail!("accuracy {accuracy}% is below the minimum of {min}%");
        }
    }

    Ok(())
}

fn print_text(result: &ComparisonResult) {
    println!(
        "Accuracy: {}% ({})",
        result.accuracy,
        Grade::from_accuracy(result.accuracy)
    );
    println!(
        "Content:  {:.1}% ({}/{} words)",
        result.content_accuracy, result.correct_words, result.total_words
    );
    println!("Format:   {:.1}%", result.format_accuracy);

    if !result.word_comparisons.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["#", "Passage", "Attempt", ""]);
        for c in &result.word_comparisons {
            let mark = match (&c.original, &c.attempt) {
                (Some(o), Some(a)) if c.is_correct && o != a => "~",
                _ if c.is_correct => "ok",
                _ => "x",
            };
            table.add_row(vec![
                Cell::new(c.position + 1),
                Cell::new(c.original.as_ref().map(|w| w.as_str()).unwrap_or("-")),
                Cell::new(c.attempt.as_ref().map(|w| w.as_str()).unwrap_or("-")),
                Cell::new(mark),
            ]);
        }
        println!("\n{table}");
    }

    if !result.missing_words.is_empty() {
        println!("\nMissing: {}", join_words(&result.missing_words));
    }
    if !result.incorrect_words.is_empty() {
        println!("Incorrect: {}", join_words(&result.incorrect_words));
    }

    println!("\n{}", encouragement(result.accuracy));
}

fn print_char_diff(passage: &str, attempt: &str) {
    let diff = char_diff(passage, attempt);
    let count = |mark: CharMark| diff.iter().filter(|d| d.mark == mark).count();
    println!(
        "\nCharacters: {} capitalization, {} substitution, {} missing, {} extra",
        count(CharMark::Capitalization),
        count(CharMark::Substitution),
        count(CharMark::Missing),
        count(CharMark::Extra)
    );

    let mismatches: Vec<_> = diff.iter().filter(|d| d.mark != CharMark::Match).collect();
    if mismatches.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["Index", "Expected", "Actual", "Kind"]);
    for d in mismatches.iter().take(MAX_CHAR_ROWS) {
        table.add_row(vec![
            Cell::new(d.index),
            Cell::new(d.expected.map(show_char).unwrap_or_default()),
            Cell::new(d.actual.map(show_char).unwrap_or_default()),
            Cell::new(format!("{:?}", d.mark).to_lowercase()),
        ]);
    }
    println!("{table}");
    if mismatches.len() > MAX_CHAR_ROWS {
        println!("... and {} more", mismatches.len() - MAX_CHAR_ROWS);
    }
}

fn show_char(c: char) -> String {
    if c.is_whitespace() {
        format!("{c:?}")
    } else {
        c.to_string()
    }
}

fn join_words(words: &[recall_core::normalize::NormalizedWord]) -> String {
    words
        .iter()
        .map(|w| w.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
