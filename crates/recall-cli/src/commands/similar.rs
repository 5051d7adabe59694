//! The `recall similar` command.

use anyhow::Result;

use recall_core::fuzzy::FuzzyMatcher;
use recall_core::normalize::normalize_word;

pub fn execute(first: String, second: String, threshold: f64) -> Result<()> {
    let matcher = FuzzyMatcher::new(threshold)?;

    // Compare the words the way the scorer sees them.
    let a = normalize_word(&first).map(|w| w.into_string()).unwrap_or_default();
    let b = normalize_word(&second).map(|w| w.into_string()).unwrap_or_default();

    let distance = matcher.distance(&a, &b);
    let similarity = matcher.similarity(&a, &b);

    println!("{a} / {b}");
    println!("Edit distance: {distance}");
    println!("Similarity:    {similarity:.3}");
    if matcher.is_similar(&a, &b) {
        println!("Match at threshold {threshold}");
    } else {
        println!("No match at threshold {threshold}");
    }

    Ok(())
}
