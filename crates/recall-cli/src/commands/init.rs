//! The `recall init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("recall.toml").exists() {
        println!("recall.toml already exists, skipping.");
    } else {
        std::fs::write("recall.toml", SAMPLE_CONFIG)?;
        println!("Created recall.toml");
    }

    std::fs::create_dir_all("drills")?;
    let example_path = std::path::Path::new("drills/example.toml");
    if example_path.exists() {
        println!("drills/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DRILL_SET)?;
        println!("Created drills/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust scoring in recall.toml");
    println!("  2. Run: recall check --drills drills/example.toml");
    println!("  3. Run: recall compare --passage passage.txt --attempt attempt.txt");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# recall configuration

[scoring]
# Weights must sum to 1.
content_weight = 0.8
format_weight = 0.2
# "positional" pairs words by index; "sequence" tolerates dropped or added words.
alignment = "positional"
# "set" lists each missing/incorrect word once; "multiset" lists every occurrence.
word_lists = "set"
# Uncomment to credit near-miss spellings.
# fuzzy_threshold = 0.8

[cache]
capacity = 4096
"#;

const EXAMPLE_DRILL_SET: &str = r#"[drill_set]
id = "example"
name = "Example Drills"
description = "A few attempts at a famous opening line"

[[cases]]
id = "perfect"
passage = "Four score and seven years ago."
attempt = "Four score and seven years ago."
expected_accuracy = 100

[[cases]]
id = "lowercase"
passage = "Four score and seven years ago."
attempt = "four score and seven years ago."
expected_accuracy = 99

[[cases]]
id = "blank"
passage = "Four score and seven years ago."
attempt = ""
expected_accuracy = 0
expected_correct_words = 0
"#;
