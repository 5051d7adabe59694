//! The `recall check` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use recall_core::config::load_config_from;
use recall_core::drill::{load_drills, run_drill_set, validate_drill_set};

pub fn execute(drills_path: PathBuf, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let sets = load_drills(&drills_path)?;
    if sets.is_empty() {
        anyhow::bail!("no drill sets found in {}", drills_path.display());
    }

    let mut total = 0;
    let mut failed = 0;

    for set in &sets {
        println!("Drill set: {} ({} cases)", set.name, set.cases.len());

        for w in validate_drill_set(set) {
            let prefix = w
                .case_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }

        let outcomes = run_drill_set(set, &config)?;

        let mut table = Table::new();
        table.set_header(vec!["Case", "Alignment", "Accuracy", "Words", "Status"]);
        for o in &outcomes {
            let status = if o.passed() {
                "PASS".to_string()
            } else {
                format!("FAIL: {}", o.failures.join("; "))
            };
            table.add_row(vec![
                Cell::new(&o.case_id),
                Cell::new(o.alignment),
                Cell::new(format!("{}%", o.accuracy)),
                Cell::new(format!("{}/{}", o.correct_words, o.total_words)),
                Cell::new(status),
            ]);
        }
        println!("{table}\n");

        total += outcomes.len();
        failed += outcomes.iter().filter(|o| !o.passed()).count();
    }

    if failed > 0 {
        anyhow::bail!("{failed} of {total} drill case(s) failed");
    }
    println!("All {total} drill case(s) passed.");

    Ok(())
}
