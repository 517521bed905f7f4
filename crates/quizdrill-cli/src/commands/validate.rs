//! The `quizdrill validate` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizdrill_core::parser;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let content = std::fs::read_to_string(&bank_path)
        .with_context(|| format!("failed to read bank file: {}", bank_path.display()))?;

    let bank = parser::parse_bank(&content)
        .with_context(|| format!("invalid question bank: {}", bank_path.display()))?;

    println!("Question bank: {} questions", bank.len());

    let warnings = parser::validate_bank(&bank);
    for w in &warnings {
        let prefix = w
            .question_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Bank is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
