//! The `quizdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizdrill.toml
    if std::path::Path::new("quizdrill.toml").exists() {
        println!("quizdrill.toml already exists, skipping.");
    } else {
        std::fs::write("quizdrill.toml", SAMPLE_CONFIG)?;
        println!("Created quizdrill.toml");
    }

    // Create example question bank
    if std::path::Path::new("questions.json").exists() {
        println!("questions.json already exists, skipping.");
    } else {
        std::fs::write("questions.json", SAMPLE_BANK)?;
        println!("Created questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit questions.json with your own questions");
    println!("  2. Run: quizdrill validate --bank questions.json");
    println!("  3. Run: quizdrill run");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizdrill configuration

# Where the question bank lives: an http(s) URL or a local file path.
bank_url = "questions.json"

# Request bound for HTTP fetches, in seconds.
timeout_secs = 15

# Directory holding the progress snapshot.
data_dir = "./.quizdrill"
"#;

const SAMPLE_BANK: &str = r#"{
  "questions": [
    {
      "id": "capital-fr",
      "category": "geography",
      "type": "single",
      "text": "What is the capital of France?",
      "options": ["Berlin", "Paris", "Madrid", "Rome"],
      "correct": "Paris",
      "explanation": "Paris has been the capital of France since 987."
    },
    {
      "id": "primes-under-six",
      "category": "math",
      "type": "multiple",
      "text": "Which of these numbers are prime?",
      "options": ["2", "3", "4", "5"],
      "correct": ["2", "3", "5"],
      "explanation": "2, 3, and 5 have no divisors besides 1 and themselves."
    },
    {
      "id": "rust-year",
      "category": "computing",
      "type": "single",
      "text": "In which year did Rust 1.0 ship?",
      "options": ["2010", "2013", "2015", "2018"],
      "correct": "2015"
    }
  ]
}
"#;
