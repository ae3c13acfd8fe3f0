//! The `mathdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("mathdrill.toml").exists() {
        println!("mathdrill.toml already exists, skipping.");
    } else {
        std::fs::write("mathdrill.toml", SAMPLE_CONFIG)?;
        println!("Created mathdrill.toml");
    }

    println!("\nNext steps:");
    println!("  1. Edit mathdrill.toml with your player name and results endpoint");
    println!("  2. Run: mathdrill play");
    println!("  3. Re-render a saved session: mathdrill render --summary <file> --format all");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# mathdrill configuration

player_name = ""
difficulty = "easy"
operation = "mixed"

[notify]
# Base URL of the results endpoint that emails summaries to the family.
results_url = "${MATHDRILL_RESULTS_URL}"
# Directory for locally rendered shareable results pages.
page_dir = "./mathdrill-results"
# Recipients shown in email previews; placeholder entries are ignored.
recipients = ["dad@example.com", "grandma@example.com"]
"#;
