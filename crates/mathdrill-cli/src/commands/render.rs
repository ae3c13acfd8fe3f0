//! The `mathdrill render` command.

use std::path::PathBuf;

use anyhow::Result;

use mathdrill_core::session::Summary;
use mathdrill_core::traits::ResultsPayload;
use mathdrill_notify::load_config_from;
use mathdrill_report::email::render_email;
use mathdrill_report::html::write_results_page;

pub fn execute(
    summary_path: PathBuf,
    output: PathBuf,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let summary = Summary::load_json(&summary_path)?;
    let payload = ResultsPayload::from(&summary);

    std::fs::create_dir_all(&output)?;
    let stem = format!("results-{}", summary.created_at.format("%Y-%m-%dT%H%M%S"));

    let formats: Vec<&str> = if format == "all" {
        vec!["page", "email"]
    } else {
        format.split(',').collect()
    };

    for fmt in &formats {
        match *fmt {
            "page" => {
                let path = output.join(format!("{stem}.html"));
                write_results_page(&payload, summary.created_at, &path)?;
                println!("Results page: {}", path.display());
            }
            "email" => {
                let email = render_email(&payload, &config.notify.active_recipients());

                let path = output.join(format!("{stem}.eml.txt"));
                let mut preview = String::new();
                preview.push_str(&format!("To: {}\n", email.to.join(", ")));
                preview.push_str(&format!("Subject: {}\n\n", email.subject));
                preview.push_str(&email.text);
                std::fs::write(&path, preview)?;
                println!("Email preview: {}", path.display());

                let html_path = output.join(format!("{stem}.email.html"));
                std::fs::write(&html_path, &email.html)?;
                println!("Email HTML body: {}", html_path.display());
            }
            _ => {
                eprintln!("Unknown format: {fmt}");
            }
        }
    }

    Ok(())
}
