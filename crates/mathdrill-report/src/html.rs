//! Shareable results page generator.
//!
//! Produces a self-contained HTML file with all CSS inlined, so the page
//! can be screenshotted or sent around as a single file.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

use mathdrill_core::session::performance_message;
use mathdrill_core::traits::ResultsPayload;

/// Escape a string for safe HTML insertion.
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Uppercase the first character, as the original settings labels read.
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// CSS class for the accuracy-tiered banner and accuracy cell.
pub(crate) fn accuracy_class(accuracy: u32) -> &'static str {
    if accuracy >= 90 {
        "excellent"
    } else if accuracy >= 70 {
        "good"
    } else {
        "needs-practice"
    }
}

/// Closing line selected by accuracy.
pub(crate) fn closing_line(accuracy: u32) -> &'static str {
    if accuracy >= 80 {
        "I'm getting really good at math!"
    } else {
        "I'm working hard to improve my math skills!"
    }
}

/// Generate the shareable results page for a completed session.
pub fn render_results_page(payload: &ResultsPayload, generated_at: DateTime<Utc>) -> String {
    let player = html_escape(&payload.player_name);
    let tier_class = accuracy_class(payload.accuracy);

    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{player}'s Math Game Results</title>\n"));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str("<div class=\"report-card\">\n");
    html.push_str("<h1>Math Game Results</h1>\n");

    // Header
    html.push_str("<div class=\"header\">\n");
    html.push_str(&format!("<h2>{player} just finished a session!</h2>\n"));
    html.push_str(&format!(
        "<p class=\"meta\">Generated on {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str("</div>\n");

    // Results table
    html.push_str("<div class=\"results\">\n");
    html.push_str("<h3>Game results</h3>\n");
    html.push_str("<table>\n");
    html.push_str(&format!("<tr><td>Player</td><td>{player}</td></tr>\n"));
    html.push_str(&format!(
        "<tr><td>Final Score</td><td class=\"score\">{} points</td></tr>\n",
        payload.score
    ));
    html.push_str(&format!(
        "<tr><td>Accuracy</td><td class=\"{tier_class}\">{}%</td></tr>\n",
        payload.accuracy
    ));
    html.push_str(&format!(
        "<tr><td>Total Time</td><td>{}</td></tr>\n",
        html_escape(&payload.total_time)
    ));
    html.push_str(&format!(
        "<tr><td>Questions</td><td>{}/10 answered</td></tr>\n",
        payload.questions_answered
    ));
    html.push_str(&format!(
        "<tr><td>Correct Answers</td><td>{}</td></tr>\n",
        payload.correct_answers
    ));
    html.push_str(&format!(
        "<tr><td>Difficulty</td><td>{}</td></tr>\n",
        html_escape(&capitalize(&payload.difficulty))
    ));
    html.push_str(&format!(
        "<tr><td>Operation</td><td>{}</td></tr>\n",
        html_escape(&capitalize(&payload.operation))
    ));
    html.push_str("</table>\n");
    html.push_str("</div>\n");

    // Accuracy-tiered performance banner
    html.push_str(&format!(
        "<div class=\"performance {tier_class}\">\n<h3>{}</h3>\n<p>{}</p>\n</div>\n",
        performance_message(payload.accuracy),
        closing_line(payload.accuracy)
    ));

    // Raw payload for anyone re-ingesting the page
    html.push_str("<details>\n<summary>Raw JSON Data</summary>\n<pre><code>");
    html.push_str(
        &serde_json::to_string_pretty(payload)
            .unwrap_or_default()
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    );
    html.push_str("</code></pre>\n</details>\n");

    html.push_str("<p class=\"footer\">Sent automatically from the math practice game</p>\n");
    html.push_str("</div>\n</body>\n</html>");
    html
}

/// Write the results page to a file, creating parent directories as needed.
pub fn write_results_page(
    payload: &ResultsPayload,
    generated_at: DateTime<Utc>,
    path: &Path,
) -> Result<()> {
    let html = render_results_page(payload, generated_at);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, html)?;
    Ok(())
}

const CSS: &str = r#"
:root { --bg: #667eea; --card: #fff; --fg: #2d3748; --border: #e2e8f0; }
body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; background: linear-gradient(135deg, var(--bg) 0%, #764ba2 100%); min-height: 100vh; color: var(--fg); }
.report-card { background: var(--card); border-radius: 20px; padding: 30px; box-shadow: 0 20px 40px rgba(0,0,0,0.1); text-align: center; }
.header { background: #e6fffa; padding: 20px; border-radius: 15px; margin-bottom: 25px; }
.results { background: #fffaf0; padding: 25px; border-radius: 15px; margin-bottom: 25px; }
.performance { padding: 20px; border-radius: 15px; font-weight: bold; margin-bottom: 20px; }
.performance.excellent { background: #c6f6d5; }
.performance.good { background: #feebc8; }
.performance.needs-practice { background: #fed7d7; }
table { width: 100%; margin: 20px 0; border-collapse: collapse; }
td { padding: 8px; text-align: left; }
td:first-child { font-weight: bold; }
td.excellent { color: #56ab2f; font-weight: bold; }
td.good { color: #ff9500; font-weight: bold; }
td.needs-practice { color: #ff6b6b; font-weight: bold; }
.score { font-size: 1.5em; color: #667eea; font-weight: bold; }
.meta { color: #718096; font-size: 14px; }
pre { overflow-x: auto; padding: 1rem; background: var(--border); border-radius: 8px; text-align: left; }
details { margin: 1rem 0; }
summary { cursor: pointer; font-weight: bold; }
.footer { border-top: 1px solid var(--border); padding-top: 15px; margin-top: 20px; font-size: 12px; color: #999; }
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(accuracy: u32) -> ResultsPayload {
        ResultsPayload {
            player_name: "Autumn".into(),
            score: 145,
            accuracy,
            total_time: "42s".into(),
            difficulty: "easy".into(),
            operation: "mixed".into(),
            questions_answered: 10,
            correct_answers: accuracy / 10,
        }
    }

    #[test]
    fn page_contains_result_fields() {
        let html = render_results_page(&payload(100), Utc::now());
        assert!(html.contains("<html"));
        assert!(html.contains("</html>"));
        assert!(html.contains("Autumn"));
        assert!(html.contains("145 points"));
        assert!(html.contains("100%"));
        assert!(html.contains("42s"));
        assert!(html.contains("10/10 answered"));
        assert!(html.contains("Easy"));
        assert!(html.contains("Mixed"));
        assert!(html.contains("math superstar"));
        assert!(html.contains("getting really good at math"));
    }

    #[test]
    fn accuracy_tiers_select_banner() {
        let html = render_results_page(&payload(75), Utc::now());
        assert!(html.contains("Good job! Keep practicing to improve!"));
        assert!(html.contains("working hard to improve"));

        let html = render_results_page(&payload(40), Utc::now());
        assert!(html.contains("You'll get better with time!"));
        assert!(html.contains("class=\"performance needs-practice\""));
    }

    #[test]
    fn player_name_is_escaped() {
        let mut p = payload(100);
        p.player_name = "<script>alert(1)</script>".into();
        let html = render_results_page(&p, Utc::now());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn page_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages").join("results.html");

        write_results_page(&payload(90), Utc::now(), &path).unwrap();
        assert!(path.exists());

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("<html"));
    }

    #[test]
    fn capitalize_first_char() {
        assert_eq!(capitalize("easy"), "Easy");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("mixed"), "Mixed");
    }
}
