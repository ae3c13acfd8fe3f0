//! The `mathdrill play` command.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use mathdrill_core::model::{Difficulty, Operation};
use mathdrill_core::session::{
    GameSession, GameSettings, Phase, Summary, QUESTIONS_PER_SESSION,
};
use mathdrill_core::traits::{deliver_summary, ResultsPayload};
use mathdrill_notify::{create_sinks, load_config_from};
use mathdrill_report::html::write_results_page;

pub async fn execute(
    difficulty: Option<String>,
    operation: Option<String>,
    name: Option<String>,
    seed: Option<u64>,
    save: Option<PathBuf>,
    no_notify: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let difficulty: Difficulty = match difficulty {
        Some(s) => s.parse().map_err(|e: String| anyhow!(e))?,
        None => config.difficulty,
    };
    let operation: Operation = match operation {
        Some(s) => s.parse().map_err(|e: String| anyhow!(e))?,
        None => config.operation,
    };
    let player_name = name.unwrap_or_else(|| config.player_name.clone());

    let settings = GameSettings {
        player_name,
        difficulty,
        operation,
    };
    let mut session = match seed {
        Some(seed) => GameSession::with_seed(settings, seed),
        None => GameSession::new(settings),
    };

    println!(
        "Welcome, {}! {} questions of {} {} ahead.",
        session.settings().effective_player_name(),
        QUESTIONS_PER_SESSION,
        difficulty,
        operation,
    );
    session.start();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut summary = None;

    while session.phase() == Phase::Active {
        let Some(question) = session.current_question() else {
            break;
        };
        println!();
        println!(
            "[{}s] Question {}/{}: {}",
            session.elapsed_secs(),
            session.state().questions_answered + 1,
            QUESTIONS_PER_SESSION,
            question
        );
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("input closed before the session finished");
        };
        let line = line?;

        let Some(outcome) = session.submit(&line) else {
            break;
        };
        if outcome.feedback.correct {
            println!(
                "{} (+{} points, streak {})",
                outcome.feedback.message,
                outcome.feedback.points_awarded,
                session.state().streak
            );
        } else {
            println!("{}", outcome.feedback.message);
        }
        summary = outcome.summary;
    }

    let summary = summary.ok_or_else(|| anyhow!("session ended without a summary"))?;
    print_summary(&summary);

    if let Some(dir) = save {
        let timestamp = summary.created_at.format("%Y-%m-%dT%H%M%S");
        let json_path = dir.join(format!("summary-{timestamp}.json"));
        summary.save_json(&json_path)?;
        println!("Summary saved to: {}", json_path.display());

        let page_path = dir.join(format!("summary-{timestamp}.html"));
        write_results_page(&ResultsPayload::from(&summary), summary.created_at, &page_path)?;
        println!("Results page: {}", page_path.display());
    }

    if !no_notify {
        let sinks = create_sinks(&config);
        if sinks.is_empty() {
            tracing::info!("no notification sinks configured, skipping delivery");
        }
        for sink in &sinks {
            println!("Sending results via {}...", sink.name());
            let response = deliver_summary(sink.as_ref(), &summary).await;
            println!("{}", response.message);
        }
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Result", "Value"]);
    table.add_row(vec![Cell::new("Player"), Cell::new(&summary.player_name)]);
    table.add_row(vec![
        Cell::new("Final Score"),
        Cell::new(format!("{} points", summary.final_score)),
    ]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!("{}%", summary.accuracy_percent)),
    ]);
    table.add_row(vec![
        Cell::new("Total Time"),
        Cell::new(format!("{}s", summary.total_time_secs)),
    ]);
    table.add_row(vec![
        Cell::new("Questions"),
        Cell::new(format!(
            "{}/{}",
            summary.questions_answered, QUESTIONS_PER_SESSION
        )),
    ]);
    table.add_row(vec![
        Cell::new("Correct Answers"),
        Cell::new(summary.correct_answers),
    ]);
    table.add_row(vec![
        Cell::new("Difficulty"),
        Cell::new(summary.difficulty),
    ]);
    table.add_row(vec![Cell::new("Operation"), Cell::new(summary.operation)]);

    println!("\nSession complete!\n{table}");
    println!("{}", summary.performance_message());
}
