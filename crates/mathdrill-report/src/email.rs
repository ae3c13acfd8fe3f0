//! Email content generation for a completed session.
//!
//! Mirrors what the results endpoint sends to the family recipient list:
//! a subject carrying the player name and accuracy, a plain-text body, and
//! an HTML body with the results table and accuracy-tiered banner.

use mathdrill_core::session::performance_message;
use mathdrill_core::traits::ResultsPayload;

use crate::html::{accuracy_class, capitalize, closing_line, html_escape};

/// Fully rendered email, ready to hand to a mail transport.
#[derive(Debug, Clone)]
pub struct EmailContent {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Render the results email for the given recipients.
pub fn render_email(payload: &ResultsPayload, recipients: &[String]) -> EmailContent {
    EmailContent {
        to: recipients.to_vec(),
        subject: format!(
            "{}'s Math Game Results - {}% Score!",
            payload.player_name, payload.accuracy
        ),
        text: render_text(payload),
        html: render_html(payload),
    }
}

fn render_text(payload: &ResultsPayload) -> String {
    format!(
        "Hi Dad!\n\n\
         I just finished playing the math practice game and wanted to share my results with you!\n\n\
         GAME RESULTS\n\
         ==============================\n\
         Player: {player}\n\
         Final Score: {score} points\n\
         Accuracy: {accuracy}%\n\
         Total Time: {total_time}\n\
         Questions: {answered}/10 answered\n\
         Correct Answers: {correct}\n\
         Difficulty: {difficulty}\n\
         Operation: {operation}\n\n\
         {performance}\n\n\
         {closing}\n\n\
         Love you!\n\n\
         ---\n\
         Sent automatically from the math practice game\n",
        player = payload.player_name,
        score = payload.score,
        accuracy = payload.accuracy,
        total_time = payload.total_time,
        answered = payload.questions_answered,
        correct = payload.correct_answers,
        difficulty = capitalize(&payload.difficulty),
        operation = capitalize(&payload.operation),
        performance = performance_message(payload.accuracy),
        closing = closing_line(payload.accuracy),
    )
}

fn render_html(payload: &ResultsPayload) -> String {
    let player = html_escape(&payload.player_name);
    let tier_class = accuracy_class(payload.accuracy);
    let banner_bg = match tier_class {
        "excellent" => "#c6f6d5",
        "good" => "#feebc8",
        _ => "#fed7d7",
    };

    let mut html = String::new();
    html.push_str(
        "<div style=\"font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; \
         padding: 20px;\">\n",
    );
    html.push_str("<h1 style=\"color: #4a5568; text-align: center;\">Math Game Results</h1>\n");
    html.push_str(&format!(
        "<p>Hi Dad! {player} just finished playing the math practice game; here are the results.</p>\n"
    ));

    html.push_str("<table style=\"width: 100%; color: #2d3748; font-size: 16px;\">\n");
    for (label, value) in [
        ("Player", player.clone()),
        ("Final Score", format!("{} points", payload.score)),
        ("Accuracy", format!("{}%", payload.accuracy)),
        ("Total Time", html_escape(&payload.total_time)),
        (
            "Questions",
            format!("{}/10 answered", payload.questions_answered),
        ),
        ("Correct Answers", payload.correct_answers.to_string()),
        ("Difficulty", html_escape(&capitalize(&payload.difficulty))),
        ("Operation", html_escape(&capitalize(&payload.operation))),
    ] {
        html.push_str(&format!(
            "<tr><td style=\"padding: 8px 0; font-weight: bold;\">{label}:</td>\
             <td style=\"padding: 8px 0;\">{value}</td></tr>\n"
        ));
    }
    html.push_str("</table>\n");

    html.push_str(&format!(
        "<div style=\"background: {banner_bg}; padding: 20px; border-radius: 10px; \
         text-align: center;\">\n<h3 style=\"color: #2d3748;\">{}</h3>\n\
         <p style=\"color: #2d3748;\">{}</p>\n</div>\n",
        performance_message(payload.accuracy),
        closing_line(payload.accuracy)
    ));

    html.push_str(
        "<p style=\"text-align: center; color: #667eea; font-size: 18px;\">Love you!</p>\n",
    );
    html.push_str(
        "<p style=\"text-align: center; color: #999; font-size: 12px; border-top: 1px solid \
         #e2e8f0; padding-top: 15px;\">Sent automatically from the math practice game</p>\n",
    );
    html.push_str("</div>");
    html
}
