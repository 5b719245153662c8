//! One-shot consultation from the command line.

use std::fmt::Write as _;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use uuid::Uuid;

use podscription_types::session::{Message, Session};

use crate::state::AppState;

/// Run a single consultation turn and print the prescription.
///
/// # Examples
///
/// ```bash
/// podscription ask "my pod is stuck in CrashLoopBackOff"
/// podscription ask --session <session-id> "still restarting" --json
/// ```
pub async fn ask(
    state: &AppState,
    session_id: Option<Uuid>,
    message: &str,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let spinner = if json || quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new_spinner()
    };
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.set_message("Examining the patient...");
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = state.consultation.send_message(session_id, message).await;
    spinner.finish_and_clear();
    let (session, reply) = result?;

    if json {
        let out = serde_json::json!({ "session": session, "message": reply });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print!("{}", format_reply(&session, &reply));
    Ok(())
}

/// Styled rendering of an assistant reply.
pub fn format_reply(session: &Session, reply: &Message) -> String {
    let mut out = String::new();
    let _ = writeln!(out);

    if let Some(intent) = &reply.intent {
        let _ = writeln!(
            out,
            "  {} {} (confidence {:.1})",
            style("Triage:").bold(),
            style(&intent.category).cyan(),
            intent.confidence
        );
        if !intent.symptoms.is_empty() {
            let _ = writeln!(out, "  {} {}", style("Symptoms:").bold(), intent.symptoms.join(", "));
        }
        let _ = writeln!(out);
    }

    let _ = writeln!(out, "{}", reply.content.trim_end());

    if let Some(prescription) = &reply.prescription {
        if !prescription.commands.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "  {}", style("Commands").green().bold());
            for command in &prescription.commands {
                let _ = writeln!(out, "    {} {}", style("$").dim(), style(command).yellow());
            }
        }
    }

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {} {}",
        style("Session").dim(),
        style(session.id).dim()
    );
    let _ = writeln!(out);
    out
}
