//! Session inspection CLI commands: list and show.
//!
//! Reads the configured session store directly, so no API key is needed.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;
use uuid::Uuid;

use podscription_core::store::repository::SessionRepository;
use podscription_types::error::StoreError;
use podscription_types::session::{MessageRole, Session};

/// List stored sessions, oldest first.
///
/// # Examples
///
/// ```bash
/// podscription sessions list
/// podscription sessions list --json
/// ```
pub async fn list_sessions<R: SessionRepository>(repo: &R, json: bool) -> Result<()> {
    let mut sessions = repo.list().await?;
    sessions.sort_by_key(|s| s.created_at);

    if json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!();
        println!(
            "  {} No sessions yet. Start one with: {}",
            style("i").blue().bold(),
            style("podscription ask \"<describe the problem>\"").yellow()
        );
        println!();
        return Ok(());
    }

    println!();
    println!("{}", sessions_table(&sessions));
    println!();
    println!(
        "  {} session{}",
        style(sessions.len()).bold(),
        if sessions.len() == 1 { "" } else { "s" }
    );
    println!();

    Ok(())
}

fn sessions_table(sessions: &[Session]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("ID").fg(Color::White),
        Cell::new("Name").fg(Color::White),
        Cell::new("Messages").fg(Color::White),
        Cell::new("Created").fg(Color::White),
        Cell::new("Last activity").fg(Color::White),
    ]);

    for session in sessions {
        table.add_row(vec![
            Cell::new(session.id).fg(Color::DarkGrey),
            Cell::new(&session.name).fg(Color::Cyan),
            Cell::new(session.messages.len()).fg(Color::White),
            Cell::new(session.created_at.format("%Y-%m-%d %H:%M")).fg(Color::White),
            Cell::new(session.updated_at.format("%Y-%m-%d %H:%M")).fg(Color::DarkGrey),
        ]);
    }

    table
}

/// Print one session's full conversation.
///
/// # Examples
///
/// ```bash
/// podscription sessions show <session-id>
/// ```
pub async fn show_session<R: SessionRepository>(repo: &R, id: Uuid, json: bool) -> Result<()> {
    let session = match repo.get(&id).await {
        Ok(session) => session,
        Err(StoreError::NotFound(_)) => anyhow::bail!("Session '{id}' not found"),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&session)?);
        return Ok(());
    }

    println!();
    println!(
        "  {} {}",
        style(&session.name).cyan().bold(),
        style(format!("({})", session.id)).dim()
    );
    println!();

    for message in &session.messages {
        let speaker = match message.role {
            MessageRole::User => style("you").green().bold(),
            MessageRole::Assistant => style("doctor").magenta().bold(),
        };
        println!(
            "  {} {}",
            speaker,
            style(message.timestamp.format("%H:%M:%S")).dim()
        );
        for line in message.content.lines() {
            println!("    {line}");
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_table_has_row_per_session() {
        let now = Utc::now();
        let sessions = vec![
            Session::new(Uuid::new_v4(), "first".to_string(), now),
            Session::new(Uuid::new_v4(), "second".to_string(), now + Duration::seconds(5)),
        ];

        let table = sessions_table(&sessions);
        assert_eq!(table.row_iter().count(), 2);
        let rendered = table.to_string();
        assert!(rendered.contains("first"));
        assert!(rendered.contains("second"));
    }
}
