//! services/dashboard/src/shell/mod.rs
//!
//! The interactive loop: read a line, parse it, hand it to the handler, write the reply.

pub mod handler;
pub mod protocol;
pub mod render;
pub mod state;

pub use handler::{handle_command, Reply};
pub use protocol::Command;
pub use state::AppState;

use crate::error::DashboardError;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

const PROMPT: &[u8] = b"> ";

/// Runs the shell until `quit`, end of input, or `shutdown` is cancelled.
pub async fn run<R, W>(
    state: &AppState,
    reader: R,
    mut writer: W,
    shutdown: CancellationToken,
) -> Result<(), DashboardError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let greeting = match state.identity.session() {
        Some(user) => format!("Welcome back, {}! Type 'help' for commands.\n", user.name),
        None => "Sign in or create an account to continue. Type 'help' for commands.\n"
            .to_string(),
    };
    writer.write_all(greeting.as_bytes()).await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT).await?;
        writer.flush().await?;

        let line = tokio::select! {
            _ = shutdown.cancelled() => {
                info!("Shutdown requested, leaving the shell");
                break;
            }
            line = lines.next_line() => line?,
        };
        let Some(line) = line else {
            debug!("End of input");
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let reply = match line.parse::<Command>() {
            Ok(command) => handle_command(state, command).await,
            Err(e) => Reply::Text(e.to_string()),
        };
        match reply {
            Reply::Text(text) => {
                writer.write_all(text.as_bytes()).await?;
                writer.write_all(b"\n").await?;
            }
            Reply::Quit => break,
        }
    }

    writer.write_all(b"\nGoodbye!\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use learning_dashboard_core::{KeyValueStore, MemoryStore, NoLatency};
    use std::sync::Arc;

    fn test_state() -> AppState {
        let config = Config::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("memory".to_string()),
            _ => None,
        })
        .unwrap();
        AppState::with_ports(
            Arc::new(MemoryStore::new()),
            Arc::new(NoLatency),
            Arc::new(config),
        )
        .unwrap()
    }

    async fn transcript(state: &AppState, input: &str) -> String {
        let mut output = Vec::new();
        run(state, input.as_bytes(), &mut output, CancellationToken::new())
            .await
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[tokio::test]
    async fn end_to_end_progress_scenario() {
        let state = test_state();
        let output = transcript(
            &state,
            "register ada@example.com pw Ada\n\
             enroll coding-programming\n\
             toggle coding-programming html-basics\n\
             toggle coding-programming css-styling\n\
             toggle coding-programming javascript-intro\n\
             toggle coding-programming html-basics\n\
             course coding-programming\n\
             quit\n\
             courses\n",
        )
        .await;

        assert!(output.starts_with("Sign in or create an account"));
        assert!(output.contains("progress: 40%"));
        assert!(output.contains("progress: 60%"));
        assert!(output.contains("Status: In Progress (40%)"));
        assert!(output.ends_with("Goodbye!\n"));
        // Nothing after `quit` is executed.
        assert!(!output.contains("Welcome back"));
        assert_eq!(state.catalog.get_course("coding-programming").unwrap().progress, 40);
    }

    #[tokio::test]
    async fn parse_errors_are_echoed_and_blank_lines_skipped() {
        let state = test_state();
        let output = transcript(&state, "\n   \nfly away\nlogin onlyemail\n").await;
        assert!(output.contains("Unknown command 'fly'"));
        assert!(output.contains("Usage: login <email> <password>"));
    }

    #[tokio::test]
    async fn restored_session_is_greeted() {
        let state = test_state();
        transcript(&state, "register ada@example.com pw Ada\n").await;
        let output = transcript(&state, "whoami\n").await;
        assert!(output.starts_with("Welcome back, Ada!"));
        assert!(output.contains("Ada <ada@example.com>"));
    }

    #[tokio::test]
    async fn tampered_stored_progress_still_renders() {
        let storage = Arc::new(MemoryStore::new());
        let mut courses = learning_dashboard_core::seed::seed_catalog();
        courses[0].progress = 150;
        courses[0].is_registered = true;
        storage
            .put("deh-courses", &serde_json::to_string(&courses).unwrap())
            .unwrap();
        let state = AppState::with_ports(storage, Arc::new(NoLatency), test_state().config)
            .unwrap();

        let output = transcript(
            &state,
            "register ada@example.com pw Ada\ncourse digital-literacy\ncourses\n",
        )
        .await;
        assert!(output.contains("Status: In Progress (0%)"));
        assert!(output.contains("0% - 0 of 4 chapters completed"));
        assert!(output.ends_with("Goodbye!\n"));
    }

    #[tokio::test]
    async fn cancelled_shutdown_stops_the_loop() {
        let state = test_state();
        let shutdown = CancellationToken::new();
        shutdown.cancel();

        let (reader, _keep_open) = tokio::io::duplex(64);
        let mut output = Vec::new();
        run(&state, tokio::io::BufReader::new(reader), &mut output, shutdown)
            .await
            .unwrap();
        assert!(String::from_utf8(output).unwrap().ends_with("Goodbye!\n"));
    }
}
