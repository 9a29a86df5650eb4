//! services/dashboard/src/shell/handler.rs
//!
//! Turns one parsed command into one reply. This is the only place the shell
//! touches the stores, and it only calls their public operations.

use crate::shell::{
    protocol::Command,
    render::{render_course, render_dashboard, render_user, HELP},
    state::AppState,
};
use learning_dashboard_core::PortError;
use regex::Regex;
use std::sync::LazyLock;
use tracing::error;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";
pub const EMAIL_TAKEN: &str = "Email already exists";
pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";
pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";
pub const SIGN_IN_FIRST: &str = "Please log in or register first. Type 'help' for commands.";
pub const COURSE_NOT_FOUND: &str = "Course not found";

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl Reply {
    fn text(message: impl Into<String>) -> Self {
        Reply::Text(message.into())
    }
}

fn unexpected(action: &str, e: PortError) -> Reply {
    error!("Failed to {}: {:?}", action, e);
    Reply::text(TRY_AGAIN)
}

pub async fn handle_command(state: &AppState, command: Command) -> Reply {
    let session = state.identity.session();

    match command {
        Command::Help => Reply::text(HELP),
        Command::Quit => Reply::Quit,

        Command::Register {
            email,
            password,
            name,
        } => {
            if let Some(user) = session {
                return Reply::text(format!("Already signed in as {}. Log out first.", user.email));
            }
            if name.trim().is_empty() {
                return Reply::text(NAME_REQUIRED);
            }
            if !EMAIL_PATTERN.is_match(&email) {
                return Reply::text(INVALID_EMAIL);
            }
            match state.identity.register(&name, &email, &password).await {
                Ok(true) => Reply::text(format!("Account created. Welcome, {}!", name)),
                Ok(false) => Reply::text(EMAIL_TAKEN),
                Err(e) => unexpected("register", e),
            }
        }

        Command::Login { email, password } => {
            if let Some(user) = session {
                return Reply::text(format!("Already signed in as {}. Log out first.", user.email));
            }
            match state.identity.login(&email, &password).await {
                Ok(true) => {
                    let name = state
                        .identity
                        .session()
                        .map(|u| u.name)
                        .unwrap_or_default();
                    Reply::text(format!("Welcome back, {}!", name))
                }
                Ok(false) => Reply::text(INVALID_CREDENTIALS),
                Err(e) => unexpected("log in", e),
            }
        }

        // Everything below needs a signed-in user.
        _ if session.is_none() => Reply::text(SIGN_IN_FIRST),

        Command::Logout => match state.identity.logout() {
            Ok(()) => Reply::text("Signed out."),
            Err(e) => unexpected("log out", e),
        },

        Command::WhoAmI => match session {
            Some(user) => Reply::text(render_user(&user)),
            None => Reply::text(SIGN_IN_FIRST),
        },

        Command::Courses => match session {
            Some(user) => Reply::text(render_dashboard(
                &user,
                &state.catalog.courses(),
                &state.catalog.summary(),
            )),
            None => Reply::text(SIGN_IN_FIRST),
        },

        Command::Course { course_id } => match state.catalog.get_course(&course_id) {
            Some(course) => Reply::text(render_course(&course)),
            None => Reply::text(COURSE_NOT_FOUND),
        },

        Command::Enroll { course_id } => {
            let Some(course) = state.catalog.get_course(&course_id) else {
                return Reply::text(COURSE_NOT_FOUND);
            };
            if course.is_registered {
                return Reply::text(format!("You are already enrolled in {}.", course.title));
            }
            match state.catalog.register_for_course(&course_id) {
                Ok(()) => Reply::text(format!("Enrolled in {}.", course.title)),
                Err(e) => unexpected("enroll", e),
            }
        }

        Command::Toggle {
            course_id,
            chapter_id,
        } => {
            let Some(course) = state.catalog.get_course(&course_id) else {
                return Reply::text(COURSE_NOT_FOUND);
            };
            if !course.is_registered {
                return Reply::text(format!(
                    "Enroll in {} before tracking chapters: enroll {}",
                    course.title, course.id
                ));
            }
            let Some(chapter) = course.chapter(&chapter_id) else {
                return Reply::text(format!("Chapter '{}' is not part of {}.", chapter_id, course.title));
            };
            let done = !chapter.is_completed;
            let title = chapter.title.clone();
            if let Err(e) = state.catalog.toggle_chapter_completion(&course_id, &chapter_id) {
                return unexpected("update chapter", e);
            }
            let progress = state
                .catalog
                .get_course(&course_id)
                .map(|c| c.progress)
                .unwrap_or(course.progress);
            let verb = if done { "completed" } else { "not completed" };
            Reply::text(format!(
                "Marked '{}' as {}. {} progress: {}%",
                title, verb, course.title, progress
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use async_trait::async_trait;
    use learning_dashboard_core::{
        ports::KeyValueStore, LatencyService, MemoryStore, NoLatency, PortResult,
    };
    use std::sync::Arc;

    fn test_state() -> AppState {
        let config = Config::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("memory".to_string()),
            "AUTH_LATENCY_MS" => Some("0".to_string()),
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

    async fn run(state: &AppState, line: &str) -> String {
        match handle_command(state, line.parse().unwrap()).await {
            Reply::Text(text) => text,
            Reply::Quit => "<quit>".to_string(),
        }
    }

    async fn signed_in() -> AppState {
        let state = test_state();
        run(&state, "register ada@example.com pw Ada").await;
        state
    }

    #[tokio::test]
    async fn signed_out_users_only_reach_auth_commands() {
        let state = test_state();
        assert_eq!(run(&state, "courses").await, SIGN_IN_FIRST);
        assert_eq!(run(&state, "enroll coding-programming").await, SIGN_IN_FIRST);
        assert_eq!(run(&state, "logout").await, SIGN_IN_FIRST);
        assert_eq!(run(&state, "help").await, HELP);
        assert_eq!(run(&state, "quit").await, "<quit>");
    }

    #[tokio::test]
    async fn register_checks_form_fields() {
        let state = test_state();
        assert_eq!(run(&state, "register ada@example.com pw").await, NAME_REQUIRED);
        assert_eq!(run(&state, "register not-an-email pw Ada").await, INVALID_EMAIL);
        assert_eq!(
            run(&state, "register ada@example.com pw Ada").await,
            "Account created. Welcome, Ada!"
        );
        assert_eq!(
            state.identity.session().map(|u| u.email),
            Some("ada@example.com".to_string())
        );
    }

    #[tokio::test]
    async fn register_keeps_the_name_as_typed() {
        let state = test_state();
        let command = Command::Register {
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            name: " Ada Lovelace ".to_string(),
        };
        handle_command(&state, command).await;
        assert_eq!(
            state.identity.session().map(|u| u.name),
            Some(" Ada Lovelace ".to_string())
        );
    }

    #[tokio::test]
    async fn duplicate_and_bad_credentials_messages() {
        let state = signed_in().await;
        assert_eq!(run(&state, "logout").await, "Signed out.");
        assert_eq!(run(&state, "register ada@example.com pw Imposter").await, EMAIL_TAKEN);
        assert_eq!(run(&state, "login ada@example.com nope").await, INVALID_CREDENTIALS);
        assert_eq!(run(&state, "login ada@example.com pw").await, "Welcome back, Ada!");
    }

    #[tokio::test]
    async fn toggling_requires_enrollment() {
        let state = signed_in().await;
        let reply = run(&state, "toggle coding-programming html-basics").await;
        assert!(reply.starts_with("Enroll in Coding & Programming Fundamentals"));

        run(&state, "enroll coding-programming").await;
        let reply = run(&state, "toggle coding-programming html-basics").await;
        assert!(reply.ends_with("progress: 20%"), "{}", reply);
        let reply = run(&state, "toggle coding-programming html-basics").await;
        assert!(reply.contains("as not completed"), "{}", reply);
        assert!(reply.ends_with("progress: 0%"), "{}", reply);
    }

    #[tokio::test]
    async fn unknown_ids_are_reported() {
        let state = signed_in().await;
        assert_eq!(run(&state, "course nope").await, COURSE_NOT_FOUND);
        assert_eq!(run(&state, "enroll nope").await, COURSE_NOT_FOUND);
        run(&state, "enroll coding-programming").await;
        let reply = run(&state, "toggle coding-programming nope").await;
        assert_eq!(reply, "Chapter 'nope' is not part of Coding & Programming Fundamentals.");
    }

    #[tokio::test]
    async fn enrolling_twice_is_harmless() {
        let state = signed_in().await;
        assert_eq!(
            run(&state, "enroll digital-literacy").await,
            "Enrolled in Digital Literacy Basics."
        );
        assert_eq!(
            run(&state, "enroll digital-literacy").await,
            "You are already enrolled in Digital Literacy Basics."
        );
        assert_eq!(state.catalog.summary().registered_courses, 1);
    }

    struct Unreachable;

    #[async_trait]
    impl LatencyService for Unreachable {
        async fn wait(&self) -> PortResult<()> {
            Err(PortError::Unexpected("backend unreachable".to_string()))
        }
    }

    #[tokio::test]
    async fn unexpected_failures_ask_to_try_again() {
        let storage: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let config = test_state().config;
        let state = AppState::with_ports(storage, Arc::new(Unreachable), config).unwrap();

        assert_eq!(run(&state, "login ada@example.com pw").await, TRY_AGAIN);
        assert_eq!(run(&state, "register ada@example.com pw Ada").await, TRY_AGAIN);
    }
}
