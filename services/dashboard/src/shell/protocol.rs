//! services/dashboard/src/shell/protocol.rs
//!
//! Defines the line protocol the shell accepts: one command per line, words
//! separated by whitespace.

use std::str::FromStr;

//=========================================================================================
// Commands Typed by the User
//=========================================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Creates an account. The name is everything after the password and may be empty,
    /// in which case the handler rejects it.
    Register {
        email: String,
        password: String,
        name: String,
    },
    Login { email: String, password: String },
    Logout,
    WhoAmI,
    /// The dashboard: summary plus every course.
    Courses,
    Course { course_id: String },
    Enroll { course_id: String },
    Toggle { course_id: String, chapter_id: String },
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Type a command, or 'help' for a list of commands.")]
    Empty,
    #[error("Unknown command '{0}'. Type 'help' for a list of commands.")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseError::Empty);
        };

        let command = match verb.to_lowercase().as_str() {
            "register" => {
                const USAGE: &str = "register <email> <password> <name>";
                let email = words.next().ok_or(ParseError::Usage(USAGE))?;
                let password = words.next().ok_or(ParseError::Usage(USAGE))?;
                let name = words.collect::<Vec<_>>().join(" ");
                return Ok(Command::Register {
                    email: email.to_string(),
                    password: password.to_string(),
                    name,
                });
            }
            "login" => {
                const USAGE: &str = "login <email> <password>";
                let email = words.next().ok_or(ParseError::Usage(USAGE))?;
                let password = words.next().ok_or(ParseError::Usage(USAGE))?;
                Command::Login {
                    email: email.to_string(),
                    password: password.to_string(),
                }
            }
            "logout" => Command::Logout,
            "whoami" => Command::WhoAmI,
            "courses" | "dashboard" => Command::Courses,
            "course" => {
                let course_id = words.next().ok_or(ParseError::Usage("course <course-id>"))?;
                Command::Course {
                    course_id: course_id.to_string(),
                }
            }
            "enroll" => {
                let course_id = words.next().ok_or(ParseError::Usage("enroll <course-id>"))?;
                Command::Enroll {
                    course_id: course_id.to_string(),
                }
            }
            "toggle" => {
                const USAGE: &str = "toggle <course-id> <chapter-id>";
                let course_id = words.next().ok_or(ParseError::Usage(USAGE))?;
                let chapter_id = words.next().ok_or(ParseError::Usage(USAGE))?;
                Command::Toggle {
                    course_id: course_id.to_string(),
                    chapter_id: chapter_id.to_string(),
                }
            }
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
