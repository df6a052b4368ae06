//! Command-line driver for the user screen.
//!
//! Stands in for the graphical view: each input line becomes an intent,
//! and the resulting state is printed back.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::config::{Config, DispatchMode};
use crate::model::{ImageData, UserId};
use crate::ui::users::{UserIntent, UserViewState};

#[derive(Debug, Parser)]
#[command(name = "userdesk", version, about = "Interactive user-management form")]
pub struct Args {
    /// Config file to use instead of the default location.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Run repository calls one at a time instead of concurrently.
    #[arg(long)]
    pub serialized: bool,

    /// Simulated repository latency for every call, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub latency_ms: Option<u64>,

    /// Directory for saved images.
    #[arg(long, value_name = "DIR")]
    pub image_dir: Option<PathBuf>,

    /// Don't load users on startup.
    #[arg(long)]
    pub no_load: bool,
}

impl Args {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply(&self, config: &mut Config) {
        if self.serialized {
            config.dispatch.mode = DispatchMode::Serialized;
        }
        if let Some(latency) = self.latency_ms {
            config.repository.list_latency_ms = latency;
            config.repository.mutation_latency_ms = latency;
        }
        if let Some(dir) = &self.image_dir {
            config.images.cache_dir = Some(dir.clone());
        }
        if self.no_load {
            config.dispatch.load_on_start = false;
        }
    }
}

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Add {
        name: String,
        email: String,
        image: Option<PathBuf>,
    },
    Delete(UserId),
    Undo,
    Clear,
    Search(String),
    Name(String),
    Email(String),
    Select(String),
    Capture(PathBuf),
    State,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    Unknown(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a user id")]
    InvalidId(String),

    #[error("no user with id {0}")]
    UnknownUser(UserId),

    #[error("failed to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub const HELP: &str = "\
commands:
  list                          reload users
  add <name> <email> [image]    add a user (name may span words)
  delete <id>                   delete a user
  undo                          restore the last deleted user
  clear                         delete every user
  search <query>                filter the current list
  name <text> | email <text>    edit a form field
  select <ref>                  pick an image reference
  capture <image>               attach an image file
  state                         print the full state as JSON
  help | quit";

pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb {
        "" => Err(CommandError::Empty),
        "list" | "load" => Ok(Command::List),
        "add" => parse_add(rest),
        "delete" | "rm" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "delete",
                    argument: "a user id",
                });
            }
            rest.parse::<u64>()
                .map(|id| Command::Delete(UserId(id)))
                .map_err(|_| CommandError::InvalidId(rest.to_string()))
        }
        "undo" => Ok(Command::Undo),
        "clear" => Ok(Command::Clear),
        "search" => Ok(Command::Search(rest.to_string())),
        "name" => Ok(Command::Name(rest.to_string())),
        "email" => Ok(Command::Email(rest.to_string())),
        "select" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "select",
                    argument: "an image reference",
                });
            }
            Ok(Command::Select(rest.to_string()))
        }
        "capture" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "capture",
                    argument: "an image path",
                });
            }
            Ok(Command::Capture(PathBuf::from(rest)))
        }
        "state" => Ok(Command::State),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

/// `<name...> <email> [image]`. The name runs up to the first word after
/// it that contains `@`; without one, the name is a single word.
fn parse_add(rest: &str) -> Result<Command, CommandError> {
    let words: Vec<&str> = rest.split_whitespace().collect();
    if words.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "add",
            argument: "a name",
        });
    }
    if words.len() < 2 {
        return Err(CommandError::MissingArgument {
            command: "add",
            argument: "an email",
        });
    }

    let email_at = words
        .iter()
        .skip(1)
        .position(|word| word.contains('@'))
        .map_or(1, |offset| offset + 1);
    let image = &words[email_at + 1..];

    Ok(Command::Add {
        name: words[..email_at].join(" "),
        email: words[email_at].to_string(),
        image: (!image.is_empty()).then(|| PathBuf::from(image.join(" "))),
    })
}

impl Command {
    /// Intent for this command, or `None` for session commands
    /// (`state`, `help`, `quit`).
    ///
    /// `state` is used to resolve user ids for `delete`.
    pub fn into_intent(self, state: &UserViewState) -> Result<Option<UserIntent>, CommandError> {
        let intent = match self {
            Command::List => UserIntent::LoadUsers,
            Command::Add { name, email, image } => UserIntent::AddUser {
                name,
                email,
                image: image.map(read_image).transpose()?,
            },
            Command::Delete(id) => {
                let user = state
                    .users
                    .iter()
                    .find(|user| user.id == id)
                    .cloned()
                    .ok_or(CommandError::UnknownUser(id))?;
                UserIntent::DeleteUser(user)
            }
            Command::Undo => UserIntent::UndoDelete,
            Command::Clear => UserIntent::ClearUsers,
            Command::Search(query) => UserIntent::SearchUser(query),
            Command::Name(name) => UserIntent::UpdateName(name),
            Command::Email(email) => UserIntent::UpdateEmail(email),
            Command::Select(reference) => UserIntent::SelectImage(reference),
            Command::Capture(path) => UserIntent::CaptureImage(read_image(path)?),
            Command::State | Command::Help | Command::Quit => return Ok(None),
        };
        Ok(Some(intent))
    }
}

fn read_image(path: PathBuf) -> Result<ImageData, CommandError> {
    match std::fs::read(&path) {
        Ok(bytes) => Ok(ImageData::new(bytes)),
        Err(source) => Err(CommandError::ImageRead { path, source }),
    }
}

/// Human-readable rendering of the state.
pub fn render_state(state: &UserViewState) -> String {
    let mut out = String::new();
    if state.is_loading {
        out.push_str("(loading...)\n");
    }
    if state.users.is_empty() {
        out.push_str("no users\n");
    }
    for user in &state.users {
        let photo = if user.image_ref.is_some() { " [photo]" } else { "" };
        let _ = writeln!(out, "{:>4}  {} <{}>{}", user.id, user.name, user.email, photo);
    }

    let mut form = Vec::new();
    if !state.name.is_empty() || state.name_error {
        let mark = if state.name_error { " (invalid)" } else { "" };
        form.push(format!("name={:?}{}", state.name, mark));
    }
    if !state.email.is_empty() || state.email_error {
        let mark = if state.email_error { " (invalid)" } else { "" };
        form.push(format!("email={:?}{}", state.email, mark));
    }
    if let Some(reference) = &state.selected_image_ref {
        form.push(format!("image={}", reference));
    }
    if !state.search_query.is_empty() {
        form.push(format!("search={:?}", state.search_query));
    }
    if !form.is_empty() {
        let _ = writeln!(out, "form: {}", form.join(" "));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::User;

    #[test]
    fn parses_add_with_and_without_image() {
        assert_eq!(
            parse_command("add Ann ann@x.com").unwrap(),
            Command::Add {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
                image: None,
            }
        );
        assert_eq!(
            parse_command("  add Ann ann@x.com ./ann.png ").unwrap(),
            Command::Add {
                name: "Ann".to_string(),
                email: "ann@x.com".to_string(),
                image: Some(PathBuf::from("./ann.png")),
            }
        );
    }

    #[test]
    fn add_takes_multi_word_names() {
        assert_eq!(
            parse_command("add Ann Lee ann@x.com ./ann.png").unwrap(),
            Command::Add {
                name: "Ann Lee".to_string(),
                email: "ann@x.com".to_string(),
                image: Some(PathBuf::from("./ann.png")),
            }
        );
        assert_eq!(
            parse_command("add Mary Ann  Lee  mal@x.com").unwrap(),
            Command::Add {
                name: "Mary Ann Lee".to_string(),
                email: "mal@x.com".to_string(),
                image: None,
            }
        );
    }

    #[test]
    fn add_without_at_sign_keeps_single_word_name() {
        // The email is still handed over so validation can flag it.
        assert_eq!(
            parse_command("add Ann nope pic.png").unwrap(),
            Command::Add {
                name: "Ann".to_string(),
                email: "nope".to_string(),
                image: Some(PathBuf::from("pic.png")),
            }
        );
    }

    #[test]
    fn add_without_email_is_rejected() {
        assert!(matches!(
            parse_command("add Ann"),
            Err(CommandError::MissingArgument { command: "add", .. })
        ));
    }

    #[test]
    fn field_edits_keep_the_rest_of_the_line() {
        assert_eq!(
            parse_command("name Ann Lee").unwrap(),
            Command::Name("Ann Lee".to_string())
        );
        assert_eq!(parse_command("name").unwrap(), Command::Name(String::new()));
        assert_eq!(
            parse_command("search  lee ").unwrap(),
            Command::Search("lee".to_string())
        );
    }

    #[test]
    fn delete_requires_numeric_id() {
        assert_eq!(parse_command("delete 12").unwrap(), Command::Delete(UserId(12)));
        assert!(matches!(
            parse_command("delete ann"),
            Err(CommandError::InvalidId(id)) if id == "ann"
        ));
        assert!(matches!(
            parse_command("delete"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn blank_and_unknown_lines() {
        assert!(matches!(parse_command("   "), Err(CommandError::Empty)));
        assert!(matches!(
            parse_command("frobnicate"),
            Err(CommandError::Unknown(verb)) if verb == "frobnicate"
        ));
    }

    #[test]
    fn delete_resolves_user_from_state() {
        let state = UserViewState {
            users: vec![User::new(UserId(3), "Ann", "ann@x.com", None)],
            ..UserViewState::default()
        };

        let intent = Command::Delete(UserId(3)).into_intent(&state).unwrap();
        assert!(matches!(intent, Some(UserIntent::DeleteUser(user)) if user.id == UserId(3)));

        assert!(matches!(
            Command::Delete(UserId(4)).into_intent(&state),
            Err(CommandError::UnknownUser(UserId(4)))
        ));
    }

    #[test]
    fn session_commands_have_no_intent() {
        let state = UserViewState::default();
        for command in [Command::State, Command::Help, Command::Quit] {
            assert!(command.into_intent(&state).unwrap().is_none());
        }
    }

    #[test]
    fn missing_image_file_is_reported() {
        let state = UserViewState::default();
        let result = Command::Capture(PathBuf::from("/nonexistent/userdesk.png")).into_intent(&state);
        assert!(matches!(result, Err(CommandError::ImageRead { .. })));
    }

    #[test]
    fn args_override_config() {
        let args = Args::parse_from(["userdesk", "--serialized", "--latency-ms", "5", "--no-load"]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config.dispatch.mode, DispatchMode::Serialized);
        assert_eq!(config.repository.list_latency_ms, 5);
        assert_eq!(config.repository.mutation_latency_ms, 5);
        assert!(!config.dispatch.load_on_start);
    }

    #[test]
    fn render_lists_users_and_flags() {
        let state = UserViewState {
            is_loading: true,
            users: vec![User::new(
                UserId(1),
                "Ann",
                "ann@x.com",
                Some("file:///a.png".to_string()),
            )],
            email: "bad".to_string(),
            email_error: true,
            ..UserViewState::default()
        };
        let text = render_state(&state);
        assert!(text.starts_with("(loading...)"));
        assert!(text.contains("Ann <ann@x.com> [photo]"));
        assert!(text.contains("email=\"bad\" (invalid)"));
        assert!(!text.contains("name="));
    }
}
