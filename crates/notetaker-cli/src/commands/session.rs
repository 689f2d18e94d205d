//! Interactive session: a terminal stand-in for the note form and list.

use notetaker_core::{NoteListController, NoteStore, Outcome};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

use crate::backend::{open_controller, BackendOverrides};
use crate::commands::common::{format_note_lines, resolve_note_id};
use crate::error::CliError;

const PROMPT: &str = "note> ";

const HELP: &str = "\
Type a title and press Enter to add a note.
  /delete <id|prefix|#n>  delete a note
  /list                   show notes
  /refresh                reload notes from the server
  /draft                  show the pending draft
  /submit                 resend the pending draft
  /help                   show this help
  /quit                   leave the session
Start a title with // to add a note beginning with '/'.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Add(String),
    Submit,
    Delete(String),
    List,
    Refresh,
    Draft,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Parse one input line.
pub fn parse_session_line(line: &str) -> SessionCommand {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return SessionCommand::Empty;
    }

    if let Some(literal) = line.strip_prefix("//") {
        return SessionCommand::Add(format!("/{literal}"));
    }

    let Some(command) = line.strip_prefix('/') else {
        return SessionCommand::Add(line.to_string());
    };

    let mut parts = command.trim().splitn(2, char::is_whitespace);
    let name = parts.next().unwrap_or_default();
    let argument = parts.next().map(str::trim).unwrap_or_default();

    match name {
        "delete" | "rm" if !argument.is_empty() => SessionCommand::Delete(argument.to_string()),
        "list" | "ls" => SessionCommand::List,
        "refresh" => SessionCommand::Refresh,
        "draft" => SessionCommand::Draft,
        "submit" => SessionCommand::Submit,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" | "q" => SessionCommand::Quit,
        _ => SessionCommand::Unknown(line.to_string()),
    }
}

pub async fn run_session(overrides: &BackendOverrides) -> Result<(), CliError> {
    let controller = open_controller(overrides)?;

    let mut stdout = io::stdout();
    let mut lines = BufReader::new(io::stdin()).lines();

    if controller.initialize().await != Outcome::Applied {
        eprintln!("(could not load notes from the server)");
    }
    render_notes(&controller).await;
    println!("Type /help for commands.");

    loop {
        stdout.write_all(PROMPT.as_bytes()).await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        if !handle_command(&controller, parse_session_line(&line)).await {
            break;
        }
    }

    Ok(())
}

/// Apply one command; returns `false` when the session should end.
async fn handle_command<S: NoteStore>(
    controller: &NoteListController<S>,
    command: SessionCommand,
) -> bool {
    match command {
        SessionCommand::Add(title) => {
            controller.update_draft(title).await;
            submit(controller).await;
        }
        SessionCommand::Submit => submit(controller).await,
        SessionCommand::Delete(query) => {
            let notes = controller.notes().await;
            match resolve_note_id(&query, &notes) {
                Ok(id) => {
                    if controller.delete_note(&id).await.is_applied() {
                        render_notes(controller).await;
                    } else {
                        eprintln!("(not deleted)");
                    }
                }
                Err(error) => eprintln!("{error}"),
            }
        }
        SessionCommand::List => render_notes(controller).await,
        SessionCommand::Refresh => {
            if controller.initialize().await.is_applied() {
                render_notes(controller).await;
            } else {
                eprintln!("(could not reload; showing last known notes)");
            }
        }
        SessionCommand::Draft => {
            let draft = controller.draft_title().await;
            if draft.is_empty() {
                println!("(no draft)");
            } else {
                println!("draft: {draft}");
            }
        }
        SessionCommand::Help => println!("{HELP}"),
        SessionCommand::Quit => return false,
        SessionCommand::Empty => {}
        SessionCommand::Unknown(line) => eprintln!("Unknown command: {line} (try /help)"),
    }
    true
}

async fn submit<S: NoteStore>(controller: &NoteListController<S>) {
    if controller.submit_draft().await.is_applied() {
        render_notes(controller).await;
    } else {
        eprintln!("(not saved; draft kept, /submit to retry)");
    }
}

async fn render_notes<S: NoteStore>(controller: &NoteListController<S>) {
    let notes = controller.notes().await;
    if notes.is_empty() {
        println!("No notes yet.");
        return;
    }
    for line in format_note_lines(&notes) {
        println!("{line}");
    }
}
