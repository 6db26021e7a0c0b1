//! Interactive prompt loop over a view session.
//!
//! # Responsibility
//! - Read one command per line and dispatch it into the session.
//! - Re-render after every change to the list or the editor.

use crate::command::{parse, Command, HELP};
use crate::error::CliError;
use log::info;
use std::io::{BufRead, Write};
use tasklist_core::{render, IgnoreReason, MutationOutcome, TaskId, TaskListStore, ViewSession};

const PROMPT: &str = "> ";

/// Seeds a session, runs the prompt, and optionally prints the final list as
/// JSON once the prompt closes.
pub fn run_seeded<R: BufRead, W: Write>(
    seed: &[String],
    print_json: bool,
    input: R,
    out: &mut W,
) -> Result<ViewSession, CliError> {
    let mut store = TaskListStore::in_memory();
    for text in seed {
        store.create(text);
    }
    let mut session = ViewSession::with_store(store);

    run(&mut session, input, out)?;

    if print_json {
        writeln!(out, "{}", serde_json::to_string_pretty(&session.store().snapshot())?)?;
    }
    Ok(session)
}

/// Runs the prompt until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    session: &mut ViewSession,
    mut input: R,
    out: &mut W,
) -> Result<(), CliError> {
    info!("event=session_start module=cli status=ok tasks={}", session.store().len());
    write!(out, "{}", render(session))?;

    let mut raw = Vec::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        raw.clear();
        if input.read_until(b'\n', &mut raw)? == 0 {
            writeln!(out)?;
            break;
        }
        let Ok(line) = std::str::from_utf8(&raw) else {
            writeln!(out, "input is not valid UTF-8; line ignored")?;
            continue;
        };

        let command = match parse(line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        let before = (session.store().revision(), session.editing());
        if let Some(message) = dispatch(session, command, out)? {
            writeln!(out, "{message}")?;
        }
        if before != (session.store().revision(), session.editing()) {
            write!(out, "{}", render(session))?;
        }
    }

    info!(
        "event=session_end module=cli status=ok tasks={} revision={}",
        session.store().len(),
        session.store().revision()
    );
    Ok(())
}

/// Applies one command. Returns a note for the user when nothing changed.
fn dispatch<W: Write>(
    session: &mut ViewSession,
    command: Command,
    out: &mut W,
) -> Result<Option<String>, CliError> {
    let note = match command {
        Command::Add(text) => {
            session.set_draft(text);
            // Blank input is dropped silently, like an empty form submit.
            session.submit_draft();
            session.set_draft(String::new());
            None
        }
        Command::Edit(position) => match session.id_at(position) {
            Some(id) if session.editing() == Some(id) => {
                Some(format!("row {position} is already open; `save` or `cancel` it"))
            }
            Some(id) => {
                session.start_editing(id);
                None
            }
            None => Some(no_row(position)),
        },
        Command::Text(text) => {
            if session.set_edit_text(text) {
                write!(out, "{}", render(session))?;
                None
            } else {
                Some(not_editing())
            }
        }
        Command::Save => match session.save_edit() {
            Some(MutationOutcome::Ignored(IgnoreReason::BlankText)) => {
                Some("text is blank; keep typing or `cancel`".to_string())
            }
            Some(_) => None,
            None => Some(not_editing()),
        },
        Command::Cancel => {
            if session.cancel_edit() {
                None
            } else {
                Some(not_editing())
            }
        }
        Command::Toggle(position) => {
            with_row(session, position, |session, id| session.toggle(id))
        }
        Command::Delete(position) => {
            with_row(session, position, |session, id| session.delete(id))
        }
        Command::List => {
            write!(out, "{}", render(session))?;
            None
        }
        Command::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&session.store().snapshot())?)?;
            None
        }
        Command::Help => Some(HELP.to_string()),
        Command::Quit | Command::Empty => None,
    };
    Ok(note)
}

fn with_row<F>(session: &mut ViewSession, position: usize, apply: F) -> Option<String>
where
    F: FnOnce(&mut ViewSession, TaskId) -> MutationOutcome,
{
    match session.id_at(position) {
        Some(id) => {
            apply(session, id);
            None
        }
        None => Some(no_row(position)),
    }
}

fn no_row(position: usize) -> String {
    format!("no row {position}")
}

fn not_editing() -> String {
    "no task is being edited; use `edit <n>` first".to_string()
}

#[cfg(test)]
mod tests {
    use super::{run, run_seeded};
    use std::io::Cursor;
    use tasklist_core::ViewSession;

    fn run_script(session: &mut ViewSession, script: &str) -> String {
        run_bytes(session, script.as_bytes())
    }

    fn run_bytes(session: &mut ViewSession, script: &[u8]) -> String {
        let mut out = Vec::new();
        run(session, Cursor::new(script.to_vec()), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn scripted_session_walks_the_lifecycle() {
        let mut session = ViewSession::new();
        let output = run_script(
            &mut session,
            "add Buy milk\nadd   \ntoggle 1\nedit 1\ntext Buy oat milk\nsave\nquit\n",
        );

        let task = &session.store().tasks()[0];
        assert_eq!(session.store().len(), 1);
        assert_eq!(task.text(), "Buy oat milk");
        assert!(task.is_completed());
        assert!(output.contains("No tasks yet. Add one above!"));
        assert!(output.contains("  1. [x] ~~Buy oat milk~~"));
        assert!(output.contains("You have 0 tasks remaining"));
    }

    #[test]
    fn deleting_row_under_edit_closes_editor() {
        let mut session = ViewSession::new();
        run_script(&mut session, "add a\nadd b\nedit 2\ndelete 2\n");

        assert_eq!(session.editing(), None);
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn bad_input_reports_and_continues() {
        let mut session = ViewSession::new();
        let output = run_script(&mut session, "toggle 5\nsave\nbogus\nadd kept\n");

        assert!(output.contains("no row 5"));
        assert!(output.contains("no task is being edited"));
        assert!(output.contains("unknown command `bogus`"));
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn blank_save_keeps_editor_open() {
        let mut session = ViewSession::new();
        let output = run_script(&mut session, "add a\nedit 1\ntext   \nsave\n");

        assert!(output.contains("text is blank"));
        assert!(session.editing().is_some());
        assert_eq!(session.store().tasks()[0].text(), "a");
    }

    #[test]
    fn json_command_prints_snapshot() {
        let mut session = ViewSession::new();
        let output = run_script(&mut session, "add a\njson\n");
        assert!(output.contains("\"remaining\": 1"));
        assert!(output.contains("\"text\": \"a\""));
    }

    #[test]
    fn invalid_utf8_line_is_skipped_and_prompt_continues() {
        let mut session = ViewSession::new();
        let mut script = b"add kept\n".to_vec();
        script.extend_from_slice(&[0xff, 0xfe, b'\n']);
        script.extend_from_slice(b"add after\n");

        let output = run_bytes(&mut session, &script);

        assert!(output.contains("input is not valid UTF-8"));
        let texts: Vec<&str> = session.store().tasks().iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["kept", "after"]);
    }

    #[test]
    fn last_line_without_newline_is_still_read() {
        let mut session = ViewSession::new();
        run_script(&mut session, "add tail");
        assert_eq!(session.store().len(), 1);
    }

    #[test]
    fn reopening_the_open_row_keeps_typed_text() {
        let mut session = ViewSession::new();
        let output = run_script(&mut session, "add a\nedit 1\ntext typed\nedit 1\nsave\n");

        assert!(output.contains("row 1 is already open"));
        assert_eq!(session.store().tasks()[0].text(), "typed");
        assert_eq!(session.editing(), None);
    }

    #[test]
    fn seeded_run_prints_json_on_exit() {
        let seed = vec!["Buy milk".to_string(), "   ".to_string(), "Walk dog".to_string()];
        let input = Cursor::new(b"toggle 1\nquit\n".to_vec());
        let mut out = Vec::new();
        let session = run_seeded(&seed, true, input, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(session.store().len(), 2);
        assert!(output.starts_with("Todo List App\n  1. [ ] Buy milk\n  2. [ ] Walk dog\n"));
        let json_start = output.find('{').unwrap();
        let snapshot: serde_json::Value = serde_json::from_str(&output[json_start..]).unwrap();
        assert_eq!(snapshot["remaining"], 1);
        assert_eq!(snapshot["tasks"][0]["completed"], true);
        assert_eq!(snapshot["tasks"][1]["text"], "Walk dog");
    }

    #[test]
    fn seeded_run_without_json_prints_no_snapshot() {
        let mut out = Vec::new();
        run_seeded(&["a".to_string()], false, Cursor::new(Vec::new()), &mut out).unwrap();
        assert!(!String::from_utf8(out).unwrap().contains('{'));
    }
}
