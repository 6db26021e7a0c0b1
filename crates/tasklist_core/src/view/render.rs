//! Plain-text rendering of a view session.

use crate::view::session::ViewSession;

pub const TITLE: &str = "Todo List App";
pub const EMPTY_LIST_MESSAGE: &str = "No tasks yet. Add one above!";

/// Footer line summarizing incomplete tasks.
pub fn remaining_summary(remaining: usize) -> String {
    format!("You have {remaining} tasks remaining")
}

/// Renders the title, one line per task (or the empty-state message), and the
/// remaining-count footer.
///
/// Completed tasks are wrapped in `~~`. The row under edit shows the edit
/// buffer behind `>` instead of its checkbox.
pub fn render(session: &ViewSession) -> String {
    let store = session.store();
    let mut out = String::new();
    out.push_str(TITLE);
    out.push('\n');

    if store.is_empty() {
        out.push_str("  ");
        out.push_str(EMPTY_LIST_MESSAGE);
        out.push('\n');
    }

    let editing = session.editing();
    for (index, task) in store.tasks().iter().enumerate() {
        let position = index + 1;
        let row = if editing == Some(task.id()) {
            let buffer = session.edit_text().unwrap_or_default();
            format!("{position:>3}. > {}_", single_line(buffer))
        } else if task.is_completed() {
            format!("{position:>3}. [x] ~~{}~~", single_line(task.text()))
        } else {
            format!("{position:>3}. [ ] {}", single_line(task.text()))
        };
        out.push_str(&row);
        out.push('\n');
    }

    out.push_str(&remaining_summary(store.remaining_count()));
    out.push('\n');
    out
}

/// Keeps one task on one row: control characters become spaces.
fn single_line(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
