use super::Frame;
use crate::state::{Focus, ListFocus, State, View};
use crate::ui::widgets::styling;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

/// Key hints for the current focus.
///
pub fn hints(state: &State) -> &'static str {
    if state.has_delete_confirmation() {
        return " y: delete  n: cancel";
    }
    if state.current_focus() == Focus::Sidebar {
        return " j/k: move  Enter: open  Tab: view  b: hide menu  q: quit";
    }
    match (state.current_view(), state.list_focus()) {
        (View::Departments | View::Faqs, ListFocus::Filter) => {
            " Type to filter  Backspace: erase  Ctrl-U: clear  Esc: done"
        }
        (View::Departments | View::Faqs, ListFocus::Pager) => {
            " ←/→: move  Enter: open page or jump  digits: page number  Esc: back"
        }
        (View::Departments, ListFocus::Rows) => {
            " j/k: move  [/]: page  /: filter  p: pages  s: page size  d: delete  r: refresh  Tab: menu"
        }
        (View::Faqs, ListFocus::Rows) => {
            " j/k: move  [/]: page  /: filter  p: pages  s: page size  r: refresh  Tab: menu"
        }
        (View::PurchaseQuotes, _) => " j/k: move  [/]: prev/next  s: page size  r: refresh  Tab: menu",
        (View::Assignments, _) => {
            " j/k: move  Enter: expand  Space: check  w: save  r: reset tree  Tab: menu"
        }
    }
}

/// Render footer widget according to state.
///
pub fn footer(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let left = Paragraph::new(Line::from(Span::styled(
        hints(state),
        styling::muted_text_style(theme),
    )));

    let right_text = match state.user() {
        Some(user) => format!("{}  v{} ", user.name, env!("CARGO_PKG_VERSION")),
        None => format!("v{} ", env!("CARGO_PKG_VERSION")),
    };
    let right_width = right_text.chars().count() as u16;
    let right = Paragraph::new(Line::from(Span::styled(
        right_text,
        styling::normal_text_style(theme),
    )))
    .alignment(Alignment::Right);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(right_width)])
        .split(size);

    frame.render_widget(left, columns[0]);
    frame.render_widget(right, columns[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hints_follow_focus() {
        let mut state = State::default();
        assert!(hints(&state).contains("d: delete"));
        state.set_list_focus(ListFocus::Filter);
        assert!(hints(&state).contains("Type to filter"));
        state.toggle_focus();
        assert!(hints(&state).contains("Enter: open"));
    }
}
