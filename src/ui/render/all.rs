use super::{dialog, footer, keyset_list, log, offset_list, sidebar, tree, Frame};
use crate::state::{State, View};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

const SIDEBAR_WIDTH: u16 = 26;

/// Render all widgets according to state.
///
pub fn all(frame: &mut Frame, state: &mut State) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    let main_area = if state.sidebar().is_open() {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(rows[0]);
        sidebar(frame, columns[0], state);
        columns[1]
    } else {
        rows[0]
    };

    let view_area = if state.is_log_shown() {
        let split = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(main_area);
        log(frame, split[1], state);
        split[0]
    } else {
        main_area
    };

    main(frame, view_area, state);
    footer(frame, rows[1], state);

    if state.has_delete_confirmation() {
        dialog::delete_confirmation(frame, view_area, state);
    }
    dialog::toast(frame, view_area, state);
}

/// Render the current view.
///
fn main(frame: &mut Frame, size: Rect, state: &mut State) {
    match state.current_view() {
        View::Departments => offset_list::departments(frame, size, state),
        View::Faqs => offset_list::faqs(frame, size, state),
        View::PurchaseQuotes => keyset_list::purchase_quotes(frame, size, state),
        View::Assignments => tree::assignments(frame, size, state),
    }
}
