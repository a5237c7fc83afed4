use super::page_control::offset_line;
use super::Frame;
use crate::list::{ListController, LoadState};
use crate::state::{Focus, ListFocus, State, View};
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
};

/// Columns of a list view.
///
struct Columns {
    header: Vec<&'static str>,
    widths: Vec<Constraint>,
}

/// Render the departments list.
///
pub fn departments(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = state
        .departments()
        .rows()
        .iter()
        .map(|d| {
            Row::new(vec![
                d.name.clone(),
                d.code.clone(),
                d.member_count.to_string(),
            ])
        })
        .collect();
    let columns = Columns {
        header: vec!["Name", "Code", "Members"],
        widths: vec![
            Constraint::Percentage(55),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
        ],
    };
    render(
        frame,
        size,
        state,
        View::Departments,
        columns,
        rows,
        State::departments,
        State::departments_table,
    );
}

/// Render the FAQ list.
///
pub fn faqs(frame: &mut Frame, size: Rect, state: &mut State) {
    let rows = state
        .faqs()
        .rows()
        .iter()
        .map(|f| Row::new(vec![f.question.clone(), f.category.clone()]))
        .collect();
    let columns = Columns {
        header: vec!["Question", "Category"],
        widths: vec![Constraint::Percentage(75), Constraint::Percentage(25)],
    };
    render(
        frame,
        size,
        state,
        View::Faqs,
        columns,
        rows,
        State::faqs,
        State::faqs_table,
    );
}

#[allow(clippy::too_many_arguments)]
fn render<T>(
    frame: &mut Frame,
    size: Rect,
    state: &mut State,
    view: View,
    columns: Columns,
    rows: Vec<Row<'static>>,
    list: fn(&State) -> &ListController<T>,
    table_state: fn(&mut State) -> &mut TableState,
) {
    let theme = state.theme().clone();
    let active = state.current_focus() == Focus::View;
    let list_focus = state.list_focus();
    let controller = list(state);

    let mut title = view.title().to_string();
    if *controller.load_state() == LoadState::Loading {
        title = format!("{} {}", title, spinner::frame(state.spinner_index()));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(styling::block_border_style(&theme, active));
    let inner = block.inner(size);
    frame.render_widget(block, size);

    let areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let filter_focused = active && list_focus == ListFocus::Filter;
    frame.render_widget(
        Paragraph::new(filter_line(controller.filter_input(), filter_focused, &theme)),
        areas[0],
    );

    let pager_focused = active && list_focus == ListFocus::Pager;
    if let Some(line) = offset_line(controller, pager_focused, &theme) {
        frame.render_widget(Paragraph::new(line), areas[2]);
    }

    if let Some(message) = placeholder(controller.load_state(), rows.is_empty(), &theme) {
        frame.render_widget(Paragraph::new(message), areas[1]);
        return;
    }

    let table = Table::new(rows, columns.widths)
        .header(Row::new(columns.header).style(styling::active_block_title_style()))
        .style(styling::normal_text_style(&theme))
        .highlight_style(styling::highlight_row_style(&theme));
    frame.render_stateful_widget(table, areas[1], table_state(state));
}

fn filter_line(input: &str, focused: bool, theme: &Theme) -> Line<'static> {
    if focused {
        Line::from(vec![
            Span::styled("Filter: ", styling::active_list_item_style(theme)),
            Span::styled(format!("{}_", input), styling::normal_text_style(theme)),
        ])
    } else if input.is_empty() {
        Line::from(Span::styled("/ to filter", styling::muted_text_style(theme)))
    } else {
        Line::from(vec![
            Span::styled("Filter: ", styling::muted_text_style(theme)),
            Span::styled(input.to_string(), styling::normal_text_style(theme)),
        ])
    }
}

/// Inline row shown instead of the table: the error of a failed fetch, or
/// "No results" for an empty page.
///
pub fn placeholder(load: &LoadState, empty: bool, theme: &Theme) -> Option<Line<'static>> {
    match load {
        LoadState::Failed(message) => Some(Line::from(Span::styled(
            format!("Could not load: {}", message),
            styling::error_text_style(theme),
        ))),
        LoadState::Loaded if empty => Some(Line::from(Span::styled(
            "No results",
            styling::muted_text_style(theme),
        ))),
        LoadState::Idle | LoadState::Loading if empty => Some(Line::from(Span::styled(
            "Loading...",
            styling::muted_text_style(theme),
        ))),
        _ => None,
    }
}
