use super::offset_list::placeholder;
use super::page_control::keyset_line;
use super::Frame;
use crate::list::LoadState;
use crate::state::{Focus, State, View};
use crate::ui::widgets::{spinner, styling};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph, Row, Table},
};

/// Render the purchase quote list.
///
pub fn purchase_quotes(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme().clone();
    let active = state.current_focus() == Focus::View;
    let list = state.purchase_quotes();

    let mut title = View::PurchaseQuotes.title().to_string();
    if *list.load_state() == LoadState::Loading {
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
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(keyset_line(list, &theme)), areas[1]);

    if let Some(message) = placeholder(list.load_state(), list.rows().is_empty(), &theme) {
        frame.render_widget(Paragraph::new(message), areas[0]);
        return;
    }

    let rows: Vec<Row> = list
        .rows()
        .iter()
        .map(|q| {
            Row::new(vec![
                q.supplier.clone(),
                format!("{:.2}", q.amount),
                q.status.clone(),
                q.created_at.clone().unwrap_or_default(),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(15),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(vec!["Supplier", "Amount", "Status", "Created"])
            .style(styling::active_block_title_style()),
    )
    .style(styling::normal_text_style(&theme))
    .highlight_style(styling::highlight_row_style(&theme));
    frame.render_stateful_widget(table, areas[0], state.purchase_quotes_table());
}
