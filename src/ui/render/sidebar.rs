use super::Frame;
use crate::state::{Focus, SidebarEntry, State};
use crate::ui::widgets::styling;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};

const BLOCK_TITLE: &str = "Menu";

/// Render sidebar widget according to state.
///
pub fn sidebar(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let active = state.current_focus() == Focus::Sidebar;
    let sidebar = state.sidebar();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(styling::block_border_style(theme, active));
    block = if active {
        block.title(Span::styled(BLOCK_TITLE, styling::active_block_title_style()))
    } else {
        block.title(BLOCK_TITLE)
    };

    let items: Vec<ListItem> = sidebar
        .entries()
        .into_iter()
        .map(|entry| match entry {
            SidebarEntry::Group(group) => {
                let marker = if sidebar.is_expanded(group) { "▾" } else { "▸" };
                ListItem::new(Line::from(Span::styled(
                    format!("{} {}", marker, group.title()),
                    styling::banner_style(theme),
                )))
            }
            SidebarEntry::Item(view) if view == state.current_view() => ListItem::new(Line::from(
                Span::styled(format!("  ● {}", view.title()), styling::active_list_item_style(theme)),
            )),
            SidebarEntry::Item(view) => ListItem::new(Line::from(Span::styled(
                format!("    {}", view.title()),
                styling::normal_text_style(theme),
            ))),
        })
        .collect();

    let mut list = List::new(items)
        .block(block)
        .style(styling::normal_text_style(theme));
    let mut list_state = ListState::default();
    if active {
        list = list.highlight_style(styling::highlight_row_style(theme));
        list_state.select(Some(sidebar.cursor()));
    }
    frame.render_stateful_widget(list, size, &mut list_state);
}
