use super::Frame;
use crate::state::{Focus, State, View};
use crate::tree::LazyTree;
use crate::ui::widgets::{spinner, styling};
use crate::ui::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

/// Render the assignment page: the org tree with checkboxes.
///
pub fn assignments(frame: &mut Frame, size: Rect, state: &mut State) {
    let theme = state.theme();
    let page = state.assignments();

    let mut title = format!(
        "{} ({} selected)",
        View::Assignments.title(),
        page.selection().len()
    );
    if page.is_saving() {
        title = format!("{} saving {}", title, spinner::frame(state.spinner_index()));
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(styling::block_border_style(
            theme,
            state.current_focus() == Focus::View,
        ));

    if let Some(message) = state.org_roots_error() {
        let line = Line::from(Span::styled(
            format!("Could not load: {}", message),
            styling::error_text_style(theme),
        ));
        frame.render_widget(Paragraph::new(line).block(block), size);
        return;
    }
    if !page.is_loaded() {
        let line = Line::from(Span::styled(
            format!("Loading {}", spinner::frame(state.spinner_index())),
            styling::muted_text_style(theme),
        ));
        frame.render_widget(Paragraph::new(line).block(block), size);
        return;
    }

    let items = tree_lines(page.tree(), state.spinner_index(), theme)
        .into_iter()
        .map(ListItem::new)
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(block)
        .style(styling::normal_text_style(theme))
        .highlight_style(styling::highlight_row_style(theme));
    let mut list_state = ListState::default();
    list_state.select(Some(page.tree().cursor()));
    frame.render_stateful_widget(list, size, &mut list_state);
}

/// One line per visible node: indent, expander, checkbox, label.
///
fn tree_lines(tree: &LazyTree, spinner_index: usize, theme: &Theme) -> Vec<Line<'static>> {
    tree.visible_rows()
        .into_iter()
        .filter_map(|row| {
            let node = tree.node(&row.id)?;
            let expander = if node.is_leaf() {
                " "
            } else if node.loading {
                spinner::frame(spinner_index)
            } else if node.expanded {
                "▾"
            } else {
                "▸"
            };
            let checkbox = if tree.is_checked(&node.id) { "[x]" } else { "[ ]" };
            Some(Line::from(vec![
                Span::raw("  ".repeat(row.depth)),
                Span::styled(format!("{} ", expander), styling::muted_text_style(theme)),
                Span::styled(format!("{} ", checkbox), styling::active_list_item_style(theme)),
                Span::raw(node.label.clone()),
            ]))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{CascadePolicy, NodeData, NodeKind};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_tree_lines_show_state() {
        let mut tree = LazyTree::new(
            vec![
                NodeData::new("d1", "Finance", NodeKind::Department),
                NodeData::new("u1", "Ada", NodeKind::User),
            ],
            vec!["u1".to_string()],
            CascadePolicy::Independent,
        );
        let lines = tree_lines(&tree, 0, &Theme::default());
        assert_eq!(text(&lines[0]), "▸ [ ] Finance");
        assert_eq!(text(&lines[1]), "  [x] Ada");

        tree.expand("d1").unwrap();
        let lines = tree_lines(&tree, 0, &Theme::default());
        assert!(text(&lines[0]).starts_with(spinner::frame(0)));
    }
}
