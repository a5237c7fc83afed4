use crate::list::{KeysetList, ListController};
use crate::pagination::VisiblePageEntry;
use crate::ui::widgets::styling;
use crate::ui::Theme;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};

const PREVIOUS_LABEL: &str = "‹ Prev";
const NEXT_LABEL: &str = "Next ›";

fn arrow(label: &'static str, enabled: bool, theme: &Theme) -> Span<'static> {
    if enabled {
        Span::styled(label, styling::normal_text_style(theme))
    } else {
        Span::styled(label, styling::muted_text_style(theme))
    }
}

/// Page control of an offset list. None while there are no pages, which
/// hides the control.
///
pub fn offset_line<T>(list: &ListController<T>, focused: bool, theme: &Theme) -> Option<Line<'static>> {
    let pages = list.pages();
    if !pages.has_pages() {
        return None;
    }
    let pager = list.pager();
    let mut spans = vec![arrow(PREVIOUS_LABEL, pages.can_previous(), theme), Span::raw(" ")];

    for (slot, entry) in pages.visible_pages().iter().enumerate() {
        let under_cursor = focused && pager.cursor() == slot;
        let mut span = match entry {
            VisiblePageEntry::Page(page) if *page == pages.current_page() => Span::styled(
                format!(" {} ", page),
                styling::active_list_item_style(theme).add_modifier(Modifier::UNDERLINED),
            ),
            VisiblePageEntry::Page(page) => {
                Span::styled(format!(" {} ", page), styling::normal_text_style(theme))
            }
            VisiblePageEntry::Ellipsis => match pager.jump() {
                Some(jump) if jump.slot() == slot => Span::styled(
                    format!(" [{}_] ", jump.input()),
                    styling::active_list_item_style(theme),
                ),
                _ => Span::styled(" … ", styling::muted_text_style(theme)),
            },
        };
        if under_cursor {
            span = span.patch_style(styling::highlight_row_style(theme));
        }
        spans.push(span);
    }

    spans.push(Span::raw(" "));
    spans.push(arrow(NEXT_LABEL, pages.can_next(), theme));
    spans.push(Span::styled(
        format!("   {} / page", pages.page_size()),
        styling::muted_text_style(theme),
    ));
    Some(Line::from(spans))
}

/// Page control of a keyset list.
///
pub fn keyset_line<T>(list: &KeysetList<T>, theme: &Theme) -> Line<'static> {
    let state = list.state();
    Line::from(vec![
        arrow(PREVIOUS_LABEL, state.can_previous, theme),
        Span::styled(
            format!("  Page {}  ", list.depth()),
            Style::default().fg(theme.primary.to_color()),
        ),
        arrow(NEXT_LABEL, state.has_next, theme),
        Span::styled(
            format!("   {} / page", state.limit),
            styling::muted_text_style(theme),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PageResponse;
    use std::time::Duration;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_control_hidden_without_pages() {
        let mut list = ListController::<String>::new(10, Duration::from_millis(300));
        let ticket = list.request();
        list.apply(
            ticket.generation,
            Ok(PageResponse {
                data: vec![],
                total_pages: 0,
            }),
        );
        assert!(offset_line(&list, false, &Theme::default()).is_none());
    }

    #[test]
    fn test_control_shows_window_and_jump_input() {
        let mut list = ListController::<String>::new(10, Duration::from_millis(300));
        let ticket = list.request();
        list.apply(
            ticket.generation,
            Ok(PageResponse {
                data: vec![],
                total_pages: 20,
            }),
        );
        let theme = Theme::default();
        let line = offset_line(&list, true, &theme).unwrap();
        assert_eq!(text(&line), "‹ Prev  1  2  …  20  Next ›   10 / page");

        list.pager_right();
        list.pager_right();
        list.pager_activate();
        list.pager_input('7');
        let line = offset_line(&list, true, &theme).unwrap();
        assert!(text(&line).contains("[7_]"));
    }
}
