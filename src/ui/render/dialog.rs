use super::Frame;
use crate::state::{State, ToastKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const MAX_NAME_LENGTH: usize = 45;

/// Render the delete confirmation dialog over the view.
///
pub fn delete_confirmation(frame: &mut Frame, size: Rect, state: &State) {
    let Some(name) = state.delete_confirmation() else {
        return;
    };
    let popup_area = centered_rect(60, 30, size);
    frame.render_widget(Clear, popup_area);

    let display_name = if name.chars().count() > MAX_NAME_LENGTH {
        format!("{}...", name.chars().take(MAX_NAME_LENGTH).collect::<String>())
    } else {
        name.to_string()
    };

    let theme = state.theme();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Delete department \"{}\"?", display_name),
            Style::default()
                .fg(theme.text.to_color())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This action cannot be undone.",
            Style::default().fg(theme.warning.to_color()),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y: confirm, n: cancel",
            Style::default().fg(theme.text_muted.to_color()),
        )),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(theme.error.to_color())
                        .add_modifier(Modifier::BOLD),
                ))
                .border_style(Style::default().fg(theme.error.to_color())),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, popup_area);
}

/// Render the current toast, if any, in the top-right corner.
///
pub fn toast(frame: &mut Frame, size: Rect, state: &State) {
    let Some(toast) = state.toast() else {
        return;
    };
    let theme = state.theme();
    let color = match toast.kind {
        ToastKind::Success => theme.success.to_color(),
        ToastKind::Error => theme.error.to_color(),
    };
    let width = (toast.message.chars().count() as u16 + 4).min(size.width);
    let area = Rect {
        x: size.x + size.width.saturating_sub(width),
        y: size.y,
        width,
        height: 3.min(size.height),
    };
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            toast.message.clone(),
            Style::default().fg(color),
        )))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        area,
    );
}

/// Return a rectangle of the given percentages centered in `r`.
///
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
