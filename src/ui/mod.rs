pub mod form_field;
pub mod landing;
pub mod signup;
pub mod terminal_guard;

pub use landing::LandingScreen;
pub use signup::SignupScreen;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Helper to create a centered rect
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
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

/// Top bar shown on every screen
pub(crate) fn navbar(frame: &mut Frame, area: Rect, signed_in: bool) {
    let status = if signed_in {
        Span::styled("signed in", Style::default().fg(Color::Green))
    } else {
        Span::styled("guest", Style::default().fg(Color::DarkGray))
    };
    let line = Line::from(vec![
        Span::styled(
            " Swallowtail ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        status,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
