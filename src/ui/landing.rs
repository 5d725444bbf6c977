//! Landing screen

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::{centered_rect, navbar};

/// Marketing screen with the entry point into registration
#[derive(Debug, Default)]
pub struct LandingScreen {
    /// Whether a credential is currently stored
    pub signed_in: bool,
    /// One-line notice shown under the button (e.g. after registering)
    pub notice: Option<String>,
}

impl LandingScreen {
    pub fn new(signed_in: bool) -> Self {
        Self {
            signed_in,
            notice: None,
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(frame.area());
        navbar(frame, outer[0], self.signed_in);

        let area = centered_rect(60, 70, outer[1]);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(2), // Heading
                Constraint::Length(2), // Tagline
                Constraint::Length(2), // Coming soon
                Constraint::Min(1),    // Spacer
                Constraint::Length(3), // Signup button
                Constraint::Length(1), // Notice
                Constraint::Length(1), // Footer
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new(Span::styled(
                "Swallowtail",
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            ))
            .alignment(Alignment::Center),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new("The Trading Bot").alignment(Alignment::Center),
            chunks[1],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Coming Soon...",
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
            chunks[2],
        );

        let button = Paragraph::new(Span::styled(
            "Signup",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta)),
        );
        frame.render_widget(button, chunks[4]);

        if let Some(ref notice) = self.notice {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    notice.as_str(),
                    Style::default().fg(Color::Green),
                ))
                .alignment(Alignment::Center),
                chunks[5],
            );
        }

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" signup  "),
            Span::styled("q", Style::default().fg(Color::Yellow)),
            Span::raw(" quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(footer, chunks[6]);
    }
}
