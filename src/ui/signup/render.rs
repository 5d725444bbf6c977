use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::SignupScreen;
use crate::ui::{centered_rect, navbar};
use crate::wizard::ForwardLabel;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

impl SignupScreen {
    pub fn render(&self, frame: &mut Frame) {
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(frame.area());
        navbar(frame, outer[0], self.signed_in);

        let area = centered_rect(60, 80, outer[1]);
        frame.render_widget(Clear, area);

        let (step, total) = self.progress();
        let block = Block::default()
            .title(format!(" Sign up ({step}/{total}) "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut constraints = vec![
            Constraint::Length(2), // Heading
            Constraint::Length(2), // Text
        ];
        constraints.extend(
            self.fields
                .iter()
                .map(|field| Constraint::Length(field.render_height())),
        );
        constraints.extend([
            Constraint::Min(0),    // Spacer
            Constraint::Length(1), // Submission error
            Constraint::Length(3), // Buttons
            Constraint::Length(1), // Footer
        ]);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints(constraints)
            .split(inner);

        let (heading, text) = self
            .current_page()
            .map(|page| (page.heading(), page.text()))
            .unwrap_or_default();
        frame.render_widget(
            Paragraph::new(Span::styled(
                heading,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            chunks[0],
        );
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(Color::Gray))),
            chunks[1],
        );

        for (i, field) in self.fields.iter().enumerate() {
            field.render(
                frame,
                chunks[2 + i],
                self.form.value(field.name),
                self.form.visible_error(field.name),
                i == self.focus && !self.is_submitting(),
            );
        }

        let rest = 2 + self.fields.len();
        if let Some(ref message) = self.last_error {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Registration failed: {message}"),
                    Style::default().fg(Color::Red),
                )),
                chunks[rest + 1],
            );
        }

        self.render_buttons(frame, chunks[rest + 2]);

        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled("Tab", Style::default().fg(Color::Cyan)),
                Span::raw(" next field  "),
                Span::styled("Enter", Style::default().fg(Color::Cyan)),
                Span::raw(" continue  "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" back"),
            ]))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
            chunks[rest + 3],
        );
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let label = self.forward_label();
        let forward_text = match label {
            ForwardLabel::InProgress => {
                format!("{} {label}", SPINNER[self.tick % SPINNER.len()])
            }
            _ => label.to_string(),
        };
        let forward_color = if self.is_submitting() {
            Color::DarkGray
        } else {
            Color::Green
        };

        frame.render_widget(
            Paragraph::new("Back")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::Gray)),
            halves[0],
        );
        frame.render_widget(
            Paragraph::new(forward_text)
                .alignment(Alignment::Center)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(forward_color)),
                )
                .style(
                    Style::default()
                        .fg(forward_color)
                        .add_modifier(Modifier::BOLD),
                ),
            halves[1],
        );
    }
}
