use crashstat_analysis::service::QueryError;
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Paragraph},
};

use crate::tui::{Screen, ScreenTransition};

/// A modal pane showing a titled block of text.
#[derive(Debug)]
pub struct MessageScreen {
    pub(super) title: String,
    pub(super) body: String,
    pub(super) is_error: bool,
}

impl MessageScreen {
    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            is_error: false,
        }
    }

    pub fn error(err: &QueryError) -> Self {
        tracing::warn!(
            error = %err,
            degenerate = err.is_degenerate_input(),
            "query failed"
        );
        Self {
            title: "Error".to_owned(),
            body: err.to_string(),
            is_error: true,
        }
    }

    #[expect(clippy::cast_possible_truncation)]
    fn content_size(&self) -> (u16, u16) {
        let width = self
            .body
            .lines()
            .map(|line| line.chars().count())
            .chain([self.title.chars().count()])
            .max()
            .unwrap_or(0);
        let height = self.body.lines().count();
        // Border plus one column of padding on each side
        let width = (width + 4).min(usize::from(u16::MAX)) as u16;
        let height = (height + 2).min(usize::from(u16::MAX)) as u16;
        (width, height)
    }
}

impl Screen for MessageScreen {
    fn on_close(&mut self) {
        tracing::debug!(title = %self.title, "message closed");
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        match super::pressed_key(event) {
            Some(KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) => ScreenTransition::Pop,
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());

        let (width, height) = self.content_size();
        let area = super::centered(main_area, width, height);

        let border_color = if self.is_error {
            Color::Red
        } else {
            Color::Cyan
        };
        let block = Block::bordered()
            .title(self.title.as_str())
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .border_style(Style::default().fg(border_color));
        let paragraph = Paragraph::new(self.body.as_str()).block(block);

        frame.render_widget(paragraph, area);
        frame.render_widget(super::help_line("Enter/Esc/q: Close"), help_area);
    }
}

#[cfg(test)]
mod tests {
    use crashstat_analysis::field::Field;
    use crashstat_stats::StatsError;

    use super::{super::press, *};

    #[test]
    fn test_close_keys_pop() {
        for code in [KeyCode::Enter, KeyCode::Esc, KeyCode::Char('q')] {
            let mut screen = MessageScreen::info("Hypothesis Test", "H0: Mean = 0.05");
            assert!(screen.handle_event(&press(code)).is_pop());
        }
        let mut screen = MessageScreen::info("Hypothesis Test", "H0: Mean = 0.05");
        assert!(screen.handle_event(&press(KeyCode::Down)).is_stay());
    }

    #[test]
    fn test_error_pane() {
        let err = QueryError {
            field: Field::Visibility,
            source: StatsError::TooFewObservations {
                count: 1,
                required: 2,
            },
        };
        let screen = MessageScreen::error(&err);
        assert_eq!(screen.title, "Error");
        assert!(screen.is_error);
        assert!(screen.body.contains("Visibility(mi)"));
    }

    #[test]
    fn test_content_size_fits_longest_line() {
        let screen = MessageScreen::info("T", "short\na much longer line");
        assert_eq!(screen.content_size(), (22, 4));
    }
}
