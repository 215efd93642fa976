use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    text::Text,
};

pub use self::menu::MenuScreen;

mod graphs;
mod menu;
mod message;

/// The key code of a key press, ignoring releases and repeats.
fn pressed_key(event: &Event) -> Option<KeyCode> {
    event
        .as_key_event()
        .filter(|key| key.kind == KeyEventKind::Press)
        .map(|key| key.code)
}

fn help_line(text: &str) -> Text<'_> {
    Text::from(text)
        .style(Style::default().fg(Color::DarkGray))
        .centered()
}

/// A `width` x `height` rectangle centered in `area`, shrunk to fit.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    area
}

#[cfg(test)]
fn press(code: KeyCode) -> Event {
    Event::Key(crossterm::event::KeyEvent::new(
        code,
        crossterm::event::KeyModifiers::NONE,
    ))
}
