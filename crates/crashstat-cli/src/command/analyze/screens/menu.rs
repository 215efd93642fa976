use std::rc::Rc;

use crashstat_analysis::{
    field::Field,
    report::AnalysisReport,
    service::{
        CONFIDENCE_LEVEL, NULL_MEAN, QueryError, SAMPLE_SIZE_CONFIDENCE, SAMPLE_SIZE_MARGIN,
        StatisticsService,
    },
};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, List, ListItem, ListState},
};

use super::{graphs::GraphScreen, message::MessageScreen};
use crate::{
    format,
    tui::{Screen, ScreenTransition},
};

const TITLE: &str = "Traffic Accident Data Analyzer";

/// A query whose result is shown as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TextQuery {
    DescriptiveStats,
    ConfidenceIntervals,
    SampleSize,
    HypothesisTest,
}

impl TextQuery {
    fn run(self, service: &StatisticsService) -> Result<MessageScreen, QueryError> {
        let (title, body) = match self {
            Self::DescriptiveStats => (
                format::DESCRIPTIVE_TITLE,
                format::descriptive_table(&service.descriptive_stats(&Field::ANALYZED)?),
            ),
            Self::ConfidenceIntervals => {
                let intervals = Field::ANALYZED
                    .iter()
                    .map(|&field| service.confidence_interval(field, CONFIDENCE_LEVEL))
                    .collect::<Result<Vec<_>, _>>()?;
                (
                    format::CONFIDENCE_TITLE,
                    format::confidence_intervals(&intervals),
                )
            }
            Self::SampleSize => {
                let estimates = Field::ANALYZED
                    .iter()
                    .map(|&field| {
                        service.sample_size_estimate(
                            field,
                            SAMPLE_SIZE_MARGIN,
                            SAMPLE_SIZE_CONFIDENCE,
                        )
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                (format::SAMPLE_SIZE_TITLE, format::sample_sizes(&estimates))
            }
            Self::HypothesisTest => {
                let result = service.hypothesis_test(AnalysisReport::TESTED_FIELD, NULL_MEAN)?;
                (format::HYPOTHESIS_TITLE, format::hypothesis_test(&result))
            }
        };
        Ok(MessageScreen::info(title, body))
    }
}

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Text(TextQuery),
    ShowGraphs,
    Quit,
}

impl MenuAction {
    const ALL: [Self; 6] = [
        Self::Text(TextQuery::DescriptiveStats),
        Self::ShowGraphs,
        Self::Text(TextQuery::ConfidenceIntervals),
        Self::Text(TextQuery::SampleSize),
        Self::Text(TextQuery::HypothesisTest),
        Self::Quit,
    ];

    fn label(self) -> &'static str {
        match self {
            Self::Text(TextQuery::DescriptiveStats) => "Show Descriptive Stats",
            Self::ShowGraphs => "Show Graphs",
            Self::Text(TextQuery::ConfidenceIntervals) => "Show Confidence Intervals",
            Self::Text(TextQuery::SampleSize) => "Estimate Sample Size",
            Self::Text(TextQuery::HypothesisTest) => "Perform Hypothesis Test",
            Self::Quit => "Quit",
        }
    }

    /// The shortcut key shown next to the label.
    fn shortcut(index: usize) -> char {
        if Self::ALL[index] == Self::Quit {
            'q'
        } else {
            char::from_digit(u32::try_from(index + 1).unwrap_or(0), 10).unwrap_or(' ')
        }
    }
}

/// The main window: a list of actions over the loaded dataset.
#[derive(Debug)]
pub struct MenuScreen {
    service: Rc<StatisticsService>,
    selected: usize,
}

impl MenuScreen {
    pub fn new(service: Rc<StatisticsService>) -> Self {
        Self {
            service,
            selected: 0,
        }
    }

    fn activate(&self, action: MenuAction) -> ScreenTransition {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::Text(query) => {
                let screen = query
                    .run(&self.service)
                    .unwrap_or_else(|err| MessageScreen::error(&err));
                ScreenTransition::Push(Box::new(screen))
            }
            MenuAction::ShowGraphs => GraphScreen::open(Rc::clone(&self.service)),
            MenuAction::Quit => ScreenTransition::Exit,
        }
    }
}

impl Screen for MenuScreen {
    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let Some(code) = super::pressed_key(event) else {
            return ScreenTransition::Stay;
        };
        let len = MenuAction::ALL.len();
        match code {
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Exit,
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.checked_sub(1).unwrap_or(len - 1);
                ScreenTransition::Stay
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1) % len;
                ScreenTransition::Stay
            }
            KeyCode::Enter => self.activate(MenuAction::ALL[self.selected]),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c.to_digit(10).map_or(0, |d| d as usize - 1);
                self.selected = index;
                self.activate(MenuAction::ALL[index])
            }
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [title_area, label_area, _, menu_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        let title = Line::from(TITLE)
            .style(Style::default().add_modifier(Modifier::BOLD))
            .centered();
        let label = Line::from(format!(
            "Analyzing: {} ({} records)",
            self.service.source_label(),
            self.service.dataset().len()
        ))
        .centered();

        let items = MenuAction::ALL
            .iter()
            .enumerate()
            .map(|(i, action)| {
                ListItem::new(format!("{}. {}", MenuAction::shortcut(i), action.label()))
            })
            .collect::<Vec<_>>();
        let list = List::new(items)
            .block(Block::bordered().title("Actions"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol(">> ");
        let mut list_state = ListState::default();
        list_state.select(Some(self.selected));

        let width = MenuAction::ALL
            .iter()
            .map(|action| action.label().len())
            .max()
            .unwrap_or(0);
        #[expect(clippy::cast_possible_truncation)]
        let menu_area = super::centered(
            menu_area,
            (width + 10) as u16,
            (MenuAction::ALL.len() + 2) as u16,
        );

        frame.render_widget(title, title_area);
        frame.render_widget(label, label_area);
        frame.render_stateful_widget(list, menu_area, &mut list_state);
        frame.render_widget(
            super::help_line("↑/↓/j/k: Select | Enter/1-5: Run | q/Esc: Quit"),
            help_area,
        );
    }
}
