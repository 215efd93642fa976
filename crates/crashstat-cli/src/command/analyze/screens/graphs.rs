use std::{ops::Range, rc::Rc};

use crashstat_analysis::{field::Field, report::DistributionPlot, service::StatisticsService};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect, Spacing},
    style::{Color, Style},
    symbols::{Marker, merge::MergeStrategy},
    widgets::{
        Axis, Block, Chart, Dataset, GraphType, Widget,
        canvas::{Canvas, Line, Points, Rectangle},
    },
};

use super::message::MessageScreen;
use crate::tui::{Screen, ScreenTransition};

/// Histogram and box plot of one analyzed field at a time.
#[derive(Debug)]
pub struct GraphScreen {
    service: Rc<StatisticsService>,
    selected: usize,
    plot: DistributionPlot,
}

impl GraphScreen {
    const FIELDS: [Field; 2] = Field::ANALYZED;

    /// Opens the screen on the first analyzed field, or an error pane if it cannot be plotted.
    pub fn open(service: Rc<StatisticsService>) -> ScreenTransition {
        match service.plot_distribution(Self::FIELDS[0]) {
            Ok(plot) => ScreenTransition::Push(Box::new(Self {
                service,
                selected: 0,
                plot,
            })),
            Err(err) => ScreenTransition::Push(Box::new(MessageScreen::error(&err))),
        }
    }

    fn select(&mut self, selected: usize) -> ScreenTransition {
        let field = Self::FIELDS[selected];
        match self.service.plot_distribution(field) {
            Ok(plot) => {
                self.selected = selected;
                self.plot = plot;
                ScreenTransition::Stay
            }
            Err(err) => ScreenTransition::Replace(Box::new(MessageScreen::error(&err))),
        }
    }
}

impl Screen for GraphScreen {
    fn on_active(&mut self) {
        tracing::debug!(field = %self.plot.field, "showing graphs");
    }

    fn handle_event(&mut self, event: &Event) -> ScreenTransition {
        let len = Self::FIELDS.len();
        match super::pressed_key(event) {
            Some(KeyCode::Esc | KeyCode::Char('q')) => ScreenTransition::Pop,
            Some(KeyCode::Left | KeyCode::BackTab) => {
                self.select(self.selected.checked_sub(1).unwrap_or(len - 1))
            }
            Some(KeyCode::Right | KeyCode::Tab) => self.select((self.selected + 1) % len),
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [main_area, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(frame.area());
        let [hist_area, box_area] = Layout::vertical([Constraint::Fill(2), Constraint::Fill(1)])
            .spacing(Spacing::Overlap(1))
            .areas(main_area);

        frame.render_widget(Histogram { plot: &self.plot }, hist_area);
        frame.render_widget(BoxPlot { plot: &self.plot }, box_area);
        frame.render_widget(
            super::help_line("←/→/Tab: Switch Field | q/Esc: Back"),
            help_area,
        );
    }
}

fn axis_labels(bounds: [f64; 2]) -> [String; 3] {
    [
        format!("{:.2}", bounds[0]),
        format!("{:.2}", f64::midpoint(bounds[0], bounds[1])),
        format!("{:.2}", bounds[1]),
    ]
}

fn in_window(window: &Range<f64>, x: f64) -> bool {
    window.start <= x && x <= window.end
}

/// Histogram bars and density points that fall inside the plot's x window.
#[expect(clippy::cast_precision_loss)]
fn histogram_points(plot: &DistributionPlot) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
    let window = plot.histogram_x_range();
    let bars = plot
        .histogram
        .bins
        .iter()
        .map(|bin| (bin.center(), bin.count as f64))
        .filter(|&(x, _)| in_window(&window, x))
        .collect();
    let density = plot
        .density
        .iter()
        .copied()
        .filter(|&(x, _)| in_window(&window, x))
        .collect();
    (bars, density)
}

struct Histogram<'a> {
    plot: &'a DistributionPlot,
}

impl Widget for Histogram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let field = self.plot.field;
        let window = self.plot.histogram_x_range();
        let (bars, density) = histogram_points(self.plot);

        let y_max = bars
            .iter()
            .chain(&density)
            .map(|&(_, y)| y)
            .fold(1.0, f64::max);
        let x_bounds = [window.start, window.end];
        let y_bounds = [0.0, y_max * 1.05];

        let datasets = vec![
            Dataset::default()
                .name("count")
                .marker(Marker::HalfBlock)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(Color::Cyan))
                .data(&bars),
            Dataset::default()
                .name("KDE")
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(Color::Yellow))
                .data(&density),
        ];
        let chart = Chart::new(datasets)
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(format!(
                        "Histogram of {field} (n = {})",
                        self.plot.histogram.total_count()
                    )),
            )
            .x_axis(
                Axis::default()
                    .title(field.column_name())
                    .bounds(x_bounds)
                    .labels(axis_labels(x_bounds)),
            )
            .y_axis(
                Axis::default()
                    .title("Frequency")
                    .bounds(y_bounds)
                    .labels(axis_labels(y_bounds)),
            );

        Widget::render(chart, area, buf);
    }
}

struct BoxPlot<'a> {
    plot: &'a DistributionPlot,
}

impl Widget for BoxPlot<'_> {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let field = self.plot.field;
        let summary = &self.plot.boxplot;

        // The box plot always spans the data, the histogram clip does not apply
        let low = summary.outliers.first().map_or(summary.lower_whisker, |&v| {
            v.min(summary.lower_whisker)
        });
        let high = summary.outliers.last().map_or(summary.upper_whisker, |&v| {
            v.max(summary.upper_whisker)
        });
        let pad = if high > low { (high - low) * 0.05 } else { 0.5 };
        let x_bounds = [low - pad, high + pad];

        let outliers = summary
            .outliers
            .iter()
            .map(|&x| (x, 0.5))
            .collect::<Vec<_>>();

        let canvas = Canvas::default()
            .block(
                Block::bordered()
                    .merge_borders(MergeStrategy::Exact)
                    .title(format!(
                        "Boxplot of {field} [{:.2} .. {:.2}]",
                        x_bounds[0], x_bounds[1]
                    )),
            )
            .marker(Marker::Braille)
            .x_bounds(x_bounds)
            .y_bounds([0.0, 1.0])
            .paint(|ctx| {
                ctx.draw(&Rectangle {
                    x: summary.q1,
                    y: 0.25,
                    width: summary.iqr(),
                    height: 0.5,
                    color: Color::Cyan,
                });
                ctx.draw(&Line::new(
                    summary.median,
                    0.25,
                    summary.median,
                    0.75,
                    Color::Yellow,
                ));
                for (from, to) in [
                    (summary.lower_whisker, summary.q1),
                    (summary.q3, summary.upper_whisker),
                ] {
                    ctx.draw(&Line::new(from, 0.5, to, 0.5, Color::White));
                }
                for cap in [summary.lower_whisker, summary.upper_whisker] {
                    ctx.draw(&Line::new(cap, 0.35, cap, 0.65, Color::White));
                }
                ctx.draw(&Points {
                    coords: &outliers,
                    color: Color::Red,
                });
            });

        Widget::render(canvas, area, buf);
    }
}

#[cfg(test)]
mod tests {
    use crashstat_analysis::dataset::{AccidentRecord, Dataset};

    use super::{super::press, *};

    fn service(records: Vec<AccidentRecord>) -> Rc<StatisticsService> {
        Rc::new(StatisticsService::load(&Dataset::new(records)).unwrap())
    }

    fn open(service: Rc<StatisticsService>) -> GraphScreen {
        GraphScreen {
            plot: service.plot_distribution(Field::Distance).unwrap(),
            service,
            selected: 0,
        }
    }

    #[test]
    fn test_switches_between_fields() {
        let mut screen = open(service(vec![
            AccidentRecord::new(0.0, 10.0, 2.0),
            AccidentRecord::new(2.5, 9.0, 3.0),
            AccidentRecord::new(0.1, 10.0, 2.0),
        ]));
        assert_eq!(screen.plot.x_window, Some(0.0..1.0));

        assert!(screen.handle_event(&press(KeyCode::Right)).is_stay());
        assert_eq!(screen.plot.field, Field::Visibility);
        assert_eq!(screen.plot.x_window, None);

        assert!(screen.handle_event(&press(KeyCode::Tab)).is_stay());
        assert_eq!(screen.plot.field, Field::Distance);

        assert!(screen.handle_event(&press(KeyCode::Left)).is_stay());
        assert_eq!(screen.selected, 1);

        assert!(screen.handle_event(&press(KeyCode::Esc)).is_pop());
    }

    #[test]
    fn test_unplottable_field_replaces_screen() {
        let mut screen = open(service(vec![
            AccidentRecord::new(0.0, 10.0, 2.0),
            AccidentRecord {
                distance: Some(0.2),
                visibility: None,
                severity: Some(2.0),
            },
        ]));
        assert!(screen.handle_event(&press(KeyCode::Right)).is_replace());
        assert_eq!(screen.plot.field, Field::Distance);
    }

    #[test]
    fn test_open_reports_unplottable_dataset() {
        let transition = GraphScreen::open(service(vec![]));
        assert!(transition.is_push());
    }

    #[test]
    fn test_window_filter() {
        assert!(in_window(&(0.0..1.0), 1.0));
        assert!(!in_window(&(0.0..1.0), 1.01));
    }

    fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_distance_histogram_renders_clipped_axis() {
        let records = (0..200)
            .map(|i| AccidentRecord::new(f64::from(i) * 0.05, 10.0, 2.0))
            .collect();
        let plot = service(records).plot_distribution(Field::Distance).unwrap();

        let (bars, density) = histogram_points(&plot);
        assert!(!bars.is_empty() && bars.len() < plot.histogram.bins.len());
        assert!(bars.iter().chain(&density).all(|&(x, _)| x <= 1.0));

        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        Histogram { plot: &plot }.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Histogram of Distance(mi) (n = 200)"));
        assert!(text.contains("0.00"));
        assert!(text.contains("0.50"));
        assert!(text.contains("1.00"));
        assert!(!text.contains("9.95"));
    }
}
