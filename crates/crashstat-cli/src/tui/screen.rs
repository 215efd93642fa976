use std::fmt;

use crossterm::event::Event;
use ratatui::Frame;

use super::App;

/// Individual screen in the application.
///
/// # Lifecycle
///
/// 1. **Created** - Screen is constructed
/// 2. **[`on_active`]** - Screen becomes active (foreground)
/// 3. **Active** - Screen handles events and draws
/// 4. **[`on_inactive`]** - Screen goes to background (Push) or is being removed (Pop/Replace/Exit)
/// 5. **[`on_close`]** - Screen is being removed from stack (Pop/Replace/Exit only)
/// 6. **Dropped** - Screen is destroyed
///
/// ```text
/// Create
///   ↓
/// on_active() ←──────────┐
///   ↓                     │
/// (Active/Foreground)     │ Child screen pops
///   ↓                     │
/// on_inactive()           │
///   ↓                     │
/// (Background) ──────────┘
///   ↓
/// on_close()  ← Only on Pop/Replace/Exit
///   ↓
/// Drop
/// ```
///
/// The lifecycle hooks default to doing nothing.
///
/// [`on_active`]: Self::on_active
/// [`on_inactive`]: Self::on_inactive
/// [`on_close`]: Self::on_close
pub trait Screen: fmt::Debug {
    /// Called when this screen becomes active (foreground).
    ///
    /// This is called on app startup for the initial screen, when this screen is
    /// pushed, and when popping back to this screen from a child screen.
    fn on_active(&mut self) {}

    /// Called when this screen becomes inactive (background).
    ///
    /// For Pop/Replace/Exit, [`on_close`](Self::on_close) is called right after.
    fn on_inactive(&mut self) {}

    /// Called when this screen is being closed and removed from the stack.
    ///
    /// Not called when another screen is pushed on top.
    fn on_close(&mut self) {}

    /// Handles terminal events and returns transition.
    fn handle_event(&mut self, event: &Event) -> ScreenTransition;

    /// Renders the screen.
    fn draw(&self, frame: &mut Frame);
}

/// Screen transition result from event handling.
#[derive(Debug, derive_more::IsVariant)]
pub enum ScreenTransition {
    /// Stay in the current screen.
    Stay,

    /// Push a new screen on top of the current one.
    ///
    /// Current screen goes to background (`on_inactive` called).
    /// When the new screen is popped, current screen is reactivated (`on_active` called).
    Push(Box<dyn Screen>),

    /// Pop the current screen and return to the previous one.
    ///
    /// Current screen's `on_inactive` and `on_close` are called,
    /// then previous screen's `on_active` is called.
    Pop,

    /// Replace the current screen with a new one.
    ///
    /// Current screen's `on_inactive` and `on_close` are called,
    /// then new screen's `on_active` is called.
    Replace(Box<dyn Screen>),

    /// Exit the application.
    Exit,
}

/// Screen stack manager that implements App.
#[derive(Debug)]
pub struct ScreenStack {
    screens: Vec<Box<dyn Screen>>,
    should_exit: bool,
}

impl ScreenStack {
    /// Creates a new screen stack with an initial screen.
    #[must_use]
    pub fn new(initial: Box<dyn Screen>) -> Self {
        Self {
            screens: vec![initial],
            should_exit: false,
        }
    }

    fn apply_transition(&mut self, transition: ScreenTransition) {
        match transition {
            ScreenTransition::Stay => {}

            ScreenTransition::Push(mut new_screen) => {
                if let Some(current) = self.screens.last_mut() {
                    current.on_inactive();
                }
                new_screen.on_active();
                self.screens.push(new_screen);
            }

            ScreenTransition::Pop => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_inactive();
                    old_screen.on_close();
                }
                if let Some(prev_screen) = self.screens.last_mut() {
                    prev_screen.on_active();
                }
            }

            ScreenTransition::Replace(mut new_screen) => {
                if let Some(mut old_screen) = self.screens.pop() {
                    old_screen.on_inactive();
                    old_screen.on_close();
                }
                new_screen.on_active();
                self.screens.push(new_screen);
            }

            ScreenTransition::Exit => {
                while let Some(mut screen) = self.screens.pop() {
                    screen.on_inactive();
                    screen.on_close();
                }
                self.should_exit = true;
            }
        }
        tracing::trace!(depth = self.screens.len(), "screen stack updated");
    }
}

impl App for ScreenStack {
    fn init(&mut self) {
        if let Some(screen) = self.screens.last_mut() {
            screen.on_active();
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit || self.screens.is_empty()
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(current) = self.screens.last_mut() {
            let transition = current.handle_event(&event);
            self.apply_transition(transition);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        if let Some(current) = self.screens.last() {
            current.draw(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use super::*;

    /// Records lifecycle calls in order
    #[derive(Debug, Clone, Default)]
    struct LifecycleLog {
        calls: Rc<RefCell<Vec<String>>>,
    }

    impl LifecycleLog {
        fn log(&self, msg: impl Into<String>) {
            self.calls.borrow_mut().push(msg.into());
        }

        fn take(&self) -> Vec<String> {
            self.calls.take()
        }
    }

    #[derive(Debug)]
    struct TestScreen {
        name: &'static str,
        log: LifecycleLog,
        transitions: Vec<ScreenTransition>,
    }

    impl TestScreen {
        fn new(name: &'static str, log: &LifecycleLog) -> Self {
            Self {
                name,
                log: log.clone(),
                transitions: vec![],
            }
        }

        /// Queues the transition returned by the next unanswered event.
        fn then(mut self, transition: ScreenTransition) -> Self {
            self.transitions.insert(0, transition);
            self
        }

        fn boxed(self) -> Box<dyn Screen> {
            Box::new(self)
        }
    }

    impl Screen for TestScreen {
        fn on_active(&mut self) {
            self.log.log(format!("{}: on_active", self.name));
        }

        fn on_inactive(&mut self) {
            self.log.log(format!("{}: on_inactive", self.name));
        }

        fn on_close(&mut self) {
            self.log.log(format!("{}: on_close", self.name));
        }

        fn handle_event(&mut self, _event: &Event) -> ScreenTransition {
            self.log.log(format!("{}: handle_event", self.name));
            self.transitions.pop().unwrap_or(ScreenTransition::Stay)
        }

        fn draw(&self, _frame: &mut Frame) {}
    }

    fn key() -> Event {
        Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
    }

    #[test]
    fn test_init_activates_initial_screen() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::new("menu", &log).boxed());

        stack.init();

        assert_eq!(log.take(), vec!["menu: on_active"]);
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_push_then_pop_reactivates_parent() {
        let log = LifecycleLog::default();
        let message = TestScreen::new("message", &log).then(ScreenTransition::Pop);
        let menu = TestScreen::new("menu", &log).then(ScreenTransition::Push(message.boxed()));
        let mut stack = ScreenStack::new(menu.boxed());
        stack.init();
        log.take();

        stack.handle_event(key());
        assert_eq!(
            log.take(),
            vec!["menu: handle_event", "menu: on_inactive", "message: on_active"]
        );

        stack.handle_event(key());
        assert_eq!(
            log.take(),
            vec![
                "message: handle_event",
                "message: on_inactive",
                "message: on_close",
                "menu: on_active",
            ]
        );
        assert!(!stack.should_exit());
    }

    #[test]
    fn test_replace_closes_current_screen() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::new("graphs", &log).boxed());
        stack.init();
        log.take();

        stack.apply_transition(ScreenTransition::Replace(
            TestScreen::new("error", &log).boxed(),
        ));

        assert_eq!(
            log.take(),
            vec!["graphs: on_inactive", "graphs: on_close", "error: on_active"]
        );
    }

    #[test]
    fn test_exit_closes_every_screen_top_down() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::new("menu", &log).boxed());
        stack.init();
        stack.apply_transition(ScreenTransition::Push(
            TestScreen::new("graphs", &log).boxed(),
        ));
        log.take();

        stack.apply_transition(ScreenTransition::Exit);

        assert_eq!(
            log.take(),
            vec![
                "graphs: on_inactive",
                "graphs: on_close",
                "menu: on_inactive",
                "menu: on_close",
            ]
        );
        assert!(stack.should_exit());
    }

    #[test]
    fn test_popping_last_screen_exits() {
        let log = LifecycleLog::default();
        let screen = TestScreen::new("menu", &log).then(ScreenTransition::Pop);
        let mut stack = ScreenStack::new(screen.boxed());
        stack.init();
        assert!(!stack.should_exit());

        stack.handle_event(key());

        assert!(stack.should_exit());
    }

    #[test]
    fn test_events_go_to_top_screen_only() {
        let log = LifecycleLog::default();
        let mut stack = ScreenStack::new(TestScreen::new("menu", &log).boxed());
        stack.init();
        stack.apply_transition(ScreenTransition::Push(
            TestScreen::new("message", &log).boxed(),
        ));
        log.take();

        stack.handle_event(key());
        stack.apply_transition(ScreenTransition::Stay);

        assert_eq!(log.take(), vec!["message: handle_event"]);
    }
}
