use std::io;

use crossterm::event;

use super::App;

/// Runs an [`App`] in the terminal.
///
/// Nothing changes between inputs, so the runtime has no tick timer: it blocks
/// on the next terminal event and redraws only after the app has handled one.
#[derive(Debug)]
pub struct Runtime {
    dirty: bool,
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new()
    }
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        // Initial render is required on startup
        Self { dirty: true }
    }

    /// Runs the application until `app.should_exit()` returns true.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init();

        ratatui::run(|terminal| {
            while !app.should_exit() {
                if self.dirty {
                    terminal.draw(|f| app.draw(f))?;
                    self.dirty = false;
                }
                let event = event::read()?;
                app.handle_event(event);
                self.dirty = true;
            }
            Ok(())
        })
    }
}
