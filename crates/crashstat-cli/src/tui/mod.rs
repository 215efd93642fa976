//! A small screen-stack runtime on top of ratatui.

pub use self::{
    app::App,
    runtime::Runtime,
    screen::{Screen, ScreenStack, ScreenTransition},
};

mod app;
mod runtime;
mod screen;
