use std::rc::Rc;

use anyhow::Context as _;
use crashstat_analysis::service::StatisticsService;

use crate::tui::{Runtime, ScreenStack};

use self::screens::MenuScreen;

mod screens;

pub fn run(service: StatisticsService) -> anyhow::Result<()> {
    tracing::info!(
        source = service.source_label(),
        records = service.dataset().len(),
        "starting analyzer"
    );
    let menu = MenuScreen::new(Rc::new(service));
    let mut app = ScreenStack::new(Box::new(menu));
    Runtime::new()
        .run(&mut app)
        .context("Failed to run the terminal UI")?;
    Ok(())
}
