use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use anyhow::Context;

use crate::config::Config;
use crate::driver::Runtime;
use crate::state::Application;
use crate::ui::app::App;
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::setup_terminal;

/// Mount `app` and drive it from the terminal until the user quits.
pub fn run(config: &Config, title: &str, app: impl Application) -> anyhow::Result<()> {
    let runtime = Runtime::start(app, config.runtime.diagnostics())
        .context("failed to start application")?;

    let (mut terminal, guard) = setup_terminal().context("failed to set up terminal")?;
    let tick_rate = Duration::from_millis(config.ui.tick_rate_ms);
    let mut ui = App::new(title, config.ui.outline);
    ui.sync_focus(&runtime.tree());
    let events = EventHandler::new(tick_rate);

    loop {
        terminal.draw(|frame| draw(frame, &ui, &runtime))?;
        if ui.should_quit() {
            break;
        }

        match events.next(tick_rate) {
            Ok(AppEvent::Key(key)) => handle_key(&mut ui, &runtime, key),
            Ok(AppEvent::Tick) | Ok(AppEvent::Resize(..)) => {}
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    drop(guard);
    tracing::info!(actions = ui.actions(), halted = runtime.is_halted(), "terminal host stopped");
    Ok(())
}
