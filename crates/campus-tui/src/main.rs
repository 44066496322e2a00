use anyhow::Result;
use campus_core::Config;
use tokio::sync::mpsc;

mod app;
mod handler;
mod logging;
mod scroll;
mod tui;
mod ui;

use app::App;
use tui::{EventHandler, Tui};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging is best-effort; the assistant still runs without a log file
    match logging::init() {
        Ok(path) => tracing::info!("logging to {}", path.display()),
        Err(err) => eprintln!("warning: logging disabled: {err:#}"),
    }

    let config = Config::load()?;
    tracing::info!(
        reply_delay_ms = config.reply_delay_ms,
        show_hero = config.show_hero,
        "starting campus assistant"
    );

    let (reply_tx, reply_rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, reply_tx);

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new(reply_rx);

    let result = run(&mut terminal, &mut app, &mut events).await;

    // Don't let a pending reply fire into a torn-down UI
    app.conversation.shutdown();
    tui::restore()?;

    tracing::info!(
        messages = app.conversation.current_transcript().len(),
        "exiting"
    );
    result
}

async fn run(terminal: &mut Tui, app: &mut App, events: &mut EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event),
            None => break,
        }
    }
    Ok(())
}
