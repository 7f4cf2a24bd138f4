use std::sync::Arc;

use hybrid_desk::catalog;
use hybrid_desk::cli::{Cli, init_config, resolve_config, run_command};
use hybrid_desk::display::{ChannelDisplay, DisplayEvent};
use hybrid_desk::event_handler::{EventHandler, UiCommand};
use hybrid_desk::logging::{self, LogTarget};
use hybrid_desk::session::Session;
use hybrid_desk::ui::{self, App};

use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc::UnboundedReceiver;

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Handle --init flag
    if cli.init {
        return init_config(&cli.config);
    }

    let config = resolve_config(&cli)?;

    if let Some(command) = &cli.command {
        logging::init(&LogTarget::Stderr)?;
        let mut stdout = std::io::stdout();
        return run_command(command, &config, &mut stdout).await;
    }

    let log_file = config.log_file.clone().unwrap_or_else(logging::default_log_file);
    logging::init(&LogTarget::File(log_file))?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let (display, mut display_events) = ChannelDisplay::new();

    // Show the connecting state before the first round trip
    terminal.draw(|f| ui::draw(f, &mut app))?;
    let mut session = Session::activate(config.session_options(), Arc::new(display.clone())).await;

    let result = run_app(&mut terminal, &mut app, &mut session, &mut display_events).await;

    // The surface is gone from here on
    display.mark_destroyed();
    session.on_surface_destroyed().await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Term,
    app: &mut App,
    session: &mut Session,
    display_events: &mut UnboundedReceiver<DisplayEvent>,
) -> anyhow::Result<()> {
    let mut input = EventStream::new();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let command = tokio::select! {
            Some(event) = display_events.recv() => {
                app.apply_display_event(event);
                UiCommand::None
            }
            maybe_event = input.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => EventHandler::new(app).handle_key_event(key),
                Some(Ok(Event::Mouse(mouse))) => EventHandler::new(app).handle_mouse_event(mouse),
                Some(Ok(_)) => UiCommand::None,
                Some(Err(err)) => return Err(err.into()),
                None => UiCommand::Quit,
            },
        };

        match command {
            UiCommand::None => {}
            UiCommand::Quit => break,
            UiCommand::Refresh => session.refresh(),
            UiCommand::Launch(app_id) => {
                let outcome = session.on_action_selected(Some(app_id)).await;
                if let Some(action) = catalog::find(app_id) {
                    app.record_launch(action, outcome);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
