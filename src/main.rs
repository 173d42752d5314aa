use std::time::Duration;

use anyhow::{Context, Result};
use booking_datepicker::app::BookingApp;
use booking_datepicker::cli::Cli;
use booking_datepicker::config::AppConfig;
use booking_datepicker::logging::{self, LogSink};
use booking_datepicker::picker::PickerController;
use booking_datepicker::terminal::{Terminal, TerminalEvent};
use clap::Parser;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let sink = match (&cli.log_file, cli.dump_grid) {
        (Some(path), _) => LogSink::File(path),
        (None, true) => LogSink::Stderr,
        (None, false) => LogSink::Discard,
    };
    logging::init(cli.verbose, sink).context("failed to open log file")?;

    let config = load_config(&cli)?;

    if cli.dump_grid {
        return dump_grid(&config);
    }

    let app = BookingApp::new(&config).context("invalid date bounds")?;
    let mut terminal = Terminal::new().context("failed to query terminal size")?;
    terminal.enter().context("failed to enter alternate screen")?;
    let result = event_loop(&mut terminal, app);
    terminal.exit()?;

    let app = result?;
    for (label, value) in app.summary() {
        println!("{label}: {value}");
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(value) = &cli.value {
        config.departure.value = value.clone();
    }
    if cli.min.is_some() {
        config.departure.min_date = cli.min;
    }
    if cli.max.is_some() {
        config.departure.max_date = cli.max;
    }
    config.validate()?;
    Ok(config)
}

fn dump_grid(config: &AppConfig) -> Result<()> {
    let controller = PickerController::new(config.departure.props(config.week_start))
        .context("invalid departure bounds")?;
    tracing::debug!(?controller, "dumping departure grid");
    let json = serde_json::to_string_pretty(&controller.grid())?;
    println!("{json}");
    Ok(())
}

fn event_loop(terminal: &mut Terminal, mut app: BookingApp) -> Result<BookingApp> {
    let mut render_requested = true;
    let mut frame_len = 0usize;

    loop {
        match terminal.poll_event(Duration::from_millis(100))? {
            TerminalEvent::Key(key) => {
                render_requested |= app.handle_key(key);
            }
            TerminalEvent::Click(pos) => {
                let row = terminal.viewport().frame_row(pos.row);
                render_requested |= app.handle_click(row, pos.col);
            }
            TerminalEvent::Scroll(delta) => {
                terminal.viewport_mut().scroll(delta, frame_len);
                render_requested = true;
            }
            TerminalEvent::Resize(_) => {
                render_requested = true;
            }
            TerminalEvent::Tick => {}
        }

        if app.should_exit() {
            break;
        }

        if render_requested {
            let lines = app.render();
            frame_len = lines.len();
            if let Some((top, bottom)) = app.take_visible_request() {
                terminal.viewport_mut().ensure_visible(top, bottom);
            }
            terminal.render(&lines)?;
            render_requested = false;
        }
    }

    Ok(app)
}
