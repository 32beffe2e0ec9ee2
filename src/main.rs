use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use hrdash::app::App;
use hrdash::config::{self, Config};
use hrdash::core::{Action, Module};
use hrdash::domain::Page;
use hrdash::infrastructure::{DashboardClient, RuntimeBridge, RuntimeCommand};
use hrdash::{logging, ui};

#[derive(Debug, Parser)]
#[command(
    name = "hrdash",
    version,
    about = "hrdash: employee and recruitment dashboard charts in the terminal"
)]
struct Args {
    /// HR server root (e.g. http://localhost:8000)
    #[arg(long)]
    base_url: Option<String>,

    /// Page shown first: employee or recruitment
    #[arg(long)]
    page: Option<Page>,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = apply_args(config::load(), &args);

    let _log_guard = logging::init_or_disable(&config::log_dir(), &config.log_level);
    tracing::info!(
        base_url = %config.base_url,
        page = %config.start_page(),
        "starting hrdash"
    );

    let client = DashboardClient::new(config.base_url.clone(), config.request_timeout())
        .context("failed to build HTTP client")?;
    let runtime = RuntimeBridge::new(client)?;

    let mut app = App::new(
        config.start_page(),
        config.base_url.clone(),
        config::export_dir(),
    );
    app.request_load();

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, runtime, config.tick_rate());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "dashboard loop failed");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Command-line flags win over the config file
fn apply_args(mut config: Config, args: &Args) -> Config {
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.clone();
    }
    if let Some(page) = args.page {
        config.page = page.title().to_lowercase();
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    config
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
    tick_rate: Duration,
) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            tracing::info!("quit requested");
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => handle_key(&mut app, key),
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.apply_runtime_event(event);
    }

    if let Some(load) = app.take_load_request() {
        if let Err(err) = runtime.send(load) {
            app.apply(Action::Notify(
                format!("Could not start fetches: {err}"),
                hrdash::core::NotifyLevel::Error,
            ));
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    if app.help_open {
        // Any key closes help; quitting still works from inside it
        let action = app.dashboard.handle_key(key);
        match action {
            Action::Quit => app.apply(Action::Quit),
            _ => app.apply(Action::ToggleHelp),
        }
        return;
    }
    let action = app.dashboard.handle_key(key);
    app.apply(action);
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if app.help_open {
        return;
    }
    let action = app.dashboard.handle_mouse(mouse);
    app.apply(action);
}
