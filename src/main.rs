use std::fs;
use std::any::Any;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use chainview::app::App;
use chainview::bootstrap::{
    AuthClient, BootstrapStep, CredentialBootstrap, LoginRequest, NoopBootstrap,
};
use chainview::config::{self, Config};
use chainview::core::TabId;
use chainview::infrastructure::{RuntimeBridge, RuntimeCommand};
use chainview::logging::{self, LogSettings};
use chainview::panels::{BuiltinPanels, SampleChain};
use chainview::router::LazyLoader;
use chainview::store::{CredentialStore, MemoryStore, TokenStore};
use chainview::ui::{self, theme::Theme};

#[derive(Debug, Parser)]
#[command(
    name = "chainview",
    version,
    about = "chainview: a terminal explorer for supply-chain ledgers"
)]
struct Args {
    /// Tab to open first (e.g. dashboard, explorer, sparql)
    #[arg(long)]
    tab: Option<String>,

    /// Skip the development auto-login
    #[arg(long)]
    no_bootstrap: bool,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `chainview::router=trace`
    #[arg(long)]
    log_level: Option<String>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    let log_settings = LogSettings {
        level: args.log_level.clone().or_else(|| config.logging.level.clone()),
        file: args.log_file.clone().or_else(|| config.logging.file.clone()),
    };
    if let Err(err) = logging::init(&log_settings) {
        eprintln!("logging disabled: {err:#}");
    }

    let initial_tab = TabId::coerce(args.tab.as_deref().unwrap_or(&config.initial_tab));
    let bootstrap = bootstrap_step(&args, &config);
    let source = BuiltinPanels::new(Arc::new(SampleChain::default()))
        .with_delay(config.panels.load_delay())
        .with_failing(config.panels.failing_panels());

    let runtime = RuntimeBridge::new(Arc::new(source), bootstrap)?;
    let mut app = App::new(LazyLoader::new(runtime.requester()), initial_tab);
    runtime.send(RuntimeCommand::Bootstrap)?;

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    install_panic_hook();
    let res = panic::catch_unwind(AssertUnwindSafe(|| {
        run_app(&mut terminal, &mut app, &runtime, &config)
    }))
    .unwrap_or_else(|payload| Err(anyhow!("ui panicked: {}", panic_message(payload.as_ref()))));

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "exiting on error");
        eprintln!("{err:?}");
    }

    Ok(())
}

/// Panel loads and renders recover from their own panics; keep the report in
/// the log instead of printing over the alternate screen.
fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());
        tracing::error!(%location, "panic: {}", panic_message(info.payload()));
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

fn token_store() -> Arc<dyn TokenStore> {
    let Some(db_path) = config::credentials_db_path() else {
        return Arc::new(MemoryStore::new());
    };
    if let Some(parent) = db_path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    match CredentialStore::open(&db_path) {
        Ok(store) => Arc::new(store),
        Err(err) => {
            tracing::warn!(error = %err, "credential db disabled, using memory store");
            Arc::new(MemoryStore::new())
        }
    }
}

fn bootstrap_step(args: &Args, config: &Config) -> Arc<dyn BootstrapStep> {
    let settings = &config.bootstrap;
    if args.no_bootstrap || !settings.enabled {
        return Arc::new(NoopBootstrap);
    }
    match AuthClient::new(settings.auth_url.clone(), settings.timeout()) {
        Ok(client) => Arc::new(CredentialBootstrap::new(
            client,
            LoginRequest {
                username: settings.username.clone(),
                password: settings.password.clone(),
            },
            token_store(),
        )),
        Err(err) => {
            tracing::warn!(error = %err, "auto-login disabled");
            Arc::new(NoopBootstrap)
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: &RuntimeBridge,
    config: &Config,
) -> Result<()> {
    let tick_rate = config.tick_rate();
    let theme = Theme::default();
    let mut last_tick = Instant::now();

    loop {
        pump_background(app, runtime);
        terminal.draw(|f| ui::draw(f, app, &theme))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    for event in runtime.poll_events() {
        app.handle_event(event);
    }
}
