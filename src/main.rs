use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{event, execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use term_desktop::drivers::ConsoleInputDriver;
use term_desktop::logging;
use term_desktop::runner::{DesktopShell, ShellError, ShellOptions, run_shell};
use term_desktop::session::{
    DesktopIcon, DockPosition, NotificationAction, NotificationRequest, Point, SessionCommand,
    SessionStore, builtin_apps,
};

#[derive(Parser, Debug)]
#[command(
    name = "term-desktop",
    version = env!("CARGO_PKG_VERSION"),
    about = "A desktop-metaphor session shell for terminal UIs"
)]
struct Cli {
    /// Event loop poll interval in milliseconds.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = 16)]
    tick_ms: u64,

    /// Where the dock is anchored: bottom, left, or right.
    #[arg(long = "dock-position", value_name = "POS", default_value = "bottom")]
    dock_position: DockPosition,

    /// Hide the dock while a maximized window is visible.
    #[arg(long = "dock-auto-hide", default_value_t = false)]
    dock_auto_hide: bool,

    /// Run without mouse capture (keyboard-only session).
    #[arg(long = "no-mouse", default_value_t = false)]
    no_mouse: bool,

    /// Append tracing output to this file. Without it, logs are dropped so
    /// the alternate screen stays clean.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.log_file.clone());

    let mut shell = DesktopShell::new(
        boot_session(cli.dock_position),
        ShellOptions {
            poll_interval: Duration::from_millis(cli.tick_ms),
            dock_auto_hide: cli.dock_auto_hide,
            mouse_capture: !cli.no_mouse,
        },
    );

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    let mut driver = ConsoleInputDriver::new();

    let result = run_shell(&mut terminal, &mut driver, &mut shell);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        event::DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result.map_err(|err| match err {
        ShellError::Io(err) => err,
    })
}

/// Seeds the session the way a fresh desktop boots: the built-in app
/// catalog in the dock, a column of icons for the first few apps, and a
/// transient welcome notification.
fn boot_session(dock_position: DockPosition) -> SessionStore {
    let boot = Instant::now();
    let mut store = SessionStore::new();
    let catalog = builtin_apps();
    for app in &catalog {
        store.apply(SessionCommand::AddToDock(app.clone()), boot);
    }
    store.apply(SessionCommand::SetDockPosition(dock_position), boot);

    for (idx, app) in catalog.iter().take(4).enumerate() {
        store.apply(
            SessionCommand::AddDesktopIcon(DesktopIcon::new(
                format!("icon-{}", app.id),
                app.id.clone(),
                app.name.clone(),
                app.glyph.clone(),
                Point::new(2, 2 + idx as i32 * 3),
            )),
            boot,
        );
    }

    store.apply(
        SessionCommand::AddNotification(
            NotificationRequest::info("Welcome", "Press F1 for help.")
                .with_duration(Duration::from_secs(8))
                .with_action(NotificationAction {
                    label: "Open wallet".to_string(),
                    command: SessionCommand::open_app("bitcoin-wallet"),
                    primary: true,
                }),
        ),
        boot,
    );
    store
}
