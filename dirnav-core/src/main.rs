//! src/main.rs
//! Directory picker TUI: drive column, directory table and status line.
//!
//! The UI draws on stderr; the accepted directory is printed on stdout after
//! the terminal is restored, so `cd "$(dirnav)"` works.

use std::{
    io::{self, Stderr},
    panic::PanicHookInfo,
    path::PathBuf,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use crossterm::{
    event::{Event as TerminalEvent, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Frame, Terminal, backend::CrosstermBackend};
use tokio::{
    signal,
    sync::{Notify, mpsc::UnboundedReceiver},
    time,
};
use tracing::{debug, error, info, warn};

use dirnav_core::{
    config::Config,
    controller::{
        actions::Action,
        events::{DriveEvent, NavigationEvent},
    },
    fs::source::LocalFileSystem,
    logging::init_logging_with_config,
    model::{
        drive_list::DriveList,
        navigation::Navigator,
        ui_state::{Focus, RedrawFlag, UIState},
    },
    tasks::scan_task::ScanReport,
    util::paths::home_dir,
    view::ui::UIRenderer,
};

type AppTerminal = Terminal<CrosstermBackend<Stderr>>;

const NOTIFICATION_TICK: Duration = Duration::from_millis(250);

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> Result<()> {
    setup_panic_handler();

    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {e:#}");
            Config::default()
        }
    };

    let _log_guard = match init_logging_with_config(config.logging.clone()).await {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Logging disabled: {e:#}");
            None
        }
    };

    let start: PathBuf = std::env::args_os()
        .nth(1)
        .map_or_else(|| config.navigation.start_location(), PathBuf::from);

    info!(start = %start.display(), "Starting directory picker");

    let app = App::new(&config, start).context("Failed to initialize picker")?;
    let choice = app.run().await.context("Picker runtime error")?;

    // The terminal is restored by now (App dropped inside `run`).
    if let Some(path) = choice {
        info!(path = %path.display(), "Location accepted");
        println!("{}", path.display());
    }

    info!("Picker exited cleanly");
    Ok(())
}

enum Flow {
    Continue,
    Exit(Option<PathBuf>),
}

struct App {
    terminal: AppTerminal,
    navigator: Navigator,
    drives: DriveList,
    ui_state: UIState,
    ui_renderer: UIRenderer,
    scan_rx: UnboundedReceiver<ScanReport>,
    nav_rx: UnboundedReceiver<NavigationEvent>,
    drive_rx: UnboundedReceiver<DriveEvent>,
    shutdown: Arc<Notify>,
}

impl App {
    fn new(config: &Config, start: PathBuf) -> Result<Self> {
        let (nav_tx, nav_rx) = tokio::sync::mpsc::unbounded_channel();
        let (drive_tx, drive_rx) = tokio::sync::mpsc::unbounded_channel();

        let (mut navigator, scan_rx) = Navigator::new(
            Arc::new(LocalFileSystem::new()),
            &start,
            config.navigation.display_options(),
            nav_tx,
        )
        .with_context(|| format!("Cannot open start location {}", start.display()))?;

        let mut drives = DriveList::new(drive_tx);
        if config.display.show_drives {
            drives.activate();
        }

        let ui_state = UIState::new(
            config.display.show_drives && !drives.is_empty(),
            config.display.show_modified,
        );

        // Last, so an early error never leaves the terminal in raw mode.
        let terminal: AppTerminal = setup_terminal().context("Failed to initialize terminal")?;

        navigator.mount();

        Ok(Self {
            terminal,
            navigator,
            drives,
            ui_state,
            ui_renderer: UIRenderer::new(),
            scan_rx,
            nav_rx,
            drive_rx,
            shutdown: Arc::new(Notify::new()),
        })
    }

    async fn run(mut self) -> Result<Option<PathBuf>> {
        self.setup_shutdown_handler();

        let mut event_stream: EventStream = EventStream::new();
        let mut tick = time::interval(NOTIFICATION_TICK);

        loop {
            self.render()?;

            tokio::select! {
                () = self.shutdown.notified() => {
                    info!("Shutdown signal received");
                    return Ok(None);
                }

                maybe_event = event_stream.next() => match maybe_event {
                    Some(Ok(TerminalEvent::Key(key))) => {
                        if let Some(action) = Action::from_key(key)
                            && let Flow::Exit(choice) = self.dispatch_action(action)
                        {
                            return Ok(choice);
                        }
                    }
                    Some(Ok(TerminalEvent::Resize(..))) => {
                        self.ui_state.request_redraw(RedrawFlag::All);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => warn!("Terminal event error: {e}"),
                    None => {
                        info!("Terminal event stream closed");
                        return Ok(None);
                    }
                },

                Some(report) = self.scan_rx.recv() => {
                    if self.navigator.apply_scan_report(report) {
                        self.ui_state.request_redraw(RedrawFlag::Content);
                    }
                }

                Some(event) = self.nav_rx.recv() => self.handle_navigation_event(event),

                Some(event) = self.drive_rx.recv() => self.handle_drive_event(event),

                _ = tick.tick() => {
                    self.ui_state.update_notification();
                }
            }
        }
    }

    fn dispatch_action(&mut self, action: Action) -> Flow {
        debug!(?action, focus = ?self.ui_state.focus, "Dispatching action");

        let focus = self.ui_state.focus;
        match action {
            Action::Quit => return Flow::Exit(None),
            Action::Accept => return Flow::Exit(Some(self.navigator.location().to_path_buf())),

            Action::Activate => match focus {
                Focus::Directories => {
                    self.navigator.activate_highlighted();
                }
                Focus::Drives => {
                    self.drives.select_highlighted();
                }
            },

            Action::MoveUp => match focus {
                Focus::Directories => self.navigator.highlight_previous(),
                Focus::Drives => self.drives.highlight_previous(),
            },
            Action::MoveDown => match focus {
                Focus::Directories => self.navigator.highlight_next(),
                Focus::Drives => self.drives.highlight_next(),
            },
            Action::MoveFirst => match focus {
                Focus::Directories => self.navigator.highlight_first(),
                Focus::Drives => self.drives.highlight_first(),
            },
            Action::MoveLast => match focus {
                Focus::Directories => self.navigator.highlight_last(),
                Focus::Drives => self.drives.highlight_last(),
            },

            Action::GoToParent => {
                self.navigator.go_to_parent();
            }
            Action::GoHome => match home_dir() {
                Some(home) => self.set_location(home),
                None => self.ui_state.show_error("No home directory"),
            },

            Action::ToggleHidden => self.navigator.toggle_hidden(),
            Action::ToggleSort => self.navigator.toggle_sort(),
            Action::Refresh => {
                self.navigator.refresh();
                self.ui_state
                    .show_info(format!("Reloading {}", self.navigator.location().display()));
            }
            Action::SwitchFocus => self.ui_state.toggle_focus(),
        }

        self.ui_state.request_redraw(RedrawFlag::Content);
        Flow::Continue
    }

    fn set_location(&mut self, path: impl Into<PathBuf>) {
        // Failures also arrive as `NavigationEvent::Failed`.
        if let Err(e) = self.navigator.set_location(path.into()) {
            debug!("set_location rejected: {e}");
        }
    }

    fn handle_navigation_event(&mut self, event: NavigationEvent) {
        match event {
            NavigationEvent::LocationChanged(path) => {
                debug!(location = %path.display(), "Location changed");
                self.ui_state.notification = None;
            }
            NavigationEvent::DisplayUpdated => {}
            NavigationEvent::Failed(e) => {
                error!("Navigation failed: {e}");
                self.ui_state.show_error(e.to_string());
            }
        }
        self.ui_state.request_redraw(RedrawFlag::Content);
    }

    fn handle_drive_event(&mut self, event: DriveEvent) {
        match event {
            DriveEvent::RootSelected(root) => {
                info!(root = %root, "Root selected");
                self.set_location(root);
                self.ui_state.focus = Focus::Directories;
            }
        }
        self.ui_state.request_redraw(RedrawFlag::All);
    }

    fn render(&mut self) -> Result<()> {
        if !self.ui_state.needs_redraw() {
            return Ok(());
        }

        let Self {
            terminal,
            navigator,
            drives,
            ui_state,
            ui_renderer,
            ..
        } = self;

        terminal
            .draw(|frame: &mut Frame<'_>| {
                ui_renderer.render(frame, ui_state, navigator, drives);
            })
            .context("Failed to draw terminal")?;

        self.ui_state.clear_redraw();
        Ok(())
    }

    fn setup_shutdown_handler(&self) {
        let shutdown: Arc<Notify> = self.shutdown.clone();

        tokio::spawn(async move {
            #[cfg(unix)]
            {
                use tokio::signal::unix::{SignalKind, signal};

                let (mut sigterm, mut sigint) =
                    match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
                        (Ok(term), Ok(int)) => (term, int),
                        (Err(e), _) | (_, Err(e)) => {
                            warn!("Failed to install signal handlers: {e}");
                            return;
                        }
                    };

                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                    _ = signal::ctrl_c() => info!("Received Ctrl+C"),
                }
            }

            #[cfg(not(unix))]
            {
                if let Err(e) = signal::ctrl_c().await {
                    warn!("Failed to listen for Ctrl+C: {}", e);
                    return;
                }
                info!("Received Ctrl+C");
            }

            shutdown.notify_one();
        });
    }
}

impl Drop for App {
    fn drop(&mut self) {
        if let Err(e) = cleanup_terminal(&mut self.terminal) {
            warn!("Failed to cleanup terminal: {}", e);
        }
    }
}

fn setup_terminal() -> Result<AppTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;

    let mut stderr = io::stderr();
    execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stderr);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    info!("Terminal setup complete");
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut AppTerminal) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    info!("Terminal cleanup complete");
    Ok(())
}

fn setup_panic_handler() {
    let original_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);

        error!("Picker panicked: {}", panic_info);
        original_hook(panic_info);
    }));
}
