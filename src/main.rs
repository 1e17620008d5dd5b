use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;

mod app;
mod config;
mod controller;
mod logger;
mod note;
mod render;
mod router;
mod storage;
mod store;
mod ui;

use crate::app::AppState;
use crate::config::AppConfig;
use crate::router::{dispatch, Event as UiEvent};
use crate::storage::{SqliteStore, Storage};
use crate::store::{NoteStore, UuidGenerator};
use crate::ui::{HitMap, KeyAction};

#[derive(Debug)]
enum Message {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize,
    Tick,
}

struct Session<'a> {
    app: AppState,
    config: &'a AppConfig,
    hits: HitMap,
    pointer_in_sidebar: bool,
}

impl<'a> Session<'a> {
    fn new(app: AppState, config: &'a AppConfig) -> Self {
        Self {
            app,
            config,
            hits: HitMap::default(),
            pointer_in_sidebar: false,
        }
    }

    /// Routes one event; storage failures are reported, not fatal.
    fn route(&mut self, event: UiEvent) {
        logger::debug(&format!("route: {:?}", event));
        if let Err(e) = dispatch(&mut self.app, event) {
            logger::error(&format!("route failed: {:#}", e));
            self.app.flash(format!("Error: {}", e));
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self.hits.hit(mouse.column, mouse.row);
                self.route(UiEvent::Click(target));
            }
            MouseEventKind::Moved => {
                let inside = self.hits.in_sidebar(mouse.column, mouse.row);
                if inside != self.pointer_in_sidebar {
                    self.pointer_in_sidebar = inside;
                    self.route(UiEvent::SidebarHover(inside));
                }
            }
            _ => {}
        }
    }

    /// Returns `true` when the user asked to quit.
    fn update(&mut self, msg: Message) -> bool {
        match msg {
            Message::Key(key) => {
                if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
                    match ui::key_to_action(&self.app, key) {
                        KeyAction::Quit => return true,
                        KeyAction::Dispatch(event) => self.route(event),
                        KeyAction::Ignore => {}
                    }
                }
            }
            Message::Mouse(mouse) => self.on_mouse(mouse),
            Message::Resize => {}
            Message::Tick => {
                let ttl = Duration::from_secs(self.config.general.status_seconds);
                self.app.expire_status(ttl);
            }
        }
        false
    }

    async fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let mut tick_interval = time::interval(Duration::from_millis(250));

        let (tx, mut rx) = mpsc::unbounded_channel();
        let _input_handle = std::thread::spawn(move || {
            while let Ok(evt) = event::read() {
                if tx.send(evt).is_err() {
                    break;
                }
            }
        });

        let mut should_render = true;

        loop {
            if should_render {
                let Session {
                    app, config, hits, ..
                } = self;
                terminal.draw(|f| ui::draw(f, app, &config.theme, hits))?;
                should_render = false;
            }

            let mut messages = Vec::new();
            tokio::select! {
                Some(event) = rx.recv() => {
                    let process_event = |e| match e {
                        Event::Key(key) => Some(Message::Key(key)),
                        Event::Mouse(mouse) => Some(Message::Mouse(mouse)),
                        Event::Resize(_, _) => Some(Message::Resize),
                        _ => None,
                    };
                    if let Some(m) = process_event(event) {
                        messages.push(m);
                    }
                    while let Ok(e) = rx.try_recv() {
                        if let Some(m) = process_event(e) {
                            messages.push(m);
                        }
                    }
                }
                _ = tick_interval.tick() => messages.push(Message::Tick),
            }

            for msg in messages {
                let is_tick = matches!(msg, Message::Tick);
                let had_status = self.app.status().is_some();
                if self.update(msg) {
                    return Ok(());
                }
                if !is_tick || had_status != self.app.status().is_some() {
                    should_render = true;
                }
            }
        }
    }
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the TUI application (default)
    Tui,
    /// Print every note
    List,
    /// Print notes whose title or text contains QUERY
    Search { query: String },
    /// Write the board as a standalone HTML page
    Export { path: PathBuf },
    /// Delete all notes and preferences
    ResetLocal,
}

fn open_store(config: &AppConfig) -> Result<NoteStore> {
    let db_path = config.db_path();
    let backend = SqliteStore::open(&db_path)
        .with_context(|| format!("Failed to open note storage at {:?}", db_path))?;
    Ok(NoteStore::load(
        Storage::new(Box::new(backend)),
        Box::new(UuidGenerator),
    ))
}

fn print_notes(notes: &[note::Note]) {
    if notes.is_empty() {
        println!("No notes.");
        return;
    }
    for n in notes {
        let first_line = n.text.lines().next().unwrap_or("");
        if n.title.is_empty() {
            println!("{}  {}  {}", n.id, n.color, first_line);
        } else {
            println!("{}  {}  {} - {}", n.id, n.color, n.title, first_line);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    logger::init();
    let args = Args::parse();
    let app_config = config::load_config();
    let mut store = open_store(&app_config)?;

    match args.command {
        Some(Commands::List) => {
            print_notes(store.notes());
            return Ok(());
        }
        Some(Commands::Search { query }) => {
            print_notes(&store.search(&query));
            return Ok(());
        }
        Some(Commands::Export { path }) => {
            let dark_mode = store.storage_mut().load_dark_mode();
            let page = render::render_page(store.board().markup(), dark_mode);
            fs::write(&path, page).with_context(|| format!("Failed to write {:?}", path))?;
            println!("Exported {} notes to {}", store.notes().len(), path.display());
            return Ok(());
        }
        Some(Commands::ResetLocal) => {
            store.clear()?;
            store.storage_mut().clear()?;
            logger::info("reset-local: all data cleared");
            println!("Local notes and preferences deleted.");
            return Ok(());
        }
        None | Some(Commands::Tui) => {}
    }

    logger::info(&format!("starting TUI with {} notes", store.notes().len()));
    let mut session = Session::new(AppState::new(store), &app_config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = session.run(&mut terminal).await;

    let _ = restore_terminal();
    if let Err(err) = result {
        logger::error(&format!("fatal: {:#}", err));
        eprintln!("Error: {:?}", err);
    }
    Ok(())
}
