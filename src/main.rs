//! Terminal Blockfall runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `blockfall::term`.
//! Screens: title menu, instructions, play, game over. Restart builds a fresh
//! session; going back to the menu drops the current one.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::audio::AudioPlayer;
use blockfall::core::{GameConfig, GameSession, GameSnapshot};
use blockfall::event_log::EventLog;
use blockfall::input::{handle_key_event, menu_action, should_quit, MenuAction};
use blockfall::logging;
use blockfall::settings::Settings;
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::FRAME_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Menu,
    Instructions,
    Playing,
    GameOver,
}

struct App {
    config: GameConfig,
    screen: Screen,
    session: Option<GameSession>,
    /// Bumped on every new session so journal lines can be told apart.
    session_no: u32,
    started: Instant,
    audio: AudioPlayer,
    journal: Option<EventLog>,
}

impl App {
    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn start_session(&mut self) -> Result<()> {
        self.started = Instant::now();
        self.session_no += 1;
        // Successive games get different piece orders from one seed.
        let config = self
            .config
            .with_seed(self.config.seed.wrapping_add(self.session_no - 1));
        self.session = Some(GameSession::new(config, 0)?);
        self.screen = Screen::Playing;
        log::info!("session {} started, seed {}", self.session_no, config.seed);
        Ok(())
    }

    fn to_menu(&mut self) {
        self.session = None;
        self.screen = Screen::Menu;
    }

    fn on_menu_action(&mut self, action: MenuAction) -> Result<()> {
        match (self.screen, action) {
            (Screen::Menu | Screen::Instructions, MenuAction::Start)
            | (Screen::GameOver, MenuAction::Start | MenuAction::Restart) => self.start_session()?,
            (Screen::Menu, MenuAction::Instructions) => self.screen = Screen::Instructions,
            (Screen::Instructions | Screen::GameOver | Screen::Playing, MenuAction::Menu) => {
                self.to_menu()
            }
            _ => {}
        }
        Ok(())
    }

    /// Route drained session events to audio and the journal.
    fn pump_events(&mut self) -> Result<()> {
        let now = self.now_ms();
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };
        for ev in session.drain_events() {
            self.audio.on_event(&ev);
            if let Some(journal) = self.journal.as_mut() {
                journal.record(self.session_no, now, &ev)?;
            }
        }
        if session.is_game_over() && self.screen == Screen::Playing {
            self.screen = Screen::GameOver;
            if let Some(journal) = self.journal.as_mut() {
                journal.flush()?;
            }
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let settings = Settings::from_env()?;
    if let Some(path) = &settings.log_path {
        logging::init(path, settings.log_level)?;
    }

    let mut term = TerminalRenderer::new();
    if let Err(err) = term.enter() {
        let _ = term.exit();
        return Err(err);
    }

    let result = run(&mut term, &settings);

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Err(err) = &result {
        log::error!("fatal: {err:#}");
    }
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, settings: &Settings) -> Result<()> {
    let journal = match &settings.event_log {
        Some(path) => Some(EventLog::create(path)?),
        None => None,
    };
    let mut app = App {
        config: settings.game,
        screen: Screen::Menu,
        session: None,
        session_no: 0,
        started: Instant::now(),
        audio: AudioPlayer::open(settings.mute),
        journal,
    };

    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let frame = Duration::from_millis(FRAME_MS);
    let mut last_frame = Instant::now();

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        match (&app.screen, &app.session) {
            (Screen::Playing | Screen::GameOver, Some(session)) => {
                session.snapshot_into(&mut snap);
                view.render_into(&snap, viewport, &mut fb);
            }
            (Screen::Instructions, _) => view.render_instructions(viewport, &mut fb),
            _ => view.render_menu(viewport, &mut fb),
        }
        term.draw(&fb)?;

        // Input with timeout until next frame.
        let timeout = frame.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        break;
                    }
                    let command = match app.screen {
                        Screen::Playing => handle_key_event(key),
                        _ => None,
                    };
                    match command {
                        Some(cmd) => {
                            if let Some(session) = app.session.as_mut() {
                                session.apply_command(cmd);
                            }
                        }
                        None => {
                            if let Some(action) = menu_action(key) {
                                app.on_menu_action(action)?;
                            }
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_frame.elapsed() >= frame {
            last_frame = Instant::now();
            if app.screen == Screen::Playing {
                let now = app.now_ms();
                if let Some(session) = app.session.as_mut() {
                    session.tick(now);
                }
            }
        }

        app.pump_events()?;
    }

    if let Some(journal) = app.journal.as_mut() {
        journal.flush()?;
    }
    Ok(())
}
