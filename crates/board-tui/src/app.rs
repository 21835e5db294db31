//! App: the component-based event loop that drives the board.
//!
//! - `App` owns the components, the `OverlayCompositor` and `AppState`.
//! - A `tokio::mpsc` channel carries `AppMessage`s in from background tasks
//!   (terminal input, board events re-published by the compositor).
//! - The clock interval advances the ticker and feeds the compositor; the
//!   UI tick drives toasts and page rotation.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info, trace, warn};

use board_core::{
    event::EventSender, overlay::failure_message, BoardEvent, BodyState, ClockTicker,
    FileSelection, OverlayCompositor, ScheduleParser,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::{
        board_frame::BoardFrame, event_log::EventLog, help_overlay::HelpOverlay,
        path_prompt::{has_csv_extension, PathPrompt},
    },
    theme::C_BG,
    widgets::{
        status_bar::{self, InputMode},
        toast::ToastManager,
    },
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Board(BoardEvent),
}

/// Expanded event log height, borders included.
const EVENT_LOG_ROWS: u16 = 10;

/// Everything `App::new` needs from config and the command line.
pub struct AppOptions {
    pub title: String,
    pub notice: Option<String>,
    pub tick_interval: Duration,
    pub schedule_dir: PathBuf,
    pub log_path: PathBuf,
    /// Selection applied before the first frame.
    pub initial_file: Option<PathBuf>,
}

pub struct App {
    state: AppState,
    board: OverlayCompositor,
    ticker: ClockTicker,
    parser: ScheduleParser,
    tick_interval: Duration,
    initial_file: Option<PathBuf>,

    // ── Components ───────────────────────────────────────────────────────────
    board_frame: BoardFrame,
    prompt: PathPrompt,
    event_log: EventLog,
    help_overlay: HelpOverlay,
    toast: ToastManager,

    should_quit: bool,
}

impl App {
    pub fn new(options: AppOptions, events: EventSender) -> Self {
        let board = OverlayCompositor::new(events);
        let mut state = AppState::new(
            options.title,
            options.notice,
            options.schedule_dir,
            options.log_path,
        );
        state.sync_board(&board);

        Self {
            state,
            board,
            ticker: ClockTicker::system(),
            parser: ScheduleParser::new(),
            tick_interval: options.tick_interval,
            initial_file: options.initial_file,
            board_frame: BoardFrame::new(),
            prompt: PathPrompt::new(),
            event_log: EventLog::new(),
            help_overlay: HelpOverlay::new(),
            toast: ToastManager::new(),
            should_quit: false,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(1024);

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── Background task: board events (compositor → AppMessage) ───────────
        let mut board_rx = self.board.subscribe();
        let bc_tx = tx.clone();
        tokio::spawn(async move {
            loop {
                match board_rx.recv().await {
                    Ok(ev) => {
                        if bc_tx.send(AppMessage::Board(ev)).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!("board event receiver lagged by {} messages", n);
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        if let Some(path) = self.initial_file.take() {
            info!("initial selection: {}", path.display());
            self.dispatch(Action::SelectFile(FileSelection::Path(path)));
        }

        // ── Periodic timers ───────────────────────────────────────────────────
        let mut clock_tick = tokio::time::interval(self.tick_interval);
        clock_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg);
                }

                _ = clock_tick.tick() => {
                    self.on_clock_tick();
                }

                _ = ui_tick.tick() => {
                    self.toast.tick();
                    let actions: Vec<Action> = {
                        let s = &self.state;
                        let mut all = Vec::new();
                        all.extend(self.board_frame.tick(s));
                        all.extend(self.prompt.tick(s));
                        all.extend(self.event_log.tick(s));
                        all.extend(self.help_overlay.tick(s));
                        all
                    };
                    for action in actions {
                        self.dispatch(action);
                    }
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("depboard stopped");

        Ok(())
    }

    fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) => self.handle_key(key),
            AppMessage::Event(_) => {}
            AppMessage::Board(ev) => self.on_board_event(ev),
        }
    }

    fn on_clock_tick(&mut self) {
        let tick = self.ticker.tick();
        self.board.apply_tick(tick);
        self.state.sync_board(&self.board);
    }

    fn on_board_event(&mut self, ev: BoardEvent) {
        let stamp = chrono::Local::now().format("%H:%M:%S");
        self.state.push_event_line(format!("{} {}", stamp, ev));
    }

    // ── Input routing ─────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        let actions = if self.help_overlay.visible {
            route_key(&mut self.help_overlay, key, &self.state)
        } else if self.prompt.is_active() {
            route_key(&mut self.prompt, key, &self.state)
        } else {
            let mut all = route_key(&mut self.event_log, key, &self.state);
            all.extend(route_key(&mut self.board_frame, key, &self.state));
            all
        };
        for action in actions {
            self.dispatch(action);
        }
    }

    /// Let every component see `action`, then apply it at the app level.
    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.board_frame.on_action(&action, s));
            out.extend(self.prompt.on_action(&action, s));
            out.extend(self.event_log.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        debug!("apply_action: {:?}", action);
        match action {
            // ── Schedule ──────────────────────────────────────────────────────
            Action::OpenPrompt(_) => {
                self.state.input_mode = InputMode::Prompt;
            }
            Action::SelectFile(selection) => {
                self.state.input_mode = InputMode::Normal;
                self.select(selection);
            }
            Action::Reload => match self.state.last_selection.clone() {
                Some(path) => self.select(FileSelection::Path(path)),
                None => self.toast.warning("nothing to reload, press o to open a file"),
            },

            // ── Notice ────────────────────────────────────────────────────────
            Action::SetNotice(notice) => {
                self.state.input_mode = InputMode::Normal;
                match &notice {
                    Some(text) => {
                        info!("notice set: {}", text);
                        self.toast.info("notice updated");
                    }
                    None => {
                        info!("notice cleared");
                        self.toast.info("notice cleared");
                    }
                }
                self.state.notice = notice;
            }
            Action::CancelPrompt => {
                self.state.input_mode = InputMode::Normal;
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleLog | Action::ToggleHelp => {}

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
        }
    }

    /// Run one selection event through the parser and into the compositor.
    fn select(&mut self, selection: FileSelection) {
        if let FileSelection::Path(path) = &selection {
            if !has_csv_extension(path) {
                warn!("{} is not a .csv file, parsing anyway", path.display());
                self.toast
                    .warning(format!("{} is not a .csv file", path.display()));
            }
            self.state.last_selection = Some(path.clone());
        }
        let outcome = self.parser.load(&selection);
        match self.board.apply_selection(outcome) {
            BodyState::Displaying(board) => {
                let name = self
                    .state
                    .last_selection
                    .as_ref()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default();
                self.toast.success(format!("{}: {} lines", name, board.len()));
            }
            BodyState::Failed(kind) => self.toast.error(failure_message(*kind)),
            BodyState::Idle => {}
        }
        self.state.sync_board(&self.board);
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_BG)), area);

        let log_h = if self.event_log.expanded { EVENT_LOG_ROWS } else { 1 };
        let prompt_h = u16::from(self.prompt.is_active());

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),
                Constraint::Length(log_h),
                Constraint::Length(prompt_h),
                Constraint::Length(1),
            ])
            .split(area);

        self.board_frame
            .draw(frame, outer[0], !self.prompt.is_active(), &self.state);
        self.event_log
            .draw(frame, outer[1], self.event_log.expanded, &self.state);
        self.prompt.draw(frame, outer[2], true, &self.state);
        status_bar::draw_keys_bar(
            frame,
            outer[3],
            self.state.input_mode,
            self.state.last_selection.as_deref(),
        );

        // ── Overlays ──────────────────────────────────────────────────────────
        self.help_overlay.draw(frame, area, true, &self.state);
        self.toast.draw(frame, area);
    }
}

fn route_key(component: &mut dyn Component, key: KeyEvent, state: &AppState) -> Vec<Action> {
    trace!("key {:?} -> {:?}", key.code, component.id());
    component.handle_key(key, state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_state::BoardStatus;
    use crate::widgets::toast::Severity;
    use board_core::event;
    use ratatui::crossterm::event::{KeyCode, KeyModifiers};
    use std::io::Write;

    fn app() -> (App, event::EventReceiver) {
        let (tx, rx) = event::channel();
        let options = AppOptions {
            title: "Departures".into(),
            notice: None,
            tick_interval: Duration::from_secs(1),
            schedule_dir: std::env::temp_dir(),
            log_path: PathBuf::from("depboard.log"),
            initial_file: None,
        };
        (App::new(options, tx), rx)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn starts_idle_with_loading_message() {
        let (app, _rx) = app();
        assert_eq!(app.state.status, BoardStatus::Idle);
        assert_eq!(app.state.body_lines[0].text, "Loading System");
    }

    #[test]
    fn escaping_the_open_prompt_shows_no_file_selected() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.state.input_mode, InputMode::Prompt);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state.input_mode, InputMode::Normal);
        assert_eq!(app.state.status, BoardStatus::Failed);
        assert_eq!(app.state.body_lines[0].text, "No file selected.");
    }

    #[test]
    fn selecting_and_reloading_a_file() {
        let (mut app, mut rx) = app();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "7,45,Depart,PlatformA,OnTime").unwrap();

        app.dispatch(Action::SelectFile(FileSelection::Path(file.path().to_path_buf())));
        assert_eq!(app.state.status, BoardStatus::Live);
        assert_eq!(app.state.body_lines[0].text, "7:45 Depart PlatformA OnTime");
        assert!(matches!(
            rx.try_recv(),
            Ok(BoardEvent::ScheduleLoaded { entries: 1, placeholders: 0 })
        ));

        writeln!(file, "bad,line").unwrap();
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.state.body_lines.len(), 2);
        assert_eq!(app.state.body_lines[1].text, "Line 2: test run");
    }

    #[test]
    fn non_csv_file_warns_but_still_loads() {
        let (mut app, _rx) = app();
        let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        writeln!(file, "7,45,Depart,PlatformA,OnTime").unwrap();

        app.dispatch(Action::SelectFile(FileSelection::Path(file.path().to_path_buf())));
        assert!(app.toast.contains(Severity::Warning, "is not a .csv file"));
        assert_eq!(app.state.status, BoardStatus::Live);
        assert_eq!(app.state.body_lines[0].text, "7:45 Depart PlatformA OnTime");
    }

    #[test]
    fn csv_file_loads_without_warning() {
        let (mut app, _rx) = app();
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "7,45,Depart,PlatformA,OnTime").unwrap();

        app.dispatch(Action::SelectFile(FileSelection::Path(file.path().to_path_buf())));
        assert!(!app.toast.contains(Severity::Warning, "is not a .csv file"));
        assert!(app.toast.contains(Severity::Success, "1 lines"));
    }

    #[test]
    fn missing_file_fails_and_keeps_path_for_reload() {
        let (mut app, _rx) = app();
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.csv");
        app.dispatch(Action::SelectFile(FileSelection::Path(missing.clone())));
        assert_eq!(app.state.status, BoardStatus::Failed);
        assert_eq!(app.state.body_lines[0].text, "Could not open the file.");
        assert_eq!(app.state.last_selection.as_deref(), Some(missing.as_path()));
    }

    #[test]
    fn notice_prompt_sets_notice() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('n'));
        for c in "Gate B".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.state.notice.as_deref(), Some("Gate B"));
        assert_eq!(app.state.input_mode, InputMode::Normal);
    }

    #[test]
    fn clock_tick_updates_face_without_touching_body() {
        let (mut app, _rx) = app();
        app.dispatch(Action::SelectFile(FileSelection::None));
        app.on_clock_tick();
        assert_eq!(app.state.clock_text.as_str().len(), 5);
        assert_eq!(app.state.body_lines[0].text, "No file selected.");
    }

    #[test]
    fn board_events_land_in_the_event_log() {
        let (mut app, _rx) = app();
        app.on_board_event(BoardEvent::ScheduleLoaded {
            entries: 3,
            placeholders: 1,
        });
        let last = app.state.event_log.back().cloned().unwrap_or_default();
        assert!(last.ends_with("schedule loaded: 3 entries, 1 placeholders"));
    }

    #[test]
    fn quit_key_stops_the_loop() {
        let (mut app, _rx) = app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
