use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::layout::Position;

/// Everything the user can ask the dashboard to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleSidebar,
    SelectNext,
    SelectPrevious,
    OpenSelected,
    FocusNextCard,
    FocusPreviousCard,
    BeginSearch,
    SearchInput(char),
    SearchBackspace,
    SubmitSearch,
    CancelSearch,
    ToggleNotifications,
    ToggleUserMenu,
    Logout,
    CloseOverlays,
    PointerMoved(Position),
    Click(Position),
    Resize,
}

/// Which keymap is active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
    UserMenu,
}

/// Translate a key press into an action for the given mode
pub fn map_key(key: KeyEvent, mode: InputMode) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match mode {
        InputMode::Search => match key.code {
            KeyCode::Esc => Some(Action::CancelSearch),
            KeyCode::Enter => Some(Action::SubmitSearch),
            KeyCode::Backspace => Some(Action::SearchBackspace),
            KeyCode::Char(c) => Some(Action::SearchInput(c)),
            _ => None,
        },
        InputMode::UserMenu => match key.code {
            KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Enter => Some(Action::Logout),
            KeyCode::Esc | KeyCode::Char('u') => Some(Action::CloseOverlays),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Action::Quit),
            KeyCode::Char('b') => Some(Action::ToggleSidebar),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrevious),
            KeyCode::Enter => Some(Action::OpenSelected),
            KeyCode::Tab => Some(Action::FocusNextCard),
            KeyCode::BackTab => Some(Action::FocusPreviousCard),
            KeyCode::Char('/') => Some(Action::BeginSearch),
            KeyCode::Char('n') => Some(Action::ToggleNotifications),
            KeyCode::Char('u') => Some(Action::ToggleUserMenu),
            KeyCode::Esc => Some(Action::CloseOverlays),
            _ => None,
        },
    }
}

pub fn map_mouse(mouse: MouseEvent) -> Option<Action> {
    let position = Position::new(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Action::PointerMoved(position)),
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click(position)),
        _ => None,
    }
}

pub fn map_event(event: Event, mode: InputMode) -> Option<Action> {
    match event {
        Event::Key(key) => map_key(key, mode),
        Event::Mouse(mouse) => map_mouse(mouse),
        Event::Resize(_, _) => Some(Action::Resize),
        _ => None,
    }
}

/// Input or the periodic tick driving animations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalEvent {
    Input(Event),
    Tick,
}

/// Terminal input polled with a tick timeout
pub struct EventSource {
    tick_rate: Duration,
    last_tick: Instant,
}

impl EventSource {
    pub fn new(tick_rate: Duration) -> Self {
        Self {
            tick_rate,
            last_tick: Instant::now(),
        }
    }

    /// Wait for input until the next tick is due
    pub fn next(&mut self) -> Result<TerminalEvent> {
        let timeout = self.tick_rate.saturating_sub(self.last_tick.elapsed());
        if !timeout.is_zero() && event::poll(timeout)? {
            return Ok(TerminalEvent::Input(event::read()?));
        }
        self.last_tick = Instant::now();
        Ok(TerminalEvent::Tick)
    }
}
