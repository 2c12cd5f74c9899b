use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Position, Rect},
    Frame, Terminal,
};
use tracing::{debug, error, info};

use super::components::Interaction;
use super::events::{map_event, Action, EventSource, InputMode, TerminalEvent};
use super::header::{
    logout_area, render_notifications, render_search_results, render_user_menu, Header,
    HeaderAreas, SearchState,
};
use super::layout::ShellLayout;
use super::main_layout::{MainLayout, PageChrome};
use super::sidebar::{active_index, Sidebar, EXPANDED_WIDTH};
use super::view::{ViewFactory, ViewInteraction, ViewManager};
use crate::auth::AuthContext;
use crate::models::{default_navigation, DashboardData, NavigationItem, Notification, User};

/// Screen regions from the last frame, used to resolve clicks
#[derive(Debug, Clone, Copy)]
struct RenderedAreas {
    shell: ShellLayout,
    header: HeaderAreas,
    user_menu: Option<Rect>,
}

pub struct DashboardApp {
    auth: Box<dyn AuthContext>,
    navigation: Vec<NavigationItem>,
    views: ViewManager,
    layout: MainLayout,
    notifications: Vec<Notification>,
    notifications_seen: bool,
    notifications_open: bool,
    user_menu_open: bool,
    search: SearchState,
    selected: Option<usize>,
    focused_card: Option<usize>,
    pointer: Option<Position>,
    rendered: Option<RenderedAreas>,
    status: String,
    should_quit: bool,
}

impl DashboardApp {
    pub fn new(auth: Box<dyn AuthContext>, data: DashboardData, collapsed: bool) -> Self {
        let navigation = default_navigation();
        let views = ViewFactory::from_data(&navigation, &data);

        Self {
            auth,
            navigation,
            views,
            layout: MainLayout::new(collapsed),
            notifications: data.notifications,
            notifications_seen: false,
            notifications_open: false,
            user_menu_open: false,
            search: Default::default(),
            selected: None,
            focused_card: None,
            pointer: None,
            rendered: None,
            status: "Ready".to_string(),
            should_quit: false,
        }
    }

    /// Route to `path`; unknown paths are an error and the route stays put
    pub fn navigate(&mut self, path: &str) -> crate::error::Result<()> {
        self.views.navigate(path)?;
        self.focused_card = None;
        self.status = format!("Opened {}", path);
        Ok(())
    }

    pub fn current_path(&self) -> &str {
        self.views.current_path()
    }

    pub fn user(&self) -> Option<User> {
        self.auth.user()
    }

    pub fn layout(&self) -> &MainLayout {
        &self.layout
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn focused_card(&self) -> Option<usize> {
        self.focused_card
    }

    pub fn notifications_open(&self) -> bool {
        self.notifications_open
    }

    pub fn user_menu_open(&self) -> bool {
        self.user_menu_open
    }

    pub fn unread(&self) -> usize {
        if self.notifications_seen {
            0
        } else {
            self.notifications.len()
        }
    }

    pub fn input_mode(&self) -> InputMode {
        if self.search.active {
            InputMode::Search
        } else if self.user_menu_open {
            InputMode::UserMenu
        } else {
            InputMode::Normal
        }
    }

    /// Advance the sidebar transition
    pub fn tick(&mut self) -> bool {
        self.layout.tick()
    }

    pub fn draw(&mut self, f: &mut Frame) {
        let user = self.auth.user();
        let area = f.area();
        let pointer = Interaction::new(self.pointer);
        let sidebar_focused = self.focused_card.is_none() && self.selected.is_some();

        let shell = {
            let current_path = self.views.current_path();
            let (title, subtitle, header_image) = match self.views.current_view() {
                Some(view) => (view.title(), view.subtitle(), view.header_image()),
                None => ("Dashboard", None, None),
            };
            let chrome = PageChrome {
                title,
                subtitle,
                header_image,
            };

            let sidebar = Sidebar::new(
                &self.navigation,
                current_path,
                self.layout.sidebar_width() < EXPANDED_WIDTH,
            )
            .selected(self.selected);
            let header = Header::new(title, &self.search, self.unread(), user.as_ref());
            let view_interaction = ViewInteraction {
                pointer: self.pointer,
                focused_card: self.focused_card,
            };

            self.layout.render(
                f,
                area,
                &chrome,
                &sidebar,
                &header,
                &pointer,
                sidebar_focused,
                |f, content| self.views.render_current_view(f, content, &view_interaction),
            )
        };

        shell.render_status_bar(f, &self.status);

        let header = HeaderAreas::new(shell.header);
        if self.search.active {
            let matches = self.search.matches(&self.navigation);
            render_search_results(f, header.search, &self.navigation, &matches);
        }
        if self.notifications_open {
            render_notifications(f, header.notifications, &self.notifications);
        }
        let user_menu = self
            .user_menu_open
            .then(|| render_user_menu(f, header.avatar, user.as_ref()));

        self.rendered = Some(RenderedAreas {
            shell,
            header,
            user_menu,
        });
    }

    pub async fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Action::ToggleSidebar => self.toggle_sidebar(),
            Action::SelectNext => self.move_selection(1),
            Action::SelectPrevious => self.move_selection(-1),
            Action::OpenSelected => {
                if let Some(index) = self.selected {
                    self.open_item(index);
                }
            }
            Action::FocusNextCard => self.move_card_focus(1),
            Action::FocusPreviousCard => self.move_card_focus(-1),
            Action::BeginSearch => {
                self.close_overlays();
                self.search.begin();
            }
            Action::SearchInput(c) => self.search.push(c),
            Action::SearchBackspace => self.search.pop(),
            Action::SubmitSearch => {
                let best = self.search.best_match(&self.navigation);
                self.search.cancel();
                match best {
                    Some(index) => self.open_item(index),
                    None => self.status = "No page matches the search".to_string(),
                }
            }
            Action::CancelSearch => self.search.cancel(),
            Action::ToggleNotifications => self.toggle_notifications(),
            Action::ToggleUserMenu => self.toggle_user_menu(),
            Action::Logout => self.logout().await,
            Action::CloseOverlays => {
                self.close_overlays();
                self.selected = None;
                self.focused_card = None;
            }
            Action::PointerMoved(position) => self.pointer = Some(position),
            Action::Click(position) => self.click(position).await,
            Action::Resize => debug!("Terminal resized"),
        }
    }

    fn toggle_sidebar(&mut self) {
        self.layout.toggle_collapsed();
        info!(collapsed = self.layout.is_collapsed(), "Sidebar toggled");
    }

    fn toggle_notifications(&mut self) {
        self.user_menu_open = false;
        self.notifications_open = !self.notifications_open;
        if self.notifications_open {
            self.notifications_seen = true;
        }
    }

    fn toggle_user_menu(&mut self) {
        self.notifications_open = false;
        self.user_menu_open = !self.user_menu_open;
    }

    fn close_overlays(&mut self) {
        self.notifications_open = false;
        self.user_menu_open = false;
    }

    fn move_selection(&mut self, step: isize) {
        let count = self.navigation.len();
        if count == 0 {
            return;
        }
        let start = self
            .selected
            .or_else(|| active_index(&self.navigation, self.views.current_path()));
        self.selected = Some(match start {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None => 0,
        });
        self.focused_card = None;
    }

    fn move_card_focus(&mut self, step: isize) {
        let count = self
            .views
            .current_view()
            .map(|v| v.focusable_count())
            .unwrap_or(0);
        if count == 0 {
            self.focused_card = None;
            return;
        }
        self.focused_card = Some(match self.focused_card {
            Some(current) => (current as isize + step).rem_euclid(count as isize) as usize,
            None if step < 0 => count - 1,
            None => 0,
        });
    }

    fn open_item(&mut self, index: usize) {
        let Some(path) = self.navigation.get(index).map(|item| item.path.clone()) else {
            return;
        };
        if let Err(e) = self.navigate(&path) {
            self.status = e.to_string();
        }
    }

    async fn logout(&mut self) {
        self.user_menu_open = false;
        match self.auth.logout().await {
            Ok(()) => {
                info!("User logged out");
                self.status = "Signed out".to_string();
            }
            Err(e) => {
                error!("Logout failed: {}", e);
                self.status = format!("Logout failed: {}", e);
            }
        }
    }

    async fn click(&mut self, position: Position) {
        let Some(rendered) = self.rendered else {
            return;
        };

        if let Some(menu) = rendered.user_menu {
            if logout_area(menu).contains(position) {
                self.logout().await;
                return;
            }
            if menu.contains(position) {
                return;
            }
        }

        if rendered.header.avatar.contains(position) {
            self.toggle_user_menu();
        } else if rendered.header.notifications.contains(position) {
            self.toggle_notifications();
        } else if rendered.header.search.contains(position) {
            self.close_overlays();
            self.search.begin();
        } else if Sidebar::toggle_area(rendered.shell.sidebar).contains(position) {
            self.toggle_sidebar();
        } else {
            let item = Sidebar::new(&self.navigation, "", false)
                .item_at(rendered.shell.sidebar, position);
            self.close_overlays();
            if let Some(index) = item {
                self.selected = Some(index);
                self.open_item(index);
            }
        }
    }
}

async fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut DashboardApp,
    events: &mut EventSource,
) -> Result<()> {
    loop {
        terminal.draw(|f| app.draw(f))?;

        match events.next()? {
            TerminalEvent::Input(event) => {
                if let Some(action) = map_event(event, app.input_mode()) {
                    app.handle_action(action).await;
                }
            }
            TerminalEvent::Tick => {
                app.tick();
            }
        }

        if app.should_quit() {
            return Ok(());
        }
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the dashboard until the user quits; the terminal is restored on every exit path
pub async fn run_app(mut app: DashboardApp, tick_rate: Duration) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
        disable_raw_mode()?;
        return Err(e.into());
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(e) => {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
            return Err(e.into());
        }
    };

    info!("Dashboard started on {}", app.current_path());
    let mut events = EventSource::new(tick_rate);
    let result = event_loop(&mut terminal, &mut app, &mut events).await;

    restore_terminal(&mut terminal)?;
    if let Err(e) = &result {
        error!("Dashboard stopped with error: {:#}", e);
    }
    result
}
