use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use chrono::Local;
use mlb_api::{League, StandingsTable};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    AmericanLeague,
    NationalLeague,
    Help,
}

impl MenuItem {
    pub fn league(&self) -> Option<League> {
        match self {
            MenuItem::AmericanLeague => Some(League::American),
            MenuItem::NationalLeague => Some(League::National),
            MenuItem::Help => None,
        }
    }
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings) -> Self {
        Self { state: AppState::new(), settings }
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_standings_loaded(&mut self, table: StandingsTable) {
        self.state.last_error = None;
        self.state.standings.load(table, Local::now());
    }

    /// The previous table, if any, stays on screen.
    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    /// Flip between the two league tabs; from Help, return to the last league.
    pub fn cycle_league(&mut self) {
        let next = match self.state.active_tab {
            MenuItem::AmericanLeague => MenuItem::NationalLeague,
            MenuItem::NationalLeague => MenuItem::AmericanLeague,
            MenuItem::Help => self.state.previous_tab,
        };
        self.update_tab(next);
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }
}
