use crate::state::network::LoadingState;
use crossterm::event::KeyEvent;
use mlb_api::StandingsTable;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadStandings,
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    StandingsLoaded { table: StandingsTable },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
