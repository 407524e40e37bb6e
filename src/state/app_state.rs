use crate::app::MenuItem;
use chrono::{DateTime, Local};
use mlb_api::StandingsTable;

// ---------------------------------------------------------------------------
// Standings state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct StandingsState {
    /// Replaced wholesale on every successful load.
    pub table: Option<StandingsTable>,
    pub updated_at: Option<DateTime<Local>>,
}

impl StandingsState {
    pub fn load(&mut self, table: StandingsTable, at: DateTime<Local>) {
        self.table = Some(table);
        self.updated_at = Some(at);
    }

    /// One-line status shown under the table, e.g.
    /// `Updated 19:04:11 | 30 teams | 1 record skipped`.
    pub fn summary(&self) -> String {
        let Some(table) = self.table.as_ref() else {
            return String::new();
        };

        let mut parts = Vec::with_capacity(3);
        if let Some(at) = self.updated_at {
            parts.push(format!("Updated {}", at.format("%H:%M:%S")));
        }
        parts.push(format!("{} teams", table.team_count()));
        match table.rejected.len() {
            0 => {}
            1 => parts.push("1 record skipped (\" for logs)".to_string()),
            n => parts.push(format!("{n} records skipped (\" for logs)")),
        }
        parts.join(" | ")
    }
}

// ---------------------------------------------------------------------------
// Root application state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub standings: StandingsState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mlb_api::{RejectReason, RejectedRecord, TeamRecord, organize};

    fn table(rejects: usize) -> StandingsTable {
        let mut table = organize(vec![
            TeamRecord {
                team: "Astros".into(),
                league: "AL".into(),
                division: "West".into(),
                wins: 103,
                losses: 59,
            },
            TeamRecord {
                team: "Cubs".into(),
                league: "NL".into(),
                division: "Central".into(),
                wins: 95,
                losses: 68,
            },
        ]);
        for _ in 0..rejects {
            table.rejected.push(RejectedRecord {
                team: None,
                reason: RejectReason::MissingField("team"),
            });
        }
        table
    }

    #[test]
    fn summary_is_empty_before_first_load() {
        assert_eq!(StandingsState::default().summary(), "");
    }

    #[test]
    fn summary_reports_time_teams_and_skips() {
        let at = Local.with_ymd_and_hms(2018, 10, 1, 19, 4, 11).unwrap();
        let mut state = StandingsState::default();

        state.load(table(0), at);
        assert_eq!(state.summary(), "Updated 19:04:11 | 2 teams");

        state.load(table(1), at);
        assert_eq!(state.summary(), "Updated 19:04:11 | 2 teams | 1 record skipped (\" for logs)");

        state.load(table(3), at);
        assert!(state.summary().ends_with("3 records skipped (\" for logs)"));
    }
}
