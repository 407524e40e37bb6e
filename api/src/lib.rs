pub mod client;
pub mod organize;
pub mod wire;

pub use organize::organize;

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the records wire format
// ---------------------------------------------------------------------------

/// One team's season record as accepted from the API.
///
/// `league` and `division` are kept as received; classification into
/// [`League`] / [`Division`] happens in [`organize`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub team: String,
    pub league: String,
    pub division: String,
    pub wins: u32,
    pub losses: u32,
}

impl TeamRecord {
    /// Win/loss ratio used as the ranking key.
    ///
    /// A team without losses ranks above everyone, so zero losses yields
    /// `f64::INFINITY` (0-0 included). The result is never NaN.
    pub fn ratio(&self) -> f64 {
        if self.losses == 0 {
            return f64::INFINITY;
        }
        f64::from(self.wins) / f64::from(self.losses)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum League {
    American,
    National,
}

impl League {
    pub const ALL: [League; 2] = [League::American, League::National];

    /// Exact, case-sensitive match on the API's league code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "AL" => Some(League::American),
            "NL" => Some(League::National),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            League::American => "AL",
            League::National => "NL",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            League::American => "American League",
            League::National => "National League",
        }
    }
}

/// Display order is East, Central, West.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    East,
    Central,
    West,
}

impl Division {
    pub const ALL: [Division; 3] = [Division::East, Division::Central, Division::West];

    /// Exact, case-sensitive match on the API's division name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "East" => Some(Division::East),
            "Central" => Some(Division::Central),
            "West" => Some(Division::West),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Division::East => "East",
            Division::Central => "Central",
            Division::West => "West",
        }
    }
}

/// A record with its ranking ratio attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standing {
    #[serde(flatten)]
    pub record: TeamRecord,
    pub ratio: f64,
}

impl Standing {
    pub fn new(record: TeamRecord) -> Self {
        let ratio = record.ratio();
        Self { record, ratio }
    }
}

/// The three division buckets of one league, each ordered first to last place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LeagueStandings {
    pub east: Vec<Standing>,
    pub central: Vec<Standing>,
    pub west: Vec<Standing>,
}

impl LeagueStandings {
    pub fn division(&self, division: Division) -> &[Standing] {
        match division {
            Division::East => &self.east,
            Division::Central => &self.central,
            Division::West => &self.west,
        }
    }

    pub(crate) fn division_mut(&mut self, division: Division) -> &mut Vec<Standing> {
        match division {
            Division::East => &mut self.east,
            Division::Central => &mut self.central,
            Division::West => &mut self.west,
        }
    }

    pub fn team_count(&self) -> usize {
        self.east.len() + self.central.len() + self.west.len()
    }
}

/// Organized standings: league → division → teams ranked by ratio.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingsTable {
    pub american_league: LeagueStandings,
    pub national_league: LeagueStandings,
    /// Records that could not be placed in any bucket.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejected: Vec<RejectedRecord>,
}

impl StandingsTable {
    pub fn league(&self, league: League) -> &LeagueStandings {
        match league {
            League::American => &self.american_league,
            League::National => &self.national_league,
        }
    }

    pub(crate) fn league_mut(&mut self, league: League) -> &mut LeagueStandings {
        match league {
            League::American => &mut self.american_league,
            League::National => &mut self.national_league,
        }
    }

    pub fn bucket(&self, league: League, division: Division) -> &[Standing] {
        self.league(league).division(division)
    }

    /// Number of teams placed across all six buckets.
    pub fn team_count(&self) -> usize {
        self.american_league.team_count() + self.national_league.team_count()
    }

    pub fn is_empty(&self) -> bool {
        self.team_count() == 0
    }
}

/// An input record left out of the table, with the reason why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    pub team: Option<String>,
    pub reason: RejectReason,
}

impl fmt::Display for RejectedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.team {
            Some(team) => write!(f, "{team}: {}", self.reason),
            None => write!(f, "<unnamed>: {}", self.reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
pub enum RejectReason {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("`{field}` must be non-negative, got {value}")]
    NegativeCount { field: &'static str, value: i64 },
    #[error("`{field}` is out of range, got {value}")]
    CountOutOfRange { field: &'static str, value: i64 },
    #[error("malformed record: {0}")]
    Malformed(String),
    #[error("unknown league `{0}`")]
    UnknownLeague(String),
    #[error("unknown division `{0}`")]
    UnknownDivision(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(wins: u32, losses: u32) -> TeamRecord {
        TeamRecord {
            team: "Team".into(),
            league: "AL".into(),
            division: "East".into(),
            wins,
            losses,
        }
    }

    #[test]
    fn ratio_is_wins_over_losses() {
        assert_eq!(record(10, 5).ratio(), 2.0);
        assert!((record(1, 3).ratio() - 1.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn zero_losses_is_infinite_even_without_wins() {
        assert_eq!(record(7, 0).ratio(), f64::INFINITY);
        assert_eq!(record(0, 0).ratio(), f64::INFINITY);
    }

    #[test]
    fn league_and_division_parsing_is_exact() {
        assert_eq!(League::from_code("AL"), Some(League::American));
        assert_eq!(League::from_code("NL"), Some(League::National));
        assert_eq!(League::from_code("al"), None);
        assert_eq!(League::from_code("XL"), None);
        assert_eq!(Division::from_name("Central"), Some(Division::Central));
        assert_eq!(Division::from_name("central"), None);
        assert_eq!(Division::from_name(" West"), None);
    }

    #[test]
    fn table_serializes_with_camel_case_leagues() {
        let value = serde_json::to_value(StandingsTable::default()).unwrap();
        assert!(value.get("americanLeague").is_some());
        assert!(value.get("nationalLeague").is_some());
        assert!(value["americanLeague"].get("central").is_some());
        assert!(value.get("rejected").is_none());
    }

    #[test]
    fn standing_flattens_record_fields() {
        let value = serde_json::to_value(Standing::new(record(8, 2))).unwrap();
        assert_eq!(value["team"], "Team");
        assert_eq!(value["wins"], 8);
        assert_eq!(value["ratio"], 4.0);
    }
}
