//! Raw wire types for the records endpoint.
//! Endpoint: https://api.mobileqa.mlbinfra.com/api/interview/v1/records
//!
//! The payload is kept as a JSON array of untyped values and each element is
//! decoded on its own, so one malformed element does not fail the whole
//! payload; [`ingest`] decides what to keep.
use crate::{RejectReason, RejectedRecord, TeamRecord};
use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Default, Debug, Clone)]
#[serde(default)]
pub struct RawRecord {
    pub team: Option<String>,
    pub league: Option<String>,
    pub division: Option<String>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
}

impl TryFrom<RawRecord> for TeamRecord {
    type Error = RejectReason;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        Ok(TeamRecord {
            team: raw.team.ok_or(RejectReason::MissingField("team"))?,
            league: raw.league.ok_or(RejectReason::MissingField("league"))?,
            division: raw.division.ok_or(RejectReason::MissingField("division"))?,
            wins: count("wins", raw.wins)?,
            losses: count("losses", raw.losses)?,
        })
    }
}

fn count(field: &'static str, value: Option<i64>) -> Result<u32, RejectReason> {
    let value = value.ok_or(RejectReason::MissingField(field))?;
    if value < 0 {
        return Err(RejectReason::NegativeCount { field, value });
    }
    u32::try_from(value).map_err(|_| RejectReason::CountOutOfRange { field, value })
}

/// Split a raw payload into well-formed records and flagged rejects.
pub fn ingest(raw: Vec<Value>) -> (Vec<TeamRecord>, Vec<RejectedRecord>) {
    let mut records = Vec::with_capacity(raw.len());
    let mut rejected = Vec::new();

    for value in raw {
        let team = value.get("team").and_then(Value::as_str).map(str::to_owned);
        let result = RawRecord::deserialize(value)
            .map_err(|e| RejectReason::Malformed(e.to_string()))
            .and_then(TeamRecord::try_from);

        match result {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!(
                    "rejecting record {}: {reason}",
                    team.as_deref().unwrap_or("<unnamed>")
                );
                rejected.push(RejectedRecord { team, reason });
            }
        }
    }

    (records, rejected)
}
