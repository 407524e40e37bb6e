use crate::{Division, League, RejectReason, RejectedRecord, Standing, StandingsTable, TeamRecord};
use log::warn;
use std::cmp::Ordering;

/// Bucket records by league and division, then rank each bucket by ratio.
///
/// Records whose league or division is not one of the six recognized pairs are
/// left out of every bucket and reported in [`StandingsTable::rejected`].
/// Buckets are sorted with a stable sort, so equal ratios keep input order.
pub fn organize<I>(records: I) -> StandingsTable
where
    I: IntoIterator<Item = TeamRecord>,
{
    let mut table = StandingsTable::default();

    for record in records {
        match classify(&record) {
            Ok((league, division)) => table
                .league_mut(league)
                .division_mut(division)
                .push(Standing::new(record)),
            Err(reason) => {
                warn!("skipping {}: {reason}", record.team);
                table.rejected.push(RejectedRecord {
                    team: Some(record.team),
                    reason,
                });
            }
        }
    }

    for league in League::ALL {
        for division in Division::ALL {
            table
                .league_mut(league)
                .division_mut(division)
                .sort_by(compare_ratios);
        }
    }

    table
}

fn classify(record: &TeamRecord) -> Result<(League, Division), RejectReason> {
    let league = League::from_code(&record.league)
        .ok_or_else(|| RejectReason::UnknownLeague(record.league.clone()))?;
    let division = Division::from_name(&record.division)
        .ok_or_else(|| RejectReason::UnknownDivision(record.division.clone()))?;
    Ok((league, division))
}

/// Descending by ratio; first place sorts first.
fn compare_ratios(a: &Standing, b: &Standing) -> Ordering {
    b.ratio.total_cmp(&a.ratio)
}
