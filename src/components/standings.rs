use mlb_api::{Division, League, LeagueStandings, Standing};
use tui::layout::Constraint;
use tui::style::{Color, Modifier, Style};
use tui::widgets::{Cell, Row};

pub const HEADER: [&str; 5] = ["", "Team", "Wins", "Losses", "W/L Ratio"];

pub const COLUMN_WIDTHS: [Constraint; 5] = [
    Constraint::Length(3),
    Constraint::Fill(1),
    Constraint::Length(6),
    Constraint::Length(8),
    Constraint::Length(10),
];

const MLB_RED: Color = Color::Rgb(213, 0, 50);
const MLB_BLUE: Color = Color::Rgb(0, 45, 114);

/// One visual line of a league table, before styling.
#[derive(Debug, Clone, PartialEq)]
pub enum TableLine {
    /// Division banner, e.g. "AL East".
    Division(String),
    /// Rank, team, wins, losses, ratio.
    Team([String; 5]),
}

/// Lines for one league: each division banner followed by its teams in rank order.
pub fn league_lines(league: League, standings: &LeagueStandings) -> Vec<TableLine> {
    let mut lines = Vec::with_capacity(standings.team_count() + Division::ALL.len());
    for division in Division::ALL {
        lines.push(TableLine::Division(format!("{} {}", league.code(), division.label())));
        lines.extend(
            standings
                .division(division)
                .iter()
                .enumerate()
                .map(|(idx, standing)| TableLine::Team(team_cells(idx + 1, standing))),
        );
    }
    lines
}

fn team_cells(rank: usize, standing: &Standing) -> [String; 5] {
    [
        rank.to_string(),
        standing.record.team.clone(),
        standing.record.wins.to_string(),
        standing.record.losses.to_string(),
        format_ratio(standing.ratio),
    ]
}

pub fn header_row() -> Row<'static> {
    Row::new(HEADER).style(
        Style::default()
            .fg(Color::White)
            .bg(MLB_RED)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn to_row(line: TableLine, stripe: bool) -> Row<'static> {
    match line {
        TableLine::Division(label) => Row::new(vec![Cell::from(""), Cell::from(label)])
            .style(
                Style::default()
                    .fg(Color::White)
                    .bg(MLB_BLUE)
                    .add_modifier(Modifier::BOLD),
            ),
        TableLine::Team(cells) => {
            let row = Row::new(cells.map(Cell::from));
            if stripe {
                row.style(Style::default().bg(Color::Indexed(236)))
            } else {
                row
            }
        }
    }
}

/// Styled rows for one league, striping alternate teams within each division.
pub fn league_rows(league: League, standings: &LeagueStandings) -> Vec<Row<'static>> {
    let mut index = 0usize;
    league_lines(league, standings)
        .into_iter()
        .map(|line| {
            let stripe = match &line {
                TableLine::Division(_) => {
                    index = 0;
                    false
                }
                TableLine::Team(_) => {
                    index += 1;
                    index % 2 == 0
                }
            };
            to_row(line, stripe)
        })
        .collect()
}

/// Ratio with three significant digits, like JavaScript's `toPrecision(3)`.
/// Zero-loss teams show as `∞`.
pub fn format_ratio(ratio: f64) -> String {
    if ratio.is_nan() {
        return "-".to_string();
    }
    if ratio.is_infinite() {
        return if ratio > 0.0 { "∞".to_string() } else { "-∞".to_string() };
    }
    to_precision(ratio, 3)
}

fn to_precision(value: f64, digits: usize) -> String {
    let digits = digits.max(1);
    if value == 0.0 {
        return format!("{:.*}", digits - 1, 0.0);
    }

    // Scientific formatting applies the rounding, so the exponent already
    // accounts for carries like 9.999 -> 1.00e1.
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);

    if exponent < -6 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        return format!("{mantissa}e{sign}{}", exponent.unsigned_abs());
    }

    let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
    format!("{value:.decimals$}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mlb_api::{TeamRecord, organize};

    fn team(name: &str, division: &str, wins: u32, losses: u32) -> TeamRecord {
        TeamRecord {
            team: name.into(),
            league: "AL".into(),
            division: division.into(),
            wins,
            losses,
        }
    }

    #[test]
    fn ratio_uses_three_significant_digits() {
        assert_eq!(format_ratio(4.0), "4.00");
        assert_eq!(format_ratio(2.0), "2.00");
        assert_eq!(format_ratio(0.5), "0.500");
        assert_eq!(format_ratio(100.0 / 62.0), "1.61");
        assert_eq!(format_ratio(47.0 / 115.0), "0.409");
        assert_eq!(format_ratio(12.5), "12.5");
        assert_eq!(format_ratio(150.0), "150");
        assert_eq!(format_ratio(0.0), "0.00");
    }

    #[test]
    fn ratio_rounding_carries_into_the_next_digit() {
        assert_eq!(format_ratio(9.999), "10.0");
        assert_eq!(format_ratio(0.99999), "1.00");
    }

    #[test]
    fn large_and_tiny_ratios_switch_to_exponent_form() {
        assert_eq!(format_ratio(1234.0), "1.23e+3");
        assert_eq!(format_ratio(0.000_000_123_4), "1.23e-7");
        assert_eq!(format_ratio(0.000_123_4), "0.000123");
    }

    #[test]
    fn unbeaten_ratio_is_infinity_symbol() {
        assert_eq!(format_ratio(f64::INFINITY), "∞");
        assert_eq!(format_ratio(f64::NAN), "-");
    }

    #[test]
    fn lines_list_divisions_in_order_with_ranked_teams() {
        let table = organize(vec![
            team("Mariners", "West", 89, 73),
            team("Yankees", "East", 100, 62),
            team("Astros", "West", 103, 59),
        ]);
        let lines = league_lines(League::American, &table.american_league);

        assert_eq!(
            lines,
            vec![
                TableLine::Division("AL East".into()),
                TableLine::Team([
                    "1".into(),
                    "Yankees".into(),
                    "100".into(),
                    "62".into(),
                    "1.61".into()
                ]),
                TableLine::Division("AL Central".into()),
                TableLine::Division("AL West".into()),
                TableLine::Team([
                    "1".into(),
                    "Astros".into(),
                    "103".into(),
                    "59".into(),
                    "1.75".into()
                ]),
                TableLine::Team([
                    "2".into(),
                    "Mariners".into(),
                    "89".into(),
                    "73".into(),
                    "1.22".into()
                ]),
            ]
        );
    }

    #[test]
    fn one_row_per_line() {
        let table = organize(vec![team("Rays", "East", 90, 72), team("Twins", "Central", 78, 84)]);
        let rows = league_rows(League::American, &table.american_league);
        assert_eq!(rows.len(), 5);
    }
}
