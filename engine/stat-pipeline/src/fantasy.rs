//! Fantasy points, per-game averages and the standard-points rank

use tracing::debug;

use crate::config::{PprPpgBasis, ScoringConfig, FANTASY_FIELDS};
use crate::error::Result;
use crate::table::{parse_field, Record, Table};

/// Counting stats one player's fantasy line is built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatLine {
    pub games: i64,
    pub rush_yds: i64,
    pub rush_td: i64,
    pub rec: i64,
    pub rec_yds: i64,
    pub rec_td: i64,
    pub fumbles: i64,
    pub pass_yds: i64,
    pub pass_td: i64,
    pub pass_int: i64,
}

impl StatLine {
    /// Read the stat line from a merged record; every field must be an integer
    pub fn from_record(record: &Record) -> Result<Self> {
        Ok(Self {
            games: parse_field(record, "g")?,
            rush_yds: parse_field(record, "rush_yds")?,
            rush_td: parse_field(record, "rush_td")?,
            rec: parse_field(record, "rec")?,
            rec_yds: parse_field(record, "rec_yds")?,
            rec_td: parse_field(record, "rec_td")?,
            fumbles: parse_field(record, "fumbles")?,
            pass_yds: parse_field(record, "pass_yds")?,
            pass_td: parse_field(record, "pass_td")?,
            pass_int: parse_field(record, "pass_int")?,
        })
    }
}

/// Points and per-game averages for one player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FantasyPoints {
    pub std_pts: f64,
    pub half_ppr_pts: f64,
    pub ppr_pts: f64,
    pub std_ppg: f64,
    pub half_ppr_ppg: f64,
    pub ppr_ppg: f64,
}

/// Fantasy calculator for merged season tables
pub struct FantasyCalculator {
    scoring: ScoringConfig,
}

impl FantasyCalculator {
    /// Create a new fantasy calculator
    pub fn new(scoring: ScoringConfig) -> Self {
        Self { scoring }
    }

    /// Score one stat line.
    ///
    /// Zero games is not guarded: the averages come out infinite or NaN.
    pub fn score(&self, line: &StatLine) -> FantasyPoints {
        let s = &self.scoring;
        let std_pts = line.rush_yds as f64 * s.rush_yds
            + line.rush_td as f64 * s.rush_td
            + line.rec_yds as f64 * s.rec_yds
            + line.rec_td as f64 * s.rec_td
            + line.fumbles as f64 * s.fumble
            + line.pass_yds as f64 * s.pass_yds
            + line.pass_td as f64 * s.pass_td
            + line.pass_int as f64 * s.pass_int;
        let half_ppr_pts = std_pts + line.rec as f64 * s.half_ppr_rec;
        let ppr_pts = std_pts + line.rec as f64 * s.ppr_rec;

        let games = line.games as f64;
        let ppr_basis = match s.ppr_ppg_basis {
            PprPpgBasis::HalfPpr => half_ppr_pts,
            PprPpgBasis::FullPpr => ppr_pts,
        };

        FantasyPoints {
            std_pts,
            half_ppr_pts,
            ppr_pts,
            std_ppg: std_pts / games,
            half_ppr_ppg: half_ppr_pts / games,
            ppr_ppg: ppr_basis / games,
        }
    }

    /// Append the fantasy columns and the `order` rank to every player
    pub fn calculate(&self, table: &Table) -> Result<Table> {
        let mut records = table.to_records()?;
        for field in FANTASY_FIELDS {
            records.add_header(field);
        }

        for record in records.records.iter_mut() {
            let points = self.score(&StatLine::from_record(record)?);
            for (field, value) in [
                ("std_pts", points.std_pts),
                ("half_ppr_pts", points.half_ppr_pts),
                ("ppr_pts", points.ppr_pts),
                ("std_ppg", points.std_ppg),
                ("half_ppr_ppg", points.half_ppr_ppg),
                ("ppr_ppg", points.ppr_ppg),
            ] {
                record.insert(field.to_string(), format_points(value));
            }
        }

        let ranks = rank_by_std_pts(&records.records)?;
        for (record, rank) in records.records.iter_mut().zip(ranks) {
            record.insert("order".to_string(), rank.to_string());
        }

        debug!(table = %records.name, players = records.records.len(), "fantasy stats");
        Ok(records.into_table())
    }
}

/// 1-based rank of each record by `std_pts`, highest first.
///
/// Equal points keep their input order.
pub fn rank_by_std_pts(records: &[Record]) -> Result<Vec<usize>> {
    let points = records
        .iter()
        .map(|record| parse_field::<f64>(record, "std_pts"))
        .collect::<Result<Vec<_>>>()?;

    let mut by_points: Vec<usize> = (0..records.len()).collect();
    by_points.sort_by(|&a, &b| points[b].total_cmp(&points[a]));

    let mut ranks = vec![0; records.len()];
    for (position, index) in by_points.into_iter().enumerate() {
        ranks[index] = position + 1;
    }
    Ok(ranks)
}

/// Two-decimal rendering; non-finite values are spelled `+Inf`, `-Inf` and `NaN`
pub fn format_points(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "+Inf" } else { "-Inf" }.to_string()
    } else {
        format!("{value:.2}")
    }
}
