//! Team codes and the site keys their pages live under

use tracing::warn;

/// `(team code, site key)` for every franchise, in output order
pub const TEAMS: &[(&str, &str)] = &[
    ("ARI", "crd"),
    ("ATL", "atl"),
    ("BAL", "rav"),
    ("BUF", "buf"),
    ("CAR", "car"),
    ("CHI", "chi"),
    ("CIN", "cin"),
    ("CLE", "cle"),
    ("DAL", "dal"),
    ("DEN", "den"),
    ("DET", "det"),
    ("GB", "gnb"),
    ("HOU", "htx"),
    ("IND", "clt"),
    ("JAX", "jax"),
    ("KC", "kan"),
    ("LAC", "sdg"),
    ("LAR", "ram"),
    ("LVR", "rai"),
    ("MIA", "mia"),
    ("MIN", "min"),
    ("NO", "nor"),
    ("NE", "nwe"),
    ("NYG", "nyg"),
    ("NYJ", "nyj"),
    ("PHI", "phi"),
    ("PIT", "pit"),
    ("SEA", "sea"),
    ("SF", "sfo"),
    ("TB", "tam"),
    ("TEN", "oti"),
    ("WSH", "was"),
];

/// A team and the key of its pages on the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    pub code: &'static str,
    pub site_key: &'static str,
}

/// Look up a team by code, ignoring case
pub fn lookup(code: &str) -> Option<Team> {
    TEAMS
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code.trim()))
        .map(|&(code, site_key)| Team { code, site_key })
}

/// Every team in table order
pub fn all_teams() -> Vec<Team> {
    TEAMS.iter().map(|&(code, site_key)| Team { code, site_key }).collect()
}

/// Resolve requested codes, or every team when none are given.
///
/// Unknown codes are logged and skipped.
pub fn select_teams(requested: &[String]) -> Vec<Team> {
    if requested.is_empty() {
        return all_teams();
    }

    requested
        .iter()
        .filter_map(|code| {
            let team = lookup(code);
            if team.is_none() {
                warn!(team = %code, "unknown team code, skipping");
            }
            team
        })
        .collect()
}
