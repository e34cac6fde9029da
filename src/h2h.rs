use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::record::{H2HRecord, MatchContext, Record, StatValue};

const MATCH_LIST_KEYS: &[&str] = &[
    "previous_matches",
    "matches",
    "h2h_matches",
    "past_matches",
    "history",
];
// Per-side goal counts above this are feed noise, not football scores.
const MAX_PLAUSIBLE_GOALS: u32 = 99;
const MATCH_SHAPE_KEYS: &[&str] = &[
    "home_team",
    "away_team",
    "score",
    "result",
    "date",
    "home_score",
    "away_score",
];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct H2HTally {
    pub total_matches: u32,
    pub home_wins: u32,
    pub away_wins: u32,
    pub draws: u32,
    pub total_goals: u32,
    pub over_2_5: u32,
    pub btts: u32,
}

impl H2HTally {
    /// Fills only H2H fields that are still at their default.
    pub fn apply_to(&self, record: &mut H2HRecord) {
        if self.total_matches == 0 {
            return;
        }
        let n = self.total_matches as f64;
        let rows = [
            ("total_matches", n),
            ("home_wins", self.home_wins as f64),
            ("away_wins", self.away_wins as f64),
            ("draws", self.draws as f64),
            ("avg_goals", round_to(self.total_goals as f64 / n, 2)),
            ("over_2_5_pct", round_to(100.0 * self.over_2_5 as f64 / n, 1)),
            ("btts_pct", round_to(100.0 * self.btts as f64 / n, 1)),
        ];
        for (field, value) in rows {
            record.merge(field, StatValue::Number(value));
        }
    }
}

/// First array of match-shaped objects anywhere in the payload, depth-first.
pub fn find_previous_matches(root: &Value) -> Option<&[Value]> {
    match root {
        Value::Object(map) => {
            for key in MATCH_LIST_KEYS {
                if let Some(Value::Array(items)) = map.get(*key) {
                    if looks_like_match_list(items) {
                        debug!(key = *key, len = items.len(), "previous matches found");
                        return Some(items);
                    }
                }
            }
            map.values().find_map(find_previous_matches)
        }
        Value::Array(items) => {
            if looks_like_match_list(items) {
                return Some(items);
            }
            items.iter().find_map(find_previous_matches)
        }
        _ => None,
    }
}

fn looks_like_match_list(items: &[Value]) -> bool {
    let Some(Value::Object(sample)) = items.first() else {
        return false;
    };
    items.iter().all(Value::is_object) && MATCH_SHAPE_KEYS.iter().any(|k| sample.contains_key(*k))
}

/// Counts results of meetings between the two context teams, from the home side's view.
pub fn tally_matches(matches: &[Value], ctx: &MatchContext) -> H2HTally {
    let home = ctx.home_team.trim().to_lowercase();
    let away = ctx.away_team.trim().to_lowercase();
    let mut tally = H2HTally::default();
    if home.is_empty() || away.is_empty() {
        return tally;
    }

    for m in matches {
        let Value::Object(m) = m else {
            continue;
        };
        let hosted = side_name(m, "home_team");
        let visiting = side_name(m, "away_team");
        let (Some(hosted), Some(visiting)) = (hosted, visiting) else {
            continue;
        };
        let home_hosted = same_team(&hosted, &home) && same_team(&visiting, &away);
        let away_hosted = same_team(&hosted, &away) && same_team(&visiting, &home);
        if !home_hosted && !away_hosted {
            continue;
        }
        let Some((host_goals, visitor_goals)) = parse_score(m) else {
            continue;
        };
        if host_goals > MAX_PLAUSIBLE_GOALS || visitor_goals > MAX_PLAUSIBLE_GOALS {
            debug!(host_goals, visitor_goals, "implausible score skipped");
            continue;
        }

        tally.total_matches += 1;
        let (ours, theirs) = if home_hosted {
            (host_goals, visitor_goals)
        } else {
            (visitor_goals, host_goals)
        };
        if ours > theirs {
            tally.home_wins += 1;
        } else if theirs > ours {
            tally.away_wins += 1;
        } else {
            tally.draws += 1;
        }
        let goals = host_goals + visitor_goals;
        tally.total_goals = tally.total_goals.saturating_add(goals);
        if goals >= 3 {
            tally.over_2_5 += 1;
        }
        if host_goals > 0 && visitor_goals > 0 {
            tally.btts += 1;
        }
    }
    if tally.total_matches > 0 {
        info!(matches = tally.total_matches, "h2h rebuilt from previous matches");
    }
    tally
}

fn side_name(m: &Map<String, Value>, key: &str) -> Option<String> {
    match m.get(key)? {
        Value::String(s) => Some(s.trim().to_lowercase()),
        Value::Object(team) => team
            .get("name")
            .and_then(|v| v.as_str())
            .map(|s| s.trim().to_lowercase()),
        _ => None,
    }
}

fn same_team(name: &str, team: &str) -> bool {
    !name.is_empty() && (name.contains(team) || team.contains(name))
}

fn parse_score(m: &Map<String, Value>) -> Option<(u32, u32)> {
    if let Some(Value::String(score)) = m.get("score") {
        if let Some((h, a)) = score.split_once('-') {
            if let (Ok(h), Ok(a)) = (h.trim().parse::<u32>(), a.trim().parse::<u32>()) {
                return Some((h, a));
            }
        }
    }
    let h = goals(m.get("home_score")?)?;
    let a = goals(m.get("away_score")?)?;
    Some((h, a))
}

fn goals(value: &Value) -> Option<u32> {
    if let Some(n) = value.as_u64() {
        return u32::try_from(n).ok();
    }
    value.as_str().and_then(|s| s.trim().parse::<u32>().ok())
}

pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
