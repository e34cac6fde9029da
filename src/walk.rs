use serde_json::{Map, Value};
use tracing::debug;

use crate::aliases::{
    AWAY_PATH_MARKERS, H2H_INDICATOR_GROUPS, H2H_PATH_MARKERS, HOME_PATH_MARKERS, NAME_KEYS,
    STAT_KEYS, TEAM_CONTAINER_KEYS,
};
use crate::error::Role;
use crate::record::MatchContext;

#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub path: String,
    pub node: &'a Map<String, Value>,
}

/// Object nodes judged to hold each role's statistics, in depth-first pre-order.
#[derive(Debug, Clone, Default)]
pub struct Candidates<'a> {
    pub home: Vec<Candidate<'a>>,
    pub away: Vec<Candidate<'a>>,
    pub h2h: Vec<Candidate<'a>>,
}

impl<'a> Candidates<'a> {
    pub fn for_role(&self, role: Role) -> &[Candidate<'a>] {
        match role {
            Role::Home => &self.home,
            Role::Away => &self.away,
            Role::H2H => &self.h2h,
        }
    }

    fn push(&mut self, role: Role, candidate: Candidate<'a>) {
        match role {
            Role::Home => self.home.push(candidate),
            Role::Away => self.away.push(candidate),
            Role::H2H => self.h2h.push(candidate),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.home.is_empty() && self.away.is_empty() && self.h2h.is_empty()
    }
}

pub fn walk<'a>(root: &'a Value, ctx: &MatchContext) -> Candidates<'a> {
    let mut out = Candidates::default();
    visit(root, "", None, ctx, &mut out);
    debug!(
        home = out.home.len(),
        away = out.away.len(),
        h2h = out.h2h.len(),
        "tree walk finished"
    );
    out
}

// JSON from the API is acyclic, so depth is bounded by nesting.
fn visit<'a>(
    node: &'a Value,
    path: &str,
    inherited: Option<Role>,
    ctx: &MatchContext,
    out: &mut Candidates<'a>,
) {
    match node {
        Value::Object(map) => {
            let role = inherited.or_else(|| classify(map, path, ctx));
            if let Some(role) = role {
                debug!(path, %role, "candidate node");
                out.push(
                    role,
                    Candidate {
                        path: path.to_string(),
                        node: map,
                    },
                );
            }
            // Only team nodes hand their role down to stat containers.
            let team_role = role.filter(|role| *role != Role::H2H);
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                let child_role = team_role.filter(|_| TEAM_CONTAINER_KEYS.contains(&key.as_str()));
                visit(child, &child_path, child_role, ctx, out);
            }
        }
        Value::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                visit(item, &format!("{path}[{idx}]"), None, ctx, out);
            }
        }
        _ => {}
    }
}

/// Decides which role, if any, an object node belongs to. First matching rule wins.
pub fn classify(map: &Map<String, Value>, path: &str, ctx: &MatchContext) -> Option<Role> {
    if let Some(role) = role_by_name(map, ctx) {
        return Some(role);
    }

    let lowered = path.to_lowercase();
    if contains_any(&lowered, HOME_PATH_MARKERS) {
        return Some(Role::Home);
    }
    if contains_any(&lowered, AWAY_PATH_MARKERS) {
        return Some(Role::Away);
    }

    if h2h_indicator_count(map) >= 2 {
        return Some(Role::H2H);
    }
    if contains_any(&lowered, H2H_PATH_MARKERS) && has_stat_key(map) {
        return Some(Role::H2H);
    }
    None
}

fn role_by_name(map: &Map<String, Value>, ctx: &MatchContext) -> Option<Role> {
    let home = normalize_name(&ctx.home_team);
    let away = normalize_name(&ctx.away_team);

    for key in NAME_KEYS {
        let Some(Value::String(raw)) = map.get(*key) else {
            continue;
        };
        let name = normalize_name(raw);
        if name.is_empty() {
            continue;
        }
        // Exact matches first so "Manchester City" never lands on "Manchester United".
        if !home.is_empty() && name == home {
            return Some(Role::Home);
        }
        if !away.is_empty() && name == away {
            return Some(Role::Away);
        }
        if overlaps(&name, &home) {
            return Some(Role::Home);
        }
        if overlaps(&name, &away) {
            return Some(Role::Away);
        }
    }
    None
}

fn normalize_name(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn overlaps(name: &str, team: &str) -> bool {
    !team.is_empty() && (name.contains(team) || team.contains(name))
}

fn contains_any(haystack: &str, markers: &[&str]) -> bool {
    markers.iter().any(|marker| haystack.contains(marker))
}

fn h2h_indicator_count(map: &Map<String, Value>) -> usize {
    H2H_INDICATOR_GROUPS
        .iter()
        .filter(|group| group.iter().any(|key| map.contains_key(*key)))
        .count()
}

fn has_stat_key(map: &Map<String, Value>) -> bool {
    map.keys().any(|key| STAT_KEYS.contains(key.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ctx() -> MatchContext {
        MatchContext::new("Arsenal", "Chelsea")
    }

    fn obj(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("fixture must be an object"),
        }
    }

    #[test]
    fn name_match_beats_path() {
        let node = obj(json!({ "name": "Chelsea FC", "wins": 3 }));
        assert_eq!(classify(&node, "home_team", &ctx()), Some(Role::Away));
    }

    #[test]
    fn name_match_is_case_insensitive_both_directions() {
        let node = obj(json!({ "team_name": "ARSENAL" }));
        assert_eq!(classify(&node, "", &ctx()), Some(Role::Home));
        let ctx = MatchContext::new("Arsenal FC", "Chelsea FC");
        let node = obj(json!({ "name": "arsenal" }));
        assert_eq!(classify(&node, "", &ctx), Some(Role::Home));
    }

    #[test]
    fn exact_name_preferred_over_substring() {
        let ctx = MatchContext::new("Manchester", "Manchester City");
        let node = obj(json!({ "name": "Manchester City" }));
        assert_eq!(classify(&node, "", &ctx), Some(Role::Away));
    }

    #[test]
    fn path_markers_classify_unnamed_nodes() {
        let node = obj(json!({ "wins": 1 }));
        assert_eq!(classify(&node, "data.casa", &ctx()), Some(Role::Home));
        assert_eq!(classify(&node, "data.visitor", &ctx()), Some(Role::Away));
        assert_eq!(classify(&node, "data.stats", &ctx()), None);
    }

    #[test]
    fn h2h_indicators_need_two_groups() {
        let node = obj(json!({ "team_a_wins": 2, "draws": 1 }));
        assert_eq!(classify(&node, "anything", &ctx()), Some(Role::H2H));
        let node = obj(json!({ "draws": 1 }));
        assert_eq!(classify(&node, "anything", &ctx()), None);
    }

    #[test]
    fn h2h_path_needs_stat_key() {
        let node = obj(json!({ "avg_goals": 2.4 }));
        assert_eq!(classify(&node, "head_to_head", &ctx()), Some(Role::H2H));
        let node = obj(json!({ "note": "x" }));
        assert_eq!(classify(&node, "head_to_head", &ctx()), None);
    }

    #[test]
    fn walk_visits_nested_candidates_in_pre_order() {
        let root = json!({
            "home_team": {
                "name": "Arsenal",
                "stats": { "wins": 6 }
            },
            "teams": [
                { "name": "Chelsea", "wins": 2 }
            ]
        });
        let found = walk(&root, &ctx());
        let home_paths: Vec<_> = found.home.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(home_paths, vec!["home_team", "home_team.stats"]);
        assert_eq!(found.away.len(), 1);
        assert_eq!(found.away[0].path, "teams[0]");
        assert!(found.h2h.is_empty());
    }

    #[test]
    fn stat_containers_follow_a_team_found_by_name() {
        let root = json!({
            "data": [
                {
                    "name": "Arsenal",
                    "stats": { "played": 10, "wins": 6 },
                    "seasonStats": { "additional_info": { "corners_per_game": 5.5 } },
                    "meta": { "wins": 1 }
                },
                { "cleanName": "Chelsea", "statistics": { "played": 10 } }
            ]
        });
        let found = walk(&root, &ctx());
        let home_paths: Vec<_> = found.home.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(
            home_paths,
            vec![
                "data[0]",
                "data[0].stats",
                "data[0].seasonStats",
                "data[0].seasonStats.additional_info",
            ]
        );
        let away_paths: Vec<_> = found.away.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(away_paths, vec!["data[1]", "data[1].statistics"]);
    }

    #[test]
    fn stat_containers_outside_a_team_stay_unclassified() {
        let root = json!({ "league": { "stats": { "wins": 3 } } });
        assert!(walk(&root, &ctx()).is_empty());
    }

    #[test]
    fn scalars_and_empty_roots_yield_nothing() {
        assert!(walk(&json!(null), &ctx()).is_empty());
        assert!(walk(&json!(42), &ctx()).is_empty());
        assert!(walk(&json!({}), &ctx()).is_empty());
        assert!(walk(&json!([]), &ctx()).is_empty());
    }
}
