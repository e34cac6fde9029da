use serde_json::{Value, json};
use value_hunter::aliases::{H2H_FIELDS, TEAM_FIELDS};
use value_hunter::record::{FieldKind, FieldSpec};
use value_hunter::{MatchContext, NormalizerConfig, Record, normalize, normalize_batch};

fn ctx() -> MatchContext {
    MatchContext::new("Arsenal", "Chelsea")
}

fn samples() -> Vec<Value> {
    vec![
        json!(null),
        json!({}),
        json!([]),
        json!(17),
        json!({
            "home_team": { "name": "Arsenal", "wins": "5", "played": 8, "btts_pct": "130%" },
            "away_team": { "stats": { "W": 3, "MP": 0, "form": "LLWWDDW" } },
            "h2h": { "matches": 4, "draw": 1, "team_a_wins": 2, "over_2_5_percentage": -20 }
        }),
        json!([
            { "name": "Chelsea", "wins": 2, "played": 0, "yellow_cards": 9 },
            { "head_to_head": { "avg_goals": "3,5" } }
        ]),
    ]
}

#[test]
fn normalizing_twice_is_identical() {
    let config = NormalizerConfig::default();
    for root in samples() {
        let first = normalize(&root, &ctx(), &config);
        let second = normalize(&root, &ctx(), &config);
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}

#[test]
fn every_canonical_field_is_present() {
    let config = NormalizerConfig::default();
    for root in samples() {
        let out = normalize(&root, &ctx(), &config);
        for spec in TEAM_FIELDS {
            assert!(out.home_team.get(spec.name).is_some(), "home {}", spec.name);
            assert!(out.away_team.get(spec.name).is_some(), "away {}", spec.name);
        }
        for spec in H2H_FIELDS {
            assert!(out.h2h.get(spec.name).is_some(), "h2h {}", spec.name);
        }
    }
}

fn assert_percentages_in_range<R: Record>(record: &R, fields: &[FieldSpec]) {
    for spec in fields.iter().filter(|s| s.kind == FieldKind::Percent) {
        let value = record.number(spec.name);
        assert!((0.0..=100.0).contains(&value), "{} = {value}", spec.name);
    }
}

#[test]
fn percentages_stay_in_range() {
    let config = NormalizerConfig::default();
    for root in samples() {
        let out = normalize(&root, &ctx(), &config);
        assert_percentages_in_range(&out.home_team, TEAM_FIELDS);
        assert_percentages_in_range(&out.away_team, TEAM_FIELDS);
        assert_percentages_in_range(&out.h2h, H2H_FIELDS);
    }
    let out = normalize(&samples()[4], &ctx(), &config);
    assert_eq!(out.home_team.number("btts_pct"), 100.0);
    assert_eq!(out.h2h.number("over_2_5_pct"), 0.0);
}

#[test]
fn forms_are_always_five_characters() {
    let config = NormalizerConfig::default();
    for root in samples() {
        let out = normalize(&root, &ctx(), &config);
        for team in [&out.home_team, &out.away_team] {
            for field in ["form", "home_form", "away_form"] {
                let form = team.text(field).expect("form is text");
                assert_eq!(form.chars().count(), 5, "{field} = {form}");
            }
        }
    }
    let out = normalize(&samples()[4], &ctx(), &config);
    assert_eq!(out.away_team.text("form"), Some("LLWWD"));
}

#[test]
fn zero_played_blocks_per_game_stats() {
    let root = json!([
        { "name": "Chelsea", "wins": 2, "played": 0, "goals_scored": 4, "yellow_cards": 9 }
    ]);
    let out = normalize(&root, &ctx(), &NormalizerConfig::default());
    let away = &out.away_team;
    assert_eq!(away.number("wins"), 2.0);
    for field in [
        "win_pct",
        "draw_pct",
        "loss_pct",
        "goals_per_game",
        "conceded_per_game",
        "cards_per_game",
        "corners_per_game",
    ] {
        assert_eq!(away.number(field), 0.0, "{field}");
    }
}

#[test]
fn batch_matches_sequential() {
    let config = NormalizerConfig::default();
    let jobs: Vec<(Value, MatchContext)> =
        samples().into_iter().map(|root| (root, ctx())).collect();
    let batched = normalize_batch(&jobs, &config);
    assert_eq!(batched.len(), jobs.len());
    for ((root, ctx), out) in jobs.iter().zip(&batched) {
        assert_eq!(&normalize(root, ctx, &config), out);
    }
}
