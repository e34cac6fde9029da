use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

use crate::record::{FieldKind, FieldSpec};

const fn number(name: &'static str, aliases: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Number,
        aliases,
    }
}

const fn percent(name: &'static str, aliases: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Percent,
        aliases,
    }
}

const fn form(name: &'static str, aliases: &'static [&'static str]) -> FieldSpec {
    FieldSpec {
        name,
        kind: FieldKind::Form,
        aliases,
    }
}

// Order matters: the first alias present with a usable value wins.
pub static TEAM_FIELDS: &[FieldSpec] = &[
    // Season totals
    number(
        "played",
        &[
            "played",
            "matches_played",
            "matchesPlayed",
            "seasonMatchesPlayed_overall",
            "games_played",
            "MP",
            "PJ",
            "games",
        ],
    ),
    number(
        "wins",
        &["wins", "seasonWinsNum_overall", "W", "victories", "won", "team_wins"],
    ),
    number(
        "draws",
        &["draws", "seasonDrawsNum_overall", "D", "drawn", "empates", "team_draws"],
    ),
    number(
        "losses",
        &["losses", "seasonLossesNum_overall", "L", "defeats", "lost", "derrotas"],
    ),
    number(
        "goals_scored",
        &[
            "goals_scored",
            "seasonScoredNum_overall",
            "GF",
            "goals_for",
            "goalsFor",
            "scored",
            "goals",
        ],
    ),
    number(
        "goals_conceded",
        &[
            "goals_conceded",
            "seasonConcededNum_overall",
            "GA",
            "goals_against",
            "goalsAgainst",
            "conceded",
        ],
    ),
    number(
        "goals_per_game",
        &["goals_per_game", "seasonScoredAVG_overall", "goals_avg", "avg_goals_scored"],
    ),
    number(
        "conceded_per_game",
        &[
            "conceded_per_game",
            "seasonConcededAVG_overall",
            "conceded_avg",
            "avg_goals_conceded",
        ],
    ),
    // Season percentages
    percent(
        "win_pct",
        &[
            "win_pct",
            "winPercentage",
            "win_percentage",
            "victory_percentage",
            "winPercentage_overall",
        ],
    ),
    percent(
        "draw_pct",
        &["draw_pct", "drawPercentage", "draw_percentage", "drawPercentage_overall"],
    ),
    percent(
        "loss_pct",
        &[
            "loss_pct",
            "lossPercentage",
            "loss_percentage",
            "defeat_percentage",
            "losePercentage_overall",
        ],
    ),
    percent(
        "clean_sheets_pct",
        &["clean_sheets_pct", "clean_sheet_percentage", "cs_pct", "seasonCSPercentage_overall"],
    ),
    percent(
        "btts_pct",
        &[
            "btts_pct",
            "btts_percentage",
            "both_teams_to_score_pct",
            "both_teams_scored_pct",
            "seasonBTTSPercentage_overall",
        ],
    ),
    percent(
        "over_2_5_pct",
        &["over_2_5_pct", "over_2_5_percentage", "o25_pct", "seasonOver25Percentage_overall"],
    ),
    // Home split
    number(
        "home_played",
        &["home_played", "seasonMatchesPlayed_home", "home_matches", "matches_home"],
    ),
    number(
        "home_wins",
        &["home_wins", "seasonWinsNum_home", "wins_home", "home_victories"],
    ),
    number(
        "home_draws",
        &["home_draws", "seasonDrawsNum_home", "draws_home", "home_drawn"],
    ),
    number(
        "home_losses",
        &["home_losses", "seasonLossesNum_home", "losses_home", "home_lost"],
    ),
    number(
        "home_goals_scored",
        &["home_goals_scored", "seasonScoredNum_home", "home_goals_for", "goals_for_home"],
    ),
    number(
        "home_goals_conceded",
        &[
            "home_goals_conceded",
            "seasonConcededNum_home",
            "home_goals_against",
            "goals_against_home",
        ],
    ),
    percent(
        "home_win_pct",
        &["home_win_pct", "winPercentage_home", "win_percentage_home"],
    ),
    percent(
        "home_draw_pct",
        &["home_draw_pct", "drawPercentage_home", "draw_percentage_home"],
    ),
    percent(
        "home_loss_pct",
        &["home_loss_pct", "losePercentage_home", "loss_percentage_home"],
    ),
    percent(
        "home_clean_sheets_pct",
        &["home_clean_sheets_pct", "seasonCSPercentage_home", "clean_sheet_percentage_home"],
    ),
    percent(
        "home_btts_pct",
        &["home_btts_pct", "seasonBTTSPercentage_home", "btts_percentage_home"],
    ),
    percent(
        "home_over_2_5_pct",
        &["home_over_2_5_pct", "seasonOver25Percentage_home", "over_2_5_percentage_home"],
    ),
    number(
        "home_xg",
        &["home_xg", "xg_home", "xg_for_home", "home_expected_goals"],
    ),
    number(
        "home_xga",
        &["home_xga", "xga_home", "xg_against_home"],
    ),
    number(
        "home_cards_per_game",
        &["home_cards_per_game", "cards_per_game_home", "cardsAVG_home"],
    ),
    number(
        "home_corners_per_game",
        &["home_corners_per_game", "corners_per_game_home", "cornersTotalAVG_home"],
    ),
    form(
        "home_form",
        &["home_form", "formRun_home", "home_recent_form", "form_home", "home_form_string"],
    ),
    // Away split
    number(
        "away_played",
        &["away_played", "seasonMatchesPlayed_away", "away_matches", "matches_away"],
    ),
    number(
        "away_wins",
        &["away_wins", "seasonWinsNum_away", "wins_away", "away_victories"],
    ),
    number(
        "away_draws",
        &["away_draws", "seasonDrawsNum_away", "draws_away", "away_drawn"],
    ),
    number(
        "away_losses",
        &["away_losses", "seasonLossesNum_away", "losses_away", "away_lost"],
    ),
    number(
        "away_goals_scored",
        &["away_goals_scored", "seasonScoredNum_away", "away_goals_for", "goals_for_away"],
    ),
    number(
        "away_goals_conceded",
        &[
            "away_goals_conceded",
            "seasonConcededNum_away",
            "away_goals_against",
            "goals_against_away",
        ],
    ),
    percent(
        "away_win_pct",
        &["away_win_pct", "winPercentage_away", "win_percentage_away"],
    ),
    percent(
        "away_draw_pct",
        &["away_draw_pct", "drawPercentage_away", "draw_percentage_away"],
    ),
    percent(
        "away_loss_pct",
        &["away_loss_pct", "losePercentage_away", "loss_percentage_away"],
    ),
    percent(
        "away_clean_sheets_pct",
        &["away_clean_sheets_pct", "seasonCSPercentage_away", "clean_sheet_percentage_away"],
    ),
    percent(
        "away_btts_pct",
        &["away_btts_pct", "seasonBTTSPercentage_away", "btts_percentage_away"],
    ),
    percent(
        "away_over_2_5_pct",
        &["away_over_2_5_pct", "seasonOver25Percentage_away", "over_2_5_percentage_away"],
    ),
    number(
        "away_xg",
        &["away_xg", "xg_away", "xg_for_away", "away_expected_goals"],
    ),
    number(
        "away_xga",
        &["away_xga", "xga_away", "xg_against_away"],
    ),
    number(
        "away_cards_per_game",
        &["away_cards_per_game", "cards_per_game_away", "cardsAVG_away"],
    ),
    number(
        "away_corners_per_game",
        &["away_corners_per_game", "corners_per_game_away", "cornersTotalAVG_away"],
    ),
    form(
        "away_form",
        &["away_form", "formRun_away", "away_recent_form", "form_away", "away_form_string"],
    ),
    // Advanced
    number(
        "xg",
        &["xg", "xG", "expected_goals", "xg_for", "xGF", "xg_for_overall"],
    ),
    number(
        "xga",
        &["xga", "xGA", "expected_goals_against", "xg_against", "xGAg", "xg_against_overall"],
    ),
    percent(
        "possession",
        &[
            "possession",
            "possessionAVG_overall",
            "possession_avg",
            "avg_possession",
            "possessionAVG",
            "Poss",
            "posesion",
        ],
    ),
    number("ppda", &["ppda", "PPDA", "ppda_overall", "passes_per_defensive_action"]),
    number(
        "ppg",
        &["ppg", "seasonPPG_overall", "points_per_game", "pts_per_game"],
    ),
    number(
        "league_position",
        &["league_position", "leaguePosition_overall", "position", "rank"],
    ),
    number(
        "shots_per_game",
        &["shots_per_game", "shotsAVG_overall", "shots_avg"],
    ),
    number(
        "shots_on_target_per_game",
        &["shots_on_target_per_game", "shotsOnTargetAVG_overall", "sot_avg"],
    ),
    // Discipline
    number(
        "yellow_cards",
        &["yellow_cards", "yellows", "cards_yellow", "CrdY", "YellowCards"],
    ),
    number(
        "red_cards",
        &["red_cards", "reds", "cards_red", "CrdR", "RedCards"],
    ),
    number(
        "cards_total",
        &["cards_total", "cardsTotal_overall", "total_cards", "cards"],
    ),
    number(
        "cards_per_game",
        &["cards_per_game", "cards_avg", "avg_cards", "cardsAVG_overall"],
    ),
    percent(
        "over_3_5_cards_pct",
        &["over_3_5_cards_pct", "over_3_5_cards_percentage", "over35CardsPercentage_overall"],
    ),
    // Set pieces
    number(
        "corners_for",
        &["corners_for", "cornersTotal_overall", "corners", "CK", "Corners"],
    ),
    number(
        "corners_against",
        &["corners_against", "cornersAgainst_overall", "corners_against_total"],
    ),
    number(
        "corners_total",
        &["corners_total", "total_corners", "cornersMatchTotal_overall"],
    ),
    number(
        "corners_per_game",
        &["corners_per_game", "corners_avg", "avg_corners", "cornersTotalAVG_overall"],
    ),
    percent(
        "over_9_5_corners_pct",
        &["over_9_5_corners_pct", "over_9_5_corners_percentage", "over95CornersPercentage_overall"],
    ),
    // Recent form
    form(
        "form",
        &[
            "form",
            "recent_form",
            "last5",
            "team_form",
            "current_form",
            "formRun_overall",
            "form_run",
            "form_string",
            "recent_results",
        ],
    ),
];

pub static H2H_FIELDS: &[FieldSpec] = &[
    number(
        "total_matches",
        &[
            "total_matches",
            "totalMatches",
            "matchesTotal",
            "matches_total",
            "matches",
            "total",
            "matches_played",
            "numberOfMatches",
        ],
    ),
    number(
        "home_wins",
        &["home_wins", "homeWins", "homeTeamWins", "home_team_wins", "team_a_wins", "local_wins"],
    ),
    number(
        "away_wins",
        &["away_wins", "awayWins", "awayTeamWins", "away_team_wins", "team_b_wins", "visitor_wins"],
    ),
    number(
        "draws",
        &["draws", "draw", "empates", "equal", "tied", "drawn"],
    ),
    number(
        "avg_goals",
        &[
            "avg_goals",
            "avgGoals",
            "average_goals",
            "goals_avg",
            "goals_per_match",
            "meanGoals",
            "mean_goals",
        ],
    ),
    percent(
        "over_2_5_pct",
        &["over_2_5_pct", "over_2_5_percentage", "over25_percentage", "over25pct", "o25_pct"],
    ),
    percent(
        "btts_pct",
        &[
            "btts_pct",
            "bttsPercentage",
            "btts_percentage",
            "both_teams_scored_percentage",
            "both_score_pct",
        ],
    ),
    number(
        "avg_cards",
        &["avg_cards", "avgCards", "average_cards", "cards_avg", "cards_per_match", "mean_cards"],
    ),
    number(
        "avg_corners",
        &["avg_corners", "avgCorners", "average_corners", "corners_avg", "corners_per_match"],
    ),
];

// Keys whose string value names the team a node describes.
pub const NAME_KEYS: &[&str] = &[
    "name",
    "team_name",
    "teamName",
    "cleanName",
    "english_name",
    "full_name",
    "team",
];

// Groups of equivalent H2H indicator keys; two or more groups present marks an H2H node.
pub const H2H_INDICATOR_GROUPS: &[&[&str]] = &[
    &["total_matches", "matches_total", "totalMatches", "matchesTotal"],
    &["home_wins", "team_a_wins", "homeWins"],
    &["away_wins", "team_b_wins", "awayWins"],
    &["draws"],
];

pub const HOME_PATH_MARKERS: &[&str] = &["home", "casa"];
pub const AWAY_PATH_MARKERS: &[&str] = &["away", "fora", "visit"];
pub const H2H_PATH_MARKERS: &[&str] = &["h2h", "head", "vs"];

// Children under these keys belong to the team their parent node describes.
pub const TEAM_CONTAINER_KEYS: &[&str] = &["stats", "statistics", "seasonStats", "additional_info"];

pub type AliasIndex = HashMap<&'static str, &'static FieldSpec>;

pub static TEAM_ALIAS_INDEX: Lazy<AliasIndex> = Lazy::new(|| index(TEAM_FIELDS));
pub static H2H_ALIAS_INDEX: Lazy<AliasIndex> = Lazy::new(|| index(H2H_FIELDS));

// Every key any canonical field resolves from.
pub static STAT_KEYS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    TEAM_FIELDS
        .iter()
        .chain(H2H_FIELDS.iter())
        .flat_map(|spec| spec.aliases.iter().copied())
        .collect()
});

fn index(fields: &'static [FieldSpec]) -> AliasIndex {
    fields.iter().map(|spec| (spec.name, spec)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_names_are_unique() {
        for fields in [TEAM_FIELDS, H2H_FIELDS] {
            let names: HashSet<_> = fields.iter().map(|s| s.name).collect();
            assert_eq!(names.len(), fields.len());
        }
    }

    #[test]
    fn every_field_lists_its_own_name_first() {
        for spec in TEAM_FIELDS.iter().chain(H2H_FIELDS.iter()) {
            assert_eq!(spec.aliases.first(), Some(&spec.name), "{}", spec.name);
        }
    }

    #[test]
    fn stat_keys_cover_camel_case_variants() {
        assert!(STAT_KEYS.contains("seasonWinsNum_overall"));
        assert!(STAT_KEYS.contains("team_a_wins"));
        assert!(!STAT_KEYS.contains("name"));
    }
}
