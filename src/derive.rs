use tracing::{debug, warn};

use crate::h2h::round_to;
use crate::record::{FieldKind, H2HRecord, Record, StatRecord, StatValue};

const SPLITS: &[&str] = &["", "home_", "away_"];
const OUTCOME_PCTS: &[(&str, &str)] = &[
    ("wins", "win_pct"),
    ("draws", "draw_pct"),
    ("losses", "loss_pct"),
];
const PER_GAME: &[(&str, &str)] = &[
    ("goals_scored", "goals_per_game"),
    ("goals_conceded", "conceded_per_game"),
];

/// Fills ratio fields extraction left empty. Never divides by a zero `played`.
pub fn derive(record: &mut StatRecord) {
    for prefix in SPLITS {
        let played = record.number(&format!("{prefix}played"));
        if played <= 0.0 {
            continue;
        }
        for (count, pct) in OUTCOME_PCTS {
            let count = format!("{prefix}{count}");
            let pct = format!("{prefix}{pct}");
            if record.is_populated(&count) && !record.is_populated(&pct) {
                let value = 100.0 * record.number(&count) / played;
                record.set_number(&pct, round_to(value, 1));
            }
        }
    }

    let played = record.number("played");
    if played > 0.0 {
        for (total, per_game) in PER_GAME {
            if record.is_populated(total) && !record.is_populated(per_game) {
                record.set_number(per_game, round_to(record.number(total) / played, 2));
            }
        }
    }

    derive_total(record, "cards_total", "yellow_cards", "red_cards", "cards_per_game");
    derive_total(record, "corners_total", "corners_for", "corners_against", "corners_per_game");

    clamp_percentages(record);
    check_results_add_up(record);
}

fn derive_total(record: &mut StatRecord, total: &str, left: &str, right: &str, per_game: &str) {
    if !record.is_populated(total) && record.number(total) == 0.0 {
        let sum = record.number(left) + record.number(right);
        if sum > 0.0 {
            debug!(field = total, sum, "derived total");
            record.set_number(total, sum);
        }
    }
    let played = record.number("played");
    let total = record.number(total);
    if played > 0.0 && total > 0.0 && !record.is_populated(per_game) {
        record.set_number(per_game, round_to(total / played, 2));
    }
}

/// Repairs an H2H total that was missing while its outcome counts were present.
pub fn derive_h2h(record: &mut H2HRecord) {
    let outcomes =
        record.number("home_wins") + record.number("away_wins") + record.number("draws");
    let total = record.number("total_matches");
    if total == 0.0 && outcomes > 0.0 {
        warn!(outcomes, "h2h total_matches missing, using outcome sum");
        record.set_number("total_matches", outcomes);
    } else if total > 0.0 && outcomes > 0.0 && (total - outcomes).abs() > 1.0 {
        warn!(total, outcomes, "h2h totals disagree");
    }
    clamp_percentages(record);
}

pub fn clamp_percentages<R: Record>(record: &mut R) {
    for spec in record.catalogue() {
        if spec.kind != FieldKind::Percent {
            continue;
        }
        let Some(StatValue::Number(value)) = record.get(spec.name).cloned() else {
            continue;
        };
        let clamped = value.clamp(0.0, 100.0);
        if clamped != value {
            warn!(field = spec.name, value, "percentage out of range, clamped");
            record.set_number(spec.name, clamped);
        }
    }
}

fn check_results_add_up(record: &StatRecord) {
    let played = record.number("played");
    let sum = record.number("wins") + record.number("draws") + record.number("losses");
    if played > 0.0 && sum > 0.0 && (played - sum).abs() > 1.0 {
        warn!(team = %record.name, played, sum, "results do not add up to matches played");
    }
}
