use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::config::NormalizerConfig;
use crate::derive::{clamp_percentages, derive, derive_h2h};
use crate::error::{NormalizeIssue, Role, json_kind};
use crate::form::{form_from_last_matches, normalize_form};
use crate::h2h::{find_previous_matches, tally_matches};
use crate::record::{FieldKind, H2HRecord, MatchContext, Record, StatRecord, StatValue};
use crate::resolve::resolve_spec;
use crate::walk::{Candidate, Candidates, walk};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedMatch {
    pub match_info: MatchContext,
    pub home_team: StatRecord,
    pub away_team: StatRecord,
    pub h2h: H2HRecord,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<NormalizeIssue>,
}

impl NormalizedMatch {
    pub fn empty(ctx: &MatchContext, config: &NormalizerConfig) -> Self {
        Self {
            match_info: ctx.clone(),
            home_team: StatRecord::new(ctx.home_team.clone(), config.form_length),
            away_team: StatRecord::new(ctx.away_team.clone(), config.form_length),
            h2h: H2HRecord::default(),
            issues: Vec::new(),
        }
    }

    pub fn team(&self, role: Role) -> Option<&StatRecord> {
        match role {
            Role::Home => Some(&self.home_team),
            Role::Away => Some(&self.away_team),
            Role::H2H => None,
        }
    }
}

/// Folds every candidate into fresh records in discovery order, then derives ratios.
pub fn assemble(
    candidates: &Candidates<'_>,
    ctx: &MatchContext,
    config: &NormalizerConfig,
) -> (StatRecord, StatRecord, H2HRecord) {
    let mut home = StatRecord::new(ctx.home_team.clone(), config.form_length);
    let mut away = StatRecord::new(ctx.away_team.clone(), config.form_length);
    let mut h2h = H2HRecord::default();

    fold_all(&mut home, &candidates.home, config.form_length);
    fold_all(&mut away, &candidates.away, config.form_length);
    fold_all(&mut h2h, &candidates.h2h, config.form_length);

    derive(&mut home);
    derive(&mut away);
    derive_h2h(&mut h2h);
    (home, away, h2h)
}

fn fold_all<R: Record>(record: &mut R, candidates: &[Candidate<'_>], form_length: usize) {
    for candidate in candidates {
        let written = fold_candidate(record, candidate.node, form_length);
        if written > 0 {
            debug!(path = %candidate.path, written, "candidate merged");
        }
    }
}

/// Resolves every canonical field against one node. Returns how many fields changed.
pub fn fold_candidate<R: Record>(
    record: &mut R,
    node: &Map<String, Value>,
    form_length: usize,
) -> usize {
    let mut written = 0;
    for spec in record.catalogue() {
        let Some(value) = resolve_spec(node, spec) else {
            continue;
        };
        let value = match (spec.kind, value) {
            (FieldKind::Form, StatValue::Text(raw)) => {
                StatValue::Text(normalize_form(&raw, form_length))
            }
            (_, value) => value,
        };
        if record.get(spec.name) == Some(&value) {
            record.mark_populated(spec.name);
            continue;
        }
        if record.merge(spec.name, value) {
            written += 1;
        }
    }
    written
}

pub fn count_non_default_fields<R: Record>(record: &R) -> usize {
    record.non_default_count()
}

/// Full pipeline for one payload. Data problems end up in `issues`, never as errors.
pub fn normalize(root: &Value, ctx: &MatchContext, config: &NormalizerConfig) -> NormalizedMatch {
    if !matches!(root, Value::Object(_) | Value::Array(_)) {
        let issue = NormalizeIssue::MalformedInput {
            found: json_kind(root),
        };
        warn!(%issue, "returning default records");
        let mut out = NormalizedMatch::empty(ctx, config);
        out.issues.push(issue);
        return out;
    }

    let candidates = walk(root, ctx);
    let (mut home_team, mut away_team, mut h2h) = assemble(&candidates, ctx, config);

    if config.form_from_last_matches {
        for (record, role) in [(&mut home_team, Role::Home), (&mut away_team, Role::Away)] {
            if let Some(raw) = form_from_last_matches(root, role, config.form_length) {
                record.merge(
                    "form",
                    StatValue::Text(normalize_form(&raw, config.form_length)),
                );
            }
        }
    }

    if config.h2h_from_matches && h2h.number("total_matches") == 0.0 {
        if let Some(matches) = find_previous_matches(root) {
            tally_matches(matches, ctx).apply_to(&mut h2h);
            clamp_percentages(&mut h2h);
        }
    }

    let home_found = count_non_default_fields(&home_team);
    let away_found = count_non_default_fields(&away_team);
    let h2h_found = count_non_default_fields(&h2h);
    info!(
        home = home_found,
        away = away_found,
        h2h = h2h_found,
        "fields extracted"
    );

    let mut issues = Vec::new();
    for (role, found) in [(Role::Home, home_found), (Role::Away, away_found)] {
        if found < config.partial_data_threshold {
            let issue = NormalizeIssue::PartialData {
                role,
                found,
                threshold: config.partial_data_threshold,
            };
            warn!(%issue, "sparse team statistics");
            issues.push(issue);
        }
    }

    NormalizedMatch {
        match_info: ctx.clone(),
        home_team,
        away_team,
        h2h,
        issues,
    }
}

/// Parses raw response text first. Empty bodies and `null` normalize to defaults.
pub fn normalize_json(
    raw: &str,
    ctx: &MatchContext,
    config: &NormalizerConfig,
) -> Result<NormalizedMatch> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(normalize(&Value::Null, ctx, config));
    }
    let root: Value = serde_json::from_str(trimmed).context("invalid statistics json")?;
    Ok(normalize(&root, ctx, config))
}

pub fn normalize_batch(
    jobs: &[(Value, MatchContext)],
    config: &NormalizerConfig,
) -> Vec<NormalizedMatch> {
    with_normalize_pool(config.batch_parallelism, || {
        jobs.par_iter()
            .map(|(root, ctx)| normalize(root, ctx, config))
            .collect()
    })
}

fn with_normalize_pool<T>(threads: usize, action: impl FnOnce() -> T + Send) -> T
where
    T: Send,
{
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(action),
        Err(_) => action(),
    }
}
