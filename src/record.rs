use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::aliases::{H2H_FIELDS, TEAM_FIELDS};

pub const DEFAULT_FORM_LENGTH: usize = 5;
pub const UNKNOWN_RESULT: char = '?';

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchContext {
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub league: String,
    #[serde(default)]
    pub league_id: Option<u32>,
}

impl MatchContext {
    pub fn new(home_team: impl Into<String>, away_team: impl Into<String>) -> Self {
        Self {
            home_team: home_team.into(),
            away_team: away_team.into(),
            league: String::new(),
            league_id: None,
        }
    }

    pub fn with_league(mut self, league: impl Into<String>, league_id: Option<u32>) -> Self {
        self.league = league.into();
        self.league_id = league_id;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Number,
    // Clamped to [0, 100] once a record is final.
    Percent,
    Form,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub aliases: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StatValue {
    Number(f64),
    Text(String),
}

impl StatValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            StatValue::Number(n) => Some(*n),
            StatValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StatValue::Text(s) => Some(s),
            StatValue::Number(_) => None,
        }
    }

    // Zero and unknown-only form strings count as "not found yet" for merging.
    pub fn is_default(&self) -> bool {
        match self {
            StatValue::Number(n) => *n == 0.0,
            StatValue::Text(s) => s.chars().all(|c| c == UNKNOWN_RESULT),
        }
    }
}

fn default_value(kind: FieldKind, form_length: usize) -> StatValue {
    match kind {
        FieldKind::Form => StatValue::Text(unknown_form(form_length)),
        FieldKind::Number | FieldKind::Percent => StatValue::Number(0.0),
    }
}

pub fn unknown_form(form_length: usize) -> String {
    std::iter::repeat_n(UNKNOWN_RESULT, form_length).collect()
}

/// Shared behaviour of the fixed-shape records the assembler fills in.
pub trait Record {
    fn catalogue(&self) -> &'static [FieldSpec];
    fn values(&self) -> &BTreeMap<&'static str, StatValue>;
    fn values_mut(&mut self) -> &mut BTreeMap<&'static str, StatValue>;
    fn populated(&self) -> &BTreeSet<&'static str>;
    fn populated_mut(&mut self) -> &mut BTreeSet<&'static str>;

    fn get(&self, field: &str) -> Option<&StatValue> {
        self.values().get(field)
    }

    fn number(&self, field: &str) -> f64 {
        self.get(field).and_then(StatValue::as_f64).unwrap_or(0.0)
    }

    fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(StatValue::as_str)
    }

    /// True when the field was written by extraction, even with a zero.
    fn is_populated(&self, field: &str) -> bool {
        self.populated().contains(field)
    }

    fn spec(&self, field: &str) -> Option<&'static FieldSpec> {
        self.catalogue().iter().find(|spec| spec.name == field)
    }

    // Writes only fields the catalogue knows about, so the key set stays fixed.
    fn set(&mut self, field: &str, value: StatValue) -> bool {
        let Some(spec) = self.spec(field) else {
            return false;
        };
        self.values_mut().insert(spec.name, value);
        true
    }

    fn set_number(&mut self, field: &str, value: f64) -> bool {
        self.set(field, StatValue::Number(value))
    }

    /// Writes `value` only while the field still holds its default, marking it populated.
    fn merge(&mut self, field: &str, value: StatValue) -> bool {
        let Some(spec) = self.spec(field) else {
            return false;
        };
        let at_default = self
            .values()
            .get(spec.name)
            .is_none_or(StatValue::is_default);
        if !at_default {
            return false;
        }
        self.values_mut().insert(spec.name, value);
        self.populated_mut().insert(spec.name);
        true
    }

    fn mark_populated(&mut self, field: &str) {
        if let Some(spec) = self.spec(field) {
            self.populated_mut().insert(spec.name);
        }
    }

    fn non_default_count(&self) -> usize {
        self.values().values().filter(|v| !v.is_default()).count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRecord {
    pub name: String,
    #[serde(flatten)]
    values: BTreeMap<&'static str, StatValue>,
    #[serde(skip)]
    populated: BTreeSet<&'static str>,
}

impl StatRecord {
    pub fn new(name: impl Into<String>, form_length: usize) -> Self {
        let values = TEAM_FIELDS
            .iter()
            .map(|spec| (spec.name, default_value(spec.kind, form_length)))
            .collect();
        Self {
            name: name.into(),
            values,
            populated: BTreeSet::new(),
        }
    }
}

impl Record for StatRecord {
    fn catalogue(&self) -> &'static [FieldSpec] {
        TEAM_FIELDS
    }

    fn values(&self) -> &BTreeMap<&'static str, StatValue> {
        &self.values
    }

    fn values_mut(&mut self) -> &mut BTreeMap<&'static str, StatValue> {
        &mut self.values
    }

    fn populated(&self) -> &BTreeSet<&'static str> {
        &self.populated
    }

    fn populated_mut(&mut self) -> &mut BTreeSet<&'static str> {
        &mut self.populated
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct H2HRecord {
    #[serde(flatten)]
    values: BTreeMap<&'static str, StatValue>,
    #[serde(skip)]
    populated: BTreeSet<&'static str>,
}

impl Default for H2HRecord {
    fn default() -> Self {
        let values = H2H_FIELDS
            .iter()
            .map(|spec| (spec.name, default_value(spec.kind, DEFAULT_FORM_LENGTH)))
            .collect();
        Self {
            values,
            populated: BTreeSet::new(),
        }
    }
}

impl Record for H2HRecord {
    fn catalogue(&self) -> &'static [FieldSpec] {
        H2H_FIELDS
    }

    fn values(&self) -> &BTreeMap<&'static str, StatValue> {
        &self.values
    }

    fn values_mut(&mut self) -> &mut BTreeMap<&'static str, StatValue> {
        &mut self.values
    }

    fn populated(&self) -> &BTreeSet<&'static str> {
        &self.populated
    }

    fn populated_mut(&mut self) -> &mut BTreeSet<&'static str> {
        &mut self.populated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_team_record_is_fully_keyed() {
        let record = StatRecord::new("Arsenal", DEFAULT_FORM_LENGTH);
        for spec in TEAM_FIELDS {
            assert!(record.get(spec.name).is_some(), "missing {}", spec.name);
        }
        assert_eq!(record.text("form"), Some("?????"));
        assert_eq!(record.number("played"), 0.0);
        assert_eq!(record.non_default_count(), 0);
    }

    #[test]
    fn set_ignores_unknown_fields() {
        let mut record = H2HRecord::default();
        assert!(!record.set_number("not_a_field", 3.0));
        assert!(record.get("not_a_field").is_none());
        assert!(record.set_number("draws", 2.0));
        assert_eq!(record.number("draws"), 2.0);
    }

    #[test]
    fn merge_keeps_first_non_default() {
        let mut record = H2HRecord::default();
        assert!(record.merge("draws", StatValue::Number(0.0)));
        assert!(record.is_populated("draws"));
        assert!(record.merge("draws", StatValue::Number(3.0)));
        assert!(!record.merge("draws", StatValue::Number(0.0)));
        assert!(!record.merge("draws", StatValue::Number(5.0)));
        assert_eq!(record.number("draws"), 3.0);
    }

    #[test]
    fn record_serializes_flat_with_name() {
        let record = StatRecord::new("Chelsea", 3);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["name"], "Chelsea");
        assert_eq!(json["form"], "???");
        assert_eq!(json["wins"], 0.0);
    }
}
