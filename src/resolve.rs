use serde_json::{Map, Value};
use tracing::trace;

use crate::aliases::AliasIndex;
use crate::error::CoercionError;
use crate::record::{FieldKind, FieldSpec, StatValue};

const MISSING_SENTINEL: &str = "N/A";

/// Looks `canonical` up in `table` and returns the first usable alias value in `source`.
///
/// `None` means no alias produced a value; a found zero comes back as `Some(Number(0.0))`.
pub fn resolve(
    source: &Map<String, Value>,
    canonical: &str,
    table: &AliasIndex,
) -> Option<StatValue> {
    let spec = table.get(canonical)?;
    resolve_spec(source, spec)
}

pub fn resolve_spec(source: &Map<String, Value>, spec: &FieldSpec) -> Option<StatValue> {
    for alias in spec.aliases {
        let Some(raw) = source.get(*alias) else {
            continue;
        };
        match coerce(raw, spec.kind) {
            Ok(value) => return Some(value),
            Err(err) => trace!(field = spec.name, alias = *alias, %err, "alias skipped"),
        }
    }
    None
}

pub fn coerce(raw: &Value, kind: FieldKind) -> Result<StatValue, CoercionError> {
    match kind {
        FieldKind::Form => coerce_text(raw).map(StatValue::Text),
        FieldKind::Number | FieldKind::Percent => coerce_number(raw).map(StatValue::Number),
    }
}

pub fn coerce_number(raw: &Value) -> Result<f64, CoercionError> {
    let value = match raw {
        Value::Null => return Err(CoercionError::Missing),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| CoercionError::NotNumeric(n.to_string()))?,
        Value::String(s) => {
            if is_missing_text(s) {
                return Err(CoercionError::Missing);
            }
            parse_stat_cell(s).ok_or_else(|| CoercionError::NotNumeric(s.clone()))?
        }
        other => return Err(CoercionError::NotNumeric(other.to_string())),
    };
    if !value.is_finite() {
        return Err(CoercionError::NonFinite);
    }
    Ok(value)
}

fn coerce_text(raw: &Value) -> Result<String, CoercionError> {
    match raw {
        Value::Null => Err(CoercionError::Missing),
        Value::String(s) if is_missing_text(s) => Err(CoercionError::Missing),
        Value::String(s) => Ok(s.trim().to_string()),
        _ => Err(CoercionError::NotText),
    }
}

fn is_missing_text(s: &str) -> bool {
    let trimmed = s.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(MISSING_SENTINEL)
}

/// Parses `"58%"`, `"1.72"`, `"1,5"`, `"1,234.5"` and `"1.234,5"` style cells.
pub fn parse_stat_cell(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let s = s.trim_end_matches('%').trim_end();
    // Whichever of `,` and `.` comes last is the decimal point; the other groups thousands.
    let s = match (s.rfind(','), s.rfind('.')) {
        (Some(comma), Some(dot)) if comma > dot => s.replace('.', "").replace(',', "."),
        (_, Some(_)) => s.replace(',', ""),
        (Some(_), None) => s.replace(',', "."),
        (None, None) => s.to_string(),
    };
    s.parse::<f64>().ok()
}
