//! Whole-state JSON encoding.
//!
//! Saved state is decoded in two steps. The text is first parsed into a raw
//! JSON object and every entry of [`MIGRATIONS`] is applied in order, filling
//! in fields that older saves lack. The migrated object is then decoded into
//! a typed [`AppState`]. Any failure in either step is a `CorruptState`.

use serde_json::{Map, Value};

use crate::domain::{AppState, DEFAULT_UNITS};
use crate::error::{NumlogError, Result};

/// A named, load-time fix-up of the raw saved object
pub struct Migration {
    pub name: &'static str,
    pub apply: fn(&mut Map<String, Value>),
}

/// Applied in order to every loaded state
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "current_log_index_defaults_to_zero",
        apply: current_log_index_defaults_to_zero,
    },
    Migration {
        name: "new_value_defaults_to_empty",
        apply: new_value_defaults_to_empty,
    },
    Migration {
        name: "units_default_to_hash",
        apply: units_default_to_hash,
    },
];

/// Encode the persisted subset of `state` as JSON.
pub fn serialize_state(state: &AppState) -> Result<String> {
    Ok(serde_json::to_string(state)?)
}

/// Decode saved JSON, migrating older layouts.
pub fn deserialize_state(text: &str) -> Result<AppState> {
    let mut value: Value = serde_json::from_str(text).map_err(|e| NumlogError::CorruptState(e.to_string()))?;

    let obj = value
        .as_object_mut()
        .ok_or_else(|| NumlogError::CorruptState("saved state is not a JSON object".to_string()))?;
    migrate(obj);

    serde_json::from_value(value).map_err(|e| NumlogError::CorruptState(e.to_string()))
}

/// Run every migration over a raw saved object.
pub fn migrate(obj: &mut Map<String, Value>) {
    for migration in MIGRATIONS {
        log::trace!("Applying migration {}", migration.name);
        (migration.apply)(obj);
    }
}

/// `currentLogIndex` was added after the first release. Absent, null or
/// non-numeric values become 0; numbers are truncated to a 32-bit integer.
fn current_log_index_defaults_to_zero(obj: &mut Map<String, Value>) {
    let index = obj.get("currentLogIndex").map(coerce_int32).unwrap_or(0);
    obj.insert("currentLogIndex".to_string(), Value::from(index));
}

fn new_value_defaults_to_empty(obj: &mut Map<String, Value>) {
    if !matches!(obj.get("newValue"), Some(Value::String(_))) {
        obj.insert("newValue".to_string(), Value::String(String::new()));
    }
}

fn units_default_to_hash(obj: &mut Map<String, Value>) {
    let Some(Value::Array(logs)) = obj.get_mut("logs") else {
        return;
    };
    for log in logs.iter_mut().filter_map(Value::as_object_mut) {
        if !matches!(log.get("units"), Some(Value::String(_))) {
            log.insert("units".to_string(), Value::String(DEFAULT_UNITS.to_string()));
        }
    }
}

/// Browser-style `x | 0`: wrap to a signed 32-bit integer, NaN-ish inputs are 0.
fn coerce_int32(value: &Value) -> i64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if s.trim().is_empty() => 0.0,
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if !n.is_finite() {
        return 0;
    }

    const TWO_32: f64 = 4_294_967_296.0;
    const TWO_31: f64 = 2_147_483_648.0;
    let wrapped = n.trunc().rem_euclid(TWO_32);
    let signed = if wrapped >= TWO_31 { wrapped - TWO_32 } else { wrapped };
    signed as i64
}
