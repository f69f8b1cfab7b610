use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::prediction::UNKNOWN_LABEL;
use crate::models::{FlagSet, PredictionOutcome};

/// Parses a raw prediction payload and normalizes it.
pub fn process_prediction_data(raw_data: &str) -> Result<PredictionOutcome, serde_json::Error> {
    let data: Value = serde_json::from_str(raw_data)?;
    Ok(normalize_prediction(&data))
}

/// Maps a prediction record onto [`PredictionOutcome`], substituting `0`,
/// `"Unknown"` and `false` for anything missing, null or non-numeric.
pub fn normalize_prediction(data: &Value) -> PredictionOutcome {
    let heart_risk_label = text(data, "heart_risk")
        .or_else(|| text(data, "heart_attack_risk"))
        .unwrap_or_else(|| UNKNOWN_LABEL.to_string());

    let heart_risk_reasons = data
        .get("heart_risk_reasons")
        .and_then(|v| v.as_array())
        .map(|reasons| {
            reasons
                .iter()
                .filter_map(|r| r.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();

    PredictionOutcome {
        mortality_probability: number(data, "mortality_probability"),
        mortality_risk: text(data, "mortality_risk").unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        heart_risk_score: number(data, "heart_risk_score"),
        heart_risk_label,
        heart_risk_reasons,
        shock_index: number(data, "shock_index"),
        clinical_flags: normalize_flags(
            data.get("clinical_flags")
                .filter(|flags| flags.is_object())
                .or(Some(data)),
        ),
    }
}

/// Reads the four flags from a JSON object. Persisted result rows store the
/// flags as top-level columns rather than nested under `clinical_flags`, so
/// the caller passes whichever object holds them.
pub fn normalize_flags(flags: Option<&Value>) -> FlagSet {
    let Some(obj) = flags.and_then(|v| v.as_object()) else {
        return FlagSet::default();
    };
    let flag = |key: &str| obj.get(key).and_then(|v| v.as_bool()).unwrap_or(false);

    FlagSet {
        renal_dysfunction: flag("renal_dysfunction"),
        hyponatremia: flag("hyponatremia"),
        severe_anemia: flag("severe_anemia"),
        leukocytosis: flag("leukocytosis"),
    }
}

/// Lenient numeric read: numbers pass through, numeric strings are parsed,
/// everything else is `0.0`.
pub fn number_value(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub fn text_value(value: &Value) -> Option<String> {
    value
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn number(data: &Value, key: &str) -> f64 {
    data.get(key).map_or(0.0, number_value)
}

fn text(data: &Value, key: &str) -> Option<String> {
    data.get(key).and_then(text_value)
}

/// `deserialize_with` counterpart of [`number_value`] for stored rows.
pub fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_value(&Value::deserialize(deserializer)?))
}

/// Null, blank or non-string labels become `"Unknown"`.
pub fn lenient_label<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_value(&Value::deserialize(deserializer)?).unwrap_or_else(|| UNKNOWN_LABEL.to_string()))
}

/// Null or non-string text becomes empty.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_value(&Value::deserialize(deserializer)?).unwrap_or_default())
}
