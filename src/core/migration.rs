//! Upgrades stored parameter sets to the current schema before they are
//! deserialized. The engine only ever sees `CURRENT_SCHEMA_VERSION` shapes.
//!
//! Version 1 (unversioned) differs from version 2 in three places:
//! - one `mortgage.interestRate` shared by both tranches,
//! - flat top-level `appreciationRate`, `investmentReturn`, `inflationRate`,
//! - `ownership.maintenanceRate` instead of a `maintenance` block.

use serde_json::{Map, Value, json};

use super::error::{EngineError, EngineResult};
use super::types::{CURRENT_SCHEMA_VERSION, LocationQuality, ParameterSet};

const LEGACY_RATE_FIELDS: [(&str, &str); 3] = [
    ("appreciationRate", "appreciationPct"),
    ("investmentReturn", "investmentReturnPct"),
    ("inflationRate", "inflationPct"),
];

pub fn parameters_from_str(json: &str) -> EngineResult<ParameterSet> {
    let value: Value = serde_json::from_str(json)?;
    parameters_from_json(value)
}

pub fn parameters_from_json(mut value: Value) -> EngineResult<ParameterSet> {
    let Some(root) = value.as_object_mut() else {
        return Err(EngineError::Malformed(
            "parameter set must be a JSON object".to_string(),
        ));
    };

    let version = schema_version(root)?;
    if version == 0 || version > CURRENT_SCHEMA_VERSION {
        return Err(EngineError::UnsupportedSchemaVersion(version));
    }
    if version < 2 {
        upgrade_v1(root);
        tracing::debug!(from = version, to = 2, "migrated legacy parameter set");
    }
    root.insert("schemaVersion".to_string(), json!(CURRENT_SCHEMA_VERSION));

    Ok(serde_json::from_value(value)?)
}

fn schema_version(root: &Map<String, Value>) -> EngineResult<u32> {
    match root.get("schemaVersion") {
        None | Some(Value::Null) => Ok(1),
        Some(raw) => raw
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| EngineError::Malformed(format!("invalid schemaVersion: {raw}"))),
    }
}

fn upgrade_v1(root: &mut Map<String, Value>) {
    if let Some(Value::Object(mortgage)) = root.get_mut("mortgage") {
        if let Some(rate) = mortgage.remove("interestRate") {
            for key in ["firstTranche", "secondTranche"] {
                let tranche = mortgage
                    .entry(key)
                    .or_insert_with(|| Value::Object(Map::new()));
                if let Value::Object(tranche) = tranche {
                    tranche.entry("ratePct").or_insert_with(|| rate.clone());
                }
            }
        }
    }

    if let Some(Value::Object(ownership)) = root.get_mut("ownership") {
        if let Some(rate) = ownership.remove("maintenanceRate") {
            let maintenance = ownership
                .entry("maintenance")
                .or_insert_with(|| Value::Object(Map::new()));
            if let Value::Object(maintenance) = maintenance {
                maintenance.entry("simpleRatePct").or_insert(rate);
            }
        }
    }

    let moved: Vec<(&str, Value)> = LEGACY_RATE_FIELDS
        .iter()
        .filter_map(|(old, new)| root.remove(*old).map(|value| (*new, value)))
        .collect();
    let suggested_appreciation = root
        .get("quickStart")
        .and_then(|quick_start| quick_start.get("locationQuality"))
        .and_then(|raw| serde_json::from_value::<LocationQuality>(raw.clone()).ok())
        .unwrap_or_default()
        .suggested_appreciation_pct();

    let rates = root
        .entry("rates")
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(rates) = rates {
        for (key, value) in moved {
            rates.entry(key).or_insert(value);
        }
        rates
            .entry("appreciationPct")
            .or_insert_with(|| json!(suggested_appreciation));
    }
}
