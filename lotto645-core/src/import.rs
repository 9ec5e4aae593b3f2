use log::warn;
use serde_json::{Map, Value};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{DrawRecord, MAX_NUMBER, PICK_COUNT};

const NUMBER_FIELDS: [&str; PICK_COUNT] = ["num1", "num2", "num3", "num4", "num5", "num6"];

/// Convertit les enregistrements bruts en tirages typés.
///
/// Seuls les `sample_size` premiers enregistrements sont validés strictement ;
/// les suivants sont normalisés et ignorés s'ils sont illisibles.
pub fn convert_records(records: &[Value], config: &EngineConfig) -> Result<Vec<DrawRecord>> {
    if records.is_empty() {
        return Err(EngineError::EmptyData);
    }

    let sampled = if config.validate_on_load {
        config.sample_size.min(records.len())
    } else {
        0
    };

    let mut draws = Vec::with_capacity(records.len());
    for (index, raw) in records.iter().enumerate() {
        if index < sampled {
            draws.push(validate_record(index, raw)?);
            continue;
        }
        match normalize_record(raw) {
            Some(draw) => draws.push(draw),
            None => warn!("Enregistrement {} ignoré : champs illisibles", index),
        }
    }

    // Aucun enregistrement exploitable : l'état courant ne doit pas être écrasé
    if draws.is_empty() {
        return Err(EngineError::EmptyData);
    }
    Ok(draws)
}

pub fn validate_record(index: usize, raw: &Value) -> Result<DrawRecord> {
    let invalid = |reason: String| EngineError::Validation { index, reason };

    let obj = raw
        .as_object()
        .ok_or_else(|| invalid("l'enregistrement n'est pas un objet".into()))?;

    let draw_number = obj
        .get("draw_no")
        .ok_or_else(|| invalid("champ manquant : draw_no".into()))
        .and_then(|v| {
            as_integer(v).ok_or_else(|| invalid(format!("draw_no non numérique : {}", v)))
        })?;
    if draw_number < 1 || draw_number > u32::MAX as i64 {
        return Err(invalid(format!("draw_no hors limites : {}", draw_number)));
    }

    let draw_date = match obj.get("draw_date") {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(other) => return Err(invalid(format!("draw_date invalide : {}", other))),
        None => return Err(invalid("champ manquant : draw_date".into())),
    };

    let mut main_numbers = [0u8; PICK_COUNT];
    for (slot, field) in main_numbers.iter_mut().zip(NUMBER_FIELDS) {
        *slot = require_number(obj, field).map_err(invalid)?;
    }
    let bonus_number = require_number(obj, "bonus").map_err(invalid)?;

    for i in 0..PICK_COUNT {
        for j in (i + 1)..PICK_COUNT {
            if main_numbers[i] == main_numbers[j] {
                return Err(invalid(format!("numéro en double : {}", main_numbers[i])));
            }
        }
    }

    Ok(DrawRecord {
        draw_number: draw_number as u32,
        draw_date,
        main_numbers,
        bonus_number,
    })
}

/// Conversion tolérante : aucune vérification de plage ni de doublon.
pub fn normalize_record(raw: &Value) -> Option<DrawRecord> {
    let obj = raw.as_object()?;
    let draw_number = u32::try_from(as_integer(obj.get("draw_no")?)?).ok()?;
    let draw_date = match obj.get("draw_date") {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let mut main_numbers = [0u8; PICK_COUNT];
    for (slot, field) in main_numbers.iter_mut().zip(NUMBER_FIELDS) {
        *slot = u8::try_from(as_integer(obj.get(field)?)?).ok()?;
    }
    let bonus_number = u8::try_from(as_integer(obj.get("bonus")?)?).ok()?;

    Some(DrawRecord {
        draw_number,
        draw_date,
        main_numbers,
        bonus_number,
    })
}

fn require_number(obj: &Map<String, Value>, field: &str) -> std::result::Result<u8, String> {
    let value = obj
        .get(field)
        .ok_or_else(|| format!("champ manquant : {}", field))?;
    let n = as_integer(value).ok_or_else(|| format!("{} non numérique : {}", field, value))?;
    if n < 1 || n > MAX_NUMBER as i64 {
        return Err(format!("{} hors limites (1-{}) : {}", field, MAX_NUMBER, n));
    }
    Ok(n as u8)
}

/// Entier JSON, flottant entier ou chaîne numérique (entrées CSV).
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
