use anyhow::{Context, Result, bail};
use log::warn;
use serde_json::{Map, Value};
use std::io::Read;
use std::path::Path;

/// Lit un fichier de tirages : CSV si l'extension est `.csv`, JSON sinon.
pub fn read_records(path: &Path) -> Result<Vec<Value>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let file = std::fs::File::open(path)
        .with_context(|| format!("Impossible d'ouvrir {:?}", path))?;

    if is_csv {
        read_csv(file).with_context(|| format!("Lecture CSV de {:?}", path))
    } else {
        read_json(file).with_context(|| format!("Lecture JSON de {:?}", path))
    }
}

/// Tableau JSON d'objets, ou objet `{ "draws": [...] }`.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_reader(reader).context("JSON invalide")?;
    match value {
        Value::Array(records) => Ok(records),
        Value::Object(mut obj) => match obj.remove("draws") {
            Some(Value::Array(records)) => Ok(records),
            _ => bail!("Objet JSON sans tableau \"draws\""),
        },
        _ => bail!("Le fichier doit contenir un tableau de tirages"),
    }
}

/// CSV avec ligne d'en-tête (`draw_no;draw_date;num1;...;bonus`).
/// Séparateur `;` ou `,` détecté sur l'en-tête.
pub fn read_csv<R: Read>(mut reader: R) -> Result<Vec<Value>> {
    let mut content = String::new();
    reader
        .read_to_string(&mut content)
        .context("Erreur de lecture")?;

    let header_line = content.lines().next().unwrap_or_default();
    let delimiter = if header_line.contains(';') { b';' } else { b',' };

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = csv_reader
        .headers()
        .context("En-tête CSV illisible")?
        .clone();

    let mut records = Vec::new();
    for (line, record_result) in csv_reader.records().enumerate() {
        match record_result {
            Ok(record) => {
                let obj: Map<String, Value> = headers
                    .iter()
                    .zip(record.iter())
                    .map(|(h, v)| (h.to_string(), Value::String(v.to_string())))
                    .collect();
                records.push(Value::Object(obj));
            }
            Err(e) => warn!("Erreur lecture ligne {}: {}", line + 2, e),
        }
    }
    Ok(records)
}
