//! Flattening of multi-game responses into CSV.
//!
//! The game process answers list queries with an envelope whose first
//! property holds the collection of game records:
//!
//! ```json
//! {"games": {"g1": {"id": "g1", "game_object": {"game_type": "PD", "gameState": {...}}}}}
//! ```
//!
//! Exactly one level is unwrapped. The collection may be an object (its values
//! are the records), an array, or `null` for a query that matched nothing.

use std::borrow::Cow;

use serde_json::Value;
use tracing::warn;

use crate::errors::GameServiceError;

pub const CSV_HEADER: [&str; 8] = [
    "id",
    "game_type",
    "player1_points",
    "player2_points",
    "winner",
    "payoff1",
    "payoff2",
    "status",
];

/// JSON pointer for each column, in header order.
const COLUMN_POINTERS: [&str; 8] = [
    "/id",
    "/game_object/game_type",
    "/game_object/player1_points",
    "/game_object/player2_points",
    "/game_object/gameState/winner",
    "/game_object/gameState/payoff1",
    "/game_object/gameState/payoff2",
    "/game_object/status",
];

/// Project a wrapper-then-collection document to CSV text.
///
/// One header line is always written, even for an empty collection. Missing
/// fields become empty cells; records that are not JSON objects are skipped.
pub fn project_games_csv(document: &Value) -> Result<String, GameServiceError> {
    let collection = unwrap_collection(document)?;
    let records: Box<dyn Iterator<Item = &Value>> = match &*collection {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        Value::Null => Box::new(std::iter::empty()),
        other => {
            return Err(GameServiceError::malformed(format!(
                "expected a collection of game records, got {}",
                json_kind(other)
            )))
        }
    };

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(CSV_HEADER).map_err(csv_failure)?;

    for (index, record) in records.enumerate() {
        if !record.is_object() {
            warn!(
                record = index,
                kind = json_kind(record),
                "skipping game record that is not an object"
            );
            continue;
        }

        let mut missing = Vec::new();
        let row: Vec<String> = COLUMN_POINTERS
            .iter()
            .zip(CSV_HEADER)
            .map(|(pointer, column)| match record.pointer(pointer) {
                Some(value) => cell(value),
                None => {
                    missing.push(column);
                    String::new()
                }
            })
            .collect();

        if !missing.is_empty() {
            warn!(record = index, missing = ?missing, "game record missing fields");
        }

        writer.write_record(&row).map_err(csv_failure)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| GameServiceError::malformed(format!("failed to finish CSV: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| GameServiceError::malformed(format!("CSV output is not UTF-8: {e}")))
}

fn unwrap_collection(document: &Value) -> Result<Cow<'_, Value>, GameServiceError> {
    let first = match document {
        Value::Object(map) => map.values().next(),
        Value::Array(items) => items.first(),
        _ => None,
    }
    .ok_or_else(|| {
        GameServiceError::malformed(format!(
            "expected an envelope with a game collection, got {}",
            describe(document)
        ))
    })?;

    match first {
        // Some game process versions double-encode the collection.
        Value::String(encoded) => serde_json::from_str(encoded)
            .map(Cow::Owned)
            .map_err(|e| GameServiceError::malformed(format!("encoded game collection: {e}"))),
        other => Ok(Cow::Borrowed(other)),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Object(map) if map.is_empty() => "an empty object".to_string(),
        Value::Array(items) if items.is_empty() => "an empty array".to_string(),
        other => format!("a {}", json_kind(other)),
    }
}

fn csv_failure(e: csv::Error) -> GameServiceError {
    GameServiceError::malformed(format!("failed to write CSV: {e}"))
}
