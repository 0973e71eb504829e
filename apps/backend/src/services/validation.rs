//! Checks applied to user input before it becomes a game process argument.
//!
//! Values are passed as discrete argv entries (no shell), so the concern is
//! argument confusion: a value must never be read as a flag by the game
//! process, and must not smuggle whitespace or control characters.

use crate::errors::GameServiceError;

const MAX_TOKEN_LEN: usize = 128;

/// Identifier-like value: game ids, game types, player types, researcher ids.
pub fn token<'a>(field: &'static str, value: &'a str) -> Result<&'a str, GameServiceError> {
    check_shape(field, value)?;
    if value.starts_with('-') {
        return Err(GameServiceError::invalid_argument(
            field,
            "must not start with '-'",
        ));
    }
    Ok(value)
}

/// A move. Moves may be negative amounts, so a leading `-` is accepted for numbers only.
pub fn move_token(value: &str) -> Result<&str, GameServiceError> {
    check_shape("move", value)?;
    if value.starts_with('-') && !value.parse::<f64>().is_ok_and(f64::is_finite) {
        return Err(GameServiceError::invalid_argument(
            "move",
            "must not start with '-' unless numeric",
        ));
    }
    Ok(value)
}

/// Optional positive whole number, e.g. the round count.
pub fn opt_count<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<Option<&'a str>, GameServiceError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };
    match value.parse::<u32>() {
        Ok(n) if n > 0 => Ok(Some(value)),
        _ => Err(GameServiceError::invalid_argument(
            field,
            format!("expected a positive whole number, got '{value}'"),
        )),
    }
}

/// Optional non-negative amount, e.g. the endowment.
pub fn opt_amount<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<Option<&'a str>, GameServiceError> {
    let Some(value) = present(value) else {
        return Ok(None);
    };
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 => Ok(Some(value)),
        _ => Err(GameServiceError::invalid_argument(
            field,
            format!("expected a non-negative number, got '{value}'"),
        )),
    }
}

/// Optional identifier-like value; empty counts as absent.
pub fn opt_token<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<Option<&'a str>, GameServiceError> {
    present(value).map(|v| token(field, v)).transpose()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn check_shape(field: &'static str, value: &str) -> Result<(), GameServiceError> {
    if value.is_empty() {
        return Err(GameServiceError::invalid_argument(field, "must not be empty"));
    }
    if value.len() > MAX_TOKEN_LEN {
        return Err(GameServiceError::invalid_argument(
            field,
            format!("must be at most {MAX_TOKEN_LEN} bytes"),
        ));
    }
    if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(GameServiceError::invalid_argument(
            field,
            "must not contain whitespace or control characters",
        ));
    }
    Ok(())
}
