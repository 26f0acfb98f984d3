//! Paste lifetime parsing.

use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TtlError {
    #[error("invalid ttl `{0}`")]
    Invalid(String),
}

/// Parse a lifetime such as `15m`, `2h`, `1d` or `1h30m`.
///
/// `""` and `"0"` mean the paste never expires and yield `Ok(None)`.
pub fn parse_ttl(raw: &str) -> Result<Option<Duration>, TtlError> {
    let raw = raw.trim();
    if raw.is_empty() || raw == "0" {
        return Ok(None);
    }

    let invalid = || TtlError::Invalid(raw.to_string());
    let mut total: u64 = 0;
    let mut digits = String::new();

    for c in raw.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let unit = match c {
            's' => 1,
            'm' => 60,
            'h' => 3600,
            'd' => 86_400,
            _ => return Err(invalid()),
        };
        let value: u64 = digits.parse().map_err(|_| invalid())?;
        total = value
            .checked_mul(unit)
            .and_then(|secs| total.checked_add(secs))
            .ok_or_else(invalid)?;
        digits.clear();
    }

    // A trailing number without unit is ambiguous
    if !digits.is_empty() || total == 0 {
        return Err(invalid());
    }
    Ok(Some(Duration::from_secs(total)))
}
