//! Caption timestamp parsing and formatting.

use crate::error::{JamieError, Result};

/// Parse an `HH:MM:SS` or `HH:MM:SS.fraction` timestamp into whole seconds.
///
/// Fractional seconds are truncated, never rounded: `00:00:01.999` is `1`.
pub fn parse_timestamp(input: &str) -> Result<u32> {
    let parts: Vec<&str> = input.trim().split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return Err(JamieError::Timestamp(format!(
            "expected three colon-separated components in '{}'",
            input
        )));
    };

    let (whole, fraction) = match seconds.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (*seconds, None),
    };

    if let Some(fraction) = fraction {
        if !fraction.chars().all(|c| c.is_ascii_digit()) {
            return Err(JamieError::Timestamp(format!(
                "non-numeric fractional seconds in '{}'",
                input
            )));
        }
    }

    let hours = parse_component(hours, input)?;
    let minutes = parse_component(minutes, input)?;
    let seconds = parse_component(whole, input)?;

    hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| JamieError::Timestamp(format!("timestamp '{}' is out of range", input)))
}

fn parse_component(component: &str, input: &str) -> Result<u32> {
    if component.is_empty() || !component.chars().all(|c| c.is_ascii_digit()) {
        return Err(JamieError::Timestamp(format!(
            "non-numeric component '{}' in '{}'",
            component, input
        )));
    }
    component
        .parse()
        .map_err(|_| JamieError::Timestamp(format!("component '{}' in '{}' is out of range", component, input)))
}

/// Format whole seconds as `HH:MM:SS`.
pub fn format_timestamp(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, secs)
}
