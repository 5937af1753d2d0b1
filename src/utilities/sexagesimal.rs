// src/utilities/sexagesimal.rs
//! Conversions between sexagesimal text ("D:M:S", "H:M:S") and decimal values

use super::culture::Culture;
use crate::error::{AlpacaError, Result};
use tracing::debug;

/// Most fractional digits written for the seconds field
pub const MAX_PLACES: u8 = 9;

/// Convert a `D:M:S` string to decimal degrees using an explicit culture.
///
/// Only the first three fields are read; anything after them is ignored.
/// The sign is taken from the degrees field and applies to the whole value,
/// so `-10:30:0` is `-10.5`. Minutes and seconds must be at least 0 and
/// less than 60.
pub fn dms_to_degrees_in(text: &str, culture: &Culture) -> Result<f64> {
    let degrees = parse_sexagesimal(text, culture)?;
    debug!(input = text, culture = %culture, degrees, "converted DMS to degrees");
    Ok(degrees)
}

/// Convert a `D:M:S` string to decimal degrees using the calling thread's
/// ambient culture.
#[deprecated(note = "the text's culture is rarely the caller's; use dms_to_degrees_in with an explicit Culture")]
pub fn dms_to_degrees(text: &str) -> Result<f64> {
    dms_to_degrees_in(text, &Culture::current())
}

/// Convert an `H:M:S` string to decimal hours
pub fn hms_to_hours(text: &str, culture: &Culture) -> Result<f64> {
    let hours = parse_sexagesimal(text, culture)?;
    debug!(input = text, culture = %culture, hours, "converted HMS to hours");
    Ok(hours)
}

/// Convert an `H:M:S` string to decimal degrees (15 degrees per hour)
pub fn hms_to_degrees(text: &str, culture: &Culture) -> Result<f64> {
    Ok(hms_to_hours(text, culture)? * 15.0)
}

/// Format decimal degrees as `[-]D:MM:SS` with `places` digits of seconds
pub fn degrees_to_dms(degrees: f64, culture: &Culture, places: u8) -> Result<String> {
    format_sexagesimal(degrees, culture, places)
}

/// Format decimal hours as `[-]H:MM:SS` with `places` digits of seconds
pub fn hours_to_hms(hours: f64, culture: &Culture, places: u8) -> Result<String> {
    format_sexagesimal(hours, culture, places)
}

/// Format decimal degrees as hours of right ascension
pub fn degrees_to_hms(degrees: f64, culture: &Culture, places: u8) -> Result<String> {
    format_sexagesimal(degrees / 15.0, culture, places)
}

fn parse_sexagesimal(text: &str, culture: &Culture) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AlpacaError::Parse("empty sexagesimal value".to_string()));
    }

    let fields: Vec<&str> = text.split(':').take(3).collect();

    let whole = parse_field(fields[0], culture, "degrees")?;
    let negative = fields[0].trim_start().starts_with('-');

    let minutes = match fields.get(1) {
        Some(field) => check_range(parse_field(field, culture, "minutes")?, "minutes")?,
        None => 0.0,
    };
    let seconds = match fields.get(2) {
        Some(field) => check_range(parse_field(field, culture, "seconds")?, "seconds")?,
        None => 0.0,
    };

    let magnitude = whole.abs() + minutes / 60.0 + seconds / 3600.0;
    Ok(if negative { -magnitude } else { magnitude })
}

/// Read one field as `[sign]digits[separator digits]`
fn parse_field(field: &str, culture: &Culture, label: &str) -> Result<f64> {
    let field = field.trim();
    let separator = culture.decimal_separator();
    let not_a_number = || {
        AlpacaError::Parse(format!(
            "{} field '{}' is not a number in the {} culture",
            label, field, culture
        ))
    };

    let mut normalized = String::with_capacity(field.len());
    let mut digits = 0;
    let mut seen_separator = false;

    for (i, c) in field.chars().enumerate() {
        match c {
            '+' | '-' if i == 0 => normalized.push(c),
            '0'..='9' => {
                digits += 1;
                normalized.push(c);
            }
            c if c == separator && !seen_separator => {
                seen_separator = true;
                normalized.push('.');
            }
            _ => return Err(not_a_number()),
        }
    }

    if digits == 0 {
        return Err(not_a_number());
    }

    let value = normalized.parse::<f64>().map_err(|_| not_a_number())?;
    if !value.is_finite() {
        return Err(AlpacaError::InvalidValue(format!(
            "{} field '{}' is too large",
            label, field
        )));
    }

    Ok(value)
}

fn check_range(value: f64, label: &str) -> Result<f64> {
    if (0.0..60.0).contains(&value) {
        Ok(value)
    } else {
        Err(AlpacaError::InvalidValue(format!(
            "{} must be at least 0 and less than 60, got {}",
            label, value
        )))
    }
}

fn format_sexagesimal(value: f64, culture: &Culture, places: u8) -> Result<String> {
    if !value.is_finite() {
        return Err(AlpacaError::InvalidValue(format!(
            "cannot format {} as sexagesimal",
            value
        )));
    }

    let places = places.min(MAX_PLACES);
    let scale = 10u128.pow(places as u32);

    // Round once in units of 10^-places seconds so carries reach minutes and degrees
    let scaled = (value.abs() * 3600.0 * scale as f64).round();
    if scaled >= u128::MAX as f64 {
        return Err(AlpacaError::InvalidValue(format!(
            "{} is too large to format with {} places",
            value, places
        )));
    }
    let total = scaled as u128;
    let per_minute = 60 * scale;

    let second_units = total % per_minute;
    let whole_minutes = total / per_minute;
    let minutes = whole_minutes % 60;
    let whole = whole_minutes / 60;

    let sign = if value < 0.0 && total != 0 { "-" } else { "" };
    let mut text = format!("{}{}:{:02}:{:02}", sign, whole, minutes, second_units / scale);
    if places > 0 {
        text.push(culture.decimal_separator());
        text.push_str(&format!(
            "{:0width$}",
            second_units % scale,
            width = places as usize
        ));
    }

    Ok(text)
}
