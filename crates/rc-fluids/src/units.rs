//! Unit-aware parsing of command-line quantities.
//!
//! Values are returned in canonical SI: kelvin for temperatures and
//! temperature differences, pascal (absolute) for pressures. A bare number
//! is read as °C for temperatures, K for differences and Pa for pressures.

use std::fmt;
use thiserror::Error;

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Absolute temperature (canonical: K)
    Temperature,
    /// Temperature difference such as superheat (canonical: K)
    TemperatureDifference,
    /// Absolute pressure (canonical: Pa)
    Pressure,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::TemperatureDifference => write!(f, "Temperature Difference"),
            Self::Pressure => write!(f, "Absolute Pressure"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },

    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: &'static str },

    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: &'static str },
}

/// Parse a quantity value from user input text into canonical SI.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();

    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::TemperatureDifference => parse_temperature_difference(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
    }
}

/// Parse temperature in various units, return Kelvin.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let kelvin = match unit.to_lowercase().as_str() {
        "k" | "kelvin" => value,
        "" | "c" | "°c" | "degc" | "celsius" => value + 273.15,
        "f" | "°f" | "degf" | "fahrenheit" => (value + 459.67) * 5.0 / 9.0,
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Temperature,
            });
        }
    };

    if kelvin <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: kelvin,
            reason: "Absolute temperature must be > 0 K",
        });
    }

    Ok(kelvin)
}

/// Parse a temperature difference, return Kelvin.
fn parse_temperature_difference(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    match unit.to_lowercase().as_str() {
        "" | "k" | "c" | "°c" | "degc" | "kelvin" => Ok(value),
        "f" | "°f" | "degf" | "r" | "rankine" => Ok(value * 5.0 / 9.0),
        _ => Err(UnitError::UnknownUnit {
            unit,
            quantity: Quantity::TemperatureDifference,
        }),
    }
}

/// Parse pressure in various units, return Pa (absolute).
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;

    let pa = match unit.to_lowercase().as_str() {
        "" | "pa" | "pascal" => value,
        "kpa" => value * 1e3,
        "mpa" => value * 1e6,
        "bar" => value * 1e5,
        "mbar" | "millibar" => value * 100.0,
        "atm" => value * 101_325.0,
        "psia" => value * 6_894.76,
        "psig" => (value + 14.696) * 6_894.76,
        "barg" => (value + 1.01325) * 1e5,
        "kpag" => (value + 101.325) * 1e3,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit,
                reason: "Use 'psia' (absolute) or 'psig' (gauge)",
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit,
                quantity: Quantity::Pressure,
            });
        }
    };

    if pa <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: pa,
            reason: "Absolute pressure must be positive",
        });
    }

    Ok(pa)
}

fn split_value_and_unit(input: &str) -> Result<(f64, String), UnitError> {
    let trimmed = input.trim();

    // Find where the numeric part ends
    let split_idx = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.' && c != '-' && c != '+')
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);
    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{}'", input))
    })?;

    Ok((value, unit_part.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_kelvin() {
        assert_eq!(parse_temperature("248.15 K").unwrap(), 248.15);
        assert_eq!(parse_temperature("300K").unwrap(), 300.0);
    }

    #[test]
    fn parse_celsius() {
        let c = parse_temperature("-25C").unwrap();
        assert!((c - 248.15).abs() < 1e-9);
        let bare = parse_quantity("42", Quantity::Temperature).unwrap();
        assert!((bare - 315.15).abs() < 1e-9);
    }

    #[test]
    fn parse_fahrenheit() {
        let f = parse_temperature("-13F").unwrap();
        assert!((f - 248.15).abs() < 1e-6);
    }

    #[test]
    fn reject_below_absolute_zero() {
        assert!(matches!(
            parse_temperature("-300C"),
            Err(UnitError::OutOfRange { .. })
        ));
    }

    #[test]
    fn parse_differences() {
        assert_eq!(parse_temperature_difference("5K").unwrap(), 5.0);
        assert_eq!(parse_temperature_difference("5").unwrap(), 5.0);
        assert!((parse_temperature_difference("9F").unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn parse_pressure_absolute() {
        assert_eq!(parse_pressure("101325 Pa").unwrap(), 101325.0);
        assert_eq!(parse_pressure("1 bar").unwrap(), 1e5);
        assert_eq!(parse_pressure("2.5MPa").unwrap(), 2.5e6);
    }

    #[test]
    fn reject_plain_psi() {
        assert!(matches!(
            parse_pressure("14.7 psi"),
            Err(UnitError::AmbiguousUnit { unit, .. }) if unit == "psi"
        ));
    }

    #[test]
    fn unknown_unit_reports_quantity() {
        let err = parse_quantity("3 furlongs", Quantity::Pressure).unwrap_err();
        assert!(err.to_string().contains("Absolute Pressure"));
        assert!(matches!(
            parse_quantity("abc", Quantity::Temperature),
            Err(UnitError::ParseError(_))
        ));
    }
}
