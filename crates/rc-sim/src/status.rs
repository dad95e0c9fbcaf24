//! Operating status classification.

use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Normal,
    Warning,
    Alarm,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Normal, Status::Warning, Status::Alarm];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Normal => "NORMAL",
            Status::Warning => "WARNING",
            Status::Alarm => "ALARM",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Ok(Status::Normal),
            "WARNING" => Ok(Status::Warning),
            "ALARM" => Ok(Status::Alarm),
            _ => Err(SimError::UnknownStatus(s.to_string())),
        }
    }
}

/// Limits on condenser ΔT and COP that trigger warnings and alarms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    pub warning_delta_t_k: f64,
    pub alarm_delta_t_k: f64,
    pub warning_cop: f64,
    pub alarm_cop: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            warning_delta_t_k: 20.0,
            alarm_delta_t_k: 25.0,
            warning_cop: 2.5,
            alarm_cop: 2.0,
        }
    }
}

impl StatusThresholds {
    /// Alarm limits must be stricter than warning limits.
    pub fn validate(&self) -> SimResult<()> {
        let all = [
            self.warning_delta_t_k,
            self.alarm_delta_t_k,
            self.warning_cop,
            self.alarm_cop,
        ];
        if all.iter().any(|v| !v.is_finite()) {
            return Err(SimError::config("status thresholds must be finite"));
        }
        if self.alarm_delta_t_k <= self.warning_delta_t_k {
            return Err(SimError::config(
                "alarm condenser ΔT must exceed the warning condenser ΔT",
            ));
        }
        if self.alarm_cop >= self.warning_cop {
            return Err(SimError::config(
                "alarm COP must be below the warning COP",
            ));
        }
        Ok(())
    }

    /// Alarm if ΔT or COP crosses the alarm limit, warning on the warning
    /// limit, otherwise normal.
    pub fn classify(&self, delta_t_k: f64, cop: f64) -> Status {
        if delta_t_k > self.alarm_delta_t_k || cop < self.alarm_cop {
            Status::Alarm
        } else if delta_t_k > self.warning_delta_t_k || cop < self.warning_cop {
            Status::Warning
        } else {
            Status::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_boundaries() {
        let t = StatusThresholds::default();
        assert_eq!(t.classify(15.0, 3.5), Status::Normal);
        assert_eq!(t.classify(20.0, 2.5), Status::Normal);
        assert_eq!(t.classify(20.1, 3.5), Status::Warning);
        assert_eq!(t.classify(15.0, 2.4), Status::Warning);
        assert_eq!(t.classify(25.1, 3.5), Status::Alarm);
        assert_eq!(t.classify(15.0, 1.9), Status::Alarm);
    }

    #[test]
    fn thresholds_must_be_ordered() {
        assert!(StatusThresholds::default().validate().is_ok());
        let swapped = StatusThresholds {
            warning_cop: 2.0,
            alarm_cop: 2.5,
            ..Default::default()
        };
        assert!(swapped.validate().is_err());
        let flat = StatusThresholds {
            alarm_delta_t_k: 20.0,
            ..Default::default()
        };
        assert!(flat.validate().is_err());
    }

    #[test]
    fn status_text_roundtrip() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>(), Ok(status));
        }
        assert_eq!("alarm".parse::<Status>(), Ok(Status::Alarm));
        assert!("broken".parse::<Status>().is_err());
    }

    #[test]
    fn severity_ordering() {
        assert!(Status::Alarm > Status::Warning);
        assert!(Status::Warning > Status::Normal);
    }
}
