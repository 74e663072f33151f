//! Forecast banding.
//!
//! Maps the continuous predicted level onto the three fixed risk bands the
//! UI shows as a traffic light, and onto the clamped percentage driving the
//! progress gauge. Both functions are total over all real inputs — a
//! negative or absurdly large forecast still gets a band.

use std::fmt;

// ---------------------------------------------------------------------------
// Thresholds
// ---------------------------------------------------------------------------

/// Predicted level (cm) at or above which the condition is Attention.
pub const ATTENTION_THRESHOLD_CM: f64 = 100.0;

/// Predicted level (cm) at or above which the condition is FloodAlert.
pub const ALERT_THRESHOLD_CM: f64 = 200.0;

/// Lower bound of the display gauge (cm). Forecasts at or below read 0%.
pub const GAUGE_MIN_CM: f64 = 50.0;

/// Upper bound of the display gauge (cm). Forecasts at or above read 100%.
pub const GAUGE_MAX_CM: f64 = 400.0;

// ---------------------------------------------------------------------------
// Condition bands
// ---------------------------------------------------------------------------

/// River condition bands, in ascending order of severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiverCondition {
    Normal,
    Attention,
    FloodAlert,
}

impl RiverCondition {
    /// Stable identifier used in API payloads.
    pub fn id(self) -> &'static str {
        match self {
            RiverCondition::Normal => "normal",
            RiverCondition::Attention => "attention",
            RiverCondition::FloodAlert => "flood_alert",
        }
    }

    /// The interpretation message shown next to the traffic light.
    pub fn message(self) -> &'static str {
        match self {
            RiverCondition::Normal => "Normal condition - level within the historical average",
            RiverCondition::Attention => {
                "Attention - level above normal, flooding risk in low-lying areas"
            }
            RiverCondition::FloodAlert => "Flood alert - level dangerously elevated",
        }
    }
}

impl fmt::Display for RiverCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Classifies a predicted level (cm) into its condition band.
///
/// Boundaries are inclusive on the upper band: exactly 100 cm is already
/// Attention, exactly 200 cm is already FloodAlert.
pub fn classify(level_cm: f64) -> RiverCondition {
    if level_cm < ATTENTION_THRESHOLD_CM {
        RiverCondition::Normal
    } else if level_cm < ALERT_THRESHOLD_CM {
        RiverCondition::Attention
    } else {
        RiverCondition::FloodAlert
    }
}

// ---------------------------------------------------------------------------
// Progress gauge
// ---------------------------------------------------------------------------

/// Maps a predicted level (cm) onto the 0–100 display gauge.
///
/// Linear between `GAUGE_MIN_CM` and `GAUGE_MAX_CM`, saturating outside.
/// Display-only: the condition band is never derived from this value.
pub fn gauge_percent(level_cm: f64) -> f64 {
    let pct = (level_cm - GAUGE_MIN_CM) / (GAUGE_MAX_CM - GAUGE_MIN_CM) * 100.0;
    pct.clamp(0.0, 100.0)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_boundaries_are_inclusive_at_100_and_200() {
        assert_eq!(classify(99.999), RiverCondition::Normal);
        assert_eq!(classify(100.0), RiverCondition::Attention);
        assert_eq!(classify(199.999), RiverCondition::Attention);
        assert_eq!(classify(200.0), RiverCondition::FloodAlert);
    }

    #[test]
    fn test_classify_is_total_over_extreme_inputs() {
        assert_eq!(classify(-500.0), RiverCondition::Normal);
        assert_eq!(classify(0.0), RiverCondition::Normal);
        assert_eq!(classify(1.0e9), RiverCondition::FloodAlert);
        assert_eq!(classify(f64::NEG_INFINITY), RiverCondition::Normal);
        assert_eq!(classify(f64::INFINITY), RiverCondition::FloodAlert);
    }

    #[test]
    fn test_conditions_order_by_severity() {
        assert!(RiverCondition::Normal < RiverCondition::Attention);
        assert!(RiverCondition::Attention < RiverCondition::FloodAlert);
    }

    #[test]
    fn test_gauge_saturates_below_min_and_above_max() {
        assert_eq!(gauge_percent(30.0), 0.0);
        assert_eq!(gauge_percent(50.0), 0.0);
        assert_eq!(gauge_percent(400.0), 100.0);
        assert_eq!(gauge_percent(500.0), 100.0);
    }

    #[test]
    fn test_gauge_midpoint_of_bounds_reads_fifty_percent() {
        assert_eq!(gauge_percent(225.0), 50.0);
    }

    #[test]
    fn test_gauge_is_linear_inside_the_bounds() {
        assert_eq!(gauge_percent(137.5), 25.0);
        assert_eq!(gauge_percent(312.5), 75.0);
    }

    #[test]
    fn test_every_condition_has_distinct_id_and_message() {
        let all = [
            RiverCondition::Normal,
            RiverCondition::Attention,
            RiverCondition::FloodAlert,
        ];
        let mut ids = std::collections::HashSet::new();
        for condition in all {
            assert!(ids.insert(condition.id()), "duplicate id '{}'", condition.id());
            assert!(!condition.message().is_empty());
        }
    }
}
