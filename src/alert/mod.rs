/// Interpretation of a forecast for display.
///
/// Submodules:
/// - `banding` — fixed-threshold traffic-light classification and the
///   progress-gauge percentage.

pub mod banding;
