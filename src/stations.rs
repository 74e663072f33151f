///station + input field registry, feature order lives here
/// a map of the basin stations to metadata (name, location, role) and the
/// per-variant input field tables. Feature-vector order is defined by the
/// field registries below, so every other module references fields from
/// here rather than hardcoding positions.
/// Station and input registry for the Rio do Sul forecast service.
///
/// Defines the canonical list of Itajaí-Açu basin stations this service
/// knows about, along with the interactive input fields for each pipeline
/// variant. This is the single source of truth for field order — the order
/// of a field registry is the order the artifacts were trained with, and
/// nothing checks that convention at runtime beyond arity.

use crate::model::PipelineVariant;

// ---------------------------------------------------------------------------
// Station metadata
// ---------------------------------------------------------------------------

/// Role of a station in the forecast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationRole {
    /// Upstream sensor site contributing input features.
    Upstream,
    /// The downstream point whose level is being forecast.
    ForecastPoint,
}

/// Metadata for a single monitored station.
pub struct Station {
    /// Short identifier used in field ids.
    pub code: &'static str,
    /// Human-readable station name.
    pub name: &'static str,
    /// Role of the station in flood forecasting for Rio do Sul.
    pub description: &'static str,
    /// WGS84 latitude.
    pub latitude: f64,
    /// WGS84 longitude.
    pub longitude: f64,
    pub role: StationRole,
}

/// All stations referenced by the forecast, upstream sites first.
///
/// Sources:
///   - Sensor network: Defesa Civil de Santa Catarina
///   - Coordinates: IBGE municipal seats
pub static STATION_REGISTRY: &[Station] = &[
    Station {
        code: "ituporanga",
        name: "Ituporanga",
        description: "Upstream station on the Itajaí do Sul. Rising level and \
                      rainfall here lead Rio do Sul by several hours.",
        latitude: -27.4144,
        longitude: -49.6014,
        role: StationRole::Upstream,
    },
    Station {
        code: "taio",
        name: "Taió",
        description: "Upstream station on the Itajaí do Oeste. Together with \
                      Ituporanga it covers both headwater branches feeding \
                      Rio do Sul.",
        latitude: -27.1164,
        longitude: -49.9936,
        role: StationRole::Upstream,
    },
    Station {
        code: "rio_do_sul",
        name: "Rio do Sul",
        description: "Forecast point at the confluence of the Itajaí do Sul \
                      and Itajaí do Oeste. The pipelines predict the river \
                      level here.",
        latitude: -27.2142,
        longitude: -49.6431,
        role: StationRole::ForecastPoint,
    },
];

/// Looks up a station by code. Returns `None` if not found.
pub fn find_station(code: &str) -> Option<&'static Station> {
    STATION_REGISTRY.iter().find(|s| s.code == code)
}

// ---------------------------------------------------------------------------
// Input fields
// ---------------------------------------------------------------------------

/// One numeric input of the interactive surface, with the documented
/// widget metadata. The min/max range is advisory: the UI clamps its
/// widgets to it, but the pipeline accepts any finite value.
pub struct InputField {
    /// Stable identifier used in the form and the API.
    pub id: &'static str,
    /// Label shown next to the widget.
    pub label: &'static str,
    /// Unit suffix for the label.
    pub unit: &'static str,
    pub min: f64,
    pub max: f64,
    pub default: f64,
    pub step: f64,
}

const LEVEL_ITUPORANGA: InputField = InputField {
    id: "level_ituporanga",
    label: "River level at Ituporanga",
    unit: "cm",
    min: 0.0,
    max: 1000.0,
    default: 50.0,
    step: 0.1,
};

const RAIN_ITUPORANGA: InputField = InputField {
    id: "rain_ituporanga",
    label: "Rainfall at Ituporanga",
    unit: "mm",
    min: 0.0,
    max: 500.0,
    default: 10.0,
    step: 0.1,
};

const LEVEL_TAIO: InputField = InputField {
    id: "level_taio",
    label: "River level at Taió",
    unit: "cm",
    min: 0.0,
    max: 1000.0,
    default: 120.0,
    step: 0.1,
};

const RAIN_TAIO: InputField = InputField {
    id: "rain_taio",
    label: "Rainfall at Taió",
    unit: "mm",
    min: 0.0,
    max: 500.0,
    default: 5.0,
    step: 0.1,
};

/// Input fields of the full variant, in training order.
pub static FULL_FIELDS: &[InputField] = &[
    LEVEL_ITUPORANGA,
    RAIN_ITUPORANGA,
    LEVEL_TAIO,
    RAIN_TAIO,
];

/// Input fields of the rain-only variant, in training order.
pub static RAIN_ONLY_FIELDS: &[InputField] = &[RAIN_ITUPORANGA, RAIN_TAIO];

/// The ordered input fields for a pipeline variant.
pub fn fields_for(variant: PipelineVariant) -> &'static [InputField] {
    match variant {
        PipelineVariant::Full => FULL_FIELDS,
        PipelineVariant::RainOnly => RAIN_ONLY_FIELDS,
    }
}

/// The default feature vector for a variant — one widget default per field,
/// in training order.
pub fn default_features(variant: PipelineVariant) -> Vec<f64> {
    fields_for(variant).iter().map(|f| f.default).collect()
}

/// Whether a value lies inside a field's documented widget range.
/// Advisory only — callers log, they do not reject.
pub fn in_declared_range(field: &InputField, value: f64) -> bool {
    value >= field.min && value <= field.max
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
