use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Marker a station appends to its METAR when a sensor needs maintenance.
pub const SENSOR_MAINTENANCE_MARKER: char = '$';

#[derive(Debug, Clone)]
pub struct ReportRequest {
    /// Normalized ICAO codes, see [`crate::codes::normalize_codes`].
    pub codes: Vec<String>,
    pub taf: bool,
}

/// One airport's weather record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub code: String,
    pub metar: String,
    pub taf: String,

    /// `false` when the station flagged its sensors for maintenance and some
    /// of the reported data may be inaccurate.
    pub ok: bool,
}

impl Finding {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            metar: String::new(),
            taf: String::new(),
            ok: true,
        }
    }

    /// Trims both reports and recomputes `ok` from the METAR text.
    pub(crate) fn finish(mut self) -> Self {
        self.metar.truncate(self.metar.trim_end().len());
        self.taf.truncate(self.taf.trim_end().len());
        self.ok = !self.metar.ends_with(SENSOR_MAINTENANCE_MARKER);
        self
    }
}

/// Findings from one provider call, as emitted by `metar --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub provider: String,
    pub fetched_at: DateTime<Utc>,
    pub findings: Vec<Finding>,
}
