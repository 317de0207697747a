use serde::{Deserialize, Serialize};

/// Severity tier assigned by the upstream classifier. Ordered so that a
/// higher tier always compares greater than a lower one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Low,
    Medium,
    High,
    Emergency,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Emergency => "EMERGENCY",
        }
    }

    /// Strict parse of an upstream severity tag. Unknown tags are rejected
    /// rather than defaulted; the classifier must be re-run upstream.
    pub fn parse(raw: &str) -> Result<Self, ClassificationError> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Severity::Low),
            "MEDIUM" => Ok(Severity::Medium),
            "HIGH" => Ok(Severity::High),
            "EMERGENCY" => Ok(Severity::Emergency),
            _ => Err(ClassificationError::InvalidSeverity(raw.to_string())),
        }
    }
}

/// Canonical trade tag (PLUMBING, ELECTRICAL, HVAC, ...). Stored upper-cased
/// so comparisons are case-insensitive by construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Trade(String);

impl Trade {
    pub fn parse(raw: &str) -> Result<Self, ClassificationError> {
        let canonical = raw.trim().to_ascii_uppercase();
        let valid = !canonical.is_empty()
            && canonical
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(Trade(canonical))
        } else {
            Err(ClassificationError::InvalidTrade(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn matches(&self, other: &str) -> bool {
        self.0.eq_ignore_ascii_case(other.trim())
    }
}

impl<'de> Deserialize<'de> for Trade {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Trade::parse(&raw).map_err(serde::de::Error::custom)
    }
}

/// Output contract of the excluded classification adapter: both tags must
/// survive the strict parse before anything downstream runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub severity: Severity,
    pub trade: Trade,
}

impl Classification {
    pub fn from_tags(severity: &str, trade: &str) -> Result<Self, ClassificationError> {
        Ok(Self {
            severity: Severity::parse(severity)?,
            trade: Trade::parse(trade)?,
        })
    }
}

/// Rejection raised at the ingestion boundary for unvalidated adapter output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClassificationError {
    #[error("unknown severity tag '{0}'")]
    InvalidSeverity(String),
    #[error("invalid trade tag '{0}'")]
    InvalidTrade(String),
}

/// Structured risk facts for one maintenance request. Every field is a
/// boolean, number, or enum: the engine never inspects free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub hazards: HazardFlags,
    #[serde(default)]
    pub tenant: TenantProfile,
    #[serde(default)]
    pub weather: WeatherSnapshot,
    #[serde(default)]
    pub property: PropertySnapshot,
    #[serde(default)]
    pub timing: TimingFlags,
    #[serde(default)]
    pub history: IssueHistory,
}

/// Condition flags extracted upstream from the request description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HazardFlags {
    pub gas_leak: bool,
    pub fire_smoke: bool,
    pub carbon_monoxide: bool,
    pub electrical_shock: bool,
    pub sewage: bool,
    pub water_spreading: bool,
    pub ceiling_drip: bool,
    pub getting_worse: bool,
    pub tenant_evacuated: bool,
    pub structural_concern: bool,
    pub locked_out: bool,
    pub no_power: bool,
    pub no_water: bool,
    pub no_toilet: bool,
    pub no_heat: bool,
    pub no_ac: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantProfile {
    pub has_medical_condition: bool,
    pub has_infant: bool,
    pub is_elderly: bool,
    pub is_pregnant: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    /// Outdoor temperature in degrees Fahrenheit.
    pub outdoor_temp_f: f64,
}

impl Default for WeatherSnapshot {
    fn default() -> Self {
        Self { outdoor_temp_f: 70.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertySnapshot {
    pub floor: Option<u8>,
    pub total_units: u32,
}

impl Default for PropertySnapshot {
    fn default() -> Self {
        Self {
            floor: None,
            total_units: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingFlags {
    pub is_late_night: bool,
    pub is_holiday: bool,
    pub is_after_hours: bool,
    pub is_weekend: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueHistory {
    pub recent_issues_count: u32,
    pub previous_repair_failed: bool,
}
