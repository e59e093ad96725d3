use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of travel along the corridor. `Up` runs toward increasing km
/// (Bilaspur to Champa in the built-in scenario), `Down` the reverse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "up", alias = "Up")]
    Up,
    #[serde(rename = "down", alias = "Down")]
    Down,
}

impl Direction {
    pub fn all() -> &'static [Direction] {
        &[Direction::Up, Direction::Down]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Lenient mapping for feed payloads: any casing accepted, anything
    /// unrecognized becomes `Up`.
    pub fn from_wire(s: &str) -> Direction {
        if s.eq_ignore_ascii_case("down") {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Direction {
    type Err = crate::error::RailwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" | "Up" => Ok(Direction::Up),
            "down" | "Down" => Ok(Direction::Down),
            _ => Err(crate::error::RailwatchError::InvalidDirection(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// TrainStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainStatus {
    Arrived,
    Running,
    #[default]
    Scheduled,
    Delayed,
    Held,
    Unknown,
}

impl TrainStatus {
    pub fn all() -> &'static [TrainStatus] {
        &[
            TrainStatus::Arrived,
            TrainStatus::Running,
            TrainStatus::Scheduled,
            TrainStatus::Delayed,
            TrainStatus::Held,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrainStatus::Arrived => "Arrived",
            TrainStatus::Running => "Running",
            TrainStatus::Scheduled => "Scheduled",
            TrainStatus::Delayed => "Delayed",
            TrainStatus::Held => "Held",
            TrainStatus::Unknown => "Unknown",
        }
    }

    /// Lenient mapping for feed payloads: anything unrecognized becomes
    /// `Unknown` rather than failing the record.
    pub fn from_wire(s: &str) -> TrainStatus {
        match s {
            "Arrived" => TrainStatus::Arrived,
            "Running" => TrainStatus::Running,
            "Scheduled" => TrainStatus::Scheduled,
            "Delayed" => TrainStatus::Delayed,
            "Held" => TrainStatus::Held,
            _ => TrainStatus::Unknown,
        }
    }
}

impl fmt::Display for TrainStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrainPriority
// ---------------------------------------------------------------------------

/// Priority class as the feed labels it, emoji suffix included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainPriority {
    #[serde(rename = "High (🟢)")]
    High,
    #[default]
    #[serde(rename = "Medium (🟡)")]
    Medium,
    #[serde(rename = "Low (🔴)")]
    Low,
}

impl TrainPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TrainPriority::High => "High (🟢)",
            TrainPriority::Medium => "Medium (🟡)",
            TrainPriority::Low => "Low (🔴)",
        }
    }

    /// Lenient mapping for feed payloads: matched by label prefix, anything
    /// unrecognized becomes `Medium`.
    pub fn from_wire(s: &str) -> TrainPriority {
        if s.starts_with("High") {
            TrainPriority::High
        } else if s.starts_with("Low") {
            TrainPriority::Low
        } else {
            TrainPriority::Medium
        }
    }
}

impl fmt::Display for TrainPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AlertSeverity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertSeverity {
    Critical,
    Medium,
    #[default]
    Low,
}

impl AlertSeverity {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Critical => "CRITICAL",
            AlertSeverity::Medium => "MEDIUM",
            AlertSeverity::Low => "LOW",
        }
    }

    pub fn from_wire(s: &str) -> AlertSeverity {
        match s {
            "CRITICAL" => AlertSeverity::Critical,
            "MEDIUM" => AlertSeverity::Medium,
            _ => AlertSeverity::Low,
        }
    }
}

impl fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AlertLevel
// ---------------------------------------------------------------------------

/// Corridor-wide weather alert level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AlertLevel {
    Red,
    Yellow,
    #[default]
    Green,
}

impl AlertLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Red => "RED",
            AlertLevel::Yellow => "YELLOW",
            AlertLevel::Green => "GREEN",
        }
    }

    pub fn from_wire(s: &str) -> AlertLevel {
        match s {
            "RED" => AlertLevel::Red,
            "YELLOW" => AlertLevel::Yellow,
            _ => AlertLevel::Green,
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WeatherCondition
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Cloudy,
    Rain,
    Storm,
    Fog,
    Wind,
}

impl WeatherCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Cloudy => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Storm => "Storm",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Wind => "Wind",
        }
    }

    pub fn from_wire(s: &str) -> WeatherCondition {
        match s {
            "Clear" => WeatherCondition::Clear,
            "Cloudy" => WeatherCondition::Cloudy,
            "Rain" => WeatherCondition::Rain,
            "Storm" => WeatherCondition::Storm,
            "Fog" => WeatherCondition::Fog,
            "Wind" => WeatherCondition::Wind,
            _ => WeatherCondition::Clear,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceId
// ---------------------------------------------------------------------------

/// Logical data source behind the live feed. Switching sources invalidates
/// the current snapshot until the next poll under the new source lands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    #[serde(rename = "india_db")]
    India,
    #[default]
    #[serde(rename = "cg_db")]
    Chhattisgarh,
}

impl SourceId {
    pub fn all() -> &'static [SourceId] {
        &[SourceId::India, SourceId::Chhattisgarh]
    }

    /// Wire identifier understood by the feed backend.
    pub fn as_str(self) -> &'static str {
        match self {
            SourceId::India => "india_db",
            SourceId::Chhattisgarh => "cg_db",
        }
    }

    /// Header label used by dashboard views.
    pub fn label(self) -> &'static str {
        match self {
            SourceId::India => "INDIA",
            SourceId::Chhattisgarh => "CHHATTISGARH",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SourceId {
    type Err = crate::error::RailwatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "india" | "india_db" => Ok(SourceId::India),
            "cg" | "cg_db" | "chhattisgarh" => Ok(SourceId::Chhattisgarh),
            _ => Err(crate::error::RailwatchError::InvalidSource(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn direction_roundtrip() {
        for dir in Direction::all() {
            let parsed = Direction::from_str(dir.as_str()).unwrap();
            assert_eq!(*dir, parsed);
        }
        assert_eq!(Direction::from_str("Up").unwrap(), Direction::Up);
        assert!(Direction::from_str("sideways").is_err());
    }

    #[test]
    fn direction_from_wire_tolerates_casing() {
        assert_eq!(Direction::from_wire("DOWN"), Direction::Down);
        assert_eq!(Direction::from_wire("Down"), Direction::Down);
        assert_eq!(Direction::from_wire("up"), Direction::Up);
        assert_eq!(Direction::from_wire("???"), Direction::Up);
    }

    #[test]
    fn status_from_wire_falls_back_to_unknown() {
        for status in TrainStatus::all() {
            assert_eq!(TrainStatus::from_wire(status.as_str()), *status);
        }
        assert_eq!(TrainStatus::from_wire("Vanished"), TrainStatus::Unknown);
    }

    #[test]
    fn priority_wire_labels_keep_the_emoji() {
        assert_eq!(
            serde_json::to_string(&TrainPriority::High).unwrap(),
            "\"High (🟢)\""
        );
        assert_eq!(TrainPriority::from_wire("High (🟢)"), TrainPriority::High);
        assert_eq!(TrainPriority::from_wire("Low (🔴)"), TrainPriority::Low);
        assert_eq!(TrainPriority::from_wire("whatever"), TrainPriority::Medium);
    }

    #[test]
    fn severity_and_level_use_uppercase_wire_forms() {
        assert_eq!(
            serde_json::to_string(&AlertSeverity::Critical).unwrap(),
            "\"CRITICAL\""
        );
        let parsed: AlertLevel = serde_json::from_str("\"YELLOW\"").unwrap();
        assert_eq!(parsed, AlertLevel::Yellow);
        assert_eq!(AlertSeverity::from_wire("nope"), AlertSeverity::Low);
        assert_eq!(AlertLevel::from_wire("nope"), AlertLevel::Green);
    }

    #[test]
    fn weather_condition_defaults_to_clear() {
        assert_eq!(WeatherCondition::default(), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wire("Hail"), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_wire("Storm"), WeatherCondition::Storm);
    }

    #[test]
    fn source_parses_short_and_wire_names() {
        for source in SourceId::all() {
            assert_eq!(SourceId::from_str(source.as_str()).unwrap(), *source);
        }
        assert_eq!(SourceId::from_str("india").unwrap(), SourceId::India);
        assert_eq!(SourceId::from_str("cg").unwrap(), SourceId::Chhattisgarh);
        assert!(SourceId::from_str("mars").is_err());
        assert_eq!(SourceId::default(), SourceId::Chhattisgarh);
    }
}
