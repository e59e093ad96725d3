//! Live feed state: train records, alerts, and weather.
//!
//! Everything in this module deserializes defensively. Feed payloads come
//! from sources we do not control, so a wrong-typed or missing field falls
//! back to a safe default instead of failing the record, and enum-like
//! strings map through `from_wire` so unrecognized labels degrade rather
//! than error. The only thing that drops a record entirely is an element
//! that is not an object at all (see `reconcile`).

use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;

use crate::types::{
    AlertLevel, AlertSeverity, Direction, TrainPriority, TrainStatus, WeatherCondition,
};

/// Track labels the feed uses, in display order.
pub const TRACKS: [&str; 3] = ["1", "2", "3"];

/// Train number of the placeholder record shown when the feed is empty.
pub const NO_ACTIVE_TRAIN_NO: &str = "N/A";

const DEFAULT_WEATHER_ICON: &str = "☀️";

fn placeholder_time() -> String {
    "00:00".to_string()
}

fn default_track() -> String {
    "1".to_string()
}

// ---------------------------------------------------------------------------
// TrainRecord
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainRecord {
    #[serde(default)]
    pub train_no: String,
    #[serde(default)]
    pub train_name: String,
    #[serde(default)]
    pub train_type: String,
    #[serde(default = "placeholder_time")]
    pub schedule_ar: String,
    #[serde(default = "placeholder_time")]
    pub schedule_dep: String,
    #[serde(default = "placeholder_time")]
    pub actual_ar: String,
    #[serde(default = "placeholder_time")]
    pub actual_dep: String,
    /// Minutes behind schedule; negative means early.
    #[serde(default, deserialize_with = "lenient_number")]
    pub delay: f64,
    #[serde(default = "default_track", deserialize_with = "lenient_track")]
    pub track: String,
    #[serde(default, deserialize_with = "lenient_direction")]
    pub direction: Direction,
    #[serde(default, deserialize_with = "lenient_priority")]
    pub priority: TrainPriority,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: TrainStatus,
    #[serde(default)]
    pub recommended_action: String,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_lat: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub current_lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub train_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
}

impl TrainRecord {
    /// Record displayed when no train qualifies for focus.
    pub fn placeholder() -> TrainRecord {
        TrainRecord {
            train_no: NO_ACTIVE_TRAIN_NO.to_string(),
            train_name: "No Active Trains".to_string(),
            train_type: "N/A".to_string(),
            schedule_ar: placeholder_time(),
            schedule_dep: placeholder_time(),
            actual_ar: placeholder_time(),
            actual_dep: placeholder_time(),
            delay: 0.0,
            track: default_track(),
            direction: Direction::Up,
            priority: TrainPriority::Medium,
            status: TrainStatus::Scheduled,
            recommended_action: "None".to_string(),
            current_lat: 0.0,
            current_lon: 0.0,
            train_id: None,
            zone: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.train_no == NO_ACTIVE_TRAIN_NO
    }
}

// ---------------------------------------------------------------------------
// Alerts and weather
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default, deserialize_with = "lenient_severity")]
    pub severity: AlertSeverity,
    #[serde(default)]
    pub description: String,
    /// True for alerts raised by the weather engine rather than operations.
    #[serde(rename = "isWeather", default)]
    pub is_weather: bool,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherReport {
    #[serde(deserialize_with = "lenient_condition")]
    pub current_condition: WeatherCondition,
    #[serde(deserialize_with = "lenient_icon")]
    pub icon: String,
    #[serde(deserialize_with = "lenient_level")]
    pub alert_level: AlertLevel,
    #[serde(deserialize_with = "lenient_alerts")]
    pub alerts: Vec<Alert>,
}

impl Default for WeatherReport {
    fn default() -> WeatherReport {
        WeatherReport {
            current_condition: WeatherCondition::Clear,
            icon: DEFAULT_WEATHER_ICON.to_string(),
            alert_level: AlertLevel::Green,
            alerts: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// LiveState
// ---------------------------------------------------------------------------

/// One reconciled feed snapshot. `Default` is the state shown before the
/// first poll lands and right after a source switch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LiveState {
    pub trains: Vec<TrainRecord>,
    pub alerts: Vec<Alert>,
    pub weather: WeatherReport,
}

impl LiveState {
    /// Weather alerts first, then operational alerts, each in feed order.
    pub fn combined_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.weather.alerts.iter().chain(self.alerts.iter())
    }

    /// Focus train: the minimum delay, first listed on ties. Early trains
    /// (negative delay) win over on-time ones. Empty feeds yield the
    /// placeholder record.
    pub fn most_critical(&self) -> TrainRecord {
        let mut best: Option<&TrainRecord> = None;
        for train in &self.trains {
            match best {
                Some(current) if train.delay < current.delay => best = Some(train),
                None => best = Some(train),
                _ => {}
            }
        }
        best.cloned().unwrap_or_else(TrainRecord::placeholder)
    }

    /// Trains on `track`, worst delay first.
    pub fn trains_on_track(&self, track: &str) -> Vec<&TrainRecord> {
        let mut on_track: Vec<&TrainRecord> =
            self.trains.iter().filter(|t| t.track == track).collect();
        on_track.sort_by(|a, b| b.delay.partial_cmp(&a.delay).unwrap_or(Ordering::Equal));
        on_track
    }

    /// Track panel layout: every known track with its trains, busiest-delay
    /// first, empty tracks included.
    pub fn by_track(&self) -> Vec<(&'static str, Vec<&TrainRecord>)> {
        TRACKS
            .iter()
            .map(|track| (*track, self.trains_on_track(track)))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

// These never fail: a field of the wrong shape becomes its fallback value.
// Failing here would discard the whole record, which is exactly what the
// feed contract wants to avoid.

fn wire_string<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        _ => String::new(),
    })
}

fn lenient_number<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

fn lenient_track<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => default_track(),
    })
}

fn lenient_direction<'de, D>(de: D) -> Result<Direction, D::Error>
where
    D: Deserializer<'de>,
{
    wire_string(de).map(|s| Direction::from_wire(&s))
}

fn lenient_priority<'de, D>(de: D) -> Result<TrainPriority, D::Error>
where
    D: Deserializer<'de>,
{
    wire_string(de).map(|s| TrainPriority::from_wire(&s))
}

fn lenient_status<'de, D>(de: D) -> Result<TrainStatus, D::Error>
where
    D: Deserializer<'de>,
{
    wire_string(de).map(|s| TrainStatus::from_wire(&s))
}

fn lenient_severity<'de, D>(de: D) -> Result<AlertSeverity, D::Error>
where
    D: Deserializer<'de>,
{
    wire_string(de).map(|s| AlertSeverity::from_wire(&s))
}

fn lenient_level<'de, D>(de: D) -> Result<AlertLevel, D::Error>
where
    D: Deserializer<'de>,
{
    wire_string(de).map(|s| AlertLevel::from_wire(&s))
}

fn lenient_condition<'de, D>(de: D) -> Result<WeatherCondition, D::Error>
where
    D: Deserializer<'de>,
{
    wire_string(de).map(|s| WeatherCondition::from_wire(&s))
}

fn lenient_icon<'de, D>(de: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::String(s) => s,
        _ => DEFAULT_WEATHER_ICON.to_string(),
    })
}

fn lenient_alerts<'de, D>(de: D) -> Result<Vec<Alert>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(de)? {
        Value::Array(items) => crate::reconcile::decode_elements(&items, "weather alert"),
        _ => Vec::new(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
