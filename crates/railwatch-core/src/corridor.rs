//! Corridor definitions: stations, timetabled trains, and track rules.
//!
//! A corridor is a single line of track kilometres with named stations on
//! it. Each train carries a piecewise-linear timetable (`RouteSegment`s) that
//! fully determines its position for any scenario minute, and a `TrackRule`
//! that maps position to a track index. Nothing here is stateful: the same
//! minute always yields the same picture, which is what makes overtakes
//! reproducible.

use crate::error::{RailwatchError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::types::Direction;

// ---------------------------------------------------------------------------
// Stations and route segments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub km: f64,
}

/// One leg of a timetable: between `start` and `end` minutes the train moves
/// linearly from `from_km` to `to_km`. A hold is a leg whose endpoints match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    pub start: f64,
    pub end: f64,
    pub from_km: f64,
    pub to_km: f64,
}

impl RouteSegment {
    pub fn hold(start: f64, end: f64, km: f64) -> RouteSegment {
        RouteSegment {
            start,
            end,
            from_km: km,
            to_km: km,
        }
    }

    pub fn run(start: f64, end: f64, from_km: f64, to_km: f64) -> RouteSegment {
        RouteSegment {
            start,
            end,
            from_km,
            to_km,
        }
    }

    pub fn is_hold(&self) -> bool {
        self.from_km == self.to_km
    }

    fn km_at(&self, minutes: f64) -> f64 {
        if self.end <= self.start {
            return self.from_km;
        }
        let frac = (minutes - self.start) / (self.end - self.start);
        self.from_km + (self.to_km - self.from_km) * frac
    }
}

// ---------------------------------------------------------------------------
// Track rules
// ---------------------------------------------------------------------------

/// Maps a train's position to the track it occupies.
///
/// `Threshold` encodes a planned overtake: the train runs on `approach`
/// until it passes `waypoint_km` in its direction of travel, then moves to
/// `beyond`. The waypoint kilometre itself still counts as the approach
/// side, so two trains standing at the waypoint can be separated by giving
/// them different approach tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrackRule {
    Fixed { track: u8 },
    Threshold {
        waypoint_km: f64,
        approach: u8,
        beyond: u8,
    },
}

// ---------------------------------------------------------------------------
// Trains
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainProfile {
    pub id: String,
    pub name: String,
    /// Free-form display hint (a colour name in the built-in scenario).
    #[serde(default)]
    pub tag: String,
    pub direction: Direction,
    pub route: Vec<RouteSegment>,
    pub track_rule: TrackRule,
}

impl TrainProfile {
    /// Position at `minutes`, clamped to the route ends: before the first
    /// segment the train sits at its origin, after the last at its final
    /// stop.
    pub fn km_at(&self, minutes: f64) -> f64 {
        let (Some(first), Some(last)) = (self.route.first(), self.route.last()) else {
            return 0.0;
        };
        if minutes < first.start {
            return first.from_km;
        }
        if minutes >= last.end {
            return last.to_km;
        }
        for seg in &self.route {
            if minutes >= seg.start && minutes < seg.end {
                return seg.km_at(minutes);
            }
        }
        last.to_km
    }

    /// Track occupied at position `km`.
    pub fn track_at(&self, km: f64) -> u8 {
        match self.track_rule {
            TrackRule::Fixed { track } => track,
            TrackRule::Threshold {
                waypoint_km,
                approach,
                beyond,
            } => {
                let past = match self.direction {
                    Direction::Up => km > waypoint_km,
                    Direction::Down => km < waypoint_km,
                };
                if past {
                    beyond
                } else {
                    approach
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Corridor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Corridor {
    pub name: String,
    pub cycle_minutes: f64,
    /// Number of parallel tracks; rules index them from zero.
    pub tracks: u8,
    pub stations: Vec<Station>,
    pub trains: Vec<TrainProfile>,
}

impl Corridor {
    /// Loads a corridor from a YAML file and validates it.
    pub fn load(path: &Path) -> Result<Corridor> {
        let raw = std::fs::read_to_string(path)?;
        let corridor: Corridor = serde_yaml::from_str(&raw)?;
        corridor.validate()?;
        Ok(corridor)
    }

    pub fn length_km(&self) -> f64 {
        self.stations.last().map(|s| s.km).unwrap_or(0.0)
    }

    pub fn train(&self, id: &str) -> Option<&TrainProfile> {
        self.trains.iter().find(|t| t.id == id)
    }

    /// Position of `train` at `minutes`, clamped to the corridor bounds.
    pub fn position(&self, train: &TrainProfile, minutes: f64) -> f64 {
        train.km_at(minutes).clamp(0.0, self.length_km())
    }

    /// Track occupied by `train` at `minutes`.
    pub fn track(&self, train: &TrainProfile, minutes: f64) -> u8 {
        train.track_at(self.position(train, minutes))
    }

    pub fn validate(&self) -> Result<()> {
        if self.cycle_minutes <= 0.0 {
            return Err(RailwatchError::InvalidCycle(self.cycle_minutes));
        }
        if self.tracks == 0 {
            return Err(RailwatchError::NoTracks);
        }
        let ascending = self
            .stations
            .windows(2)
            .all(|pair| pair[0].km < pair[1].km);
        if self.stations.is_empty() || self.stations[0].km != 0.0 || !ascending {
            return Err(RailwatchError::InvalidStations);
        }
        if self.trains.is_empty() {
            return Err(RailwatchError::NoTrains(self.name.clone()));
        }
        let mut seen = HashSet::new();
        for train in &self.trains {
            if !seen.insert(train.id.as_str()) {
                return Err(RailwatchError::DuplicateTrain(train.id.clone()));
            }
            self.validate_route(train)?;
            self.validate_tracks(train)?;
        }
        Ok(())
    }

    /// A route must tile `[0, cycle_minutes]` exactly: start at zero, each
    /// window non-empty and flush against the previous one, end at the
    /// cycle, and never leave the corridor.
    fn validate_route(&self, train: &TrainProfile) -> Result<()> {
        let Some(first) = train.route.first() else {
            return Err(RailwatchError::EmptyRoute(train.id.clone()));
        };
        if first.start != 0.0 {
            return Err(RailwatchError::RouteStartsLate {
                train: train.id.clone(),
                start: first.start,
            });
        }
        let mut prev_end = 0.0;
        for seg in &train.route {
            if seg.end <= seg.start {
                return Err(RailwatchError::EmptyWindow {
                    train: train.id.clone(),
                    start: seg.start,
                    end: seg.end,
                });
            }
            if seg.start != prev_end {
                return Err(RailwatchError::WindowGap {
                    train: train.id.clone(),
                    end: prev_end,
                    start: seg.start,
                });
            }
            let max = self.length_km();
            for km in [seg.from_km, seg.to_km] {
                if !(0.0..=max).contains(&km) {
                    return Err(RailwatchError::KmOutOfBounds {
                        train: train.id.clone(),
                        km,
                        max,
                    });
                }
            }
            prev_end = seg.end;
        }
        if prev_end != self.cycle_minutes {
            return Err(RailwatchError::RouteEndsEarly {
                train: train.id.clone(),
                end: prev_end,
                cycle: self.cycle_minutes,
            });
        }
        Ok(())
    }

    fn validate_tracks(&self, train: &TrainProfile) -> Result<()> {
        let used = match train.track_rule {
            TrackRule::Fixed { track } => vec![track],
            TrackRule::Threshold {
                approach, beyond, ..
            } => vec![approach, beyond],
        };
        for track in used {
            if track >= self.tracks {
                return Err(RailwatchError::TrackOutOfBounds {
                    train: train.id.clone(),
                    track,
                    tracks: self.tracks,
                });
            }
        }
        Ok(())
    }

    /// Built-in Bilaspur-Akaltara-Champa scenario: a 65 km three-track
    /// section with two overtakes per cycle, one in each direction around
    /// the Akaltara loop at km 40.
    pub fn bsp_akaltara() -> Corridor {
        Corridor {
            name: "Bilaspur-Akaltara-Champa".to_string(),
            cycle_minutes: 150.0,
            tracks: 3,
            stations: vec![
                Station {
                    name: "Bilaspur".to_string(),
                    km: 0.0,
                },
                Station {
                    name: "Akaltara".to_string(),
                    km: 40.0,
                },
                Station {
                    name: "Champa".to_string(),
                    km: 65.0,
                },
            ],
            trains: vec![
                TrainProfile {
                    id: "MEMU_LOCAL".to_string(),
                    name: "MEMU Local (On Time)".to_string(),
                    tag: "emerald".to_string(),
                    direction: Direction::Up,
                    route: vec![
                        RouteSegment::hold(0.0, 10.0, 0.0),
                        RouteSegment::run(10.0, 50.0, 0.0, 40.0),
                        RouteSegment::hold(50.0, 60.0, 40.0),
                        RouteSegment::run(60.0, 85.0, 40.0, 65.0),
                        RouteSegment::hold(85.0, 150.0, 65.0),
                    ],
                    track_rule: TrackRule::Fixed { track: 0 },
                },
                TrainProfile {
                    id: "RAJDHANI".to_string(),
                    name: "Rajdhani Express (+15m)".to_string(),
                    tag: "yellow".to_string(),
                    direction: Direction::Up,
                    route: vec![
                        RouteSegment::hold(0.0, 30.0, 0.0),
                        RouteSegment::run(30.0, 50.0, 0.0, 40.0),
                        RouteSegment::run(50.0, 70.0, 40.0, 65.0),
                        RouteSegment::hold(70.0, 150.0, 65.0),
                    ],
                    track_rule: TrackRule::Threshold {
                        waypoint_km: 40.0,
                        approach: 1,
                        beyond: 0,
                    },
                },
                TrainProfile {
                    id: "JANSHATABDI".to_string(),
                    name: "Janshatabdi (+30m)".to_string(),
                    tag: "red".to_string(),
                    direction: Direction::Down,
                    route: vec![
                        RouteSegment::hold(0.0, 60.0, 65.0),
                        RouteSegment::run(60.0, 95.0, 65.0, 40.0),
                        RouteSegment::hold(95.0, 105.0, 40.0),
                        RouteSegment::run(105.0, 135.0, 40.0, 0.0),
                        RouteSegment::hold(135.0, 150.0, 0.0),
                    ],
                    track_rule: TrackRule::Fixed { track: 2 },
                },
                TrainProfile {
                    id: "UTKAL_EXP".to_string(),
                    name: "Utkal Express (+15m)".to_string(),
                    tag: "sky".to_string(),
                    direction: Direction::Down,
                    route: vec![
                        RouteSegment::hold(0.0, 65.0, 65.0),
                        RouteSegment::run(65.0, 95.0, 65.0, 40.0),
                        RouteSegment::run(95.0, 125.0, 40.0, 0.0),
                        RouteSegment::hold(125.0, 150.0, 0.0),
                    ],
                    track_rule: TrackRule::Threshold {
                        waypoint_km: 40.0,
                        approach: 1,
                        beyond: 2,
                    },
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
