use thiserror::Error;

#[derive(Debug, Error)]
pub enum RailwatchError {
    #[error("corridor '{0}' has no trains")]
    NoTrains(String),

    #[error("corridor cycle length must be positive, got {0}")]
    InvalidCycle(f64),

    #[error("corridor needs at least one track")]
    NoTracks,

    #[error("corridor stations must start at km 0 and ascend")]
    InvalidStations,

    #[error("duplicate train id: {0}")]
    DuplicateTrain(String),

    #[error("train {0}: route has no segments")]
    EmptyRoute(String),

    #[error("train {train}: first segment starts at minute {start}, expected 0")]
    RouteStartsLate { train: String, start: f64 },

    #[error("train {train}: segment starting at minute {start} ends at {end}")]
    EmptyWindow { train: String, start: f64, end: f64 },

    #[error("train {train}: segments must be contiguous, found end {end} then start {start}")]
    WindowGap { train: String, end: f64, start: f64 },

    #[error("train {train}: last segment ends at minute {end}, expected {cycle}")]
    RouteEndsEarly { train: String, end: f64, cycle: f64 },

    #[error("train {train}: km {km} outside corridor 0..={max}")]
    KmOutOfBounds { train: String, km: f64, max: f64 },

    #[error("train {train}: track {track} outside 0..{tracks}")]
    TrackOutOfBounds { train: String, track: u8, tracks: u8 },

    #[error("invalid direction: {0}")]
    InvalidDirection(String),

    #[error("invalid data source: {0} (expected 'india' or 'cg')")]
    InvalidSource(String),

    #[error("invalid simulation rate: {0} (expected 1, 5, or 10)")]
    InvalidRate(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, RailwatchError>;
