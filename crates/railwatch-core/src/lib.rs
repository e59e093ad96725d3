pub mod clock;
pub mod corridor;
pub mod error;
pub mod live;
pub mod reconcile;
pub mod sim;
pub mod types;

pub use error::{RailwatchError, Result};
