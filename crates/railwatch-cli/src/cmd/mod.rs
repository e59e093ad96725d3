pub mod fetch;
pub mod simulate;
pub mod switch;
pub mod watch;
