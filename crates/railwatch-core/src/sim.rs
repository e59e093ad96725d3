//! Deterministic corridor simulation.
//!
//! `CorridorSim` pairs a validated `Corridor` with a `SimClock` and renders
//! snapshots. All motion lives in the timetables, so a snapshot is a pure
//! function of the minute; the sim only owns which minute it is.

use serde::Serialize;
use std::time::Duration;

use crate::clock::{clock_label, SimClock, SimRate};
use crate::corridor::Corridor;

/// One train's place in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainPosition {
    pub id: String,
    pub name: String,
    pub tag: String,
    pub km: f64,
    pub track: u8,
}

/// Full corridor picture at one scenario minute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorridorSnapshot {
    pub minutes: f64,
    pub label: String,
    pub trains: Vec<TrainPosition>,
}

pub struct CorridorSim {
    corridor: Corridor,
    clock: SimClock,
}

impl CorridorSim {
    pub fn new(corridor: Corridor) -> CorridorSim {
        let clock = SimClock::new(corridor.cycle_minutes);
        CorridorSim { corridor, clock }
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn set_rate(&mut self, rate: SimRate) {
        self.clock.set_rate(rate);
    }

    pub fn pause(&mut self) {
        self.clock.pause();
    }

    pub fn resume(&mut self) {
        self.clock.resume();
    }

    pub fn reset(&mut self) {
        self.clock.reset();
    }

    /// Advances the clock by `elapsed` and renders the new minute.
    pub fn tick(&mut self, elapsed: Duration) -> CorridorSnapshot {
        let minutes = self.clock.advance(elapsed);
        self.snapshot_at(minutes)
    }

    /// Renders the current minute without advancing.
    pub fn snapshot(&self) -> CorridorSnapshot {
        self.snapshot_at(self.clock.minutes())
    }

    /// Renders an arbitrary minute. Useful for probing the timetable without
    /// touching the clock.
    pub fn snapshot_at(&self, minutes: f64) -> CorridorSnapshot {
        let trains = self
            .corridor
            .trains
            .iter()
            .map(|train| {
                let km = self.corridor.position(train, minutes);
                TrainPosition {
                    id: train.id.clone(),
                    name: train.name.clone(),
                    tag: train.tag.clone(),
                    km,
                    track: train.track_at(km),
                }
            })
            .collect();
        CorridorSnapshot {
            minutes,
            label: clock_label(minutes),
            trains,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::DEFAULT_TICK;

    fn sim() -> CorridorSim {
        CorridorSim::new(Corridor::bsp_akaltara())
    }

    fn pos(snap: &CorridorSnapshot, id: &str) -> (f64, u8) {
        let train = snap
            .trains
            .iter()
            .find(|t| t.id == id)
            .unwrap_or_else(|| panic!("train {id} missing from snapshot"));
        (train.km, train.track)
    }

    /// True when `id` sits inside one of its hold segments at `minutes`.
    fn is_holding(corridor: &Corridor, id: &str, minutes: f64) -> bool {
        corridor
            .train(id)
            .unwrap()
            .route
            .iter()
            .any(|seg| seg.is_hold() && minutes >= seg.start && minutes <= seg.end)
    }

    #[test]
    fn departure_board_at_minute_zero() {
        let snap = sim().snapshot_at(0.0);
        assert_eq!(pos(&snap, "MEMU_LOCAL"), (0.0, 0));
        assert_eq!(pos(&snap, "RAJDHANI"), (0.0, 1));
        assert_eq!(pos(&snap, "JANSHATABDI"), (65.0, 2));
        assert_eq!(pos(&snap, "UTKAL_EXP"), (65.0, 1));
        assert_eq!(snap.label, "12:00");
    }

    #[test]
    fn memu_is_mid_climb_at_minute_35() {
        let snap = sim().snapshot_at(35.0);
        assert_eq!(pos(&snap, "MEMU_LOCAL"), (25.0, 0));
        assert_eq!(pos(&snap, "RAJDHANI"), (10.0, 1));
    }

    #[test]
    fn rajdhani_overtakes_the_memu_at_akaltara() {
        // Both reach km 40 at minute 50 but on different tracks; once the
        // Rajdhani clears the waypoint it drops onto the main line ahead.
        let at_50 = sim().snapshot_at(50.0);
        assert_eq!(pos(&at_50, "MEMU_LOCAL"), (40.0, 0));
        assert_eq!(pos(&at_50, "RAJDHANI"), (40.0, 1));

        let at_55 = sim().snapshot_at(55.0);
        let (raj_km, raj_track) = pos(&at_55, "RAJDHANI");
        assert_eq!(raj_km, 46.25);
        assert_eq!(raj_track, 0);
        assert_eq!(pos(&at_55, "MEMU_LOCAL"), (40.0, 0));
    }

    #[test]
    fn utkal_overtakes_the_janshatabdi_at_akaltara() {
        let at_95 = sim().snapshot_at(95.0);
        assert_eq!(pos(&at_95, "JANSHATABDI"), (40.0, 2));
        assert_eq!(pos(&at_95, "UTKAL_EXP"), (40.0, 1));

        let at_100 = sim().snapshot_at(100.0);
        let (utkal_km, utkal_track) = pos(&at_100, "UTKAL_EXP");
        assert!(utkal_km < 40.0);
        assert_eq!(utkal_track, 2);
        assert_eq!(pos(&at_100, "JANSHATABDI"), (40.0, 2));
    }

    #[test]
    fn co_located_trains_are_track_separated_while_running() {
        let sim = sim();
        let corridor = sim.corridor();
        let mut minutes = 0.0;
        while minutes <= 150.0 {
            let snap = sim.snapshot_at(minutes);
            for (i, a) in snap.trains.iter().enumerate() {
                for b in snap.trains.iter().skip(i + 1) {
                    if a.km == b.km && a.track == b.track {
                        // Terminal platforms are shared once both trains
                        // have finished (or not yet started) their runs.
                        let both_parked = is_holding(corridor, &a.id, minutes)
                            && is_holding(corridor, &b.id, minutes);
                        assert!(
                            both_parked,
                            "{} and {} share km {} track {} at minute {}",
                            a.id, b.id, a.km, a.track, minutes
                        );
                    }
                }
            }
            minutes += 0.25;
        }
    }

    #[test]
    fn positions_clamp_outside_the_timetable() {
        let sim = sim();
        let early = sim.snapshot_at(-5.0);
        assert_eq!(pos(&early, "MEMU_LOCAL").0, 0.0);
        assert_eq!(pos(&early, "JANSHATABDI").0, 65.0);

        let late = sim.snapshot_at(9999.0);
        assert_eq!(pos(&late, "MEMU_LOCAL").0, 65.0);
        assert_eq!(pos(&late, "UTKAL_EXP").0, 0.0);
    }

    #[test]
    fn positions_stay_within_corridor_bounds() {
        let sim = sim();
        for step in -20..=640 {
            let snap = sim.snapshot_at(step as f64 * 0.25);
            for train in &snap.trains {
                assert!(
                    (0.0..=65.0).contains(&train.km),
                    "{} at km {} on minute {}",
                    train.id,
                    train.km,
                    snap.minutes
                );
                assert!(train.track < 3);
            }
        }
    }

    #[test]
    fn snapshots_are_pure_functions_of_the_minute() {
        let mut ticked = sim();
        ticked.tick(Duration::from_secs(30));
        // Clock state is irrelevant to an explicit-minute render.
        assert_eq!(ticked.snapshot_at(72.5), sim().snapshot_at(72.5));
    }

    #[test]
    fn tick_advances_and_labels_the_clock() {
        let mut sim = sim();
        sim.set_rate(SimRate::X5);
        let snap = sim.tick(Duration::from_secs(7));
        assert_eq!(snap.minutes, 35.0);
        assert_eq!(snap.label, "12:35");
        assert_eq!(pos(&snap, "MEMU_LOCAL").0, 25.0);
    }

    #[test]
    fn pause_resume_and_reset_pass_through() {
        let mut sim = sim();
        sim.set_rate(SimRate::X1);
        sim.tick(Duration::from_secs(10));
        sim.pause();
        let frozen = sim.tick(DEFAULT_TICK);
        assert_eq!(frozen.minutes, 10.0);
        sim.resume();
        assert!(sim.tick(DEFAULT_TICK).minutes > 10.0);
        sim.reset();
        assert_eq!(sim.snapshot().minutes, 0.0);
    }
}
