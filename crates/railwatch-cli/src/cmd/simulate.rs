use anyhow::Context;
use railwatch_core::clock::{SimRate, DEFAULT_TICK};
use railwatch_core::corridor::Corridor;
use railwatch_core::sim::CorridorSim;
use std::path::Path;

/// Renders the corridor at `DEFAULT_TICK` cadence, starting with the
/// minute-zero frame. With `ticks == 0` the loop runs until interrupted.
pub fn run(corridor: Option<&Path>, rate: SimRate, ticks: u64, json: bool) -> anyhow::Result<()> {
    let corridor = match corridor {
        Some(path) => Corridor::load(path)
            .with_context(|| format!("failed to load corridor {}", path.display()))?,
        None => Corridor::bsp_akaltara(),
    };

    let mut sim = CorridorSim::new(corridor);
    sim.set_rate(rate);

    let mut rendered: u64 = 0;
    loop {
        let snap = sim.snapshot();
        if json {
            println!("{}", serde_json::to_string(&snap)?);
        } else {
            print!("{}", crate::output::corridor_strip(sim.corridor(), &snap));
        }
        rendered += 1;
        if ticks > 0 && rendered >= ticks {
            break;
        }
        std::thread::sleep(DEFAULT_TICK);
        sim.tick(DEFAULT_TICK);
    }

    Ok(())
}
