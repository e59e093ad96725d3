use railwatch_core::corridor::Corridor;
use railwatch_core::live::LiveState;
use railwatch_core::sim::CorridorSnapshot;
use railwatch_core::types::SourceId;
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{}", json);
    Ok(())
}

// ---------------------------------------------------------------------------
// Corridor strip
// ---------------------------------------------------------------------------

const STRIP_WIDTH: usize = 60;

/// One simulation frame as a text strip: a row per track, each train shown
/// as the first letter of its id at its scaled kilometre column.
pub fn corridor_strip(corridor: &Corridor, snap: &CorridorSnapshot) -> String {
    let length = corridor.length_km();
    let mut out = format!("{}  {}\n", snap.label, corridor.name);

    for track in 0..corridor.tracks {
        let mut cells = vec!['.'; STRIP_WIDTH + 1];
        for train in snap.trains.iter().filter(|t| t.track == track) {
            let col = if length > 0.0 {
                ((train.km / length) * STRIP_WIDTH as f64).round() as usize
            } else {
                0
            };
            cells[col.min(STRIP_WIDTH)] = train.id.chars().next().unwrap_or('?');
        }
        let line: String = cells.into_iter().collect();
        out.push_str(&format!("  track {} [{}]\n", track + 1, line));
    }

    let stations: Vec<String> = corridor
        .stations
        .iter()
        .map(|s| format!("{} {}km", s.name, s.km))
        .collect();
    out.push_str(&format!("  {}\n", stations.join("  |  ")));
    out
}

// ---------------------------------------------------------------------------
// Live dashboard
// ---------------------------------------------------------------------------

fn track_role(track: &str) -> &'static str {
    match track {
        "1" => "UP",
        "2" => "DOWN",
        "3" => "LOOP/BIDIRECTIONAL",
        _ => "",
    }
}

/// Text rendering of one live snapshot: focus train, weather, combined
/// alerts, then a line per track with its trains worst-delay first.
pub fn dashboard(state: &LiveState, source: Option<SourceId>) -> String {
    let mut out = match source {
        Some(s) => format!("railway traffic command center | {} view\n", s.label()),
        None => "railway traffic command center\n".to_string(),
    };

    let focus = state.most_critical();
    if focus.is_placeholder() {
        out.push_str("focus: no active trains\n");
    } else {
        out.push_str(&format!(
            "focus: {} {} | delay {} min | {} | track {} | {}\n",
            focus.train_no, focus.train_name, focus.delay, focus.status, focus.track, focus.priority
        ));
    }

    out.push_str(&format!(
        "weather: {} {} [{}]\n",
        state.weather.current_condition, state.weather.icon, state.weather.alert_level
    ));

    let combined: Vec<_> = state.combined_alerts().collect();
    if combined.is_empty() {
        out.push_str("alerts: none\n");
    } else {
        out.push_str("alerts:\n");
        for alert in combined {
            out.push_str(&format!(
                "  [{}] {} {}\n",
                alert.severity, alert.icon, alert.description
            ));
        }
    }

    for (track, trains) in state.by_track() {
        let role = track_role(track);
        if trains.is_empty() {
            out.push_str(&format!("track {track} ({role}): clear\n"));
        } else {
            let listed: Vec<String> = trains
                .iter()
                .map(|t| format!("{} ({} min)", t.train_no, t.delay))
                .collect();
            out.push_str(&format!("track {track} ({role}): {}\n", listed.join(", ")));
        }
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
