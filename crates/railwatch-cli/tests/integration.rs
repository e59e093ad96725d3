use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn railwatch() -> Command {
    Command::cargo_bin("railwatch").unwrap()
}

const CORRIDOR_YAML: &str = "\
name: Test Branch
cycle_minutes: 10
tracks: 1
stations:
  - name: Alpha
    km: 0
  - name: Beta
    km: 5
trains:
  - id: SHUTTLE
    name: Shuttle
    direction: up
    route:
      - start: 0
        end: 10
        from_km: 0
        to_km: 5
    track_rule:
      kind: fixed
      track: 0
";

// ---------------------------------------------------------------------------
// railwatch simulate
// ---------------------------------------------------------------------------

#[test]
fn help_lists_subcommands() {
    railwatch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate"))
        .stdout(predicate::str::contains("watch"))
        .stdout(predicate::str::contains("fetch"))
        .stdout(predicate::str::contains("switch"));
}

#[test]
fn simulate_renders_the_builtin_scenario() {
    railwatch()
        .args(["simulate", "--ticks", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12:00  Bilaspur-Akaltara-Champa"))
        .stdout(predicate::str::contains("Akaltara 40km"))
        .stdout(predicate::str::contains("track 3 ["));
}

#[test]
fn simulate_emits_json_frames() {
    railwatch()
        .args(["simulate", "--ticks", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""label":"12:00""#))
        .stdout(predicate::str::contains(r#""id":"MEMU_LOCAL""#));
}

#[test]
fn simulate_rejects_bad_rates() {
    railwatch()
        .args(["simulate", "--rate", "7"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}

#[test]
fn simulate_loads_corridor_files() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corridor.yaml");
    std::fs::write(&path, CORRIDOR_YAML).unwrap();

    railwatch()
        .args(["simulate", "--ticks", "1"])
        .arg("--corridor")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Test Branch"))
        .stdout(predicate::str::contains("Beta 5km"));
}

#[test]
fn simulate_fails_fast_on_invalid_corridors() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("corridor.yaml");
    // Route stops at minute 8 of a 10 minute cycle.
    std::fs::write(&path, CORRIDOR_YAML.replace("end: 10", "end: 8")).unwrap();

    railwatch()
        .args(["simulate", "--ticks", "1"])
        .arg("--corridor")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"))
        .stderr(predicate::str::contains("last segment ends at minute 8"));
}

// ---------------------------------------------------------------------------
// railwatch fetch
// ---------------------------------------------------------------------------

#[test]
fn fetch_renders_a_live_snapshot() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/trains/active")
        .with_status(200)
        .with_body(
            r#"{
                "trains": [{"train_no": "12859", "train_name": "Gitanjali Express", "delay": 15, "track": "2", "status": "Running"}],
                "alerts": [],
                "weather": {"current_condition": "Rain", "icon": "🌧️", "alert_level": "YELLOW", "alerts": []}
            }"#,
        )
        .create();

    let url = server.url();
    railwatch()
        .args(["fetch", "--url", url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("focus: 12859 Gitanjali Express"))
        .stdout(predicate::str::contains("weather: Rain"))
        .stdout(predicate::str::contains("track 2 (DOWN): 12859 (15 min)"));
}

#[test]
fn fetch_reports_unreachable_feeds() {
    railwatch()
        .args(["fetch", "--url", "http://127.0.0.1:9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: failed to fetch the live feed"));
}

// ---------------------------------------------------------------------------
// railwatch switch
// ---------------------------------------------------------------------------

#[test]
fn switch_reports_the_new_source() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/db/switch")
        .match_query(mockito::Matcher::UrlEncoded("source".into(), "india_db".into()))
        .with_status(200)
        .with_body(r#"{"status":"success","active_db":"india_db","message":"Switched to india_db"}"#)
        .create();

    let url = server.url();
    railwatch()
        .args(["switch", "india", "--url", url.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("active source: india_db (INDIA)"));
}

#[test]
fn switch_surfaces_backend_rejections() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/db/switch")
        .match_query(mockito::Matcher::Any)
        .with_status(400)
        .with_body(r#"{"status":"error","message":"Invalid or unloaded DB source."}"#)
        .create();

    let url = server.url();
    railwatch()
        .args(["switch", "cg", "--url", url.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("switch rejected: Invalid or unloaded DB source."));
}

#[test]
fn switch_validates_the_source_argument() {
    railwatch()
        .args(["switch", "mars"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid"));
}
