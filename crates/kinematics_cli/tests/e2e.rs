//! End-to-end tests for the kinematics binary.
//!
//! Every run uses `--fast` so ticks do not sleep.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a Command for the kinematics binary with a clean environment.
#[allow(deprecated)]
fn kinematics_cmd() -> Command {
    let mut cmd = Command::cargo_bin("kinematics").unwrap();
    for var in [
        "RUST_LOG",
        "KINEMATICS_CONFIG",
        "KINEMATICS_BOUNCE",
        "KINEMATICS_MASS",
        "KINEMATICS_TICK_MS",
        "KINEMATICS_LOG_FORMAT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

// =============================================================================
// Runs
// =============================================================================

mod runs {
    use super::*;

    #[test]
    fn test_free_fall_settles() {
        kinematics_cmd()
            .args(["free-fall", "--fast"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Settled after"))
            .stdout(predicate::str::contains("Mass: 10 kg | Bouncyness: 0.70"))
            .stdout(predicate::str::contains("Velocity = 0.000 m/s"));
    }

    #[test]
    fn test_projectile_settles() {
        kinematics_cmd()
            .args(["projectile", "--fast"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Y Distance = 485.000 m"))
            .stdout(predicate::str::contains("Mass").not());
    }

    #[test]
    fn test_mass_flag_is_displayed() {
        kinematics_cmd()
            .args(["free-fall", "--fast", "--mass", "35"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Mass: 35 kg"));
    }

    #[test]
    fn test_every_prints_progress() {
        let output = kinematics_cmd()
            .args(["projectile", "--fast", "--every", "50"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        assert!(stdout.matches("X Distance").count() > 2);
    }

    #[test]
    fn test_json_summary() {
        let output = kinematics_cmd()
            .args(["projectile", "--fast", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["variant"], "projectile");
        assert_eq!(report["summary"]["settled"], true);
        assert_eq!(report["summary"]["frame"]["position"]["y"], 485.0);
        assert_eq!(report["summary"]["snapshot"]["distance"]["kind"], "displacement");
        assert!(report["summary"]["bounces"].as_u64().unwrap() > 5);
    }

    #[test]
    fn test_ascii_render_draws_the_ball() {
        kinematics_cmd()
            .args(["free-fall", "--fast", "--render", "ascii", "--columns", "30", "--rows", "10"])
            .assert()
            .success()
            .stdout(predicate::str::is_match(r"\| *o *\|").unwrap())
            .stdout(predicate::str::contains("+============================+"));
    }

    #[test]
    fn test_tick_budget_exhaustion_fails() {
        kinematics_cmd()
            .args(["free-fall", "--fast", "--max-ticks", "5"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Stopped after 5 ticks"))
            .stderr(predicate::str::contains("did not settle within 5 ticks"));
    }

    #[test]
    fn test_real_time_ticking() {
        kinematics_cmd()
            .args(["projectile", "--tick-ms", "1", "--max-ticks", "3"])
            .assert()
            .failure()
            .stdout(predicate::str::contains("Stopped after 3 ticks"));
    }

    #[test]
    fn test_most_elastic_projectile_settles_within_default_budget() {
        kinematics_cmd()
            .args(["projectile", "--fast", "--bounce", "0.99"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Settled after"));
    }

    #[test]
    fn test_most_elastic_free_fall_settles_within_default_budget() {
        kinematics_cmd()
            .args(["free-fall", "--fast", "--bounce", "0.99"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Bouncyness: 0.99"));
    }

    #[test]
    fn test_final_line_is_not_repeated() {
        let output = kinematics_cmd()
            .args(["projectile", "--fast", "--every", "1", "--max-ticks", "10"])
            .output()
            .unwrap();
        assert!(!output.status.success());
        let stdout = String::from_utf8(output.stdout).unwrap();
        // Initial frame plus one line per tick.
        assert_eq!(stdout.matches("X Distance").count(), 11);
    }

    #[test]
    fn test_final_line_printed_when_not_on_interval() {
        let output = kinematics_cmd()
            .args(["projectile", "--fast", "--every", "4", "--max-ticks", "10"])
            .output()
            .unwrap();
        let stdout = String::from_utf8(output.stdout).unwrap();
        // Steps 0, 4 and 8 from the sink, then step 10 as the final state.
        assert_eq!(stdout.matches("X Distance").count(), 4);
    }
}

// =============================================================================
// Configuration
// =============================================================================

mod configuration {
    use super::*;

    #[test]
    fn test_config_file_overrides_preset() {
        let file = config_file("bounce = 0.0\n");
        kinematics_cmd()
            .args(["free-fall", "--fast", "--config"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("(0 bounces"))
            .stdout(predicate::str::contains("Bouncyness: 0.00"));
    }

    #[test]
    fn test_flag_overrides_config_file() {
        let file = config_file("bounce = 0.0\n");
        kinematics_cmd()
            .args(["free-fall", "--fast", "--bounce", "0.5", "--config"])
            .arg(file.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("Bouncyness: 0.50"));
    }

    #[test]
    fn test_env_sets_bounce() {
        kinematics_cmd()
            .env("KINEMATICS_BOUNCE", "0.3")
            .args(["free-fall", "--fast"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Bouncyness: 0.30"));
    }

    #[test]
    fn test_invalid_scenario_is_rejected() {
        let file = config_file("gravity = -1.0\n");
        kinematics_cmd()
            .args(["projectile", "--fast", "--config"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("gravity must be positive"));
    }

    #[test]
    fn test_unknown_config_key_is_rejected() {
        let file = config_file("gravty = 1.0\n");
        kinematics_cmd()
            .args(["projectile", "--fast", "--config"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid config file"));
    }

    #[test]
    fn test_missing_config_file() {
        kinematics_cmd()
            .args(["projectile", "--fast", "--config", "/nonexistent/kinematics.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Cannot read config file"));
    }

    #[test]
    fn test_off_grid_file_bounce_is_rejected() {
        let file = config_file("bounce = 0.455\n");
        kinematics_cmd()
            .args(["projectile", "--fast", "--config"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("not a multiple of 0.01"));
    }

    #[test]
    fn test_file_mass_out_of_range_is_rejected() {
        let file = config_file("mass = 500\n");
        kinematics_cmd()
            .args(["free-fall", "--fast", "--config"])
            .arg(file.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("Mass must lie in [1, 50] kg, got 500"));
    }

    #[test]
    fn test_json_scenario_matches_effective_controls() {
        let file = config_file("bounce = 0.45\nmass = 40\n");
        let output = kinematics_cmd()
            .args(["free-fall", "--fast", "--json", "--config"])
            .arg(file.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["scenario"]["params"]["bounce"], report["bounce"]);
        assert_eq!(report["scenario"]["mass"], report["mass"]);
        assert_eq!(report["mass"], 40);
    }

    #[test]
    fn test_presets_output_is_a_valid_config() {
        let output = kinematics_cmd().args(["presets", "projectile"]).output().unwrap();
        assert!(output.status.success());
        let text = String::from_utf8(output.stdout).unwrap();

        let table: toml::Table = text.parse().unwrap();
        assert_eq!(table["gravity"].as_float(), Some(0.2));
        assert_eq!(table["initial"]["vy"].as_float(), Some(-8.0));

        let file = config_file(&text);
        kinematics_cmd()
            .args(["projectile", "--fast", "--config"])
            .arg(file.path())
            .assert()
            .success();
    }
}

// =============================================================================
// Logging
// =============================================================================

mod logging {
    use super::*;

    #[test]
    fn test_logs_go_to_stderr() {
        kinematics_cmd()
            .args(["-v", "free-fall", "--fast", "--json"])
            .assert()
            .success()
            .stderr(predicate::str::contains("run started"))
            .stdout(predicate::str::starts_with("{"));
    }

    #[test]
    fn test_json_log_format() {
        kinematics_cmd()
            .args(["-v", "--log-format", "json", "projectile", "--fast"])
            .assert()
            .success()
            .stderr(predicate::str::contains("\"level\":\"INFO\""));
    }

    #[test]
    fn test_quiet_by_default() {
        kinematics_cmd()
            .args(["free-fall", "--fast"])
            .assert()
            .success()
            .stderr(predicate::str::is_empty());
    }
}
