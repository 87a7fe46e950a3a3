use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// `metar` binary with config and environment isolated from the host.
fn metar(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("metar").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join(".config"))
        .env_remove("METAR_PROVIDER")
        .env_remove("METAR_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn no_code_is_a_usage_error() {
    let home = TempDir::new().unwrap();

    metar(&home)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("ICAO code not specified"))
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn invalid_codes_only_is_a_usage_error() {
    let home = TempDir::new().unwrap();

    metar(&home)
        .args(["abc", "toolong", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ICAO code not specified"));
}

#[test]
fn link_prints_normalized_request_url() {
    let home = TempDir::new().unwrap();

    metar(&home)
        .args(["link", "epwa", "kjfk", "EPWA", "xyz"])
        .assert()
        .success()
        .stdout(concat!(
            "https://aviationweather.gov/api/data/metar",
            "?ids=EPWA%2CKJFK&format=raw&taf=true\n"
        ));
}

#[test]
fn link_honours_provider_and_notaf() {
    let home = TempDir::new().unwrap();

    metar(&home)
        .args(["link", "EPWA", "--notaf", "--provider", "aviationweather-classic"])
        .assert()
        .success()
        .stdout(concat!(
            "https://www.aviationweather.gov/metar/data",
            "?ids=EPWA&format=raw&hours=0&layout=off&taf=off\n"
        ));
}

#[test]
fn link_provider_from_environment() {
    let home = TempDir::new().unwrap();

    metar(&home)
        .env("METAR_PROVIDER", "aviationweather-legacy")
        .args(["link", "LKPR"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "https://aviationweather.gov/cgi-bin/data/metar.php?ids=LKPR",
        ));
}

#[test]
fn unknown_provider_fails() {
    let home = TempDir::new().unwrap();

    metar(&home)
        .args(["link", "EPWA", "--provider", "openweather"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown provider 'openweather'"));
}
