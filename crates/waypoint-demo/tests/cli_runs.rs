use clap::Parser;
use waypoint_demo::{Cli, DemoError, run};

fn run_args(args: &[&str]) -> Result<String, DemoError> {
    let cli = Cli::try_parse_from(std::iter::once("waypoint-demo").chain(args.iter().copied()))
        .expect("arguments parse");
    let mut out = Vec::new();
    run(cli, &mut out)?;
    Ok(String::from_utf8(out).expect("utf-8 output"))
}

#[test]
fn walkthrough_with_toml_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waypoint.toml");
    std::fs::write(
        &path,
        r#"
[display]
whitelist = ["DesktopLandscape"]

[tutorial]
auto_start = false

[highlight]
transparency = 0.6
target_padding = 4.0
"#,
    )
    .unwrap();

    let text = run_args(&[
        "walkthrough",
        "--config",
        path.to_str().unwrap(),
        "--width",
        "1024",
        "--height",
        "768",
    ])
    .unwrap();
    assert!(text.starts_with("viewport 1024x768 -> DesktopLandscape"));
    assert!(text.contains("Restart Tutorial"));
    assert!(!text.contains("auto-started"));
    assert!(text.contains("tutorial complete: 10 steps, volume 25%"));
}

#[test]
fn walkthrough_with_json_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("waypoint.json");
    std::fs::write(&path, r#"{"tutorial": {"auto_start_delay_ms": 500}}"#).unwrap();

    let text = run_args(&["walkthrough", "--config", path.to_str().unwrap()]).unwrap();
    assert!(text.contains("auto-started after 500ms"));
}

#[test]
fn invalid_config_exits_with_usage_code() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[highlight]\ntransparency = 1.5\n").unwrap();

    let err = run_args(&["walkthrough", "--config", path.to_str().unwrap()]).unwrap_err();
    assert!(matches!(err, DemoError::Config(_)));
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn classify_json_with_whitelist() {
    let text = run_args(&[
        "classify",
        "390",
        "844",
        "--whitelist",
        "tablet-landscape,desktop-portrait",
        "--json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["detected"], "MobilePortrait");
    assert_eq!(value["resolved"], "TabletLandscape");
}

#[test]
fn scale_json() {
    let text = run_args(&["scale", "3840", "2160", "--json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let scale = value["scale"].as_f64().unwrap();
    assert!((scale - 2.0).abs() < 1e-9);
}
