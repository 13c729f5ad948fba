//! Replay tests - scripts and config files loaded from disk

use std::sync::Arc;

use quill::cli::CliArgs;
use quill::config::WidgetConfig;
use quill::editable::{MemoryClipboard, Monospace};
use quill::script::{replay, Report, Script, Widget};

use clap::Parser;

fn run_files(config_yaml: &str, script_yaml: &str, extra_args: &[&str]) -> Report {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    let script_path = dir.path().join("script.yaml");
    std::fs::write(&config_path, config_yaml).unwrap();
    std::fs::write(&script_path, script_yaml).unwrap();

    let mut argv = vec![
        "quill".to_string(),
        script_path.display().to_string(),
        "--config".to_string(),
        config_path.display().to_string(),
    ];
    argv.extend(extra_args.iter().map(|s| s.to_string()));
    let args = CliArgs::try_parse_from(argv).unwrap();

    let mut config = WidgetConfig::load_from(args.config.as_deref().unwrap());
    args.apply_to(&mut config);
    let script = Script::load(&args.script).unwrap();
    let widget = Widget::from_config(&config, Arc::new(Monospace::new(config.char_width)));
    replay(&script, widget, &mut MemoryClipboard::new())
}

// ========================================================================
// Text area scripts
// ========================================================================

#[test]
fn test_replay_area_from_files() {
    let report = run_files(
        "wrap_width: 30\ndisplayed_rows: 2\nchar_width: 6.0\nline_height: 9.0\n",
        r#"
steps:
  - type: "hello world"
  - command: insert_newline
  - type: "again"
  - move: { to: document_start }
  - move: { to: line_end, shift: true }
"#,
        &[],
    );
    assert_eq!(report.text, "hello world\nagain");
    assert_eq!(report.selection.as_deref(), Some("hello"));
    assert_eq!(report.cursor, [0, 5]);
    assert_eq!(report.first_visible_row, 0);
    assert_eq!(report.row_count, 4);
}

#[test]
fn test_cli_width_overrides_config() {
    let report = run_files(
        "wrap_width: 30\nchar_width: 6.0\n",
        "text: \"abcdefgh\"\nsteps: []\n",
        &["--width", "12"],
    );
    let contents: Vec<&str> = report.rows.iter().map(|r| r.content.as_str()).collect();
    assert_eq!(contents, vec!["ab", "cd", "ef", "gh"]);
}

#[test]
fn test_click_and_rows_steps() {
    let report = run_files(
        "wrap_width: 600\ndisplayed_rows: 5\nchar_width: 6.0\nline_height: 9.0\n",
        r#"
text: "zero\none\ntwo\nthree"
steps:
  - rows: 2
  - click: { x: 7, y: 0 }
"#,
        &[],
    );
    assert_eq!(report.first_visible_row, 2);
    assert_eq!(report.cursor, [2, 1]);
    assert_eq!(report.rows.len(), 2);
}

// ========================================================================
// Text field scripts
// ========================================================================

#[test]
fn test_replay_validated_field() {
    let report = run_files(
        "char_width: 1.0\nwrap_width: 4\n",
        r#"
steps:
  - type: "-12a34"
  - command: select_all
  - command: copy
  - move: { to: line_start }
"#,
        &["--validator", "integer"],
    );
    assert_eq!(report.text, "-1234");
    assert_eq!(report.row_count, 1);
    assert_eq!(report.cursor, [0, 0]);
    assert_eq!(report.rows[0].content, "-123");
    assert!(report.selection.is_none());
}

#[test]
fn test_report_serializes_to_json() {
    let report = run_files(
        "char_width: 1.0\nwrap_width: 10\n",
        "text: \"42\"\nsteps: []\n",
        &["--single-line"],
    );
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["text"], "42");
    assert_eq!(json["cursor"], serde_json::json!([0, 2]));
    assert_eq!(json["segments"][0]["tone"], "normal");
    assert_eq!(json["rows"][0]["content"], "42");
}

// ========================================================================
// Errors
// ========================================================================

#[test]
fn test_malformed_script_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.yaml");
    std::fs::write(&path, "steps:\n  - teleport: 3\n").unwrap();
    let err = Script::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("bad.yaml"));
}
