//! Unit tests for the CLI commands and census loading.

use super::commands::{derive_census_name, run_connect};
use super::{
    CensusArgs, Cli, CliError, Command, ComponentSummary, ConnectCommand, ExecutionSummary,
    render_summary, run_cli,
};

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::Parser;
use rstest::rstest;
use sigforest_core::{ConnectReport, ConnectorError};
use sigforest_providers_necklace::NecklaceError;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[rstest]
#[case::override_name("/tmp/census.txt", Some("override"), "override")]
#[case::stem_with_extension("/tmp/census.txt", None, "census")]
#[case::stem_without_extension("/tmp/pentachora", None, "pentachora")]
#[case::missing_stem("", None, "census")]
fn derive_census_name_selects_expected_name(
    #[case] raw_path: &str,
    #[case] override_name: Option<&'static str>,
    #[case] expected: &str,
) {
    let name = derive_census_name(Path::new(raw_path), override_name);
    assert_eq!(name, expected);
}

#[rstest]
fn components_lists_keys_in_input_order() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "small.txt", "0011 001\n01\n")?;
    let summary = run_cli(components(path))?;

    assert_eq!(summary.source, "small");
    assert_eq!(summary.items, 3);
    assert!(summary.report.is_none());
    assert!(!summary.connected());
    let keys: Vec<&str> = summary
        .components
        .iter()
        .map(|component| component.key.as_str())
        .collect();
    assert_eq!(keys, ["0011", "001", "01"]);
    Ok(())
}

#[rstest]
fn connect_defaults_targets_from_first_component() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "ones.txt", "001\n01\n0001\n")?;
    let summary = run_cli(Cli {
        command: Command::Connect(connect(path)),
    })?;

    assert!(summary.connected());
    assert_eq!(
        summary.components,
        [ComponentSummary {
            key: "001".into(),
            size: 3,
        }]
    );
    let report = summary.report.ok_or("connect must report")?;
    assert_eq!(report.merges, 2);
    Ok(())
}

#[rstest]
fn connect_rejects_unreachable_targets() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "ones.txt", "001\n")?;
    let mut command = connect(path);
    command.target_ones = Some(5);
    command.target_len = Some(2);

    let err = run_connect_expecting_error(command, "five ones cannot fit in two beads");
    assert!(matches!(
        err,
        CliError::Walk(NecklaceError::InvalidTarget { ones: 5, len: 2 })
    ));
    assert_eq!(err.code(), None);
    Ok(())
}

#[rstest]
fn connect_rejects_zero_attempts() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "ones.txt", "001\n")?;
    let mut command = connect(path);
    command.attempts = 0;

    let err = run_connect_expecting_error(command, "zero attempts must fail");
    assert!(matches!(
        err,
        CliError::Connector(ConnectorError::InvalidAttempts { got: 0 })
    ));
    assert_eq!(err.code(), Some("CONNECT_INVALID_ATTEMPTS"));
    Ok(())
}

#[rstest]
fn connect_rejects_zero_step_limit() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "ones.txt", "001\n01\n")?;
    let mut command = connect(path);
    command.step_limit = 0;

    let err = run_connect_expecting_error(command, "zero step limit must fail");
    assert!(matches!(
        err,
        CliError::Connector(ConnectorError::InvalidStepLimit { got: 0 })
    ));
    assert_eq!(err.code(), Some("CONNECT_INVALID_STEP_LIMIT"));
    Ok(())
}

#[rstest]
fn malformed_first_key_fails_connect_but_not_components() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "bad.txt", "10\n01\n")?;

    let err = run_connect_expecting_error(connect(path.clone()), "non-canonical key must fail");
    match err {
        CliError::Reconstruction(ref inner) => assert_eq!(inner.key(), "10"),
        ref other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.code(), Some("KEYSET_RECONSTRUCTION"));

    let summary = run_cli(components(path))?;
    assert_eq!(summary.components.len(), 2);
    Ok(())
}

#[rstest]
fn missing_census_reports_path() {
    let dir = temp_dir();
    let path = dir.path().join("absent.txt");
    let err = match run_cli(components(path.clone())) {
        Ok(_) => panic!("missing file must fail"),
        Err(err) => err,
    };
    match err {
        CliError::Io { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[rstest]
fn blank_census_is_rejected() -> TestResult {
    let dir = temp_dir();
    let path = create_census(&dir, "blank.txt", "\n   \n\t\n")?;
    let err = run_connect_expecting_error(connect(path), "blank census must fail");
    assert!(matches!(err, CliError::EmptyCensus { ref name } if name == "blank"));
    assert_eq!(err.to_string(), "census `blank` contains no keys");
    Ok(())
}

#[rstest]
fn render_summary_includes_search_statistics() -> TestResult {
    let summary = ExecutionSummary {
        source: "demo".into(),
        items: 4,
        components: vec![
            ComponentSummary {
                key: "001".into(),
                size: 3,
            },
            ComponentSummary {
                key: "0111".into(),
                size: 1,
            },
        ],
        report: Some(ConnectReport {
            sweep_merges: 1,
            coarse_rounds: 0,
            final_rounds: 2,
            merges: 2,
            stalled_walks: 7,
            components: 2,
        }),
    };
    let mut buffer = Vec::new();
    render_summary(&summary, &mut buffer)?;
    let text = String::from_utf8(buffer)?;
    assert_eq!(
        text,
        "census: demo\nitems: 4\ncomponents: 2\nconnected: no\n\
         rounds: coarse 0, final 2\nmerges: 2\nstalled walks: 7\n\
         001\t3\n0111\t1\n"
    );
    Ok(())
}

#[rstest]
fn clap_parses_connect_options() -> TestResult {
    let cli = Cli::try_parse_from([
        "sigforest",
        "connect",
        "census.txt",
        "--target-ones",
        "2",
        "--seed",
        "7",
        "--name",
        "run",
    ])?;
    let Command::Connect(command) = cli.command else {
        panic!("expected the connect command");
    };
    assert_eq!(command.census.path, PathBuf::from("census.txt"));
    assert_eq!(command.census.name.as_deref(), Some("run"));
    assert_eq!(command.target_ones, Some(2));
    assert_eq!(command.target_len, None);
    assert_eq!(command.seed, Some(7));
    assert_eq!(command.attempts, 100);
    assert_eq!(command.coarse_threshold, 10);
    assert_eq!(command.max_rounds, 1_000);
    assert_eq!(command.step_limit, 5_000_000);
    Ok(())
}

#[rstest]
#[case::bad_number(&["sigforest", "connect", "census.txt", "--attempts", "many"])]
#[case::missing_path(&["sigforest", "components"])]
#[case::unknown_command(&["sigforest", "shuffle", "census.txt"])]
fn clap_rejects_invalid_arguments(#[case] args: &[&str]) {
    assert!(Cli::try_parse_from(args).is_err());
}

fn components(path: PathBuf) -> Cli {
    Cli {
        command: Command::Components(CensusArgs { path, name: None }),
    }
}

fn connect(path: PathBuf) -> ConnectCommand {
    ConnectCommand {
        census: CensusArgs { path, name: None },
        target_ones: None,
        target_len: None,
        seed: Some(17),
        attempts: 5,
        coarse_threshold: 10,
        max_rounds: 20,
        step_limit: 1_000_000,
    }
}

fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

fn create_census(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

fn run_connect_expecting_error(command: ConnectCommand, panic_msg: &str) -> CliError {
    match run_connect(command) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
