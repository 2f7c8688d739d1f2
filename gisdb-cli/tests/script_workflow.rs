//! Integration tests for the script workflow.
//!
//! These tests run the `gisdb` binary end to end: a config file pointing the
//! diagnostic log into a temporary directory, a record file, and a command
//! script whose log is checked afterwards.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const RECORDS: &str = "FEATURE_ID|FEATURE_NAME|FEATURE_CLASS|STATE_ALPHA|STATE_NUMERIC|COUNTY_NAME|COUNTY_NUMERIC|PRIMARY_LAT_DMS|PRIM_LONG_DMS|PRIM_LAT_DEC|PRIM_LONG_DEC|SOURCE_LAT_DMS|SOURCE_LONG_DMS|SOURCE_LAT_DEC|SOURCE_LONG_DEC|ELEV_IN_M|ELEV_IN_FT|MAP_NAME|DATE_CREATED|DATE_EDITED
1483492|Monterey|Populated Place|VA|51|Highland|091|382443N|0793452W|38.4120661|-79.5811570|||||879|2884|Monterey|09/28/1979|
1480000|Hightown|Populated Place|VA|51|Highland|091|382845N|0794011W|38.4791667|-79.6697222|||||1219|3999|Hightown|09/28/1979|
";

/// Offset of the first record: the header line plus its newline.
const FIRST_OFFSET: u64 = 265;

/// Temporary workspace with a config file and a record file.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let workspace = Self { dir };

        let config = format!(
            "[index]\ninitial_capacity = 64\nload_limit = 0.7\n\n\
             [cache]\ncapacity = 15\n\n\
             [logging]\ndirectory = {}\nfile = diagnostics.log\n",
            workspace.path("logs").display()
        );
        fs::write(workspace.config_path(), config).unwrap();
        fs::write(workspace.path("records.txt"), RECORDS).unwrap();
        workspace
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn config_path(&self) -> PathBuf {
        self.path("config.ini")
    }

    fn write_script(&self, body: &str) -> PathBuf {
        let script = body.replace("RECORDS", &self.path("records.txt").display().to_string());
        let path = self.path("script.txt");
        fs::write(&path, script).unwrap();
        path
    }

    fn gisdb(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_gisdb"))
            .arg("--config")
            .arg(self.config_path())
            .args(args)
            .current_dir(self.dir.path())
            .output()
            .unwrap()
    }

    fn run_script(&self, body: &str) -> Output {
        let script = self.write_script(body);
        self.gisdb(&[
            "run",
            &path_str(&self.path("db.txt")),
            &path_str(&script),
            &path_str(&self.path("log.txt")),
        ])
    }
}

fn path_str(path: &Path) -> String {
    path.display().to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// ─────────────────────────────────────────────────────────────────────────────
// Script runs
// ─────────────────────────────────────────────────────────────────────────────

const SCRIPT: &str = "; Highland County, VA
world\t0794130W\t0792630W\t381500N\t383000N
import\tRECORDS
what_is\tMonterey\tVA
what_is_at\t382845N\t0794011W
what_is_in\t382443N\t0793452W\t10\t10
show\tpool
quit
";

#[test]
fn test_script_run_writes_log() {
    let ws = Workspace::new();
    let output = ws.run_script(SCRIPT);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let log = fs::read_to_string(ws.path("log.txt")).unwrap();
    assert!(log.starts_with("GIS Program\n"));
    assert!(log.contains("Command 1: world\t0794130W"));
    assert!(log.contains("Imported Features by name: 2\n"));
    assert!(log.contains("Imported Locations:\t   2\n"));
    assert!(log.contains("Average name length:\t   8\n"));
    assert!(log.contains(&format!(
        "\t{}:  Highland  (79d 34m 52s West, 38d 24m 43s North)\n",
        FIRST_OFFSET
    )));
    assert!(log.contains(":  Hightown  Highland  VA\n"));
    assert!(log.contains(
        "The following 1 feature(s) were found in (79d 34m 52s West +/- 10, 38d 24m 43s North +/- 10)"
    ));
    assert!(log.contains(&format!("MRU\n\t{} 1483492|Monterey|", FIRST_OFFSET)));
    assert!(log.contains("Terminating execution of commands.\nEnd time: "));

    assert!(stdout(&output).contains("Executed 7 command(s)"));
}

#[test]
fn test_script_run_creates_database() {
    let ws = Workspace::new();
    let output = ws.run_script(SCRIPT);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let db = fs::read_to_string(ws.path("db.txt")).unwrap();
    assert_eq!(db, RECORDS);
}

#[test]
fn test_script_run_writes_diagnostic_log() {
    let ws = Workspace::new();
    let output = ws.run_script(SCRIPT);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let diagnostics = fs::read_to_string(ws.path("logs").join("diagnostics.log")).unwrap();
    assert!(diagnostics.contains("Import complete"));
    assert!(diagnostics.contains("Script finished"));
}

#[test]
fn test_bad_commands_do_not_stop_the_session() {
    let ws = Workspace::new();
    let output = ws.run_script(
        "world\t0794130W\t0792630W\t381500N\t383000N\n\
         import\tmissing.txt\n\
         frobnicate\n\
         import\tRECORDS\n\
         what_is\tHightown\tVA\n",
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let log = fs::read_to_string(ws.path("log.txt")).unwrap();
    assert!(log.contains("\tCommand failed: Failed to read missing.txt"));
    assert!(log.contains("Skipped: frobnicate\n"));
    assert!(log.contains("Imported Features by name: 2\n"));
    assert!(log.contains(":  Highland  (79d 40m 11s West, 38d 28m 45s North)\n"));
    assert!(!log.contains("Terminating execution"));

    assert!(stdout(&output).contains("(1 failed, 1 skipped)"));
}

#[test]
fn test_missing_script_fails() {
    let ws = Workspace::new();
    let output = ws.gisdb(&[
        "run",
        &path_str(&ws.path("db.txt")),
        &path_str(&ws.path("no_script.txt")),
        &path_str(&ws.path("log.txt")),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to read script"));
}

#[test]
fn test_invalid_config_fails() {
    let ws = Workspace::new();
    fs::write(ws.config_path(), "[index]\nload_limit = 2\n").unwrap();

    let output = ws.run_script(SCRIPT);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Configuration error"));
    assert!(stderr(&output).contains("load_limit"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Config commands
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_path_prints_override() {
    let ws = Workspace::new();
    let output = ws.gisdb(&["config", "path"]);

    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), path_str(&ws.config_path()));
}

#[test]
fn test_config_init_respects_existing_file() {
    let ws = Workspace::new();
    let before = fs::read_to_string(ws.config_path()).unwrap();

    let output = ws.gisdb(&["config", "init"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("already exists"));
    assert_eq!(fs::read_to_string(ws.config_path()).unwrap(), before);

    let output = ws.gisdb(&["config", "init", "--force"]);
    assert!(output.status.success());
    let written = fs::read_to_string(ws.config_path()).unwrap();
    assert!(written.contains("initial_capacity = 1024"));
    assert!(written.contains("capacity = 15"));
}

#[test]
fn test_config_show_reports_values() {
    let ws = Workspace::new();
    let output = ws.gisdb(&["config", "show"]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("initial_capacity = 64"));
    assert!(text.contains("load_limit = 0.7"));
    assert!(text.contains("file = diagnostics.log"));
}
