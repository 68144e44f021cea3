//! Action catalog: the external implementations under diagnosis
//!
//! The catalog file is a JSON array of action entries. Each entry names an
//! executable; the harness runs it with the sandbox as working directory and
//! hands it the assembled input as a JSON object on stdin. The catalog is
//! produced by whatever provisioned the actions, so unknown fields are
//! tolerated and entries without a name are ignored.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::common::{Error, Result};
use crate::harness::outcome::{ActionOutcome, FailureKind, FailureRecord};

/// How many trailing stderr lines to keep as failure context
const STDERR_TAIL_LINES: usize = 10;

/// One catalog entry: an action and the executable implementing it
#[derive(Debug, Clone)]
pub struct ActionSpec {
    pub name: String,
    pub command: String,
    pub args: Vec<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
struct RawEntry {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    command: String,
    #[serde(default)]
    args: Vec<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ActionSpec {
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            description: None,
        }
    }

    /// Invoke the action with `input` as its JSON stdin payload.
    ///
    /// Blocks until the action exits; every breakdown is captured in the
    /// returned outcome rather than raised. Parsing of the raw output is the
    /// caller's concern.
    pub fn invoke(&self, input: &Map<String, Value>, workdir: &Path) -> ActionOutcome {
        let program = match self.resolve_command() {
            Ok(program) => program,
            Err(e) => {
                return ActionOutcome::failed(FailureRecord::new(FailureKind::Spawn, e.to_string()))
            }
        };

        let mut child = match Command::new(&program)
            .args(&self.args)
            .current_dir(workdir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) => {
                return ActionOutcome::failed(FailureRecord::new(
                    FailureKind::Spawn,
                    format!("failed to spawn '{}': {e}", program.display()),
                ))
            }
        };

        let mut failure = None;
        if let Some(mut stdin) = child.stdin.take() {
            let payload = Value::Object(input.clone()).to_string();
            if let Err(e) = stdin.write_all(payload.as_bytes()) {
                // An action that exits without reading stdin closes the pipe
                // early; that alone says nothing about its result.
                if e.kind() != io::ErrorKind::BrokenPipe {
                    failure = Some(FailureRecord::new(
                        FailureKind::Io,
                        format!("failed to write action input: {e}"),
                    ));
                }
            }
        }

        let output = match child.wait_with_output() {
            Ok(output) => output,
            Err(e) => {
                return ActionOutcome::failed(FailureRecord::new(
                    FailureKind::Io,
                    format!("failed to collect action output: {e}"),
                ))
            }
        };

        let raw_output = String::from_utf8_lossy(&output.stdout).trim().to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let failure = failure.or_else(|| classify_exit(output.status, &stderr));

        ActionOutcome {
            raw_output,
            stderr,
            parsed: None,
            parse_error: None,
            failure,
        }
    }

    /// Resolve the configured command to something spawnable.
    ///
    /// Bare names are looked up on PATH; anything with a path separator is
    /// used as given.
    fn resolve_command(&self) -> Result<PathBuf> {
        let command = Path::new(&self.command);
        if command.is_absolute() || command.components().count() > 1 {
            return Ok(command.to_path_buf());
        }
        which::which(&self.command).map_err(|_| Error::ActionCommandNotFound {
            action: self.name.clone(),
            command: self.command.clone(),
        })
    }
}

fn classify_exit(status: ExitStatus, stderr: &str) -> Option<FailureRecord> {
    if status.success() {
        return None;
    }
    let record = match status.code() {
        Some(code) => FailureRecord::new(
            FailureKind::Exit,
            format!("action exited with status {code}"),
        ),
        None => FailureRecord::new(FailureKind::Signal, terminated_message(status)),
    };
    Some(match stderr_tail(stderr) {
        Some(tail) => record.with_context(tail),
        None => record,
    })
}

#[cfg(unix)]
fn terminated_message(status: ExitStatus) -> String {
    use std::os::unix::process::ExitStatusExt;
    match status.signal() {
        Some(signal) => format!("action terminated by signal {signal}"),
        None => "action terminated abnormally".to_string(),
    }
}

#[cfg(not(unix))]
fn terminated_message(_status: ExitStatus) -> String {
    "action terminated abnormally".to_string()
}

/// Last few stderr lines, the closest thing to a traceback an opaque
/// executable offers
fn stderr_tail(stderr: &str) -> Option<String> {
    if stderr.is_empty() {
        return None;
    }
    let lines: Vec<&str> = stderr.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    Some(lines[start..].join("\n"))
}

/// All known action implementations, keyed by action identifier
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    actions: BTreeMap<String, ActionSpec>,
}

impl ActionCatalog {
    /// Load a catalog from a JSON file.
    ///
    /// A missing file is an error; a present file with unusable entries is
    /// not. Duplicate names keep the last entry, matching how the catalog's
    /// producers overwrite actions.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::CatalogMissing(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::file_read(&path.display().to_string(), &e.to_string()))?;
        let entries: Vec<RawEntry> = serde_json::from_str(&content)
            .map_err(|e| Error::catalog_parse(&path.display().to_string(), &e.to_string()))?;

        let mut actions = BTreeMap::new();
        for entry in entries {
            let Some(name) = entry.name else { continue };
            actions.insert(
                name.clone(),
                ActionSpec {
                    name,
                    command: entry.command,
                    args: entry.args,
                    description: entry.description,
                },
            );
        }
        Ok(Self { actions })
    }

    /// Build a catalog programmatically
    pub fn from_specs(specs: Vec<ActionSpec>) -> Self {
        let mut actions = BTreeMap::new();
        for spec in specs {
            actions.insert(spec.name.clone(), spec);
        }
        Self { actions }
    }

    pub fn get(&self, name: &str) -> Option<&ActionSpec> {
        self.actions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Action names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.actions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
