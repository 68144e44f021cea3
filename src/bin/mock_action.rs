//! Mock action implementations for integration testing
//!
//! Behaves like a provisioned action executable: takes the action name as
//! its only argument, reads one JSON input object from stdin, does the work
//! relative to the current directory, and prints a JSON result to stdout.
//! On failure it writes a message to stderr and exits non-zero.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use regex::RegexBuilder;
use serde_json::{json, Map, Value};

fn main() {
    let name = std::env::args().nth(1).unwrap_or_default();

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).unwrap_or(0);
    let input: Map<String, Value> = serde_json::from_str::<Value>(&buffer)
        .ok()
        .and_then(|value| value.as_object().cloned())
        .unwrap_or_default();

    if name == "garbage output" {
        println!("no json here, just words");
        return;
    }

    match run_action(&name, &input) {
        Ok(output) => println!("{output}"),
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

fn run_action(name: &str, input: &Map<String, Value>) -> Result<Value, String> {
    match name {
        "list folder" => list_folder(input),
        "create folder" => create_folder(input),
        "delete folder" => delete_folder(input),
        "create text file" => create_text_file(input),
        "replace file str" => replace_file_str(input),
        "find file by name" => find_file_by_name(input),
        "find in file content" => find_in_file_content(input),
        "move or rename folder" => move_or_rename_folder(input),
        "add number" => add_number(input),
        "get current time" => Ok(get_current_time()),
        "read pdf file" => read_pdf_file(input),
        "always fail" => Err("forced failure for harness tests".to_string()),
        other => Err(format!("unknown mock action: {other}")),
    }
}

fn str_arg<'a>(input: &'a Map<String, Value>, key: &str) -> Result<&'a str, String> {
    input
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("missing or invalid '{key}' input"))
}

fn int_arg(input: &Map<String, Value>, key: &str) -> Result<i64, String> {
    input
        .get(key)
        .and_then(Value::as_i64)
        .ok_or_else(|| format!("missing or invalid '{key}' input"))
}

fn bool_arg(input: &Map<String, Value>, key: &str) -> bool {
    input.get(key).and_then(Value::as_bool).unwrap_or(false)
}

fn list_folder(input: &Map<String, Value>) -> Result<Value, String> {
    let path = str_arg(input, "path")?;
    let entries = fs::read_dir(path).map_err(|e| format!("list folder failed: {e}"))?;
    let mut contents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("list folder failed: {e}"))?;
        contents.push(entry.file_name().to_string_lossy().into_owned());
    }
    contents.sort();
    Ok(json!({"status": "success", "path": path, "contents": contents}))
}

fn create_folder(input: &Map<String, Value>) -> Result<Value, String> {
    let base = str_arg(input, "path")?;
    let name = str_arg(input, "folder_name")?;
    let target = Path::new(base).join(name);
    fs::create_dir_all(&target).map_err(|e| format!("create folder failed: {e}"))?;
    Ok(json!({"status": "success", "path": target.display().to_string()}))
}

fn delete_folder(input: &Map<String, Value>) -> Result<Value, String> {
    let path = str_arg(input, "path")?;
    fs::remove_dir_all(path).map_err(|e| format!("delete folder failed: {e}"))?;
    Ok(json!({"status": "success", "deleted": path}))
}

fn create_text_file(input: &Map<String, Value>) -> Result<Value, String> {
    let path = str_arg(input, "file_path")?;
    let content = str_arg(input, "file_content")?;
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent).map_err(|e| format!("create text file failed: {e}"))?;
    }
    fs::write(path, content).map_err(|e| format!("create text file failed: {e}"))?;
    Ok(json!({"status": "success", "path": path}))
}

fn replace_file_str(input: &Map<String, Value>) -> Result<Value, String> {
    let path = str_arg(input, "file_path")?;
    let search = str_arg(input, "search")?;
    let replace = str_arg(input, "replace")?;
    let ignore_case = bool_arg(input, "ignore_case");

    let contents = fs::read_to_string(path).map_err(|e| format!("replace failed: {e}"))?;
    let pattern = RegexBuilder::new(&regex::escape(search))
        .case_insensitive(ignore_case)
        .build()
        .map_err(|e| format!("replace failed: {e}"))?;

    let replacements = pattern.find_iter(&contents).count();
    let message = if replacements == 0 {
        "search string not found"
    } else {
        ""
    };
    let updated = pattern.replace_all(&contents, replace);
    fs::write(path, updated.as_bytes()).map_err(|e| format!("replace failed: {e}"))?;

    Ok(json!({"status": "success", "replacements": replacements, "message": message}))
}

fn find_file_by_name(input: &Map<String, Value>) -> Result<Value, String> {
    let base = str_arg(input, "path")?;
    let query = str_arg(input, "query")?;
    let mut matches = Vec::new();
    walk(Path::new(base), query, &mut matches)?;
    matches.sort();
    let matches: Vec<String> = matches
        .into_iter()
        .map(|p| p.display().to_string())
        .collect();
    Ok(json!({"status": "success", "matches": matches}))
}

fn walk(dir: &Path, query: &str, matches: &mut Vec<PathBuf>) -> Result<(), String> {
    let entries = fs::read_dir(dir).map_err(|e| format!("find failed in {}: {e}", dir.display()))?;
    for entry in entries {
        let entry = entry.map_err(|e| format!("find failed: {e}"))?;
        let path = entry.path();
        if path.is_dir() {
            walk(&path, query, matches)?;
        } else if entry.file_name().to_string_lossy().contains(query) {
            matches.push(path);
        }
    }
    Ok(())
}

fn find_in_file_content(input: &Map<String, Value>) -> Result<Value, String> {
    let path = str_arg(input, "file_path")?;
    let pattern = str_arg(input, "pattern")?;
    let ignore_case = bool_arg(input, "ignore_case");

    let contents = fs::read_to_string(path).map_err(|e| format!("search failed: {e}"))?;
    let needle = if ignore_case {
        pattern.to_lowercase()
    } else {
        pattern.to_string()
    };

    let mut matches = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        let haystack = if ignore_case {
            line.to_lowercase()
        } else {
            line.to_string()
        };
        if haystack.contains(&needle) {
            matches.push(format!("Line {}: {line}", index + 1));
        }
    }
    Ok(json!({"status": "success", "matches": matches}))
}

fn move_or_rename_folder(input: &Map<String, Value>) -> Result<Value, String> {
    let source = str_arg(input, "source")?;
    let target = str_arg(input, "target")?;
    if let Some(parent) = Path::new(target).parent() {
        fs::create_dir_all(parent).map_err(|e| format!("move failed: {e}"))?;
    }
    fs::rename(source, target).map_err(|e| format!("move failed: {e}"))?;
    Ok(json!({"status": "success", "old_path": source, "new_path": target}))
}

fn add_number(input: &Map<String, Value>) -> Result<Value, String> {
    let a = int_arg(input, "a")?;
    let b = int_arg(input, "b")?;
    Ok(json!({"result": a + b}))
}

fn get_current_time() -> Value {
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    json!({"time": now})
}

fn read_pdf_file(input: &Map<String, Value>) -> Result<Value, String> {
    let path = str_arg(input, "file_path")?;
    let bytes = fs::read(path).map_err(|e| format!("read pdf failed: {e}"))?;
    if !bytes.starts_with(b"%PDF") {
        return Err(format!("decode error: {path} does not look like a PDF document"));
    }

    let text = String::from_utf8_lossy(&bytes);
    let mut elements = Vec::new();
    for line in text.lines() {
        if !line.contains(") Tj") {
            continue;
        }
        if let (Some(open), Some(close)) = (line.find('('), line.rfind(')')) {
            if open < close {
                elements.push(json!({"text": &line[open + 1..close], "page": 1}));
            }
        }
    }
    if elements.is_empty() {
        return Err(format!("decode error: no text content found in {path}"));
    }
    Ok(json!({"status": "success", "content": {"elements": elements}}))
}
