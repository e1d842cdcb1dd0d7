//! Source loading and input parsing helpers.

use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::{bail, Context, Result};
use is_terminal::IsTerminal;

/// Reads source code from `path`, or from piped stdin when no path is given.
pub fn read_source(path: Option<&str>) -> Result<String> {
    match path {
        Some(p) => read_source_file(p),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                bail!("Provide a Python file or pipe code via stdin");
            }
            let mut buf = String::new();
            stdin.lock().read_to_string(&mut buf).context("reading code from stdin")?;
            Ok(buf)
        }
    }
}

fn read_source_file(file_path: &str) -> Result<String> {
    let path = Path::new(file_path);

    if !path.exists() {
        bail!("Source file '{}' does not exist", file_path);
    }
    if !path.is_file() {
        bail!("'{}' is not a file", file_path);
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "py" | "pyw" | "txt" | "" => fs::read_to_string(path)
            .with_context(|| format!("Failed to read file '{}'", file_path)),
        _ => bail!(
            "Unsupported file type: .{}\nCurrently supported: .py, .pyw, .txt, and files without extension",
            extension
        ),
    }
}

/// Parses a `name=value` pair for `--input`. The value may be empty.
pub fn parse_input_pair(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", s));
    }
    Ok((name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_pairs() {
        assert_eq!(parse_input_pair("path=C:\\x=y"), Ok(("path".into(), "C:\\x=y".into())));
        assert_eq!(parse_input_pair("n="), Ok(("n".into(), String::new())));
        assert!(parse_input_pair("novalue").is_err());
        assert!(parse_input_pair("=1").is_err());
    }

    #[test]
    fn reads_python_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let py = dir.path().join("ok.py");
        fs::write(&py, "print(1)\n").unwrap();
        assert_eq!(read_source(py.to_str()).unwrap(), "print(1)\n");

        let bin = dir.path().join("image.png");
        fs::write(&bin, "x").unwrap();
        assert!(read_source(bin.to_str()).is_err());

        let missing = dir.path().join("missing.py");
        assert!(read_source(missing.to_str()).is_err());
    }
}
