use crate::table::row::{ScalingRecord, ScalingRow};
use regex::Regex;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Failure to turn a scaling table into a [`ScalingRecord`].
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("parse error at {}:{line}: {reason}: {text:?}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
        text: String,
    },

    #[error("{} contains no data rows", path.display())]
    Empty { path: PathBuf },

    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

/// Read and parse a scaling table from disk.
///
/// Expected columns (whitespace-separated, no header):
/// x  aux  y
///
/// Example:
/// 4   128   1532.7
pub fn parse_table_file(path: &Path) -> Result<ScalingRecord, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let record = parse_table_str(&text, path)?;
    debug!(path = %path.display(), rows = record.len(), "loaded scaling table");
    Ok(record)
}

/// Parse table text; `origin` only names the source in errors.
pub fn parse_table_str(text: &str, origin: &Path) -> Result<ScalingRecord, LoadError> {
    // Exactly three non-blank fields with arbitrary spacing around them.
    let re = Regex::new(r"^\s*(\S+)\s+(\S+)\s+(\S+)\s*$")?;

    let mut out = ScalingRecord::new();
    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let parse_error = |reason: String| LoadError::Parse {
            path: origin.to_path_buf(),
            line: lno,
            reason,
            text: trimmed.to_string(),
        };

        let caps = match re.captures(trimmed) {
            Some(c) => c,
            None => {
                let found = trimmed.split_whitespace().count();
                return Err(parse_error(format!("expected 3 fields, found {}", found)));
            }
        };

        let mut fields = [0.0f64; 3];
        for (idx, (slot, name)) in fields.iter_mut().zip(["x", "aux", "y"]).enumerate() {
            let raw = caps.get(idx + 1).map(|m| m.as_str()).unwrap_or_default();
            *slot = raw
                .parse::<f64>()
                .map_err(|e| parse_error(format!("bad {} value {:?}: {}", name, raw, e)))?;
        }

        out.push(ScalingRow {
            x: fields[0],
            aux: fields[1],
            y: fields[2],
        });
    }

    if out.is_empty() {
        return Err(LoadError::Empty {
            path: origin.to_path_buf(),
        });
    }

    Ok(out)
}
