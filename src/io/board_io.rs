use std::fs;
use std::path::{Path, PathBuf};

use log::error;
use rand::Rng;
use serde::Deserialize;
use serde_yaml_ng::{Mapping, Value};

use crate::io::legacy::{self, LegacyError};
use crate::model::config::{BoardConfig, ConfigDocument};
use crate::model::palette::{self, PaletteError};

/// Error type for board file I/O
#[derive(Debug, thiserror::Error)]
pub enum BoardError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml_ng::Error,
    },
    #[error("{path} does not have a valid xban format")]
    InvalidFormat { path: PathBuf },
    #[error("{path} has too many yaml documents")]
    TooManyDocuments { path: PathBuf },
    #[error(transparent)]
    Palette(#[from] PaletteError),
    #[error("{path} is not a legacy xban project: {source}")]
    Legacy { path: PathBuf, source: LegacyError },
    #[error("could not serialize board: {0}")]
    Serialize(serde_yaml_ng::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Read a board file and parse every yaml document in it.
pub fn read_documents(path: &Path) -> Result<Vec<Value>, BoardError> {
    let text = fs::read_to_string(path).map_err(|e| BoardError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_documents(path, &text)
}

/// Parse a yaml stream into its documents.
///
/// Input with no yaml content (blank or comments only) is an empty stream,
/// not a single null document. An explicit `null` or `---` still parses as
/// one null document and stays invalid downstream.
pub fn parse_documents(path: &Path, text: &str) -> Result<Vec<Value>, BoardError> {
    if blank_stream(text) {
        return Ok(Vec::new());
    }
    let mut docs = Vec::new();
    for document in serde_yaml_ng::Deserializer::from_str(text) {
        let value = Value::deserialize(document).map_err(|e| BoardError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        docs.push(value);
    }
    Ok(docs)
}

/// Whether the text holds only blank lines and full-line comments. A plain
/// scalar cannot begin with `#`, so a line whose first non-blank character
/// is `#` is always a comment at the top level.
fn blank_stream(text: &str) -> bool {
    text.lines()
        .all(|line| matches!(line.trim_start().chars().next(), None | Some('#')))
}

/// Classify a parsed document stream into the canonical `[config, content]`
/// board document.
///
/// Rules, applied in order:
/// 1. an empty stream becomes a fresh board named after the file;
/// 2. any non-mapping document makes the file invalid;
/// 3. a stream whose first document carries `xban_config` is already
///    canonical and passes through unchanged, inner shape untouched;
/// 4. two or more documents without a config are refused;
/// 5. the sole remaining mapping is either a legacy project (converted) or
///    a bare content mapping, which gets a synthesized config with one
///    randomly drawn color per column.
pub fn normalize_board<R: Rng + ?Sized>(
    path: &Path,
    docs: Vec<Value>,
    rng: &mut R,
) -> Result<Vec<Value>, BoardError> {
    if docs.is_empty() {
        return Ok(vec![
            config_value(BoardConfig::new(file_title(path)))?,
            Value::Mapping(Mapping::new()),
        ]);
    }
    if !docs.iter().all(Value::is_mapping) {
        return Err(BoardError::InvalidFormat {
            path: path.to_path_buf(),
        });
    }
    if docs[0].get("xban_config").is_some() {
        return Ok(docs);
    }
    if docs.len() > 1 {
        return Err(BoardError::TooManyDocuments {
            path: path.to_path_buf(),
        });
    }

    let mut docs = docs;
    let content = docs.remove(0);
    if content.get("project_info").is_some() {
        let project = legacy::project_from_value(content).map_err(|e| BoardError::Legacy {
            path: path.to_path_buf(),
            source: e,
        })?;
        return Ok(legacy::into_board(project).to_documents());
    }

    let column_count = content.as_mapping().map(Mapping::len).unwrap_or(0);
    let colors = palette::sample_colors(rng, column_count)?;
    let mut config = BoardConfig::new(file_title(path));
    config.board_color = colors
        .iter()
        .map(|color| color.as_str().to_string())
        .collect();
    Ok(vec![config_value(config)?, content])
}

/// Load a board file and normalize it into the canonical document pair.
///
/// This is the lossy boundary above the file layer: every failure is logged
/// here and reported as an empty document list, never raised.
pub fn load_board<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Vec<Value> {
    let docs = match read_documents(path) {
        Ok(docs) => docs,
        Err(e) => {
            error!("{}", e);
            return Vec::new();
        }
    };
    match normalize_board(path, docs, rng) {
        Ok(docs) => docs,
        Err(e) => {
            error!("{}", e);
            Vec::new()
        }
    }
}

/// Serialize a document list as sequential yaml documents in block style,
/// separated by `---`, key order as given.
pub fn serialize_documents(docs: &[Value]) -> Result<String, BoardError> {
    let mut out = String::new();
    for (i, doc) in docs.iter().enumerate() {
        if i > 0 {
            out.push_str("---\n");
        }
        out.push_str(&serde_yaml_ng::to_string(doc).map_err(BoardError::Serialize)?);
    }
    Ok(out)
}

/// Serialize and write a board document list, truncating the file.
pub fn write_board(path: &Path, docs: &[Value]) -> Result<(), BoardError> {
    let text = serialize_documents(docs)?;
    fs::write(path, text).map_err(|e| BoardError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Best-effort save: write failures are logged and swallowed.
pub fn save_board(path: &Path, docs: &[Value]) {
    if let Err(e) = write_board(path, docs) {
        error!("{}", e);
    }
}

/// Board title for files without a config: the file stem.
fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn config_value(config: BoardConfig) -> Result<Value, BoardError> {
    serde_yaml_ng::to_value(ConfigDocument {
        xban_config: config,
    })
    .map_err(BoardError::Serialize)
}
