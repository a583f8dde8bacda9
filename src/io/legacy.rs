use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_yaml_ng::Value;

use crate::model::board::{Board, Column};
use crate::model::palette::ColorName;

/// Error type for the legacy JSON project format
#[derive(Debug, thiserror::Error)]
pub enum LegacyError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{path} is not a legacy xban project: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Shape(serde_yaml_ng::Error),
    #[error("could not serialize legacy project: {0}")]
    Serialize(serde_json::Error),
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// The legacy single-object JSON project file, first-revision format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyProject {
    pub project_info: LegacyInfo,
    pub project_title: Vec<LegacyTitle>,
    pub project_content: Vec<LegacyTile>,
}

/// Board name, save timestamp, and per-column color names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyInfo {
    pub project_name: String,
    pub last_update: String,
    pub colcolor: Vec<String>,
}

/// One column header, positioned by column number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTitle {
    pub content: String,
    pub col: usize,
    pub comments: String,
}

/// One tile, positioned by column number and row within the column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyTile {
    pub content: String,
    pub col: usize,
    pub col_index: usize,
    pub comments: String,
}

/// Parse a legacy project out of an already-parsed yaml value.
///
/// JSON files come through the yaml reader (JSON is a yaml subset), so the
/// loader hands legacy candidates over as values rather than re-reading the
/// file.
pub fn project_from_value(value: Value) -> Result<LegacyProject, LegacyError> {
    serde_yaml_ng::from_value(value).map_err(LegacyError::Shape)
}

/// Convert a legacy project into a board.
///
/// Columns are ordered by `col` and take their color from `colcolor[col]`
/// (black when absent or unknown); tiles are ordered by `col_index` within
/// their column. `last_update` and the always-empty `comments` are dropped.
pub fn into_board(project: LegacyProject) -> Board {
    let LegacyProject {
        project_info,
        mut project_title,
        mut project_content,
    } = project;
    project_title.sort_by_key(|title| title.col);
    project_content.sort_by_key(|tile| (tile.col, tile.col_index));

    let mut board = Board::new(project_info.project_name, "");
    for title in project_title {
        let color = project_info
            .colcolor
            .get(title.col)
            .and_then(|name| ColorName::parse(name))
            .unwrap_or_default();
        let mut column = Column::new(title.content, color);
        column.tiles = project_content
            .iter()
            .filter(|tile| tile.col == title.col)
            .map(|tile| tile.content.clone())
            .collect();
        board.columns.push(column);
    }
    board
}

/// Export a board to the legacy format.
///
/// `last_update` is stamped with the current local time; `comments` fields
/// are always written empty.
pub fn from_board(board: &Board) -> LegacyProject {
    LegacyProject {
        project_info: LegacyInfo {
            project_name: board.title.clone(),
            last_update: Local::now().format("%X %x %Z").to_string(),
            colcolor: board
                .columns
                .iter()
                .map(|column| column.color.as_str().to_string())
                .collect(),
        },
        project_title: board
            .columns
            .iter()
            .enumerate()
            .map(|(col, column)| LegacyTitle {
                content: column.title.clone(),
                col,
                comments: String::new(),
            })
            .collect(),
        project_content: board
            .columns
            .iter()
            .enumerate()
            .flat_map(|(col, column)| {
                column
                    .tiles
                    .iter()
                    .enumerate()
                    .map(move |(col_index, tile)| LegacyTile {
                        content: tile.clone(),
                        col,
                        col_index,
                        comments: String::new(),
                    })
            })
            .collect(),
    }
}

/// Read a legacy JSON project file directly.
pub fn read_legacy(path: &Path) -> Result<LegacyProject, LegacyError> {
    let text = fs::read_to_string(path).map_err(|e| LegacyError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| LegacyError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write a legacy JSON project file, pretty-printed.
pub fn write_legacy(path: &Path, project: &LegacyProject) -> Result<(), LegacyError> {
    let text = serde_json::to_string_pretty(project).map_err(LegacyError::Serialize)?;
    fs::write(path, text).map_err(|e| LegacyError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
