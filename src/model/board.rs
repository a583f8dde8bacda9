use indexmap::IndexMap;
use serde_yaml_ng::{Mapping, Value};

use crate::model::config::{BoardConfig, ConfigDocument};
use crate::model::palette::ColorName;

/// Error type for document/board conversion
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("expected a config and a content document, found {0}")]
    DocumentCount(usize),
    #[error("first document is not an xban_config mapping: {0}")]
    Config(serde_yaml_ng::Error),
    #[error("second document is not a column mapping: {0}")]
    Content(serde_yaml_ng::Error),
}

/// One named column of tiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub color: ColorName,
    pub tiles: Vec<String>,
}

impl Column {
    /// Create an empty column.
    pub fn new(title: impl Into<String>, color: ColorName) -> Column {
        Column {
            title: title.into(),
            color,
            tiles: Vec::new(),
        }
    }

    /// Append a tile at the bottom of the column.
    pub fn add_tile(&mut self, text: impl Into<String>) {
        self.tiles.push(text.into());
    }

    /// Remove and return the tile at `index`, if present.
    pub fn remove_tile(&mut self, index: usize) -> Option<String> {
        if index < self.tiles.len() {
            Some(self.tiles.remove(index))
        } else {
            None
        }
    }
}

/// In-memory board state: title, description, and ordered columns.
///
/// Each column carries its own color, so the board-color/column pairing
/// from the file format holds by construction here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub title: String,
    pub description: String,
    pub columns: Vec<Column>,
}

impl Board {
    /// Create a board with no columns.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Board {
        Board {
            title: title.into(),
            description: description.into(),
            columns: Vec::new(),
        }
    }

    /// Build a typed board from a canonical `[config, content]` pair.
    ///
    /// The document layer passes canonical files through untouched, so this
    /// is where hand-edited ones surface: a column whose tile list is null
    /// reads as empty, and a missing or unknown color name falls back to
    /// black rather than failing.
    pub fn from_documents(docs: &[Value]) -> Result<Board, DocumentError> {
        if docs.len() != 2 {
            return Err(DocumentError::DocumentCount(docs.len()));
        }
        let config: ConfigDocument =
            serde_yaml_ng::from_value(docs[0].clone()).map_err(DocumentError::Config)?;
        let content: IndexMap<String, Option<Vec<String>>> =
            serde_yaml_ng::from_value(docs[1].clone()).map_err(DocumentError::Content)?;

        let meta = config.xban_config;
        let columns = content
            .into_iter()
            .enumerate()
            .map(|(i, (title, tiles))| Column {
                title,
                color: meta
                    .board_color
                    .get(i)
                    .and_then(|name| ColorName::parse(name))
                    .unwrap_or_default(),
                tiles: tiles.unwrap_or_default(),
            })
            .collect();

        Ok(Board {
            title: meta.title,
            description: meta.description,
            columns,
        })
    }

    /// Rebuild the `[config, content]` document pair from board state.
    ///
    /// Key order follows board order. Content is a mapping keyed by column
    /// title, so duplicate titles collapse to a single entry holding the
    /// last column's tiles.
    pub fn to_documents(&self) -> Vec<Value> {
        let mut meta = Mapping::new();
        meta.insert(Value::from("title"), Value::from(self.title.as_str()));
        meta.insert(
            Value::from("description"),
            Value::from(self.description.as_str()),
        );
        let colors: Vec<Value> = self
            .columns
            .iter()
            .map(|column| Value::from(column.color.as_str()))
            .collect();
        meta.insert(Value::from("board_color"), Value::Sequence(colors));

        let mut config = Mapping::new();
        config.insert(Value::from("xban_config"), Value::Mapping(meta));

        let mut content = Mapping::new();
        for column in &self.columns {
            let tiles: Vec<Value> = column
                .tiles
                .iter()
                .map(|tile| Value::from(tile.as_str()))
                .collect();
            content.insert(Value::from(column.title.as_str()), Value::Sequence(tiles));
        }

        vec![Value::Mapping(config), Value::Mapping(content)]
    }

    /// The config half this board would serialize to.
    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            title: self.title.clone(),
            description: self.description.clone(),
            board_color: self
                .columns
                .iter()
                .map(|column| column.color.as_str().to_string())
                .collect(),
        }
    }

    // ── column operations ──────────────────────────────────────────

    /// Append an empty column with the default color, returning it for
    /// further setup.
    pub fn push_column(&mut self, title: impl Into<String>) -> &mut Column {
        self.columns.push(Column::new(title, ColorName::default()));
        // Just pushed, so the vec is non-empty.
        self.columns.last_mut().unwrap()
    }

    /// Insert a column at `index`, clamped to the current column count.
    pub fn insert_column(&mut self, index: usize, column: Column) {
        let index = index.min(self.columns.len());
        self.columns.insert(index, column);
    }

    /// Remove and return the column at `index`, if present.
    pub fn remove_column(&mut self, index: usize) -> Option<Column> {
        if index < self.columns.len() {
            Some(self.columns.remove(index))
        } else {
            None
        }
    }

    /// Move a column to a new position. The target index is the drop
    /// position and is clamped. Returns false when `from` does not exist.
    pub fn move_column(&mut self, from: usize, to: usize) -> bool {
        if from >= self.columns.len() {
            return false;
        }
        let column = self.columns.remove(from);
        let index = to.min(self.columns.len());
        self.columns.insert(index, column);
        true
    }

    /// Recolor the column at `index`. Returns false when it does not exist.
    pub fn set_column_color(&mut self, index: usize, color: ColorName) -> bool {
        match self.columns.get_mut(index) {
            Some(column) => {
                column.color = color;
                true
            }
            None => false,
        }
    }

    /// Move a tile between positions, possibly across columns. The tile is
    /// removed first and the target index clamped to the target column's
    /// new length. Returns false when the source location does not exist.
    pub fn move_tile(
        &mut self,
        from_col: usize,
        from_tile: usize,
        to_col: usize,
        to_tile: usize,
    ) -> bool {
        if from_col >= self.columns.len() || to_col >= self.columns.len() {
            return false;
        }
        let Some(text) = self.columns[from_col].remove_tile(from_tile) else {
            return false;
        };
        let target = &mut self.columns[to_col];
        let index = to_tile.min(target.tiles.len());
        target.tiles.insert(index, text);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn docs(config: &str, content: &str) -> Vec<Value> {
        vec![
            serde_yaml_ng::from_str(config).unwrap(),
            serde_yaml_ng::from_str(content).unwrap(),
        ]
    }

    fn sample_board() -> Board {
        let mut board = Board::new("project", "demo");
        let todo = board.push_column("todo");
        todo.color = ColorName::Red;
        todo.add_tile("task1");
        todo.add_tile("task2");
        let done = board.push_column("finished");
        done.color = ColorName::Teal;
        done.add_tile("task3");
        board
    }

    // ── from_documents ─────────────────────────────────────────────

    #[test]
    fn from_documents_reads_a_canonical_pair() {
        let docs = docs(
            "xban_config:\n  title: project\n  description: demo\n  board_color: [red, teal]\n",
            "todo: [task1, task2]\nfinished: [task3]\n",
        );
        let board = Board::from_documents(&docs).unwrap();
        assert_eq!(board, sample_board());
    }

    #[test]
    fn from_documents_preserves_column_order() {
        let docs = docs(
            "xban_config:\n  title: t\n  description: ''\n  board_color: [blue, green, red]\n",
            "zebra: []\nalpha: []\nmiddle: []\n",
        );
        let board = Board::from_documents(&docs).unwrap();
        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["zebra", "alpha", "middle"]);
    }

    #[test]
    fn unknown_color_falls_back_to_black() {
        let docs = docs(
            "xban_config:\n  title: t\n  board_color: [chartreuse]\n",
            "todo: []\n",
        );
        let board = Board::from_documents(&docs).unwrap();
        assert_eq!(board.columns[0].color, ColorName::Black);
    }

    #[test]
    fn missing_color_falls_back_to_black() {
        let docs = docs(
            "xban_config:\n  title: t\n  board_color: [red]\n",
            "todo: []\nextra: []\n",
        );
        let board = Board::from_documents(&docs).unwrap();
        assert_eq!(board.columns[0].color, ColorName::Red);
        assert_eq!(board.columns[1].color, ColorName::Black);
    }

    #[test]
    fn null_tile_list_reads_as_empty_column() {
        let docs = docs("xban_config:\n  title: t\n", "todo:\n");
        let board = Board::from_documents(&docs).unwrap();
        assert!(board.columns[0].tiles.is_empty());
    }

    #[test]
    fn wrong_document_count_is_rejected() {
        let one = vec![serde_yaml_ng::from_str::<Value>("a: 1").unwrap()];
        assert!(matches!(
            Board::from_documents(&one),
            Err(DocumentError::DocumentCount(1))
        ));
    }

    #[test]
    fn non_config_first_document_is_rejected() {
        let docs = docs("just_a_key: 1\n", "todo: []\n");
        assert!(matches!(
            Board::from_documents(&docs),
            Err(DocumentError::Config(_))
        ));
    }

    #[test]
    fn non_string_tiles_are_rejected() {
        let docs = docs("xban_config:\n  title: t\n", "todo: [1, 2]\n");
        assert!(matches!(
            Board::from_documents(&docs),
            Err(DocumentError::Content(_))
        ));
    }

    // ── to_documents ───────────────────────────────────────────────

    #[test]
    fn to_documents_round_trips() {
        let board = sample_board();
        let docs = board.to_documents();
        assert_eq!(Board::from_documents(&docs).unwrap(), board);
    }

    #[test]
    fn to_documents_writes_config_keys_in_order() {
        let docs = sample_board().to_documents();
        let meta = docs[0]
            .get("xban_config")
            .and_then(Value::as_mapping)
            .unwrap();
        let keys: Vec<&str> = meta.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["title", "description", "board_color"]);
    }

    #[test]
    fn to_documents_aligns_colors_with_columns() {
        let docs = sample_board().to_documents();
        let colors = docs[0]
            .get("xban_config")
            .and_then(|m| m.get("board_color"))
            .and_then(Value::as_sequence)
            .unwrap();
        let names: Vec<&str> = colors.iter().filter_map(Value::as_str).collect();
        assert_eq!(names, vec!["red", "teal"]);
        let content = docs[1].as_mapping().unwrap();
        let titles: Vec<&str> = content.iter().filter_map(|(k, _)| k.as_str()).collect();
        assert_eq!(titles, vec!["todo", "finished"]);
    }

    #[test]
    fn duplicate_column_titles_collapse_on_serialization() {
        let mut board = Board::new("dup", "");
        board.push_column("same").add_tile("first");
        board.push_column("same").add_tile("second");
        let docs = board.to_documents();
        let content = docs[1].as_mapping().unwrap();
        assert_eq!(content.len(), 1);
        let tiles = docs[1].get("same").and_then(Value::as_sequence).unwrap();
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].as_str(), Some("second"));
    }

    #[test]
    fn config_mirrors_board_state() {
        let config = sample_board().config();
        assert_eq!(config.title, "project");
        assert_eq!(config.board_color, vec!["red", "teal"]);
    }

    // ── column and tile operations ─────────────────────────────────

    #[test]
    fn push_column_defaults_to_black() {
        let mut board = Board::new("b", "");
        board.push_column("new");
        assert_eq!(board.columns[0].color, ColorName::Black);
        assert!(board.columns[0].tiles.is_empty());
    }

    #[test]
    fn insert_column_clamps_index() {
        let mut board = sample_board();
        board.insert_column(99, Column::new("last", ColorName::Blue));
        assert_eq!(board.columns[2].title, "last");
    }

    #[test]
    fn remove_column_returns_it() {
        let mut board = sample_board();
        let removed = board.remove_column(0).unwrap();
        assert_eq!(removed.title, "todo");
        assert_eq!(board.columns.len(), 1);
        assert!(board.remove_column(5).is_none());
    }

    #[test]
    fn move_column_reorders() {
        let mut board = sample_board();
        assert!(board.move_column(0, 1));
        let titles: Vec<&str> = board.columns.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["finished", "todo"]);
        assert!(!board.move_column(7, 0));
    }

    #[test]
    fn move_column_clamps_target() {
        let mut board = sample_board();
        assert!(board.move_column(0, 99));
        assert_eq!(board.columns[1].title, "todo");
    }

    #[test]
    fn set_column_color_in_place() {
        let mut board = sample_board();
        assert!(board.set_column_color(0, ColorName::Green));
        assert_eq!(board.columns[0].color, ColorName::Green);
        assert!(!board.set_column_color(9, ColorName::Green));
    }

    #[test]
    fn move_tile_across_columns() {
        let mut board = sample_board();
        assert!(board.move_tile(0, 0, 1, 0));
        assert_eq!(board.columns[0].tiles, vec!["task2"]);
        assert_eq!(board.columns[1].tiles, vec!["task1", "task3"]);
    }

    #[test]
    fn move_tile_within_a_column() {
        let mut board = sample_board();
        assert!(board.move_tile(0, 0, 0, 1));
        assert_eq!(board.columns[0].tiles, vec!["task2", "task1"]);
    }

    #[test]
    fn move_tile_clamps_drop_index() {
        let mut board = sample_board();
        assert!(board.move_tile(1, 0, 0, 99));
        assert_eq!(board.columns[0].tiles, vec!["task1", "task2", "task3"]);
        assert!(board.columns[1].tiles.is_empty());
    }

    #[test]
    fn move_tile_rejects_missing_source() {
        let mut board = sample_board();
        assert!(!board.move_tile(0, 9, 1, 0));
        assert!(!board.move_tile(5, 0, 1, 0));
        assert_eq!(board, sample_board());
    }

    #[test]
    fn remove_tile_by_index() {
        let mut board = sample_board();
        assert_eq!(board.columns[0].remove_tile(1).as_deref(), Some("task2"));
        assert!(board.columns[0].remove_tile(5).is_none());
    }
}
