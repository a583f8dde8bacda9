use crate::model::board::{Board, Column};
use crate::util::unicode::{display_width, truncate_to_width, wrap_to_width};

/// Display cells each column gets in the rendered board.
pub const COLUMN_WIDTH: usize = 24;

const GUTTER: &str = "  ";

// ---------------------------------------------------------------------------
// Board rendering
// ---------------------------------------------------------------------------

/// Format a board for the terminal: title and description up top, then the
/// columns side by side, each a fixed COLUMN_WIDTH cells wide.
pub fn format_board(board: &Board) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(board.title.clone());
    if !board.description.is_empty() {
        lines.push(format!("  {}", board.description));
    }
    lines.push(String::new());

    if board.columns.is_empty() {
        lines.push("(no columns)".to_string());
        return lines;
    }

    let headers: Vec<String> = board.columns.iter().map(column_header).collect();
    lines.push(join_row(&headers));

    let rules: Vec<String> = board
        .columns
        .iter()
        .map(|_| "-".repeat(COLUMN_WIDTH))
        .collect();
    lines.push(join_row(&rules));

    let cells: Vec<Vec<String>> = board.columns.iter().map(column_cell).collect();
    let rows = cells.iter().map(Vec::len).max().unwrap_or(0);
    for row in 0..rows {
        let row_cells: Vec<String> = cells
            .iter()
            .map(|cell| cell.get(row).cloned().unwrap_or_default())
            .collect();
        lines.push(join_row(&row_cells));
    }

    lines
}

/// Column heading, truncated so a long title cannot push its neighbors over.
fn column_header(column: &Column) -> String {
    let header = format!("{} ({})", column.title, column.color.as_str());
    truncate_to_width(&header, COLUMN_WIDTH)
}

/// One column's tiles as bullet lines, wrapped to the column width.
fn column_cell(column: &Column) -> Vec<String> {
    let mut out = Vec::new();
    for tile in &column.tiles {
        for (i, piece) in wrap_to_width(tile, COLUMN_WIDTH - 2).iter().enumerate() {
            let prefix = if i == 0 { "- " } else { "  " };
            out.push(format!("{}{}", prefix, piece));
        }
    }
    out
}

/// Pad each cell to COLUMN_WIDTH display cells and join with the gutter.
/// Padding is width-aware so wide glyphs keep the columns aligned.
fn join_row(cells: &[String]) -> String {
    let mut row = String::new();
    for cell in cells {
        row.push_str(cell);
        let pad = COLUMN_WIDTH.saturating_sub(display_width(cell));
        row.push_str(&" ".repeat(pad));
        row.push_str(GUTTER);
    }
    row.trim_end().to_string()
}
