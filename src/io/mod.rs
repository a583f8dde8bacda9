pub mod board_io;
pub mod legacy;

pub use board_io::{
    BoardError, load_board, normalize_board, parse_documents, read_documents, save_board,
    serialize_documents, write_board,
};
pub use legacy::{LegacyError, LegacyProject, read_legacy, write_legacy};
