//! Files written by the finder: the two layer tables and per-layer metadata documents

pub mod documents;
pub mod tabular;

pub use documents::{metadata_path, write_feature_document};
pub use tabular::{
    ensure_csv_extension, load_dataset, read_groups, read_tiles, save_dataset, write_groups,
    write_tiles, GROUP_HEADERS, TILE_HEADERS,
};
