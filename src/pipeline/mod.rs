pub mod finder;

pub use finder::TileLayerFinder;
