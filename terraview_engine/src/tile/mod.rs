//! Tile module - generic lazily generated element tiles
//!
//! A `Tile<I>` is parameterized by a `TileInfo` policy that fixes its
//! coordinate, seed and element types along with its generator. Terrain
//! height tiles are the built-in policy.

mod tile;
mod tile_info;
mod tile_io;
mod terrain_tile_info;

pub use tile::{Tile, TileState};
pub use tile_info::{TileGenerator, TileInfo};
pub use tile_io::IoBlock;
pub use terrain_tile_info::{
    HeightGenerator, TerrainTile, TerrainTileConfig, TerrainTileInfo, MAX_TERRAIN_ELEMENTS,
};
