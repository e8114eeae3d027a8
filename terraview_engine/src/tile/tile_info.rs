/// TileInfo and TileGenerator traits - the per-tile-type policy a Tile is built on

use glam::UVec2;
use crate::engine_bail;
use crate::error::Result;

/// Deterministic content generator, built from a tile's seed
///
/// The same seed must always produce the same buffer contents.
pub trait TileGenerator<Seed, Element> {
    /// Create a generator for one tile
    fn from_seed(seed: &Seed) -> Self;

    /// Fill the whole buffer in place
    fn generate(&mut self, elems: &mut [Element]);
}

/// Coordinate/shape policy of a tile type
///
/// Maps domain coordinates to linear storage indices (row-major: lines of
/// contiguous elements) and to block coordinates used for I/O ranges. The
/// policy owns the current resolution; a `Tile` changes it through
/// `set_resolution`.
pub trait TileInfo {
    /// Domain coordinate (e.g. a world-space position)
    type Coordinate;
    /// Generation input
    type TileSeed;
    /// Stored element
    type TileElement: Clone + Default;
    /// Content generator for this tile type
    type Generator: TileGenerator<Self::TileSeed, Self::TileElement>;

    /// Linear storage index of `coord`, `None` outside the tile
    ///
    /// Every returned index is `< nelement()`.
    fn get_linear(&self, coord: &Self::Coordinate) -> Option<usize>;

    /// Block coordinate of `coord`: `x` is the line, `y` the element within
    /// the line. Valid up to and including `tail_pos()`, so a block range
    /// `[get_block(a), get_block(b))` is half-open.
    fn get_block(&self, coord: &Self::Coordinate) -> Option<UVec2>;

    /// Number of elements at the current resolution
    fn nelement(&self) -> usize;

    /// First coordinate covered by the tile
    fn init_pos(&self) -> Self::Coordinate;

    /// One-past-the-end coordinate of the tile
    fn tail_pos(&self) -> Self::Coordinate;

    /// Sample spacing at a level of detail (0 = current resolution)
    fn get_resolution(&self, lod_level: u32) -> f64;

    /// Current sample spacing
    fn resolution(&self) -> f64;

    /// Change the sample spacing; `nelement()` follows
    fn set_resolution(&mut self, res: f64);

    /// Whether `set_resolution(res)` would leave a storable layout
    ///
    /// Called before any tile contents are discarded. The default only
    /// rejects non-finite and non-positive spacings; policies whose element
    /// count grows with `1 / res` should also bound it.
    fn check_resolution(&self, res: f64) -> Result<()> {
        if !res.is_finite() || res <= 0.0 {
            engine_bail!("terraview::TileInfo", InvalidConfig =>
                "Tile resolution must be positive, got {}", res);
        }
        Ok(())
    }

    /// Elements between the starts of two consecutive lines
    fn line_pitch(&self) -> usize {
        match (self.get_block(&self.init_pos()), self.get_block(&self.tail_pos())) {
            (Some(init), Some(tail)) => tail.y.saturating_sub(init.y) as usize,
            _ => 0,
        }
    }
}
