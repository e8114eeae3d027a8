/// Terrain tiles - square height grids over the world XZ plane
///
/// A terrain tile covers `[origin, origin + size)` in world X/Z and stores
/// one `f32` height per sample, `res` world units apart. Lines run along X,
/// elements within a line along Z.

use glam::{DVec2, DVec3, UVec2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use crate::camera::BoundingBox;
use crate::engine_bail;
use crate::error::Result;
use super::tile::Tile;
use super::tile_info::{TileGenerator, TileInfo};

/// Slack for coordinates that land on a sample boundary
const GRID_EPSILON: f64 = 1e-9;

/// Largest element count a terrain tile may hold (1 GiB of heights)
pub const MAX_TERRAIN_ELEMENTS: usize = 1 << 28;

/// Height tile over the world XZ plane
pub type TerrainTile = Tile<TerrainTileInfo>;

// ===== CONFIG =====

/// Terrain tile layout
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTileConfig {
    /// World-space X/Z of the first sample
    pub origin: DVec2,
    /// World-space extent along X and Z
    pub size: DVec2,
    /// Sample spacing in world units
    pub resolution: f64,
}

impl Default for TerrainTileConfig {
    fn default() -> Self {
        Self {
            origin: DVec2::ZERO,
            size: DVec2::splat(64.0),
            resolution: 1.0,
        }
    }
}

// ===== HEIGHT GENERATOR =====

/// Seeded height source: uniform heights in `[0, 1)`
pub struct HeightGenerator {
    rng: ChaCha8Rng,
}

impl TileGenerator<u64, f32> for HeightGenerator {
    fn from_seed(seed: &u64) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(*seed) }
    }

    fn generate(&mut self, elems: &mut [f32]) {
        for height in elems.iter_mut() {
            *height = self.rng.random::<f32>();
        }
    }
}

// ===== TERRAIN TILE INFO =====

#[derive(Debug, Clone, PartialEq)]
pub struct TerrainTileInfo {
    origin: DVec2,
    size: DVec2,
    res: f64,
}

impl TerrainTileInfo {
    pub fn new(config: &TerrainTileConfig) -> Result<Self> {
        if !config.origin.is_finite() {
            engine_bail!("terraview::TerrainTileInfo", InvalidConfig =>
                "Tile origin must be finite, got {}", config.origin);
        }
        if !config.size.is_finite() || config.size.min_element() <= 0.0 {
            engine_bail!("terraview::TerrainTileInfo", InvalidConfig =>
                "Tile size must be positive, got {}", config.size);
        }
        validate_layout(config.size, config.resolution)?;

        Ok(Self {
            origin: config.origin,
            size: config.size,
            res: config.resolution,
        })
    }

    pub fn origin(&self) -> DVec2 {
        self.origin
    }

    pub fn size(&self) -> DVec2 {
        self.size
    }

    /// Samples per axis: `x` lines, `y` elements per line
    pub fn samples(&self) -> UVec2 {
        let count = |extent: f64| sample_count(extent, self.res) as u32;
        UVec2::new(count(self.size.x), count(self.size.y))
    }

    /// World-space box of the tile for a height range
    pub fn bounds(&self, min_height: f64, max_height: f64) -> BoundingBox {
        let tail = self.tail_pos();
        BoundingBox::new(
            DVec3::new(self.origin.x, min_height, self.origin.y),
            DVec3::new(tail.x, max_height, tail.y),
        )
    }

    /// Sample cell of a world position, `None` for non-finite input
    fn cell(&self, coord: &DVec2) -> Option<(i64, i64)> {
        if !coord.is_finite() {
            return None;
        }
        // Rounding in `origin + n * res` grows with the magnitude of the
        // coordinates, so the snapping slack does too.
        let magnitude = coord.abs().max(self.origin.abs());
        let slack = GRID_EPSILON + magnitude * (4.0 * f64::EPSILON / self.res);
        let cell = ((*coord - self.origin) / self.res + slack).floor();
        Some((cell.x as i64, cell.y as i64))
    }
}

impl TileInfo for TerrainTileInfo {
    type Coordinate = DVec2;
    type TileSeed = u64;
    type TileElement = f32;
    type Generator = HeightGenerator;

    fn get_linear(&self, coord: &DVec2) -> Option<usize> {
        let (i, j) = self.cell(coord)?;
        let samples = self.samples();
        if i < 0 || j < 0 || i >= i64::from(samples.x) || j >= i64::from(samples.y) {
            return None;
        }
        Some(i as usize * samples.y as usize + j as usize)
    }

    fn get_block(&self, coord: &DVec2) -> Option<UVec2> {
        let (i, j) = self.cell(coord)?;
        let samples = self.samples();
        if i < 0 || j < 0 || i > i64::from(samples.x) || j > i64::from(samples.y) {
            return None;
        }
        Some(UVec2::new(i as u32, j as u32))
    }

    fn nelement(&self) -> usize {
        let samples = self.samples();
        samples.x as usize * samples.y as usize
    }

    fn init_pos(&self) -> DVec2 {
        self.origin
    }

    fn tail_pos(&self) -> DVec2 {
        self.origin + self.samples().as_dvec2() * self.res
    }

    fn get_resolution(&self, lod_level: u32) -> f64 {
        self.res * 2f64.powi(lod_level.min(i32::MAX as u32) as i32)
    }

    fn resolution(&self) -> f64 {
        self.res
    }

    fn set_resolution(&mut self, res: f64) {
        self.res = res;
    }

    fn check_resolution(&self, res: f64) -> Result<()> {
        validate_layout(self.size, res)
    }

    fn line_pitch(&self) -> usize {
        self.samples().y as usize
    }
}

/// Samples along one axis, at least one
fn sample_count(extent: f64, res: f64) -> f64 {
    (extent / res + GRID_EPSILON).floor().max(1.0)
}

/// Reject spacings whose grid cannot be addressed or stored
fn validate_layout(size: DVec2, res: f64) -> Result<()> {
    if !res.is_finite() || res <= 0.0 {
        engine_bail!("terraview::TerrainTileInfo", InvalidConfig =>
            "Tile resolution must be positive, got {}", res);
    }

    let lines = sample_count(size.x, res);
    let per_line = sample_count(size.y, res);
    let elements = (lines <= f64::from(u32::MAX) && per_line <= f64::from(u32::MAX))
        .then(|| (lines as usize).checked_mul(per_line as usize))
        .flatten()
        .filter(|&n| n <= MAX_TERRAIN_ELEMENTS);
    if elements.is_none() {
        engine_bail!("terraview::TerrainTileInfo", InvalidConfig =>
            "Resolution {} over {} needs {} x {} samples, over the {} element limit",
            res, size, lines, per_line, MAX_TERRAIN_ELEMENTS);
    }
    Ok(())
}

#[cfg(test)]
#[path = "terrain_tile_info_tests.rs"]
mod tests;
