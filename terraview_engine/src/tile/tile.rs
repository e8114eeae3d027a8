/// Tile - lazily generated, lazily allocated element buffer over a TileInfo policy
///
/// A tile owns its policy, its seed and a flat buffer of `nelement()`
/// elements. Nothing is allocated until first access:
/// - reads (and `get_ioblock`) allocate and run the generator
/// - writes allocate with default elements and skip the generator
///
/// Generation happens inside `read(&self)`, so the buffer sits behind a
/// `RefCell`. A tile is therefore not `Sync`; share it across threads
/// behind a lock.

use std::cell::{Cell, RefCell};
use crate::{engine_debug, engine_trace};
use crate::error::Result;
use super::tile_info::{TileGenerator, TileInfo};
use super::tile_io::IoBlock;

/// Buffer lifecycle of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TileState {
    /// No buffer
    Empty,
    /// Buffer sized by a resolution change, contents not generated yet
    Reserved,
    /// Buffer allocated by a write, generator skipped
    Written,
    /// Buffer filled by the generator
    Generated,
}

pub struct Tile<I: TileInfo> {
    shape: I,
    seed: I::TileSeed,
    elems: RefCell<Vec<I::TileElement>>,
    state: Cell<TileState>,
    /// Per-level-of-detail buffers, dropped on every resolution change
    lods: Vec<Vec<I::TileElement>>,
}

impl<I: TileInfo> Tile<I> {
    pub fn new(shape: I, seed: I::TileSeed) -> Self {
        Self {
            shape,
            seed,
            elems: RefCell::new(Vec::new()),
            state: Cell::new(TileState::Empty),
            lods: Vec::new(),
        }
    }

    pub fn state(&self) -> TileState {
        self.state.get()
    }

    pub fn shape_info(&self) -> &I {
        &self.shape
    }

    pub fn seed(&self) -> &I::TileSeed {
        &self.seed
    }

    // ===== ELEMENT ACCESS =====

    /// Store `elem` at `coord`.
    ///
    /// Allocates the buffer (default elements) if needed but never runs
    /// the generator. Returns `false` if `coord` is outside the tile.
    pub fn write(&mut self, coord: &I::Coordinate, elem: I::TileElement) -> bool {
        let Some(index) = self.shape.get_linear(coord) else {
            return false;
        };

        let elems = self.elems.get_mut();
        match self.state.get() {
            TileState::Empty => {
                Self::allocate(&self.shape, elems);
                self.state.set(TileState::Written);
            }
            TileState::Reserved => self.state.set(TileState::Written),
            TileState::Written | TileState::Generated => {}
        }

        match elems.get_mut(index) {
            Some(slot) => {
                *slot = elem;
                true
            }
            None => false,
        }
    }

    /// Element at `coord`, generating the tile contents on first access.
    ///
    /// Returns `None` if `coord` is outside the tile.
    pub fn read(&self, coord: &I::Coordinate) -> Option<I::TileElement> {
        let index = self.shape.get_linear(coord)?;
        self.ensure_generated();
        self.elems.borrow().get(index).cloned()
    }

    /// Strided view over the block range `[get_block(mins), get_block(maxs))`.
    ///
    /// Generates the tile contents on first access. Returns an empty block
    /// when either bound is outside the tile or the range has no extent.
    /// Blocks are always served from the full-resolution buffer;
    /// `_lod_level` is reserved.
    pub fn get_ioblock(
        &mut self,
        mins: &I::Coordinate,
        maxs: &I::Coordinate,
        _lod_level: u32,
    ) -> IoBlock<'_, I::TileElement> {
        self.ensure_generated();

        let (Some(lo), Some(hi), Some(start)) = (
            self.shape.get_block(mins),
            self.shape.get_block(maxs),
            self.shape.get_linear(mins),
        ) else {
            engine_trace!("terraview::Tile", "I/O block rejected: bound outside tile");
            return IoBlock::empty();
        };

        if hi.x <= lo.x || hi.y <= lo.y {
            engine_trace!("terraview::Tile", "I/O block rejected: empty range {} -> {}", lo, hi);
            return IoBlock::empty();
        }

        let line_count = (hi.x - lo.x) as usize;
        let line_elems = (hi.y - lo.y) as usize;
        let pitch = self.shape.line_pitch();

        let elems = self.elems.get_mut();
        match elems.get(start..) {
            Some(data) => IoBlock::new(data, line_elems, pitch, line_count),
            None => IoBlock::empty(),
        }
    }

    // ===== RESOLUTION =====

    /// Change the sample spacing.
    ///
    /// Discards all contents (including written elements) and every level
    /// of detail, then reserves a buffer for the new `nelement()`. The
    /// generator runs again on the next read. Spacings the policy rejects
    /// (see `TileInfo::check_resolution`) leave the tile untouched.
    pub fn adjust_resolution(&mut self, res: f64) -> Result<()> {
        self.shape.check_resolution(res)?;

        let elems = self.elems.get_mut();
        elems.clear();
        self.lods.clear();

        self.shape.set_resolution(res);
        Self::allocate(&self.shape, elems);
        self.state.set(TileState::Reserved);

        engine_debug!("terraview::Tile",
            "Tile resolution set to {} ({} elements)", res, self.shape.nelement());
        Ok(())
    }

    pub fn nelement(&self) -> usize {
        self.shape.nelement()
    }

    pub fn get_linear(&self, coord: &I::Coordinate) -> Option<usize> {
        self.shape.get_linear(coord)
    }

    pub fn get_resolution(&self, lod_level: u32) -> f64 {
        self.shape.get_resolution(lod_level)
    }

    pub fn init_pos(&self) -> I::Coordinate {
        self.shape.init_pos()
    }

    pub fn tail_pos(&self) -> I::Coordinate {
        self.shape.tail_pos()
    }

    // ===== INTERNAL =====

    fn ensure_generated(&self) {
        match self.state.get() {
            TileState::Written | TileState::Generated => return,
            TileState::Empty | TileState::Reserved => {}
        }

        let mut elems = self.elems.borrow_mut();
        Self::allocate(&self.shape, &mut elems);
        let mut generator = I::Generator::from_seed(&self.seed);
        generator.generate(&mut elems);
        self.state.set(TileState::Generated);

        engine_debug!("terraview::Tile", "Generated tile contents ({} elements)", elems.len());
    }

    fn allocate(shape: &I, elems: &mut Vec<I::TileElement>) {
        let n = shape.nelement();
        if elems.len() != n {
            elems.clear();
            elems.resize(n, I::TileElement::default());
        }
    }
}

#[cfg(test)]
#[path = "tile_tests.rs"]
mod tests;
