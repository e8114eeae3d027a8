use std::cell::Cell;
use glam::UVec2;
use crate::error::Error;
use super::*;
use crate::tile::{TileGenerator, TileInfo};

const EXTENT: f64 = 4.0;

thread_local! {
    static GENERATIONS: Cell<usize> = const { Cell::new(0) };
}

fn generations() -> usize {
    GENERATIONS.with(|g| g.get())
}

/// Fills element `i` with `seed * 1000 + i` and counts its runs.
struct CountingGenerator {
    seed: u32,
}

impl TileGenerator<u32, u32> for CountingGenerator {
    fn from_seed(seed: &u32) -> Self {
        Self { seed: *seed }
    }

    fn generate(&mut self, elems: &mut [u32]) {
        GENERATIONS.with(|g| g.set(g.get() + 1));
        for (i, elem) in elems.iter_mut().enumerate() {
            *elem = self.seed * 1000 + i as u32;
        }
    }
}

/// Square grid addressed by (line, element), `EXTENT / res` samples per axis.
#[derive(Debug, Clone)]
struct GridInfo {
    res: f64,
}

impl GridInfo {
    fn samples(&self) -> u32 {
        (EXTENT / self.res) as u32
    }
}

impl TileInfo for GridInfo {
    type Coordinate = UVec2;
    type TileSeed = u32;
    type TileElement = u32;
    type Generator = CountingGenerator;

    fn get_linear(&self, coord: &UVec2) -> Option<usize> {
        let n = self.samples();
        (coord.x < n && coord.y < n).then(|| (coord.x * n + coord.y) as usize)
    }

    fn get_block(&self, coord: &UVec2) -> Option<UVec2> {
        let n = self.samples();
        (coord.x <= n && coord.y <= n).then_some(*coord)
    }

    fn nelement(&self) -> usize {
        (self.samples() * self.samples()) as usize
    }

    fn init_pos(&self) -> UVec2 {
        UVec2::ZERO
    }

    fn tail_pos(&self) -> UVec2 {
        UVec2::splat(self.samples())
    }

    fn get_resolution(&self, lod_level: u32) -> f64 {
        self.res * f64::from(1u32 << lod_level)
    }

    fn resolution(&self) -> f64 {
        self.res
    }

    fn set_resolution(&mut self, res: f64) {
        self.res = res;
    }
}

fn create_test_tile(seed: u32) -> Tile<GridInfo> {
    GENERATIONS.with(|g| g.set(0));
    Tile::new(GridInfo { res: 1.0 }, seed)
}

// ============================================================================
// Lazy generation
// ============================================================================

#[test]
fn test_new_tile_is_empty() {
    let tile = create_test_tile(7);

    assert_eq!(tile.state(), TileState::Empty);
    assert_eq!(tile.nelement(), 16);
    assert_eq!(*tile.seed(), 7);
    assert_eq!(generations(), 0);
}

#[test]
fn test_read_generates_once() {
    let tile = create_test_tile(7);

    assert_eq!(tile.read(&UVec2::new(1, 2)), Some(7006));
    assert_eq!(tile.state(), TileState::Generated);
    assert_eq!(tile.read(&UVec2::new(3, 3)), Some(7015));
    assert_eq!(generations(), 1);
}

#[test]
fn test_read_outside_does_not_generate() {
    let tile = create_test_tile(7);

    assert_eq!(tile.read(&UVec2::new(4, 0)), None);
    assert_eq!(tile.state(), TileState::Empty);
    assert_eq!(generations(), 0);
}

#[test]
fn test_same_seed_same_contents() {
    let a = create_test_tile(3);
    let b = create_test_tile(3);

    for x in 0..4 {
        for y in 0..4 {
            let coord = UVec2::new(x, y);
            assert_eq!(a.read(&coord), b.read(&coord));
        }
    }
}

// ============================================================================
// Writes
// ============================================================================

#[test]
fn test_write_then_read() {
    let mut tile = create_test_tile(7);

    assert!(tile.write(&UVec2::new(2, 1), 42));
    assert_eq!(tile.read(&UVec2::new(2, 1)), Some(42));
}

#[test]
fn test_write_skips_generator() {
    let mut tile = create_test_tile(7);
    tile.write(&UVec2::new(0, 0), 42);

    assert_eq!(tile.state(), TileState::Written);
    assert_eq!(tile.read(&UVec2::new(1, 1)), Some(0));
    assert_eq!(generations(), 0);
}

#[test]
fn test_write_after_generation_keeps_contents() {
    let mut tile = create_test_tile(7);
    tile.read(&UVec2::ZERO);
    tile.write(&UVec2::ZERO, 1);

    assert_eq!(tile.state(), TileState::Generated);
    assert_eq!(tile.read(&UVec2::ZERO), Some(1));
    assert_eq!(tile.read(&UVec2::new(0, 1)), Some(7001));
}

#[test]
fn test_write_outside_is_rejected() {
    let mut tile = create_test_tile(7);

    assert!(!tile.write(&UVec2::new(0, 9), 42));
    assert_eq!(tile.state(), TileState::Empty);
}

fn snapshot(tile: &Tile<GridInfo>) -> Vec<Option<u32>> {
    (0..4)
        .flat_map(|x| (0..4).map(move |y| UVec2::new(x, y)))
        .map(|coord| tile.read(&coord))
        .collect()
}

#[test]
fn test_write_outside_leaves_generated_contents() {
    let mut tile = create_test_tile(7);
    let before = snapshot(&tile);

    for coord in [UVec2::new(0, 4), UVec2::new(4, 0), UVec2::new(9, 9)] {
        assert!(!tile.write(&coord, 42));
    }

    assert_eq!(tile.state(), TileState::Generated);
    assert_eq!(snapshot(&tile), before);
    assert_eq!(generations(), 1);
}

#[test]
fn test_write_outside_leaves_written_contents() {
    let mut tile = create_test_tile(7);
    tile.write(&UVec2::new(3, 3), 5);
    let before = snapshot(&tile);

    assert!(!tile.write(&UVec2::new(3, 4), 42));

    assert_eq!(tile.state(), TileState::Written);
    assert_eq!(snapshot(&tile), before);
    assert_eq!(before[15], Some(5));
}

// ============================================================================
// I/O blocks
// ============================================================================

#[test]
fn test_full_ioblock() {
    let mut tile = create_test_tile(1);
    let block = tile.get_ioblock(&UVec2::ZERO, &UVec2::splat(4), 0);

    assert_eq!(block.line_count(), 4);
    assert_eq!(block.line_elems(), 4);
    assert_eq!(block.stride(), 4 * std::mem::size_of::<u32>());
    assert_eq!(block.element_count(), 16);
    assert_eq!(block.data()[0], 1000);
    assert_eq!(generations(), 1);
}

#[test]
fn test_sub_rectangle_ioblock() {
    let mut tile = create_test_tile(1);
    let block = tile.get_ioblock(&UVec2::new(1, 1), &UVec2::new(3, 4), 0);

    assert_eq!(block.line_count(), 2);
    assert_eq!(block.line_elems(), 3);
    assert_eq!(block.pitch(), 4);
    assert_eq!(block.line(0), Some(&[1005, 1006, 1007][..]));
    assert_eq!(block.line(1), Some(&[1009, 1010, 1011][..]));
    assert_eq!(block.line(2), None);
}

#[test]
fn test_ioblock_sees_written_values() {
    let mut tile = create_test_tile(1);
    tile.write(&UVec2::new(1, 1), 99);
    let block = tile.get_ioblock(&UVec2::new(1, 0), &UVec2::new(2, 4), 0);

    assert_eq!(block.line(0), Some(&[0, 99, 0, 0][..]));
}

#[test]
fn test_invalid_ioblock_is_empty() {
    let mut tile = create_test_tile(1);

    assert!(tile.get_ioblock(&UVec2::ZERO, &UVec2::new(5, 4), 0).is_empty());
    assert!(tile.get_ioblock(&UVec2::new(2, 2), &UVec2::new(2, 2), 0).is_empty());
    assert!(tile.get_ioblock(&UVec2::new(3, 3), &UVec2::new(1, 4), 0).is_empty());
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_adjust_resolution_resizes_and_regenerates() {
    let mut tile = create_test_tile(2);
    tile.write(&UVec2::new(0, 0), 42);

    tile.adjust_resolution(2.0).unwrap();

    assert_eq!(tile.state(), TileState::Reserved);
    assert_eq!(tile.nelement(), 4);
    assert_eq!(tile.read(&UVec2::new(0, 0)), Some(2000));
    assert_eq!(tile.read(&UVec2::new(1, 1)), Some(2003));
    assert_eq!(tile.read(&UVec2::new(2, 0)), None);
    assert_eq!(generations(), 1);
}

#[test]
fn test_write_after_adjust_resolution_skips_generator() {
    let mut tile = create_test_tile(2);
    tile.adjust_resolution(2.0).unwrap();
    tile.write(&UVec2::new(1, 0), 5);

    assert_eq!(tile.state(), TileState::Written);
    assert_eq!(tile.read(&UVec2::new(1, 0)), Some(5));
    assert_eq!(tile.read(&UVec2::new(0, 0)), Some(0));
    assert_eq!(generations(), 0);
}

#[test]
fn test_adjust_resolution_rejects_bad_spacing() {
    let mut tile = create_test_tile(2);
    tile.read(&UVec2::ZERO);

    for res in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(tile.adjust_resolution(res), Err(Error::InvalidConfig(_))));
    }
    assert_eq!(tile.state(), TileState::Generated);
    assert_eq!(tile.nelement(), 16);
}

#[test]
fn test_delegations() {
    let tile = create_test_tile(2);

    assert_eq!(tile.get_resolution(0), 1.0);
    assert_eq!(tile.get_resolution(3), 8.0);
    assert_eq!(tile.init_pos(), UVec2::ZERO);
    assert_eq!(tile.tail_pos(), UVec2::splat(4));
    assert_eq!(tile.get_linear(&UVec2::new(3, 1)), Some(13));
    assert_eq!(tile.shape_info().line_pitch(), 4);
}
