/// IoBlock - strided view of a tile buffer handed to the renderer
///
/// Describes a 2D sub-rectangle of a row-major buffer without copying it:
/// `line_count` runs of `line_elems` elements whose starts are `pitch`
/// elements apart. A block with no lines carries no data.

use std::mem::size_of;

#[derive(Debug)]
pub struct IoBlock<'a, E> {
    /// Buffer from the block's first element to its last
    data: &'a [E],
    /// Elements per line
    line_elems: usize,
    /// Elements between the starts of two consecutive lines
    pitch: usize,
    /// Number of lines
    line_count: usize,
}

impl<E> Clone for IoBlock<'_, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for IoBlock<'_, E> {}

impl<'a, E> IoBlock<'a, E> {
    /// Describe `line_count` lines of `line_elems` elements, `pitch` elements
    /// apart, starting at `data[0]`.
    ///
    /// Returns an empty block if `data` is too short for that layout.
    pub fn new(data: &'a [E], line_elems: usize, pitch: usize, line_count: usize) -> Self {
        if line_elems == 0 || line_count == 0 || pitch < line_elems {
            return Self::empty();
        }
        let span = (line_count - 1) * pitch + line_elems;
        match data.get(..span) {
            Some(data) => Self { data, line_elems, pitch, line_count },
            None => Self::empty(),
        }
    }

    /// The "no data" descriptor
    pub fn empty() -> Self {
        Self { data: &[], line_elems: 0, pitch: 0, line_count: 0 }
    }

    pub fn is_empty(&self) -> bool {
        self.line_count == 0
    }

    /// Underlying buffer, including the gaps between lines
    pub fn data(&self) -> &'a [E] {
        self.data
    }

    /// Base pointer for upload APIs
    pub fn as_ptr(&self) -> *const E {
        self.data.as_ptr()
    }

    pub fn line_elems(&self) -> usize {
        self.line_elems
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Bytes between the starts of two consecutive lines
    pub fn stride(&self) -> usize {
        self.pitch * size_of::<E>()
    }

    /// Total elements described (gaps excluded)
    pub fn element_count(&self) -> usize {
        self.line_elems * self.line_count
    }

    pub fn line(&self, index: usize) -> Option<&'a [E]> {
        if index >= self.line_count {
            return None;
        }
        let start = index * self.pitch;
        self.data.get(start..start + self.line_elems)
    }

    pub fn lines(&self) -> impl Iterator<Item = &'a [E]> + 'a {
        let block = *self;
        (0..block.line_count).filter_map(move |i| block.line(i))
    }
}

impl<E> Default for IoBlock<'_, E> {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "tile_io_tests.rs"]
mod tests;
