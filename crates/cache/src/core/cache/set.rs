//! Cache set storage and bookkeeping.
//!
//! A set owns its `associativity` lines together with the state every replacement
//! policy works from:
//! - `lru_list`: a permutation of way indices ordered from least to most recently
//!   used. Invalid lines always sit in front of valid ones, so `lru_list[0]` is an
//!   invalid line whenever the set has one.
//! - `num_marked`: the number of marked lines, kept equal to the count of `marked`
//!   bits.

use super::line::CacheLine;

/// A group of `associativity` lines sharing one set index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CacheSet {
    lines: Box<[CacheLine]>,
    lru_list: Box<[usize]>,
    num_marked: usize,
}

impl CacheSet {
    /// Creates a set of invalid lines with the identity LRU order.
    pub(crate) fn new(associativity: usize, line_size: usize) -> Self {
        Self {
            lines: (0..associativity).map(|_| CacheLine::new(line_size)).collect(),
            lru_list: (0..associativity).collect(),
            num_marked: 0,
        }
    }

    /// Number of lines in the set.
    pub fn associativity(&self) -> usize {
        self.lines.len()
    }

    /// All lines, indexed by way.
    pub fn lines(&self) -> &[CacheLine] {
        &self.lines
    }

    /// The line in `way`.
    pub fn line(&self, way: usize) -> &CacheLine {
        &self.lines[way]
    }

    pub(crate) fn line_mut(&mut self, way: usize) -> &mut CacheLine {
        &mut self.lines[way]
    }

    /// Way indices from least to most recently used.
    pub fn lru_list(&self) -> &[usize] {
        &self.lru_list
    }

    /// Number of marked lines.
    pub const fn num_marked(&self) -> usize {
        self.num_marked
    }

    /// Returns the first way holding a valid line with `tag`.
    #[inline]
    pub fn find_matching(&self, tag: u64) -> Option<usize> {
        self.lines.iter().position(|line| line.matches(tag))
    }

    /// Returns the lowest-numbered invalid way.
    #[inline]
    pub fn first_invalid(&self) -> Option<usize> {
        self.lines.iter().position(|line| !line.valid)
    }

    /// Position of `way` in the LRU list (0 = least recently used).
    pub fn lru_position(&self, way: usize) -> Option<usize> {
        self.lru_list.iter().position(|&w| w == way)
    }

    /// Moves `way` to the most recently used end of the LRU list, shifting the
    /// entries after it down by one.
    pub(crate) fn make_mru(&mut self, way: usize) {
        if let Some(pos) = self.lru_position(way) {
            let last = self.lru_list.len() - 1;
            self.lru_list.copy_within(pos + 1.., pos);
            self.lru_list[last] = way;
        }
    }

    /// Moves `way` to the least recently used end of the LRU list.
    pub(crate) fn make_lru(&mut self, way: usize) {
        if let Some(pos) = self.lru_position(way) {
            self.lru_list.copy_within(..pos, 1);
            self.lru_list[0] = way;
        }
    }

    /// Marks `way`, counting it if it was unmarked.
    pub(crate) fn mark(&mut self, way: usize) {
        let line = &mut self.lines[way];
        if !line.marked {
            line.marked = true;
            self.num_marked += 1;
        }
    }

    fn unmark(&mut self, way: usize) {
        let line = &mut self.lines[way];
        if line.marked {
            line.marked = false;
            self.num_marked -= 1;
        }
    }

    /// Clears every mark, starting a new marking phase.
    pub(crate) fn clear_marks(&mut self) {
        for line in self.lines.iter_mut() {
            line.marked = false;
        }
        self.num_marked = 0;
    }

    /// Number of unmarked lines.
    pub fn unmarked_count(&self) -> usize {
        self.lines.len() - self.num_marked
    }

    /// Returns the way of the `n`th unmarked line, counting from way 0.
    pub fn nth_unmarked(&self, n: usize) -> Option<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, line)| !line.marked)
            .nth(n)
            .map(|(way, _)| way)
    }

    /// Drops the line in `way`: clears its bits and moves it to the front of the
    /// LRU list so invalid lines stay ahead of valid ones.
    pub(crate) fn invalidate(&mut self, way: usize) {
        self.unmark(way);
        let line = &mut self.lines[way];
        line.valid = false;
        line.dirty = false;
        self.make_lru(way);
    }
}
