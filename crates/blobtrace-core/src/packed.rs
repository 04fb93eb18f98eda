//! PackedSets - Many variable length sets in block storage
//!
//! Contour tracing produces a large number of point lists whose lengths
//! are only known once a trace finishes. Instead of one allocation per
//! list, all elements go into a single logical array that is split into
//! fixed-size blocks. A set is described by the block its first element
//! lives in, the offset inside that block, and its length.
//!
//! Growing allocates one new block and never moves existing ones, so a long
//! trace does not trigger a copy of everything stored before it. Only the
//! last ("tail") set can be extended or removed, which is exactly what the
//! tracer needs: start a set, push points, and drop it again if it turns
//! out to be too small or too large.

use crate::error::{Error, Result};

/// Default number of elements per block.
pub const DEFAULT_BLOCK_SIZE: usize = 2000;

/// Location of a set inside the block storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PackedSetInfo {
    /// Block holding the first element
    pub block: usize,
    /// Index of the first element inside `block`
    pub offset: usize,
    /// Number of elements in the set
    pub size: usize,
}

/// Collection of variable length sets stored in fixed-size blocks.
///
/// # Examples
///
/// ```
/// use blobtrace_core::PackedSets;
///
/// let mut sets = PackedSets::<u32>::with_block_size(4).unwrap();
/// sets.push_tail(1);
/// sets.push_tail(2);
/// sets.start_new_set();
/// sets.push_tail(3);
///
/// assert_eq!(sets.number_of_sets(), 2);
/// assert_eq!(*sets.at(0, 1).unwrap(), 2);
/// assert_eq!(*sets.at(1, 0).unwrap(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct PackedSets<T> {
    /// Storage blocks, all `block_size` long. Never shrinks.
    blocks: Vec<Box<[T]>>,
    block_size: usize,
    /// Number of elements in use across all sets
    total_elements: usize,
    sets: Vec<PackedSetInfo>,
}

impl<T: Copy + Default> PackedSets<T> {
    /// Create storage with [`DEFAULT_BLOCK_SIZE`] elements per block.
    pub fn new() -> Self {
        Self::allocate(DEFAULT_BLOCK_SIZE)
    }

    /// Create storage with a custom block size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `block_size` is 0.
    pub fn with_block_size(block_size: usize) -> Result<Self> {
        if block_size == 0 {
            return Err(Error::InvalidParameter(
                "block size must be positive".to_string(),
            ));
        }
        Ok(Self::allocate(block_size))
    }

    fn allocate(block_size: usize) -> Self {
        Self {
            blocks: vec![Self::new_block(block_size)],
            block_size,
            total_elements: 0,
            sets: Vec::new(),
        }
    }

    fn new_block(block_size: usize) -> Box<[T]> {
        vec![T::default(); block_size].into_boxed_slice()
    }

    /// Remove all sets. Blocks are kept for reuse.
    pub fn clear(&mut self) {
        self.sets.clear();
        self.total_elements = 0;
    }

    /// Append an empty set at the current end of storage.
    pub fn start_new_set(&mut self) {
        self.sets.push(PackedSetInfo {
            block: self.total_elements / self.block_size,
            offset: self.total_elements % self.block_size,
            size: 0,
        });
    }

    /// Number of elements in the tail set, 0 if there are no sets.
    #[inline]
    pub fn size_of_tail(&self) -> usize {
        self.sets.last().map_or(0, |s| s.size)
    }

    /// Append an element to the tail set, creating a set if there is none.
    pub fn push_tail(&mut self, element: T) {
        if self.sets.is_empty() {
            self.start_new_set();
        }
        self.add_element(element);
        if let Some(tail) = self.sets.last_mut() {
            tail.size += 1;
        }
    }

    /// Write an element at the end of storage without touching any set.
    fn add_element(&mut self, element: T) {
        let block = self.total_elements / self.block_size;
        if block == self.blocks.len() {
            self.blocks.push(Self::new_block(self.block_size));
        }
        self.blocks[block][self.total_elements % self.block_size] = element;
        self.total_elements += 1;
    }

    /// Remove the tail set and release its elements. No-op when empty.
    pub fn remove_tail(&mut self) {
        if let Some(tail) = self.sets.pop() {
            self.total_elements -= tail.size;
        }
    }

    fn info(&self, set: usize) -> Result<PackedSetInfo> {
        self.sets.get(set).copied().ok_or(Error::SetOutOfRange {
            index: set,
            len: self.sets.len(),
        })
    }

    /// Block and in-block index of element `i` of a set.
    #[inline]
    fn location(&self, info: &PackedSetInfo, i: usize) -> (usize, usize) {
        let b = info.block * self.block_size + info.offset + i;
        (b / self.block_size, b % self.block_size)
    }

    fn checked_location(&self, set: usize, element: usize) -> Result<(usize, usize)> {
        let info = self.info(set)?;
        if element >= info.size {
            return Err(Error::ElementOutOfRange {
                set,
                index: element,
                len: info.size,
            });
        }
        Ok(self.location(&info, element))
    }

    /// Get an element of a set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetOutOfRange`] or [`Error::ElementOutOfRange`] if
    /// either index is invalid.
    pub fn at(&self, set: usize, element: usize) -> Result<&T> {
        let (b, o) = self.checked_location(set, element)?;
        Ok(&self.blocks[b][o])
    }

    /// Get a mutable reference to an element of a set.
    ///
    /// # Errors
    ///
    /// Same as [`PackedSets::at`].
    pub fn at_mut(&mut self, set: usize, element: usize) -> Result<&mut T> {
        let (b, o) = self.checked_location(set, element)?;
        Ok(&mut self.blocks[b][o])
    }

    /// Iterate over the elements of a set in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetOutOfRange`] if `set` is invalid.
    pub fn iter_set(&self, set: usize) -> Result<impl ExactSizeIterator<Item = &T> + '_> {
        let info = self.info(set)?;
        Ok((0..info.size).map(move |i| {
            let (b, o) = self.location(&info, i);
            &self.blocks[b][o]
        }))
    }

    /// Replace the contents of `output` with the elements of a set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetOutOfRange`] if `set` is invalid.
    pub fn load_set(&self, set: usize, output: &mut Vec<T>) -> Result<()> {
        let iter = self.iter_set(set)?;
        output.clear();
        output.reserve(iter.len());
        output.extend(iter.copied());
        Ok(())
    }

    /// Overwrite the elements of a set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetOutOfRange`] if `set` is invalid, or
    /// [`Error::LengthMismatch`] if `input` is not exactly as long as the set.
    pub fn write_set(&mut self, set: usize, input: &[T]) -> Result<()> {
        let info = self.info(set)?;
        if input.len() != info.size {
            return Err(Error::LengthMismatch {
                expected: info.size,
                actual: input.len(),
            });
        }
        for (i, &value) in input.iter().enumerate() {
            let (b, o) = self.location(&info, i);
            self.blocks[b][o] = value;
        }
        Ok(())
    }

    /// Number of sets.
    #[inline]
    pub fn number_of_sets(&self) -> usize {
        self.sets.len()
    }

    /// Number of elements stored across all sets.
    #[inline]
    pub fn total_elements(&self) -> usize {
        self.total_elements
    }

    /// Number of allocated blocks.
    #[inline]
    pub fn number_of_blocks(&self) -> usize {
        self.blocks.len()
    }

    /// Elements per block.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Location descriptor of a set.
    pub fn set_info(&self, set: usize) -> Option<&PackedSetInfo> {
        self.sets.get(set)
    }

    /// Number of elements in a set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SetOutOfRange`] if `set` is invalid.
    pub fn size_of_set(&self, set: usize) -> Result<usize> {
        Ok(self.info(set)?.size)
    }
}

impl<T: Copy + Default> Default for PackedSets<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    struct Td {
        x: u32,
        y: u32,
    }

    fn td(x: u32, y: u32) -> Td {
        Td { x, y }
    }

    /// Two sets: [(5,2), (6,7)] and [(6,5)]
    fn two_sets() -> PackedSets<Td> {
        let mut packed = PackedSets::with_block_size(100).unwrap();
        packed.push_tail(td(5, 2));
        packed.push_tail(td(6, 7));
        packed.start_new_set();
        packed.push_tail(td(6, 5));
        packed
    }

    #[test]
    fn test_constructor() {
        let packed = PackedSets::<Td>::with_block_size(100).unwrap();
        assert_eq!(packed.number_of_blocks(), 1);
        assert_eq!(packed.block_size(), 100);
        assert_eq!(packed.total_elements(), 0);
        assert_eq!(packed.number_of_sets(), 0);

        assert_eq!(PackedSets::<Td>::new().block_size(), DEFAULT_BLOCK_SIZE);
        assert!(PackedSets::<Td>::with_block_size(0).is_err());
    }

    #[test]
    fn test_add_element_overflow() {
        let mut packed = PackedSets::with_block_size(10).unwrap();
        for i in 0..25 {
            packed.add_element(td(5 + i, 2));
        }
        assert_eq!(packed.number_of_blocks(), 3);
        assert_eq!(packed.total_elements(), 25);
        assert_eq!(packed.number_of_sets(), 0);
        for i in 0..25u32 {
            let d = packed.blocks[i as usize / 10][i as usize % 10];
            assert_eq!(d, td(5 + i, 2));
        }
    }

    #[test]
    fn test_push_tail() {
        let mut packed = PackedSets::with_block_size(100).unwrap();
        assert_eq!(packed.number_of_sets(), 0);
        packed.push_tail(td(5, 2));
        assert_eq!(packed.number_of_sets(), 1);
        packed.push_tail(td(6, 7));

        assert_eq!(packed.number_of_blocks(), 1);
        assert_eq!(packed.total_elements(), 2);
        assert_eq!(packed.blocks[0][0], td(5, 2));
        assert_eq!(packed.blocks[0][1], td(6, 7));
        assert_eq!(packed.size_of_set(0), Ok(2));
    }

    #[test]
    fn test_size_of_tail() {
        let mut packed = PackedSets::with_block_size(100).unwrap();
        assert_eq!(packed.size_of_tail(), 0);
        packed.push_tail(td(5, 2));
        packed.push_tail(td(6, 7));
        assert_eq!(packed.size_of_tail(), 2);
        packed.start_new_set();
        assert_eq!(packed.size_of_tail(), 0);
    }

    #[test]
    fn test_start_new_set() {
        let packed = two_sets();
        assert_eq!(packed.total_elements(), 3);
        assert_eq!(packed.number_of_sets(), 2);
        assert_eq!(
            packed.set_info(0),
            Some(&PackedSetInfo {
                block: 0,
                offset: 0,
                size: 2
            })
        );
        assert_eq!(
            packed.set_info(1),
            Some(&PackedSetInfo {
                block: 0,
                offset: 2,
                size: 1
            })
        );
    }

    #[test]
    fn test_clear_keeps_blocks() {
        let mut packed = PackedSets::with_block_size(2).unwrap();
        for i in 0..5 {
            packed.push_tail(td(i, i));
        }
        assert_eq!(packed.number_of_blocks(), 3);
        packed.clear();
        assert_eq!(packed.number_of_blocks(), 3);
        assert_eq!(packed.total_elements(), 0);
        assert_eq!(packed.number_of_sets(), 0);
    }

    #[test]
    fn test_at() {
        let packed = two_sets();
        assert_eq!(packed.at(0, 0), Ok(&td(5, 2)));
        assert_eq!(packed.at(0, 1), Ok(&td(6, 7)));
        assert_eq!(packed.at(1, 0), Ok(&td(6, 5)));

        assert_eq!(
            packed.at(2, 0),
            Err(Error::SetOutOfRange { index: 2, len: 2 })
        );
        assert_eq!(
            packed.at(1, 1),
            Err(Error::ElementOutOfRange {
                set: 1,
                index: 1,
                len: 1
            })
        );
    }

    #[test]
    fn test_at_mut() {
        let mut packed = two_sets();
        *packed.at_mut(0, 1).unwrap() = td(9, 9);
        assert_eq!(packed.at(0, 1), Ok(&td(9, 9)));
    }

    #[test]
    fn test_remove_tail() {
        let mut packed = two_sets();
        packed.remove_tail();
        assert_eq!(packed.total_elements(), 2);
        assert_eq!(packed.number_of_sets(), 1);

        packed.remove_tail();
        assert_eq!(packed.total_elements(), 0);
        assert_eq!(packed.number_of_sets(), 0);

        packed.remove_tail();
        assert_eq!(packed.total_elements(), 0);
        assert_eq!(packed.number_of_sets(), 0);
    }

    #[test]
    fn test_remove_tail_reuses_space() {
        let mut packed = two_sets();
        packed.remove_tail();
        packed.start_new_set();
        packed.push_tail(td(1, 1));
        assert_eq!(packed.set_info(1).map(|s| s.offset), Some(2));
        assert_eq!(packed.at(1, 0), Ok(&td(1, 1)));
    }

    #[test]
    fn test_load_set() {
        let packed = two_sets();
        let mut storage = vec![td(0, 0)];

        packed.load_set(0, &mut storage).unwrap();
        assert_eq!(storage, vec![td(5, 2), td(6, 7)]);

        packed.load_set(1, &mut storage).unwrap();
        assert_eq!(storage, vec![td(6, 5)]);

        assert!(packed.load_set(2, &mut storage).is_err());
    }

    #[test]
    fn test_write_set() {
        let mut packed = two_sets();
        packed.write_set(0, &[td(1, 2), td(3, 4)]).unwrap();
        assert_eq!(packed.at(0, 0), Ok(&td(1, 2)));
        assert_eq!(packed.at(0, 1), Ok(&td(3, 4)));
        // neighbouring set untouched
        assert_eq!(packed.at(1, 0), Ok(&td(6, 5)));

        assert_eq!(
            packed.write_set(1, &[td(1, 2), td(3, 4)]),
            Err(Error::LengthMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_block_boundary() {
        let block_size = 7;
        for n in 0..4 {
            let mut packed = PackedSets::with_block_size(block_size).unwrap();
            let count = n * block_size + 1;
            for i in 0..count as u32 {
                packed.push_tail(td(i, 0));
            }
            assert_eq!(packed.number_of_blocks(), n + 1);
            for i in 0..count {
                assert_eq!(packed.at(0, i), Ok(&td(i as u32, 0)));
            }
        }
    }

    #[test]
    fn test_set_spanning_blocks() {
        let mut packed = PackedSets::with_block_size(4).unwrap();
        packed.push_tail(td(0, 0));
        packed.push_tail(td(1, 0));
        packed.push_tail(td(2, 0));
        packed.start_new_set();
        for i in 0..6 {
            packed.push_tail(td(i, 1));
        }
        let info = *packed.set_info(1).unwrap();
        assert_eq!((info.block, info.offset, info.size), (0, 3, 6));
        let collected: Vec<Td> = packed.iter_set(1).unwrap().copied().collect();
        assert_eq!(collected, (0..6).map(|i| td(i, 1)).collect::<Vec<_>>());
    }
}
