use crate::bounding_box::BoundingBox;
use smallvec::SmallVec;

/// A stored element: its position in the tree's element store and the box it was inserted with.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Entry<C> {
    pub(crate) index: usize,
    pub(crate) bounds: BoundingBox<C>,
}

/// Leaf storage of an octant.
///
/// Holds up to `N` entries inline. A bucket at the maximum depth keeps accepting entries and
/// spills to the heap instead of splitting.
#[derive(Clone, Debug)]
pub(crate) struct Bucket<C, const N: usize> {
    entries: SmallVec<[Entry<C>; N]>,
}

impl<C, const N: usize> Default for Bucket<C, N> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<C, const N: usize> Bucket<C, N> {
    #[inline]
    pub(crate) fn is_full(&self) -> bool {
        self.entries.len() >= N
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn push(&mut self, index: usize, bounds: BoundingBox<C>) {
        self.entries.push(Entry { index, bounds });
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Entry<C>> {
        self.entries.iter()
    }

    pub(crate) fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.entries.iter().map(|entry| entry.index)
    }

    #[cfg(test)]
    pub(crate) fn spilled(&self) -> bool {
        self.entries.spilled()
    }
}

impl<C, const N: usize> IntoIterator for Bucket<C, N> {
    type Item = Entry<C>;
    type IntoIter = smallvec::IntoIter<[Entry<C>; N]>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
