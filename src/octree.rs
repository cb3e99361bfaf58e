//! The [`Octree`] container and its debug dump.

use crate::bounding_box::BoundingBox;
use crate::node::Node;
use crate::policy::{Bounds, Euclidean, Metric, PointBounds};
use std::{fmt, slice};

/// An insertion only octree over arbitrary elements.
///
/// Elements are kept in insertion order in a `Vec`; the node tree only stores indices into it
/// together with each element's bounding box. A leaf holds up to `BUCKET` entries before it splits
/// into eight octants, and leaves at `MAX_DEPTH` never split.
///
/// `B` computes an element's bounding box once, when it is inserted. Changing an element through
/// [`Octree::iter_mut`] in a way that moves it leaves the tree pointing at its old position.
/// `M` measures the distance between elements and query points.
///
/// A box that straddles a split is stored in every octant it touches.
pub struct Octree<
    T,
    const BUCKET: usize = 10,
    const MAX_DEPTH: usize = 8,
    B = PointBounds,
    M = Euclidean,
> where
    B: Bounds<T>,
{
    root: Node<B::Coord, BUCKET, MAX_DEPTH>,
    elements: Vec<T>,
    bounds: B,
    metric: M,
}

impl<T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    B: Bounds<T> + Default,
    M: Default,
{
    /// Creates an empty tree covering the box spanned by the opposite corners `a` and `b`.
    #[must_use]
    pub fn new(a: B::Coord, b: B::Coord) -> Self {
        Self::from_region(BoundingBox::new(a, b))
    }

    #[must_use]
    pub fn from_region(region: BoundingBox<B::Coord>) -> Self {
        Self::with_policies(region, B::default(), M::default())
    }

    /// Creates a tree covering the box spanned by `a` and `b` and inserts `elements` one by one.
    ///
    /// Elements outside of the region are dropped.
    #[must_use]
    pub fn with_elements<I>(a: B::Coord, b: B::Coord, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new(a, b);

        let mut rejected = 0;
        for value in elements {
            if !tree.insert(value) {
                rejected += 1;
            }
        }
        if rejected > 0 {
            log::warn!(
                "dropped {} initial elements outside of the octree region",
                rejected
            );
        }

        tree
    }
}

impl<T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    B: Bounds<T>,
{
    /// Creates an empty tree over `region` using the given policies.
    #[must_use]
    pub fn with_policies(region: BoundingBox<B::Coord>, bounds: B, metric: M) -> Self {
        Self {
            root: Node::new(region, 0),
            elements: Vec::new(),
            bounds,
            metric,
        }
    }

    /// The region covered by the root octant.
    #[inline]
    #[must_use]
    pub fn region(&self) -> &BoundingBox<B::Coord> {
        self.root.region()
    }

    /// Number of stored elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Same as [`Octree::len`].
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Inserts `value`, returning `false` if its bounding box misses the tree's region entirely.
    pub fn insert(&mut self, value: T) -> bool {
        self.try_insert(value).is_ok()
    }

    /// Inserts `value` and returns its index in insertion order.
    ///
    /// # Errors
    ///
    /// Gives `value` back if its bounding box does not overlap the tree's region.
    pub fn try_insert(&mut self, value: T) -> Result<usize, T> {
        let bounds = self.bounds.bounding_box(&value);

        if !bounds.overlaps(self.root.region()) {
            log::debug!(
                "rejecting element outside of the octree region ({} elements stored)",
                self.elements.len()
            );
            return Err(value);
        }

        let index = self.elements.len();
        self.elements.push(value);
        self.root.insert(index, &bounds);

        Ok(index)
    }

    /// All elements in insertion order.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> &[T] {
        &self.elements
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Mutable access to the elements in insertion order.
    ///
    /// The tree does not notice changes: an element whose bounding box changes is still found
    /// under its old box.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.elements.iter_mut()
    }

    /// Drops the node tree and returns the elements in insertion order.
    #[must_use]
    pub fn into_elements(self) -> Vec<T> {
        self.elements
    }

    #[must_use]
    pub fn bounds_policy(&self) -> &B {
        &self.bounds
    }

    #[must_use]
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// A `Display`able rendering of the node tree, meant for debugging.
    ///
    /// Every non empty node prints its region, depth and entry count, followed by either the
    /// element indices in its bucket or its non empty children.
    #[must_use]
    pub fn dump(&self) -> Dump<'_, B::Coord, BUCKET, MAX_DEPTH> {
        Dump { root: &self.root }
    }
}

impl<T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    B: Bounds<T>,
    M: Metric<T, B::Coord>,
{
    /// Finds the element closest to `point` according to the tree's metric.
    ///
    /// Returns the element with its distance, or `None` if the tree is empty. When several
    /// elements are equally close, any one of them may be returned.
    #[must_use]
    pub fn closest_to(&self, point: &B::Coord) -> Option<(&T, M::Distance)> {
        if self.is_empty() {
            return None;
        }

        let mut best = None;
        self.root
            .collect_closest(&self.elements, &self.metric, point, &mut best);

        best.map(|closest| (&self.elements[closest.index], closest.distance))
    }
}

impl<T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> Clone
    for Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    T: Clone,
    B: Bounds<T> + Clone,
    M: Clone,
{
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            elements: self.elements.clone(),
            bounds: self.bounds.clone(),
            metric: self.metric.clone(),
        }
    }
}

impl<T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> fmt::Debug
    for Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    T: fmt::Debug,
    B: Bounds<T>,
    B::Coord: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Octree")
            .field("region", self.region())
            .field("elements", &self.elements)
            .finish_non_exhaustive()
    }
}

impl<T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> Extend<T>
    for Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    B: Bounds<T>,
{
    /// Inserts every element, silently skipping the ones outside of the region.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T, const BUCKET: usize, const MAX_DEPTH: usize, B, M> IntoIterator
    for &'a Octree<T, BUCKET, MAX_DEPTH, B, M>
where
    B: Bounds<T>,
{
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Debug rendering of an octree's nodes, see [`Octree::dump`].
pub struct Dump<'a, C, const BUCKET: usize, const MAX_DEPTH: usize> {
    root: &'a Node<C, BUCKET, MAX_DEPTH>,
}

impl<C, const BUCKET: usize, const MAX_DEPTH: usize> fmt::Display for Dump<'_, C, BUCKET, MAX_DEPTH>
where
    C: crate::Coordinate + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_dump(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::SquaredEuclidean;
    use nalgebra::Point3;

    type PointTree = Octree<Point3<f64>, 10, 5>;

    #[test]
    fn new_tree_is_empty() {
        let tree = PointTree::new(Point3::new(100.0, 100.0, 100.0), Point3::new(-100.0, -100.0, -100.0));
        assert!(tree.is_empty());
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.region().bottom_front_left, Point3::new(-100.0, -100.0, -100.0));
        assert!(!tree.root.has_children());
    }

    #[test]
    fn eleventh_element_subdivides_the_root() {
        let mut tree = PointTree::new(Point3::new(0.0, 0.0, 0.0), Point3::new(100.0, 100.0, 100.0));
        for i in 0..10 {
            let v = f64::from(i);
            assert!(tree.insert(Point3::new(v, v, v)));
        }
        assert!(!tree.root.has_children());

        assert!(tree.insert(Point3::new(10.0, 10.0, 10.0)));
        assert!(tree.root.has_children());
        assert_eq!(tree.root.size(), 11);
        assert_eq!(tree.len(), 11);

        for i in 0..11 {
            let v = f64::from(i);
            let (found, distance) = tree.closest_to(&Point3::new(v, v, v)).unwrap();
            assert_eq!(*found, Point3::new(v, v, v));
            assert_eq!(distance, 0.0);
        }
    }

    #[test]
    fn try_insert_hands_back_rejected_values() {
        let mut tree = PointTree::new(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        assert_eq!(tree.try_insert(Point3::new(0.5, 0.5, 0.5)), Ok(0));
        assert_eq!(tree.try_insert(Point3::new(0.5, 2.0, 0.5)), Err(Point3::new(0.5, 2.0, 0.5)));
        assert_eq!(tree.try_insert(Point3::new(1.0, 1.0, 1.0)), Ok(1));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn with_elements_drops_outsiders() {
        let tree = PointTree::with_elements(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(10.0, 10.0, 10.0),
            vec![
                Point3::new(1.0, 1.0, 1.0),
                Point3::new(11.0, 1.0, 1.0),
                Point3::new(9.0, 9.0, 9.0),
            ],
        );
        assert_eq!(tree.elements(), &[Point3::new(1.0, 1.0, 1.0), Point3::new(9.0, 9.0, 9.0)]);
    }

    #[test]
    fn integer_grid_with_squared_distance() {
        let mut tree = Octree::<[i64; 3], 2, 6, PointBounds, SquaredEuclidean>::new([0; 3], [64; 3]);
        tree.extend((0..16).map(|i| [i * 4, 64 - i * 4, i]));
        assert_eq!(tree.len(), 16);
        assert!(tree.root.has_children());

        let (found, distance) = tree.closest_to(&[28, 37, 7]).unwrap();
        assert_eq!(*found, [28, 36, 7]);
        assert_eq!(distance, 1);
    }

    #[test]
    fn dump_renders_subdivided_tree() {
        let mut tree = Octree::<[f64; 3], 1, 2>::new([0.0; 3], [8.0; 3]);
        tree.insert([1.0; 3]);
        tree.insert([7.0; 3]);

        let text = tree.dump().to_string();
        assert!(text.starts_with("Node { region: [0.0, 0.0, 0.0] .. [8.0, 8.0, 8.0], depth: 0, size: 2 }"));
        assert!(text.contains("  0: Node { region: [0.0, 0.0, 0.0] .. [4.0, 4.0, 4.0], depth: 1, size: 1 }"));
        assert!(text.contains("  7: Node { region: [4.0, 4.0, 4.0] .. [8.0, 8.0, 8.0], depth: 1, size: 1 }"));
        assert!(text.contains("entries: [1]"));
        assert!(!text.contains("  3: "));
    }
}
