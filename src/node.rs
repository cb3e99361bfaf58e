//! Octant nodes: a region that either holds a bucket of entries or eight child octants.

use crate::bounding_box::BoundingBox;
use crate::bucket::Bucket;
use crate::coordinate::Coordinate;
use crate::policy::Metric;
use itertools::Itertools;
use std::cmp::Ordering;
use std::{fmt, iter, mem};

/// Best match found so far by a nearest neighbour search.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Closest<D> {
    pub(crate) index: usize,
    pub(crate) distance: D,
}

#[derive(Clone, Debug)]
enum Content<C, const BUCKET: usize, const MAX_DEPTH: usize> {
    Bucket(Bucket<C, BUCKET>),
    Children(Box<[Node<C, BUCKET, MAX_DEPTH>; 8]>),
}

/// A cell of the octree.
///
/// Starts out as an empty bucket and turns into eight children the first time an insertion finds
/// the bucket full, unless the node already sits at `MAX_DEPTH` or every entry overlaps all eight
/// octants. Children never merge back.
#[derive(Clone, Debug)]
pub(crate) struct Node<C, const BUCKET: usize, const MAX_DEPTH: usize> {
    region: BoundingBox<C>,
    midpoint: C,
    depth: usize,
    /// Entries inserted at or below this node. Entries straddling a split are counted in every
    /// child they were copied into.
    size: usize,
    /// Union of the boxes of every entry below this node. May reach outside `region`.
    extent: Option<BoundingBox<C>>,
    content: Content<C, BUCKET, MAX_DEPTH>,
}

impl<C, const BUCKET: usize, const MAX_DEPTH: usize> Node<C, BUCKET, MAX_DEPTH>
where
    C: Coordinate,
{
    pub(crate) fn new(region: BoundingBox<C>, depth: usize) -> Self {
        Self {
            midpoint: region.midpoint(),
            region,
            depth,
            size: 0,
            extent: None,
            content: Content::Bucket(Bucket::default()),
        }
    }

    #[inline]
    pub(crate) fn region(&self) -> &BoundingBox<C> {
        &self.region
    }

    #[cfg(test)]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[cfg(test)]
    pub(crate) fn has_children(&self) -> bool {
        matches!(self.content, Content::Children(_))
    }

    /// Inserts `index` with its box `bounds`, which must overlap this node's region.
    pub(crate) fn insert(&mut self, index: usize, bounds: &BoundingBox<C>) {
        debug_assert!(
            self.region.overlaps(bounds),
            "entry {} does not overlap the node it is inserted into",
            index
        );

        self.size += 1;
        self.extent = Some(match self.extent {
            Some(extent) => extent.union(bounds),
            None => *bounds,
        });

        let must_split = match &self.content {
            Content::Bucket(bucket) => {
                bucket.is_full()
                    && self.depth < MAX_DEPTH
                    && self.split_separates(bucket, bounds)
            }
            Content::Children(_) => false,
        };
        if must_split {
            self.subdivide();
        }

        match &mut self.content {
            Content::Bucket(bucket) => bucket.push(index, *bounds),
            Content::Children(children) => Self::insert_into_children(children, index, bounds),
        }
    }

    /// A box overlaps all eight children exactly when it holds the midpoint. If every entry does,
    /// splitting would copy the whole bucket into each child, so the bucket spills instead.
    fn split_separates(&self, bucket: &Bucket<C, BUCKET>, bounds: &BoundingBox<C>) -> bool {
        !bounds.contains(&self.midpoint)
            || bucket
                .iter()
                .any(|entry| !entry.bounds.contains(&self.midpoint))
    }

    fn insert_into_children(children: &mut [Self; 8], index: usize, bounds: &BoundingBox<C>) {
        for child in children
            .iter_mut()
            .filter(|child| child.region.overlaps(bounds))
        {
            child.insert(index, bounds);
        }
    }

    /// Replaces a full bucket by eight children and hands every entry to each child it overlaps.
    fn subdivide(&mut self) {
        let depth = self.depth + 1;
        let mut children = Box::new(
            self.region
                .subdivide(&self.midpoint)
                .map(|region| Self::new(region, depth)),
        );

        let bucket = match &mut self.content {
            Content::Bucket(bucket) => {
                assert!(bucket.is_full(), "only full buckets are subdivided");
                mem::take(bucket)
            }
            Content::Children(_) => unreachable!("node at depth {} is already subdivided", self.depth),
        };

        log::debug!(
            "subdividing octant at depth {} holding {} entries",
            self.depth,
            bucket.len()
        );

        for entry in bucket {
            Self::insert_into_children(&mut children, entry.index, &entry.bounds);
        }

        self.content = Content::Children(children);
    }

    /// Octant index of the child whose region holds `point`, points on the midpoint going low.
    fn octant_of(&self, point: &C) -> usize {
        (0..3)
            .filter(|&axis| point.axis(axis) > self.midpoint.axis(axis))
            .fold(0, |octant, axis| octant | (1 << axis))
    }

    /// Updates `best` with the closest element stored below this node.
    ///
    /// Bucket entries are scanned in insertion order and only a strictly smaller distance replaces
    /// the current best, so ties keep the entry found first. Children are visited starting with the
    /// octant holding `point`; a child is skipped once `best` is at least as close as the metric's
    /// bound for everything stored below it.
    pub(crate) fn collect_closest<T, M>(
        &self,
        elements: &[T],
        metric: &M,
        point: &C,
        best: &mut Option<Closest<M::Distance>>,
    ) where
        M: Metric<T, C>,
    {
        if self.size == 0 {
            return;
        }

        match &self.content {
            Content::Bucket(bucket) => {
                for entry in bucket.iter() {
                    let distance = metric.distance(&elements[entry.index], point);
                    let closer = match best {
                        Some(closest) => distance < closest.distance,
                        None => true,
                    };
                    if closer {
                        *best = Some(Closest {
                            index: entry.index,
                            distance,
                        });
                    }
                }
            }
            Content::Children(children) => {
                let first = self.octant_of(point);
                let rest = (0..8).filter(|&octant| octant != first);

                for child in iter::once(first).chain(rest).map(|octant| &children[octant]) {
                    if child.may_hold_closer::<T, M>(metric, point, best.as_ref()) {
                        child.collect_closest(elements, metric, point, best);
                    }
                }
            }
        }
    }

    fn may_hold_closer<T, M>(&self, metric: &M, point: &C, best: Option<&Closest<M::Distance>>) -> bool
    where
        M: Metric<T, C>,
    {
        match (&self.extent, best) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(extent), Some(closest)) => {
                let bound = metric.distance_to_region(extent, point);
                // NaN bounds fall through to a visit.
                !matches!(
                    bound.partial_cmp(&closest.distance),
                    Some(Ordering::Greater | Ordering::Equal)
                )
            }
        }
    }

    pub(crate) fn write_dump(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result
    where
        C: fmt::Debug,
    {
        writeln!(
            f,
            "Node {{ region: {:?} .. {:?}, depth: {}, size: {} }}",
            self.region.bottom_front_left, self.region.top_back_right, self.depth, self.size
        )?;

        match &self.content {
            Content::Bucket(bucket) => writeln!(
                f,
                "{:indent$}  entries: [{}]",
                "",
                bucket.indices().format(", "),
                indent = indent
            ),
            Content::Children(children) => {
                for (octant, child) in children.iter().enumerate() {
                    if child.size == 0 {
                        continue;
                    }
                    write!(f, "{:indent$}  {}: ", "", octant, indent = indent)?;
                    child.write_dump(f, indent + 2)?;
                }
                Ok(())
            }
        }
    }
}
