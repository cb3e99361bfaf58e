//! `octant` is a bucketed octree for nearest neighbour queries over three dimensional data.
//!
//! Elements can be anything that has a position or an axis aligned extent:
//! - Point clouds (`nalgebra` points and vectors, `[N; 3]`, `(N, N, N)`)
//! - Axis aligned boxes
//! - Triangles and other shapes, through a custom [`Bounds`] and [`Metric`]
//!
//! The tree is insertion only. Leaves hold a fixed number of entries inline and split into eight
//! octants when they overflow, down to a maximum depth.
//!
//! ```
//! use nalgebra::Point3;
//! use octant::Octree;
//!
//! let mut tree = Octree::<Point3<f64>, 10, 5>::new(Point3::origin(), Point3::new(100.0, 100.0, 100.0));
//! assert!(tree.insert(Point3::new(10.0, 10.0, 10.0)));
//! assert!(tree.insert(Point3::new(75.0, 75.0, 75.0)));
//! assert!(!tree.insert(Point3::new(150.0, 0.0, 0.0)));
//!
//! let (closest, distance) = tree.closest_to(&Point3::origin()).unwrap();
//! assert_eq!(*closest, Point3::new(10.0, 10.0, 10.0));
//! assert!((distance - 300.0_f64.sqrt()).abs() < 1e-12);
//! ```
#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::similar_names, clippy::module_name_repetitions)]

pub mod bounding_box;
mod bucket;
pub mod coordinate;
mod node;
pub mod octree;
pub mod policy;

pub use bounding_box::BoundingBox;
pub use coordinate::{Coordinate, Scalar};
pub use octree::{Dump, Octree};
pub use policy::{squared_distance, BoxBounds, Bounds, Euclidean, Metric, PointBounds, SquaredEuclidean};
