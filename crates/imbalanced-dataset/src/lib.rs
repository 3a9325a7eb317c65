#![warn(missing_docs)]

//! # Imbalanced Dataset
//!
//! Views deriving new datasets from an existing one, without copying or mutating its items.
//!
//! A view stores only what differs from the dataset it wraps:
//!
//! * a [PartitionedDataset](transform::PartitionedDataset) keeps the sizes of contiguous,
//!   named partitions (train/val/test splits) and which one is active;
//! * a [ResampledDataset](transform::ResampledDataset) keeps the list of source indices it
//!   exposes, which is enough to delete, re-introduce and duplicate rows.
//!
//! Views implement [Dataset] themselves, so they stack: resample a dataset to balance its
//! classes, then partition the resample, and so on.
//!
//! ```
//! use std::sync::Arc;
//!
//! use imbalanced_dataset::{Dataset, InMemDataset};
//! use imbalanced_dataset::transform::{PartitionedDataset, ResampledDataset};
//!
//! let source = Arc::new(InMemDataset::new((0..10).collect::<Vec<usize>>()));
//! let reversed = ResampledDataset::with_samples(source.clone(), (0..10).rev()).unwrap();
//! let mut splits = PartitionedDataset::new(reversed).unwrap();
//!
//! assert_eq!(splits.active_partition(), "train");
//! assert_eq!(splits.test().unwrap().iter().collect::<Vec<_>>(), vec![1, 0]);
//! ```

/// View configurations.
pub mod config;

/// Views over datasets.
pub mod transform;

mod dataset;
mod error;

pub use dataset::*;
pub use error::*;
