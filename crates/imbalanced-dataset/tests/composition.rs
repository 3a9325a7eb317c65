use std::sync::Arc;

use imbalanced_dataset::transform::{
    PartitionSpec, PartitionedDataset, ResampledDataset, WrappedDataset,
};
use imbalanced_dataset::{Dataset, DatasetError, InMemDataset};
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct Row {
    features: Vec<f32>,
    label: usize,
}

/// 90 rows of class 0 followed by 10 rows of class 1.
fn imbalanced_rows() -> Arc<InMemDataset<Row>> {
    Arc::new(
        (0..100)
            .map(|i| Row {
                features: vec![i as f32],
                label: usize::from(i >= 90),
            })
            .collect(),
    )
}

#[test]
fn oversample_minority_then_partition() {
    let source = imbalanced_rows();

    // Every minority row three times more, majority rows once.
    let samples = (0..100).chain((90..100).flat_map(|i| [i, i, i]));
    let balanced = ResampledDataset::with_samples(Arc::clone(&source), samples).unwrap();
    assert_eq!(balanced.len(), 130);

    let spec = PartitionSpec::new()
        .with_partition("train", 100)
        .with_partition("test", 30);
    let mut splits = PartitionedDataset::with_partitions(balanced, spec).unwrap();

    let test = splits.test().unwrap();
    assert_eq!(test.len(), 30);
    assert!(test.iter().all(|row| row.label == 1));
    assert_eq!(test.item_at(0).unwrap(), source.get(90).unwrap());
}

#[test]
fn shuffle_then_partition_then_resample() {
    let source = imbalanced_rows();

    let shuffled = ResampledDataset::shuffled(Arc::clone(&source), 7u64);
    let mut splits = PartitionedDataset::new(shuffled).unwrap();
    splits.val().unwrap();
    let permutation = splits.dataset().samples().to_vec();

    let every_other = ResampledDataset::with_samples(splits, (0..16).step_by(2)).unwrap();

    assert_eq!(every_other.len(), 8);
    for (local, item) in every_other.iter().enumerate() {
        // val starts at 64 in the shuffled index space.
        let expected = source.get(permutation[64 + 2 * local]).unwrap();
        assert_eq!(item, expected);
    }
}

#[test]
fn partitions_of_one_source_share_it() {
    let source = imbalanced_rows();

    let mut train = PartitionedDataset::new(Arc::clone(&source)).unwrap();
    let mut test = PartitionedDataset::new(Arc::clone(&source)).unwrap();
    train.train().unwrap();
    test.test().unwrap();

    assert_eq!(Arc::strong_count(&source), 3);
    assert!(Arc::ptr_eq(train.dataset(), test.dataset()));
    assert_eq!(train.len() + test.len(), 84);

    drop(train);
    drop(test);
    assert_eq!(Arc::strong_count(&source), 1);
}

#[test]
fn errors_surface_from_the_outermost_view() {
    let source = imbalanced_rows();
    let splits = PartitionedDataset::new(source).unwrap();

    // 64 rows in train, index 64 does not exist.
    assert_eq!(
        ResampledDataset::with_samples(splits, [63, 64]).unwrap_err(),
        DatasetError::SampleOutOfRange { index: 64, len: 64 }
    );
}

#[test]
fn switch_inner_partition_through_the_outer_view() {
    let source = imbalanced_rows();
    let splits = PartitionedDataset::new(Arc::clone(&source)).unwrap();
    let mut outer = ResampledDataset::with_samples(splits, [0, 15, 40]).unwrap();
    assert_eq!(outer.item_at(2).unwrap(), source.get(40).unwrap());

    outer.dataset_mut().val().unwrap();

    assert_eq!(outer.dataset().active_partition(), "val");
    assert_eq!(outer.item_at(0).unwrap(), source.get(64).unwrap());
    assert_eq!(outer.item_at(1).unwrap(), source.get(79).unwrap());
    // The samples were validated against the 64 train rows, val has 16.
    assert_eq!(
        outer.item_at(2),
        Err(DatasetError::IndexOutOfRange { index: 40, len: 16 })
    );
    assert_eq!(outer.iter().count(), 2);
}

#[test]
fn concurrent_reads() {
    let source = imbalanced_rows();
    let resampled = ResampledDataset::with_samples(source, (0..100).rev()).unwrap();
    let splits = PartitionedDataset::new(resampled).unwrap();

    let labels: Vec<usize> = (0..splits.len())
        .into_par_iter()
        .map(|i| splits.item_at(i).unwrap().label)
        .collect();

    assert_eq!(labels.len(), 64);
    assert_eq!(labels.iter().filter(|label| **label == 1).count(), 10);
}
