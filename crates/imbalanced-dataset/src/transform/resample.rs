use core::marker::PhantomData;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::transform::{CanonicalArg, CanonicalArgs, DatasetWrapper, RngSource, WrappedDataset};
use crate::{Dataset, DatasetError};

/// Resampled version of a dataset.
///
/// Wraps but does not copy the source dataset. The only state is the list of source indices
/// that are active in the resample, so rows of the source can be:
///
/// * deleted, by removing their index from the list;
/// * re-introduced, by adding the removed index once more;
/// * duplicated (simple over-sampling), by adding the index several times.
///
/// Synthetic rows are not generated here. Concatenate them to the source dataset first and
/// reference them by index like any other row.
///
/// # Examples
///
/// ```
/// use imbalanced_dataset::{Dataset, InMemDataset};
/// use imbalanced_dataset::transform::ResampledDataset;
///
/// let source = InMemDataset::new(vec!["a", "b", "c"]);
/// let dataset = ResampledDataset::with_samples(source, [0, 0, 2]).unwrap();
///
/// assert_eq!(dataset.iter().collect::<Vec<_>>(), ["a", "a", "c"]);
/// ```
#[derive(Debug, Clone)]
pub struct ResampledDataset<D, I> {
    wrapper: DatasetWrapper<D>,
    samples: Vec<usize>,
    input: PhantomData<I>,
}

impl<D, I> ResampledDataset<D, I>
where
    D: Dataset<I>,
{
    /// Resamples every row of the dataset exactly once, in order.
    pub fn new(dataset: D) -> Self {
        let samples = (0..dataset.len()).collect();
        Self::from_validated(dataset, samples)
    }

    /// Resamples the dataset with the given source indices. Duplicates are allowed.
    pub fn with_samples<S>(dataset: D, samples: S) -> Result<Self, DatasetError>
    where
        S: IntoIterator<Item = usize>,
    {
        let samples: Vec<usize> = samples.into_iter().collect();
        validate(&samples, dataset.len())?;

        Ok(Self::from_validated(dataset, samples))
    }

    /// Resamples the dataset with batches of source indices, flattened in order.
    pub fn with_nested_samples<B, S>(dataset: D, batches: B) -> Result<Self, DatasetError>
    where
        B: IntoIterator<Item = S>,
        S: IntoIterator<Item = usize>,
    {
        Self::with_samples(dataset, batches.into_iter().flatten())
    }

    /// Resamples every row of the dataset exactly once, in a random order.
    pub fn shuffled<R>(dataset: D, rng_source: R) -> Self
    where
        R: Into<RngSource>,
    {
        let source: RngSource = rng_source.into();
        let mut rng = source.into_rng();
        let mut samples: Vec<usize> = (0..dataset.len()).collect();
        samples.shuffle(&mut rng);

        Self::from_validated(dataset, samples)
    }

    fn from_validated(dataset: D, samples: Vec<usize>) -> Self {
        log::debug!(
            "Resampled dataset of {} items into {} samples",
            dataset.len(),
            samples.len()
        );

        Self {
            wrapper: DatasetWrapper::new(dataset),
            samples,
            input: PhantomData,
        }
    }

    /// The active source indices.
    pub fn samples(&self) -> &[usize] {
        &self.samples
    }

    /// Replaces the active source indices.
    ///
    /// The current samples are kept when the new ones are invalid.
    pub fn set_samples<S>(&mut self, samples: S) -> Result<(), DatasetError>
    where
        S: IntoIterator<Item = usize>,
    {
        let samples: Vec<usize> = samples.into_iter().collect();
        validate(&samples, self.wrapper.dataset().len())?;
        self.samples = samples;

        Ok(())
    }

    /// Appends a source index, re-introducing or duplicating its row.
    pub fn add_sample(&mut self, index: usize) -> Result<(), DatasetError> {
        validate(&[index], self.wrapper.dataset().len())?;
        self.samples.push(index);

        Ok(())
    }

    /// Removes every occurrence of a source index and returns how many were removed.
    pub fn remove_sample(&mut self, index: usize) -> usize {
        let before = self.samples.len();
        self.samples.retain(|sample| *sample != index);
        before - self.samples.len()
    }

    /// Gets the item at the given index of the resample.
    ///
    /// # Errors
    ///
    /// [DatasetError::IndexOutOfRange] if `index` is not below the number of samples.
    pub fn item_at(&self, index: usize) -> Result<I, DatasetError> {
        let sample = *self
            .samples
            .get(index)
            .ok_or(DatasetError::IndexOutOfRange {
                index,
                len: self.samples.len(),
            })?;
        let dataset = self.wrapper.dataset();

        dataset.get(sample).ok_or(DatasetError::IndexOutOfRange {
            index: sample,
            len: dataset.len(),
        })
    }

    /// The config reproducing this view.
    pub fn config(&self) -> ResampledDatasetConfig {
        ResampledDatasetConfig {
            samples: Some(self.samples.clone()),
        }
    }
}

fn validate(samples: &[usize], len: usize) -> Result<(), DatasetError> {
    match samples.iter().find(|sample| **sample >= len) {
        Some(index) => Err(DatasetError::SampleOutOfRange { index: *index, len }),
        None => Ok(()),
    }
}

impl<D, I> Dataset<I> for ResampledDataset<D, I>
where
    D: Dataset<I>,
    I: Send + Sync,
{
    fn get(&self, index: usize) -> Option<I> {
        let index = self.samples.get(index)?;
        self.wrapper.dataset().get(*index)
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

impl<D, I> WrappedDataset<I> for ResampledDataset<D, I>
where
    D: Dataset<I>,
{
    type Inner = D;

    fn wrapper(&self) -> &DatasetWrapper<D> {
        &self.wrapper
    }

    fn wrapper_mut(&mut self) -> &mut DatasetWrapper<D> {
        &mut self.wrapper
    }
}

impl<D, I> CanonicalArgs<I> for ResampledDataset<D, I>
where
    D: Dataset<I>,
{
    fn c_args(&self) -> Vec<(&'static str, CanonicalArg<'_, D>)> {
        vec![
            ("dataset", CanonicalArg::Dataset(self.wrapper.dataset())),
            ("samples", CanonicalArg::Samples(self.samples.clone())),
        ]
    }
}

/// Configuration to create a [ResampledDataset].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResampledDatasetConfig {
    /// The active source indices, every row once when absent.
    #[serde(default)]
    pub samples: Option<Vec<usize>>,
}

impl Config for ResampledDatasetConfig {}

impl ResampledDatasetConfig {
    /// Creates a new config with the given samples.
    pub fn new(samples: Vec<usize>) -> Self {
        Self {
            samples: Some(samples),
        }
    }

    /// Initializes a [ResampledDataset] over the given dataset.
    pub fn init<D, I>(&self, dataset: D) -> Result<ResampledDataset<D, I>, DatasetError>
    where
        D: Dataset<I>,
    {
        match &self.samples {
            Some(samples) => ResampledDataset::with_samples(dataset, samples.iter().copied()),
            None => Ok(ResampledDataset::new(dataset)),
        }
    }
}
