use core::fmt;
use core::marker::PhantomData;
use core::ops::Range;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Config;
use crate::transform::{CanonicalArg, CanonicalArgs, DatasetWrapper, WrappedDataset};
use crate::{Dataset, DatasetError};

/// Fractional sizes may carry rounding noise from their decimal notation.
const FRACTION_TOLERANCE: f64 = 1e-9;

/// Size of one partition, either as a number of items or as a fraction of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PartitionSize {
    /// An exact number of items.
    Count(usize),
    /// A fraction of the wrapped dataset, rounded half to even.
    Fraction(f64),
}

impl From<usize> for PartitionSize {
    fn from(count: usize) -> Self {
        Self::Count(count)
    }
}

impl From<f64> for PartitionSize {
    fn from(fraction: f64) -> Self {
        Self::Fraction(fraction)
    }
}

/// Ordered list of named partitions and their sizes.
///
/// Sizes are either fractions, which must sum to at most one and still cover the dataset
/// exactly once rounded, or whole numbers of items summing to the length of the dataset.
/// The default is `{train: 0.64, val: 0.16, test: 0.2}`, an 80:20 split applied twice.
///
/// Serialized as a JSON object, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct PartitionSpec {
    partitions: Vec<(String, PartitionSize)>,
}

impl PartitionSpec {
    /// No partitions yet, to be filled with [with_partition](Self::with_partition).
    pub fn new() -> Self {
        Self {
            partitions: Vec::new(),
        }
    }

    /// Appends a partition.
    pub fn with_partition<N, S>(mut self, name: N, size: S) -> Self
    where
        N: Into<String>,
        S: Into<PartitionSize>,
    {
        self.partitions.push((name.into(), size.into()));
        self
    }

    /// Resolves the partitions into item counts for a dataset of `total` items.
    ///
    /// Sizes summing to at most one are fractions of `total`. Any other sizes must be whole
    /// numbers, so `70.0` reads as a count of 70.
    pub fn resolve(&self, total: usize) -> Result<Vec<(String, usize)>, DatasetError> {
        if self.partitions.len() < 2 {
            return Err(invalid(format!(
                "at least two partitions must be defined, got {}",
                self.partitions.len()
            )));
        }

        for (i, (name, size)) in self.partitions.iter().enumerate() {
            if self.partitions[..i].iter().any(|(other, _)| other == name) {
                return Err(invalid(format!("partition `{name}` is defined twice")));
            }
            if !size.is_positive() {
                return Err(invalid(format!("partition `{name}` has a non-positive size")));
            }
        }

        let sum: f64 = self.partitions.iter().map(|(_, size)| size.as_f64()).sum();
        let resolved = if sum <= 1.0 + FRACTION_TOLERANCE {
            self.scaled(total)
        } else {
            self.whole()?
        };

        if let Some((name, _)) = resolved.iter().find(|(_, size)| *size == 0) {
            return Err(invalid(format!(
                "partition `{name}` is empty for a dataset of {total} items"
            )));
        }

        let sum = resolved
            .iter()
            .try_fold(0usize, |acc, (_, size)| acc.checked_add(*size))
            .ok_or_else(|| invalid("sizes overflow the addressable range".to_string()))?;
        if sum != total {
            return Err(invalid(format!(
                "sizes sum to {sum} but the dataset has {total} items"
            )));
        }

        Ok(resolved)
    }

    fn scaled(&self, total: usize) -> Vec<(String, usize)> {
        self.partitions
            .iter()
            .map(|(name, size)| {
                let count = (size.as_f64() * total as f64).round_ties_even() as usize;
                (name.clone(), count)
            })
            .collect()
    }

    fn whole(&self) -> Result<Vec<(String, usize)>, DatasetError> {
        self.partitions
            .iter()
            .map(|(name, size)| match *size {
                PartitionSize::Count(count) => Ok((name.clone(), count)),
                PartitionSize::Fraction(value)
                    if value.fract() == 0.0 && value <= usize::MAX as f64 =>
                {
                    Ok((name.clone(), value as usize))
                }
                PartitionSize::Fraction(value) => Err(invalid(format!(
                    "partition `{name}` has size {value}: sizes must be whole numbers, \
                     or fractions summing to <= 1"
                ))),
            })
            .collect()
    }
}

impl PartitionSize {
    fn as_f64(&self) -> f64 {
        match *self {
            Self::Count(count) => count as f64,
            Self::Fraction(value) => value,
        }
    }

    fn is_positive(&self) -> bool {
        match *self {
            Self::Count(count) => count > 0,
            Self::Fraction(value) => value.is_finite() && value > 0.0,
        }
    }
}

impl Default for PartitionSpec {
    fn default() -> Self {
        Self::new()
            .with_partition("train", 0.64)
            .with_partition("val", 0.16)
            .with_partition("test", 0.2)
    }
}

impl Serialize for PartitionSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.partitions.len()))?;
        for (name, size) in self.partitions.iter() {
            map.serialize_entry(name, size)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PartitionSpec {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SpecVisitor;

        impl<'de> Visitor<'de> for SpecVisitor {
            type Value = PartitionSpec;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of partition names to sizes")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut partitions = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, size)) = access.next_entry::<String, PartitionSize>()? {
                    partitions.push((name, size));
                }
                Ok(PartitionSpec { partitions })
            }
        }

        deserializer.deserialize_map(SpecVisitor)
    }
}

fn invalid(message: String) -> DatasetError {
    DatasetError::InvalidPartitions(message)
}

/// Splits a dataset into contiguous, named partitions, one of which is active at a time.
///
/// Partition `k` covers the source indices `[offset(k), offset(k) + size(k))`, partitions
/// being laid out in declaration order. Membership is therefore decided by position only:
/// shuffle first, for instance with a [ResampledDataset](crate::transform::ResampledDataset),
/// when the split must be randomized.
///
/// The view reports the length of the active partition and translates its local indices
/// into source indices.
///
/// # Examples
///
/// ```
/// use imbalanced_dataset::{Dataset, InMemDataset};
/// use imbalanced_dataset::transform::{PartitionSpec, PartitionedDataset};
///
/// let source = InMemDataset::new((0..100).collect::<Vec<usize>>());
/// let spec = PartitionSpec::new()
///     .with_partition("train", 0.7)
///     .with_partition("val", 0.3);
/// let mut dataset = PartitionedDataset::with_partitions(source, spec).unwrap();
///
/// assert_eq!(dataset.len(), 70);
/// assert_eq!(dataset.val().unwrap().len(), 30);
/// assert_eq!(dataset.get(0), Some(70));
/// ```
#[derive(Debug, Clone)]
pub struct PartitionedDataset<D, I> {
    wrapper: DatasetWrapper<D>,
    names: Vec<String>,
    sizes: Vec<usize>,
    offsets: Vec<usize>,
    active: usize,
    input: PhantomData<I>,
}

impl<D, I> PartitionedDataset<D, I>
where
    D: Dataset<I>,
{
    /// Partitions a dataset with the default `train`/`val`/`test` partitions.
    pub fn new(dataset: D) -> Result<Self, DatasetError> {
        Self::with_partitions(dataset, PartitionSpec::default())
    }

    /// Partitions a dataset into the given partitions.
    ///
    /// The active partition is `train` when defined, the first partition otherwise.
    pub fn with_partitions(dataset: D, partitions: PartitionSpec) -> Result<Self, DatasetError> {
        let resolved = partitions.resolve(dataset.len())?;
        let (names, sizes): (Vec<_>, Vec<_>) = resolved.into_iter().unzip();

        let offsets = sizes
            .iter()
            .scan(0, |end, size| {
                *end += size;
                Some(*end)
            })
            .collect();

        let active = names.iter().position(|name| name == "train").unwrap_or(0);

        log::debug!("Partitioned dataset of {} items: {names:?} = {sizes:?}", dataset.len());

        Ok(Self {
            wrapper: DatasetWrapper::new(dataset),
            names,
            sizes,
            offsets,
            active,
            input: PhantomData,
        })
    }

    /// Activates the partition with the given name.
    ///
    /// Returns the view itself, so that a lookup can be chained onto the switch.
    pub fn set_active_partition(&mut self, name: &str) -> Result<&mut Self, DatasetError> {
        let index = self.partition_index(name)?;

        log::trace!("Active partition: {} -> {name}", self.names[self.active]);
        self.active = index;

        Ok(self)
    }

    /// Activates the `train` partition.
    pub fn train(&mut self) -> Result<&mut Self, DatasetError> {
        self.set_active_partition("train")
    }

    /// Activates the `val` partition.
    pub fn val(&mut self) -> Result<&mut Self, DatasetError> {
        self.set_active_partition("val")
    }

    /// Activates the `test` partition.
    pub fn test(&mut self) -> Result<&mut Self, DatasetError> {
        self.set_active_partition("test")
    }

    /// The name of the active partition.
    pub fn active_partition(&self) -> &str {
        &self.names[self.active]
    }

    /// The partition names in declaration order.
    pub fn partition_names(&self) -> &[String] {
        &self.names
    }

    /// The partitions and their resolved sizes, in declaration order.
    pub fn partitions(&self) -> Vec<(String, usize)> {
        self.names.iter().cloned().zip(self.sizes.iter().copied()).collect()
    }

    /// The source indices covered by a partition.
    pub fn partition_range(&self, name: &str) -> Result<Range<usize>, DatasetError> {
        let index = self.partition_index(name)?;
        Ok(self.start(index)..self.offsets[index])
    }

    /// Gets the item at the given index of the active partition.
    ///
    /// # Errors
    ///
    /// [DatasetError::IndexOutOfRange] if `index` is not below the size of the active partition.
    pub fn item_at(&self, index: usize) -> Result<I, DatasetError> {
        let len = self.sizes[self.active];
        if index >= len {
            return Err(DatasetError::IndexOutOfRange { index, len });
        }

        let global = self.start(self.active) + index;
        let dataset = self.wrapper.dataset();

        dataset.get(global).ok_or(DatasetError::IndexOutOfRange {
            index: global,
            len: dataset.len(),
        })
    }

    /// The config reproducing this view, with resolved sizes and the active partition.
    pub fn config(&self) -> PartitionedDatasetConfig {
        PartitionedDatasetConfig {
            partitions: self
                .partitions()
                .into_iter()
                .fold(PartitionSpec::new(), |spec, (name, size)| {
                    spec.with_partition(name, size)
                }),
            active: Some(self.active_partition().to_string()),
        }
    }

    fn partition_index(&self, name: &str) -> Result<usize, DatasetError> {
        self.names
            .iter()
            .position(|candidate| candidate == name)
            .ok_or_else(|| DatasetError::PartitionNotFound(name.to_string()))
    }

    fn start(&self, index: usize) -> usize {
        match index {
            0 => 0,
            _ => self.offsets[index - 1],
        }
    }
}

impl<D, I> Dataset<I> for PartitionedDataset<D, I>
where
    D: Dataset<I>,
    I: Send + Sync,
{
    fn get(&self, index: usize) -> Option<I> {
        self.item_at(index).ok()
    }

    fn len(&self) -> usize {
        self.sizes[self.active]
    }
}

impl<D, I> WrappedDataset<I> for PartitionedDataset<D, I>
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

impl<D, I> CanonicalArgs<I> for PartitionedDataset<D, I>
where
    D: Dataset<I>,
{
    fn c_args(&self) -> Vec<(&'static str, CanonicalArg<'_, D>)> {
        vec![
            ("dataset", CanonicalArg::Dataset(self.wrapper.dataset())),
            ("partitions", CanonicalArg::Partitions(self.partitions())),
        ]
    }
}

/// Configuration to create a [PartitionedDataset].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionedDatasetConfig {
    /// The partitions and their sizes.
    #[serde(default)]
    pub partitions: PartitionSpec,
    /// The partition to activate, `train` or the first partition when absent.
    #[serde(default)]
    pub active: Option<String>,
}

impl Config for PartitionedDatasetConfig {}

impl PartitionedDatasetConfig {
    /// Creates a new config with the given partitions.
    pub fn new(partitions: PartitionSpec) -> Self {
        Self {
            partitions,
            active: None,
        }
    }

    /// Sets the partition to activate.
    pub fn with_active(mut self, name: impl Into<String>) -> Self {
        self.active = Some(name.into());
        self
    }

    /// Initializes a [PartitionedDataset] over the given dataset.
    pub fn init<D, I>(&self, dataset: D) -> Result<PartitionedDataset<D, I>, DatasetError>
    where
        D: Dataset<I>,
    {
        let mut partitioned = PartitionedDataset::with_partitions(dataset, self.partitions.clone())?;
        if let Some(active) = &self.active {
            partitioned.set_active_partition(active)?;
        }
        Ok(partitioned)
    }
}
