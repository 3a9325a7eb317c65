use crate::{Dataset, DatasetError};

/// Holds the dataset a view is derived from.
///
/// Views precompute index metadata (partition offsets, sample lists) against the length of the
/// wrapped dataset, so by default the wrapped dataset is locked once the wrapper exists.
/// An unlocked wrapper lets the dataset be replaced, but nothing derived from the previous
/// dataset is re-validated: the caller is responsible for keeping indices meaningful.
///
/// Ownership is whatever `D` is. Wrap an [Arc](std::sync::Arc) to share one dataset between
/// several views without copying it.
#[derive(Debug, Clone)]
pub struct DatasetWrapper<D> {
    dataset: D,
    locked: bool,
}

impl<D> DatasetWrapper<D> {
    /// Wraps a dataset, locking it.
    pub fn new(dataset: D) -> Self {
        Self::with_lock(dataset, true)
    }

    /// Wraps a dataset with an explicit lock setting.
    pub fn with_lock(dataset: D, locked: bool) -> Self {
        Self { dataset, locked }
    }

    /// The wrapped dataset.
    pub fn dataset(&self) -> &D {
        &self.dataset
    }

    /// Mutable access to the wrapped dataset, e.g. to switch the active partition of an inner
    /// view.
    ///
    /// The lock only prevents replacing the dataset. Changing its length through this
    /// reference leaves the indices of the outer view stale; lookups past the new end then
    /// fail with [DatasetError::IndexOutOfRange].
    pub fn dataset_mut(&mut self) -> &mut D {
        &mut self.dataset
    }

    /// Whether the wrapped dataset can be replaced.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Replaces the wrapped dataset and returns the previous one.
    ///
    /// # Errors
    ///
    /// [DatasetError::DatasetLocked] if the wrapper is locked.
    pub fn set_dataset(&mut self, dataset: D) -> Result<D, DatasetError> {
        if self.locked {
            return Err(DatasetError::DatasetLocked);
        }

        log::warn!("Replacing wrapped dataset, derived indices are not re-validated");

        Ok(core::mem::replace(&mut self.dataset, dataset))
    }

    /// Consumes the wrapper and returns the wrapped dataset.
    pub fn into_inner(self) -> D {
        self.dataset
    }
}

impl<D, I> Dataset<I> for DatasetWrapper<D>
where
    D: Dataset<I>,
{
    fn get(&self, index: usize) -> Option<I> {
        self.dataset.get(index)
    }

    fn len(&self) -> usize {
        self.dataset.len()
    }
}

/// A dataset derived from another one through a [DatasetWrapper].
pub trait WrappedDataset<I> {
    /// The type of the wrapped dataset.
    type Inner: Dataset<I>;

    /// The wrapper holding the source dataset.
    fn wrapper(&self) -> &DatasetWrapper<Self::Inner>;

    /// Mutable access to the wrapper.
    fn wrapper_mut(&mut self) -> &mut DatasetWrapper<Self::Inner>;

    /// The wrapped dataset.
    fn dataset(&self) -> &Self::Inner {
        self.wrapper().dataset()
    }

    /// Mutable access to the wrapped dataset, see [DatasetWrapper::dataset_mut].
    fn dataset_mut(&mut self) -> &mut Self::Inner {
        self.wrapper_mut().dataset_mut()
    }

    /// Replaces the wrapped dataset, see [DatasetWrapper::set_dataset].
    fn set_dataset(&mut self, dataset: Self::Inner) -> Result<Self::Inner, DatasetError> {
        self.wrapper_mut().set_dataset(dataset)
    }
}
