use std::sync::Arc;

use crate::DatasetIterator;

/// The dataset trait defines a basic collection of items with a predefined size.
///
/// This is the only capability a view needs from the data it wraps: a stable length and a
/// lookup by index. Anything implementing it can be partitioned or resampled, including the
/// views themselves.
pub trait Dataset<I>: Send + Sync {
    /// Gets the item at the given index, or `None` when the index is out of range.
    fn get(&self, index: usize) -> Option<I>;

    /// Gets the number of items in the dataset.
    ///
    /// The value must stay the same between calls for as long as the dataset is wrapped.
    fn len(&self) -> usize;

    /// Checks if the dataset is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns an iterator over the dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use imbalanced_dataset::{Dataset, InMemDataset};
    ///
    /// let dataset = InMemDataset::new(vec!["a", "b", "c"]);
    ///
    /// assert_eq!(dataset.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
    /// ```
    fn iter(&self) -> DatasetIterator<'_, I>
    where
        Self: Sized,
    {
        DatasetIterator::new(self)
    }
}

impl<D, I> Dataset<I> for Arc<D>
where
    D: Dataset<I>,
{
    fn get(&self, index: usize) -> Option<I> {
        self.as_ref().get(index)
    }

    fn len(&self) -> usize {
        self.as_ref().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{InMemDataset, test_data};

    #[test]
    fn shared_dataset_forwards_to_inner() {
        let dataset = Arc::new(InMemDataset::new(test_data::rows(4)));
        let shared = Arc::clone(&dataset);

        assert_eq!(shared.len(), 4);
        assert_eq!(shared.get(2), dataset.get(2));
        assert_eq!(shared.get(4), None);
        assert_eq!(Arc::strong_count(&dataset), 2);
    }
}
