use crate::Dataset;

/// Dataset where all items are stored in ram.
///
/// This is the simplest base sequence a view can wrap.
#[derive(Debug, Clone, PartialEq)]
pub struct InMemDataset<I> {
    items: Vec<I>,
}

impl<I> InMemDataset<I> {
    /// Creates a new in memory dataset from the given items.
    pub fn new(items: Vec<I>) -> Self {
        InMemDataset { items }
    }
}

impl<I> Dataset<I> for InMemDataset<I>
where
    I: Clone + Send + Sync,
{
    fn get(&self, index: usize) -> Option<I> {
        self.items.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

impl<I> FromIterator<I> for InMemDataset<I> {
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_data;

    #[test]
    fn given_items_when_iterate_should_yield_them_in_order() {
        let items = test_data::string_items();
        let dataset = InMemDataset::new(items.clone());

        assert_eq!(dataset.len(), items.len());
        assert_eq!(dataset.iter().collect::<Vec<_>>(), items);
    }

    #[test]
    fn get_past_the_end_is_none() {
        let dataset: InMemDataset<usize> = (0..3).collect();

        assert_eq!(dataset.get(2), Some(2));
        assert_eq!(dataset.get(3), None);
    }
}
