use crate::transform::WrappedDataset;

/// One value of a canonical argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum CanonicalArg<'a, D> {
    /// The wrapped dataset, borrowed.
    Dataset(&'a D),
    /// Partition names and their resolved sizes, in declaration order.
    Partitions(Vec<(String, usize)>),
    /// The active source indices.
    Samples(Vec<usize>),
}

/// Describes a view by the ordered `(name, value)` arguments needed to build it again.
///
/// The list always starts with `("dataset", ..)`. How the arguments are persisted, if at all,
/// is left to the caller.
pub trait CanonicalArgs<I>: WrappedDataset<I> {
    /// The canonical, ordered list of arguments defining the view.
    fn c_args(&self) -> Vec<(&'static str, CanonicalArg<'_, Self::Inner>)>;
}
