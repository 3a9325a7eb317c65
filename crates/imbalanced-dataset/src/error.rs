/// Error type for the dataset views.
///
/// Every error is raised at the point where the offending construction, mutation or lookup
/// happens. Nothing is clamped or retried.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// The partitions cannot be resolved against the wrapped dataset.
    #[error("Invalid partitions: {0}")]
    InvalidPartitions(String),

    /// A sample refers to an item the wrapped dataset does not have.
    #[error("Sample index {index} is out of range for a dataset of {len} items")]
    SampleOutOfRange {
        /// The offending source index.
        index: usize,
        /// The length of the wrapped dataset.
        len: usize,
    },

    /// The wrapped dataset is locked and cannot be replaced.
    #[error("Wrapped dataset cannot be changed after the wrapper has been initialized")]
    DatasetLocked,

    /// The requested partition does not exist.
    #[error("Partition not found: {0}")]
    PartitionNotFound(String),

    /// The index is past the end of the view.
    #[error("Index {index} is out of range for a view of {len} items")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the view.
        len: usize,
    },
}

/// Broad category of a [DatasetError].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A construction parameter or mutation would break a view invariant.
    InvariantViolation,
    /// A named entry does not exist.
    KeyNotFound,
    /// A lookup went past the end of a view.
    IndexOutOfRange,
}

impl DatasetError {
    /// Returns the category of the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidPartitions(_)
            | Self::SampleOutOfRange { .. }
            | Self::DatasetLocked => ErrorKind::InvariantViolation,
            Self::PartitionNotFound(_) => ErrorKind::KeyNotFound,
            Self::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(
            DatasetError::DatasetLocked.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            DatasetError::SampleOutOfRange { index: 3, len: 3 }.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            DatasetError::PartitionNotFound("dev".into()).kind(),
            ErrorKind::KeyNotFound
        );
        assert_eq!(
            DatasetError::IndexOutOfRange { index: 5, len: 5 }.kind(),
            ErrorKind::IndexOutOfRange
        );
    }

    #[test]
    fn display() {
        let err = DatasetError::IndexOutOfRange { index: 5, len: 5 };
        assert_eq!(
            err.to_string(),
            "Index 5 is out of range for a view of 5 items"
        );
    }
}
