use std::error::Error;
use std::fmt;

/// Broad category of a [`HistoryError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller supplied a value outside the accepted range.
    InvalidArgument,
    /// The operation needs at least one element but the buffer is empty.
    EmptyState,
}

/// Enum with possibles errors that can occur when using a [`HistoryBuffer`](crate::HistoryBuffer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryError {
    /// The buffer was created with a capacity of zero
    InvalidCapacity,
    /// Tried to move the cursor to an offset that is not in `0..len`
    PositionOutOfRange { position: usize, len: usize },
    /// Peek or pop was called on an empty buffer
    Empty,
}

impl HistoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HistoryError::InvalidCapacity | HistoryError::PositionOutOfRange { .. } => ErrorKind::InvalidArgument,
            HistoryError::Empty => ErrorKind::EmptyState,
        }
    }
}

impl Error for HistoryError {}

impl fmt::Display for HistoryError {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        use HistoryError::*;

        match *self {
            InvalidCapacity => write!(fmt, "history buffer capacity must be greater than zero"),
            PositionOutOfRange { position, len } => {
                write!(fmt, "position {} is out of range for a history buffer with {} elements", position, len)
            }
            Empty => write!(fmt, "history buffer is empty"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_kinds() {
        assert_eq!(HistoryError::InvalidCapacity.kind(), ErrorKind::InvalidArgument);
        assert_eq!(HistoryError::PositionOutOfRange { position: 3, len: 2 }.kind(), ErrorKind::InvalidArgument);
        assert_eq!(HistoryError::Empty.kind(), ErrorKind::EmptyState);
    }

    #[test]
    fn display() {
        let error = HistoryError::PositionOutOfRange { position: 5, len: 1 };
        assert_eq!(error.to_string(), "position 5 is out of range for a history buffer with 1 elements");
        assert_eq!(HistoryError::Empty.to_string(), "history buffer is empty");
    }
}
