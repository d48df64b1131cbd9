//! Fixed-capacity circular history with a movable cursor.
//!
//! ```
//! use rehistory::HistoryBuffer;
//!
//! let mut history = HistoryBuffer::new(3).unwrap();
//! for edit in ["a", "b", "c", "d"] {
//!     history.push(edit);
//! }
//!
//! // "a" was evicted, the cursor sits on the newest entry
//! assert_eq!(history.peek_range().copied().collect::<Vec<_>>(), ["d", "c", "b"]);
//! assert_eq!(history.pop(), Ok("d"));
//! assert_eq!(history.len(), 2);
//!
//! history.set_position(0).unwrap();
//! assert_eq!(history.peek(), Ok(&"b"));
//! ```

mod config;
mod error;
mod history_buffer;
mod iter;

pub use config::HistoryConfig;
pub use error::{ErrorKind, HistoryError};
pub use history_buffer::HistoryBuffer;
pub use iter::{Iter, PeekRange, PopRange};
