pub mod scanner;

pub use scanner::{FeedScanner, ScanFeed};

pub mod prelude {
    pub use super::scanner::{FeedScanner, ScanFeed};
    pub use sd_core::{Entry, Error, Result};
}
