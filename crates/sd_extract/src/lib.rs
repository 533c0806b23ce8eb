pub mod extractor;

pub use extractor::{ArticleExtractor, ExtractError, HttpPageFetcher, PageFetcher};
