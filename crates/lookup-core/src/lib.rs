pub mod error;
pub mod score;
pub mod types;

pub use error::{LookupError, LookupResult};
pub use score::heuristic_score;
pub use types::{CompanyProfile, NewsItem, Quote, SentimentLabel, StockReport};
