pub mod config;
pub mod countries;
pub mod export;
pub mod filter;
pub mod gateway;
pub mod pipeline;
pub mod record;
pub mod session;
pub mod sort;
pub mod store;

pub use config::Config;
pub use filter::{FilterCriteria, FilterMode};
pub use gateway::{GeminiClient, GenerationError, KeywordGateway};
pub use pipeline::{ResultsPage, PAGE_SIZE};
pub use record::{ContentIdeas, KeywordRecord};
pub use session::Session;
pub use sort::{SortDirection, SortField, SortSpec};
pub use store::ResultStore;
