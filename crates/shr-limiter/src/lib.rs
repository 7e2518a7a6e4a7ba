//! Size limiter — caps nested payload values per type category.
//!
//! Pieces:
//! 1. Category — fixed-priority classification of a value
//! 2. Limits — one element/char limit per category
//! 3. Summary — bounded, never-failing string summaries
//! 4. SizeLimiter — strategies, recursive traversal and the keyed entry point

pub mod category;
pub mod limiter;
pub mod limits;
pub mod summary;

pub use category::Category;
pub use limiter::SizeLimiter;
pub use limits::Limits;
pub use summary::{ellipsize, Summarizer};
