//! Bounded retry with exponential backoff, and continuation-marker paging.
//!
//! Both combinators are generic over the single call they wrap so every list
//! operation shares one implementation.

pub mod operations;
pub mod pagination;
pub mod policy;

pub use operations::retry_async;
pub use pagination::collect_pages;
pub use policy::RetryPolicy;
