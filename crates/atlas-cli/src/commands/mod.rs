pub mod curate;
pub mod dispatch;
pub mod extract;
pub mod finalize;
pub mod schema;
pub mod shared;

#[cfg(test)]
mod pipeline_tests;
