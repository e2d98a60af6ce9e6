pub mod classify;
pub mod executor;
