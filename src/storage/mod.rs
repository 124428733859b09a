//! Storage implementations for the DataSource contract

pub mod in_memory;

pub use in_memory::InMemoryDataSource;
