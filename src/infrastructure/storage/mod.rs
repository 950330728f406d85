//! Storage implementations

mod memory;

pub use memory::InMemoryRepositoryProvider;
