//! User directory storage implementations

mod memory;

pub use memory::InMemoryUserDirectory;
