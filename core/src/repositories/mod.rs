pub mod token;

pub use token::{InMemoryTokenStore, TokenStore};
