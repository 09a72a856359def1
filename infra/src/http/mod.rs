//! HTTP clients for external services

pub mod token_exchange;

pub use token_exchange::{HttpTokenExchangeClient, HttpTokenExchangeConfig};
