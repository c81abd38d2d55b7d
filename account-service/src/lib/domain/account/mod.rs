pub mod credentials;
pub mod errors;
pub mod models;
pub mod ports;
pub mod service;
pub mod strategy;

#[cfg(test)]
pub(crate) mod mocks;
