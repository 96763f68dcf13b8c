pub mod data_service;

#[cfg(test)]
pub(crate) mod testing;

pub use data_service::{DataService, PostgrestClient, UpstreamResponse};
