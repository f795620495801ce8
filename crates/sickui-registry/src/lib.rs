// sickui-registry: Async client for the SickUI component registry

pub mod client;
pub mod error;
pub mod schema;
pub mod transport;

pub use client::RegistryClient;
pub use error::Error;
pub use schema::{ItemType, RegistryFile, RegistryItem};
pub use transport::TransportConfig;
