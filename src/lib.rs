//! reseller-client - client for reseller ordering APIs
//!
//! Places and tracks IMEI, server and file orders and reads a normalized
//! service catalog plus account balance from a reseller provider.
//!
//! # Modules
//!
//! - [`client`] - `ResellerClient`: request pipeline, caches, order calls
//! - [`transport`] - HTTP round trips and form payloads
//! - [`auth`] - `Auth-Key` signing
//! - [`response`] - body decoding and provider error aggregation
//! - [`catalog`] - service descriptors and their normalization
//! - [`order`] - order model and submission payloads
//! - [`account`] - balance and currency
//! - [`config`] - YAML configuration
//! - [`logging`] - subscriber setup for embedding applications

pub mod account;
pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod order;
pub mod response;
pub mod transport;
pub mod value;

// Convenient re-exports at crate root
pub use account::AccountInfo;
pub use auth::{AuthScheme, AuthSigner};
pub use catalog::{Service, ServiceCatalog, ServiceCategory, ServiceMap, ServiceParams};
pub use client::ResellerClient;
pub use config::{ClientConfig, MissingUploadPolicy, ProviderConfig, UploadsConfig};
pub use error::{ClientError, ClientResult, ConfigError};
pub use order::{Order, OrderData, OrderKind, OrderStatus, OrderVariant};
pub use transport::{FormValue, HttpTransport, Method, Payload, RawResponse, Transport};
