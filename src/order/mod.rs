//! Orders
//!
//! An [`Order`] is owned by the caller. Submission and refresh go through
//! [`ResellerClient`](crate::client::ResellerClient), which writes the
//! provider's id, status and response back onto it.

pub mod models;
pub mod payload;

pub use models::{Order, OrderData, OrderKind, OrderStatus, OrderVariant};
pub use payload::{UploadContext, build_payload};
