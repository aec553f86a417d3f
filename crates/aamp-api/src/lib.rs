// aamp-api: Async Rust client for Axis Audio Manager Pro (documented API + local web API)

pub mod auth;
pub mod error;
pub mod official;
pub mod transport;
pub mod webapi;

pub use auth::Credentials;
pub use error::Error;
pub use official::OfficialClient;
pub use transport::{TlsMode, TransportConfig};
pub use webapi::WebApiClient;
