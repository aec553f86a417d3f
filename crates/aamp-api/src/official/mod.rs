// Client for the documented AAMP API.
//
// Hand-written async HTTP client for the endpoints under /api/v1.1/.
// Uses HTTP Digest authentication with the API account.

pub mod client;
pub mod types;

pub use client::OfficialClient;
