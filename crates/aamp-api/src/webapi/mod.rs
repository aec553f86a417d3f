// Web API client modules
//
// Hand-written client for the undocumented endpoints the AAMP web interface
// talks to (/webapi/v1/...). Reverse-engineered from the browser UI, so the
// shapes here can drift between server releases.

pub mod auth;
pub mod client;
pub mod devices;
pub mod models;
pub mod volumes;
pub mod zones;

pub use client::WebApiClient;
