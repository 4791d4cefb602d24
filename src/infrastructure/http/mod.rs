//! HTTP client shared by scrapers and notifiers

mod http_client;

pub use http_client::HttpClient;
