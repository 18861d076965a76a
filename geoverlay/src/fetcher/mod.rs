//! Overlay data fetching.
//!
//! The [`OverlayFetcher`] trait is the engine's only view of the data
//! backend: given a geographic query extent it returns vector features, a
//! raster archive, or a raster tile source descriptor. The HTTP
//! implementation is built on a small [`AsyncHttpClient`] abstraction so
//! tests can inject canned responses.

mod http;
mod overlay;
mod types;

pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use overlay::HttpOverlayFetcher;
pub use types::{FetchError, OverlayFetcher};

#[cfg(test)]
pub use http::tests::MockAsyncHttpClient;
