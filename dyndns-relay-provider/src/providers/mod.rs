//! Concrete provider implementations.

pub(crate) mod common;

mod cloudflare;

pub use cloudflare::CloudflareProvider;
