//! formcraft-client — the forms API over HTTP.
//!
//! Implements `FormsApi` against a running `formcraft serve` instance so the
//! form builder and the CLI can talk to a remote store.

pub mod http;

pub use http::HttpFormsApi;
