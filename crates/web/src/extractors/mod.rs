//! Custom request extractors.

mod api_json;

pub use api_json::ApiJson;
