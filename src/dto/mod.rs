//! Response shapes exposed by the JSON API.

pub mod pipeline;
pub mod timeline;
