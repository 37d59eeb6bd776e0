//! Helper functions shared by the pipeline, the CLI and the HTTP API

mod html;
mod normalize;
mod pagination;
mod url;

pub use html::*;
pub use normalize::*;
pub use pagination::*;
pub use url::*;
