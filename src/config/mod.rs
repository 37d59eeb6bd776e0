//! Configuration module

mod site;

pub use site::CategorySeed;
pub use site::HighlightConfig;
pub use site::SiteConfig;
