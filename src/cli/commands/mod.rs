//! CLI command implementations

pub mod check;
pub mod config;
pub mod directives;
pub mod etag;

pub use check::execute as check;
pub use config::execute as config;
pub use directives::execute as directives;
pub use etag::execute as etag;
