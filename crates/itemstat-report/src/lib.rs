//! itemstat-report: Interpretation bands, configuration, and HTML output.

pub mod config;
pub mod html;
pub mod interpret;
