//! Build-time Content-Security-Policy injection for server-rendered pages.
//!
//! This crate ties the pieces together:
//! - Plugin options as the host passes them
//! - The render-hook seam to the host pipeline
//! - The pre-render step that prepends the policy meta tag

pub mod config;
pub mod hooks;
pub mod orchestrator;

pub use config::{BuildEnv, PluginOptions};
pub use hooks::{PageComponents, RenderHooks};
pub use orchestrator::{
    build_directives, header_name, on_pre_render_html, InjectOutcome, CSP_HEADER,
    CSP_REPORT_ONLY_HEADER,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
