//! Server-rendered HTML pages.
//!
//! ```ignore
//! use minijinja::context;
//! use crate::shared::templates::render_template;
//!
//! let html = render_template("index.html", context! { polls => polls })?;
//! ```

pub mod engine;

pub use engine::{render_template, TemplateError};
