//! Template engine for the server-rendered poll pages.
//!
//! Templates live in `templates/pages/` and are compiled into the binary, so
//! rendering does not depend on the working directory the server starts in.

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use std::sync::OnceLock;
use thiserror::Error;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Page templates bundled at compile time: (name, source)
const PAGE_TEMPLATES: &[(&str, &str)] = &[
    (
        "base.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/pages/base.html.jinja"
        )),
    ),
    (
        "index.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/pages/index.html.jinja"
        )),
    ),
    (
        "detail.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/pages/detail.html.jinja"
        )),
    ),
    (
        "results.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/pages/results.html.jinja"
        )),
    ),
    (
        "not_found.html",
        include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/templates/pages/not_found.html.jinja"
        )),
    ),
];

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.add_filter("pluralize_votes", pluralize_votes);

    for (name, source) in PAGE_TEMPLATES {
        if let Err(e) = env.add_template(name, source) {
            tracing::warn!("Failed to load template {}: {}", name, e);
        } else {
            tracing::debug!("Loaded template: {}", name);
        }
    }

    env
}

fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with any serializable context.
pub fn render_template<S: Serialize>(template_name: &str, ctx: S) -> Result<String, TemplateError> {
    let template = get_environment()
        .get_template(template_name)
        .map_err(|_| TemplateError::NotFound(template_name.to_string()))?;

    template
        .render(ctx)
        .map_err(|e| TemplateError::RenderError(e.to_string()))
}

/// Check if a template exists
#[cfg(test)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

/// `{{ choice.votes | pluralize_votes }}`
fn pluralize_votes(count: i64) -> &'static str {
    if count == 1 {
        "vote"
    } else {
        "votes"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_page_templates_are_loaded() {
        for (name, _) in PAGE_TEMPLATES {
            assert!(template_exists(name), "missing template {}", name);
        }
        assert!(!template_exists("definitely_not_a_real_template.html"));
    }

    #[test]
    fn test_render_missing_template() {
        let result = render_template("nonexistent.html", context! {});
        assert!(matches!(result, Err(TemplateError::NotFound(_))));
    }

    #[test]
    fn test_pluralize_votes() {
        assert_eq!(pluralize_votes(0), "votes");
        assert_eq!(pluralize_votes(1), "vote");
        assert_eq!(pluralize_votes(2), "votes");
    }

    #[test]
    fn test_not_found_page_renders_message() {
        let html = render_template(
            "not_found.html",
            context! { message => "Poll 42 not found" },
        )
        .unwrap();
        assert!(html.contains("Page not found"));
        assert!(html.contains("Poll 42 not found"));
    }
}
