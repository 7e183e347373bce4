//! Template port: rendering of body templates and value templates.

use crate::ports::http::BoxError;

/// Template failures.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// The template does not compile.
    #[error("template syntax error")]
    Syntax(#[source] BoxError),

    /// The template compiled but rendering failed.
    #[error("template render error")]
    Render(#[source] BoxError),
}

/// Renders string templates.
///
/// Rendering is synchronous and does no IO.
pub trait TemplateRenderer {
    /// Check that `template` compiles, without rendering it.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::Syntax`] when it does not.
    fn validate(&self, template: &str) -> Result<(), TemplateError>;

    /// Render `template` with no variables in scope.
    ///
    /// Text without template syntax renders to itself.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if compiling or rendering fails.
    fn render(&self, template: &str) -> Result<String, TemplateError>;

    /// Render `template` against a raw response body.
    ///
    /// `value` is bound to the raw text and, when the text parses as JSON,
    /// `value_json` is bound to the parsed document. Text that is not JSON
    /// is only available as `value`. If rendering fails, `error_value` is
    /// returned instead.
    fn render_with_possible_json(&self, template: &str, value: &str, error_value: &str) -> String;
}

impl<T: TemplateRenderer> TemplateRenderer for std::sync::Arc<T> {
    fn validate(&self, template: &str) -> Result<(), TemplateError> {
        (**self).validate(template)
    }

    fn render(&self, template: &str) -> Result<String, TemplateError> {
        (**self).render(template)
    }

    fn render_with_possible_json(&self, template: &str, value: &str, error_value: &str) -> String {
        (**self).render_with_possible_json(template, value, error_value)
    }
}
