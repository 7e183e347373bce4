//! # restswitch-adapter-template-minijinja
//!
//! [`TemplateRenderer`] built on [minijinja](https://docs.rs/minijinja).
//!
//! Output follows the conventions of the Jinja2 engine switch templates
//! are usually written for:
//!
//! | Value | Rendered as |
//! |-------|-------------|
//! | `true` / `false` | `True` / `False` |
//! | `none` | `None` |
//! | anything else | minijinja default |
//!
//! and surrounding whitespace is trimmed, so `{{ value_json.power == "on" }}`
//! renders exactly `True` or `False`.
//!
//! ## Dependency rule
//!
//! Same as other adapters: depends on `restswitch-app` only.

use minijinja::value::ValueKind;
use minijinja::{Environment, ErrorKind, Output, State, Value};

use restswitch_app::ports::{TemplateError, TemplateRenderer};

/// Renders templates with a shared minijinja [`Environment`].
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        let mut env = Environment::new();
        env.set_formatter(python_formatter);
        Self { env }
    }
}

impl MiniJinjaRenderer {
    /// Create a renderer with the Python output conventions installed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn render_ctx(&self, template: &str, ctx: Value) -> Result<String, minijinja::Error> {
        self.env
            .render_str(template, ctx)
            .map(|out| out.trim().to_string())
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn validate(&self, template: &str) -> Result<(), TemplateError> {
        // Rendering without variables surfaces syntax errors; lookup errors
        // only mean the template expects a response value.
        match self.render_ctx(template, minijinja::context! {}) {
            Err(err) if err.kind() == ErrorKind::SyntaxError => {
                Err(TemplateError::Syntax(Box::new(err)))
            }
            _ => Ok(()),
        }
    }

    fn render(&self, template: &str) -> Result<String, TemplateError> {
        self.render_ctx(template, minijinja::context! {})
            .map_err(|err| match err.kind() {
                ErrorKind::SyntaxError => TemplateError::Syntax(Box::new(err)),
                _ => TemplateError::Render(Box::new(err)),
            })
    }

    fn render_with_possible_json(&self, template: &str, value: &str, error_value: &str) -> String {
        let ctx = if let Ok(json) = serde_json::from_str::<serde_json::Value>(value) {
            minijinja::context! {
                value => value,
                value_json => Value::from_serialize(&json),
            }
        } else {
            minijinja::context! { value => value }
        };

        self.render_ctx(template, ctx).unwrap_or_else(|err| {
            tracing::warn!(error = %err, value, "cannot render value template");
            error_value.to_string()
        })
    }
}

fn python_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    match value.kind() {
        ValueKind::Bool if value.is_true() => out.write_str("True")?,
        ValueKind::Bool => out.write_str("False")?,
        ValueKind::None => out.write_str("None")?,
        _ => minijinja::escape_formatter(out, state, value)?,
    }
    Ok(())
}
