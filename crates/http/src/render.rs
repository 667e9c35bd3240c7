//! View rendering seam.
//!
//! Handlers talk to a [`Renderer`] trait object, so the templating engine
//! is substitutable without touching handler code. The shipped
//! implementation wraps [`tera`] over a glob-loaded template set.

use anyhow::Context;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("failed to render template '{name}'")]
pub struct RenderError {
    pub name: String,
    #[source]
    pub source: anyhow::Error,
}

/// Renders a named template against serializable data into HTML.
pub trait Renderer: Send + Sync {
    fn render(&self, name: &str, data: &Value) -> Result<String, RenderError>;
}

/// Tera-backed renderer, loading every template matched by a glob once at
/// startup.
pub struct TeraRenderer {
    tera: tera::Tera,
}

impl TeraRenderer {
    /// Load all templates matched by `glob` (e.g. `views/*.html`).
    /// Template names are the file names relative to the glob base.
    pub fn load(glob: &str) -> anyhow::Result<Self> {
        let tera = tera::Tera::new(glob)
            .with_context(|| format!("failed to load templates from '{glob}'"))?;
        tracing::debug!(
            templates = ?tera.get_template_names().collect::<Vec<_>>(),
            "templates loaded"
        );
        Ok(Self { tera })
    }

    /// Wrap an already-built template set (used by tests).
    pub fn new(tera: tera::Tera) -> Self {
        Self { tera }
    }
}

impl Renderer for TeraRenderer {
    fn render(&self, name: &str, data: &Value) -> Result<String, RenderError> {
        let context = tera::Context::from_value(data.clone()).map_err(|err| RenderError {
            name: name.to_string(),
            source: err.into(),
        })?;

        self.tera.render(name, &context).map_err(|err| RenderError {
            name: name.to_string(),
            source: err.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn renderer_with(name: &str, body: &str) -> TeraRenderer {
        let mut tera = tera::Tera::default();
        tera.add_raw_template(name, body).unwrap();
        TeraRenderer::new(tera)
    }

    #[test]
    fn renders_rows_from_serialized_data() {
        let renderer = renderer_with(
            "book-table.html",
            "{% for book in books %}<tr><td>{{ book.BookName }}</td></tr>{% endfor %}",
        );

        let html = renderer
            .render(
                "book-table.html",
                &json!({ "books": [ { "BookName": "Frankenstein" } ] }),
            )
            .unwrap();

        assert!(html.contains("<tr><td>Frankenstein</td></tr>"));
    }

    #[test]
    fn missing_template_is_an_error() {
        let renderer = renderer_with("index.html", "<h1>hi</h1>");
        let err = renderer
            .render("missing.html", &json!({}))
            .unwrap_err();
        assert_eq!(err.name, "missing.html");
    }

    // A second implementation goes through the same seam; handler code is
    // renderer-agnostic.
    struct EchoRenderer;

    impl Renderer for EchoRenderer {
        fn render(&self, name: &str, _data: &Value) -> Result<String, RenderError> {
            Ok(format!("<!-- {name} -->"))
        }
    }

    #[test]
    fn alternate_renderers_are_substitutable() {
        let renderer: Box<dyn Renderer> = Box::new(EchoRenderer);
        let html = renderer.render("index.html", &json!({})).unwrap();
        assert_eq!(html, "<!-- index.html -->");
    }
}
