//! Template-based form rendering
//!
//! Renders forms with minijinja so hosts can publish and edit the form view
//! without recompiling. The template receives:
//!
//! - `form`: the field map, an ordered object of field name to descriptor
//!   (keys as serialized by [`FieldDescriptor`](super::FieldDescriptor))
//! - `dynamicforms`: the configuration, of which `css.submit` is used

use std::path::Path;

use minijinja::Environment;

use super::field::FieldMap;
use crate::config::FormsConfig;
use crate::error::FormResult;

const FORM_TEMPLATE: &str = "form.html";
const BUILTIN_FORM: &str = include_str!("../../templates/form.html.jinja");

/// Renders forms using minijinja templates
///
/// # Examples
///
/// ```rust
/// use acton_schema_forms::config::FormsConfig;
/// use acton_schema_forms::forms::{FieldMap, TemplateFormRenderer};
///
/// let renderer = TemplateFormRenderer::from_source(
///     "{% for name, f in form|items %}[{{ name }}]{% endfor %}<{{ dynamicforms.css.submit }}>",
/// )
/// .unwrap();
///
/// let html = renderer.render(&FieldMap::new(), &FormsConfig::default()).unwrap();
/// assert!(html.starts_with("<btn"));
/// ```
#[derive(Debug)]
pub struct TemplateFormRenderer {
    env: Environment<'static>,
    template: String,
}

impl TemplateFormRenderer {
    /// Renderer with the built-in form template
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Template`](crate::error::FormError::Template) if
    /// the template fails to compile.
    pub fn new() -> FormResult<Self> {
        Self::from_source(BUILTIN_FORM)
    }

    /// Renderer with a host-supplied template source
    ///
    /// The source is registered as `form.html`, so output is HTML-escaped.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Template`](crate::error::FormError::Template) if
    /// the template fails to compile.
    pub fn from_source(source: impl Into<String>) -> FormResult<Self> {
        let mut env = Environment::new();
        env.add_template_owned(FORM_TEMPLATE, source.into())?;
        Ok(Self {
            env,
            template: FORM_TEMPLATE.to_string(),
        })
    }

    /// Renderer loading `name` from a template directory
    ///
    /// The template is read on first render and cached for the lifetime of
    /// the renderer. Escaping follows the template's extension.
    #[must_use]
    pub fn from_dir(dir: impl AsRef<Path>, name: impl Into<String>) -> Self {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(dir));
        Self {
            env,
            template: name.into(),
        }
    }

    /// Render a field map
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Template`](crate::error::FormError::Template) if
    /// the template is missing or fails to render.
    pub fn render(&self, fields: &FieldMap, config: &FormsConfig) -> FormResult<String> {
        let template = self.env.get_template(&self.template)?;
        let html = template.render(minijinja::context! {
            form => fields,
            dynamicforms => config,
        })?;
        tracing::trace!(
            template = %self.template,
            fields = fields.len(),
            "Rendered form template"
        );
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::{FieldDescriptor, FormView};
    use indexmap::IndexMap;

    fn sample_fields() -> FieldMap {
        let mut name = FieldDescriptor::new("App\\User", "name");
        name.input_type = Some("text".into());
        name.class = Some("form-control".into());
        name.value = "Ada".into();

        let mut role = FieldDescriptor::new("App\\User", "role_id");
        role.input_type = Some("select".into());
        role.class = Some("form-control".into());
        role.selected = Some("2".into());
        role.options = Some(IndexMap::from([
            ("1".to_string(), "Admin".to_string()),
            ("2".to_string(), "Editor".to_string()),
        ]));

        let untyped = FieldDescriptor::new("App\\User", "notes");

        [name, role, untyped]
            .into_iter()
            .collect::<FieldMap>()
            .disable(["name"])
    }

    #[test]
    fn test_builtin_template_matches_compiled_view() {
        let config = FormsConfig::default();
        let fields = sample_fields();

        let from_minijinja = TemplateFormRenderer::new()
            .unwrap()
            .render(&fields, &config)
            .unwrap();
        let from_askama = FormView::new(&fields, &config).render_html().unwrap();

        assert_eq!(from_minijinja.trim(), from_askama.trim());
    }

    #[test]
    fn test_builtin_template_output() {
        let html = TemplateFormRenderer::new()
            .unwrap()
            .render(&sample_fields(), &FormsConfig::default())
            .unwrap();

        assert!(html.contains(
            r#"<input id="name" name="name" class="form-control" type="text" value="Ada" disabled>"#
        ));
        assert!(html.contains(r#"<option value="2" selected>Editor</option>"#));
        assert!(html.contains(r#"<input id="notes" name="notes" class="" type="" value="">"#));
    }

    #[test]
    fn test_custom_source() {
        let renderer = TemplateFormRenderer::from_source(
            "{% for name, f in form|items %}{{ name }}:{{ f.value }};{% endfor %}",
        )
        .unwrap();
        let out = renderer.render(&sample_fields(), &FormsConfig::default()).unwrap();
        assert_eq!(out, "name:Ada;role_id:;notes:;");
    }

    #[test]
    fn test_invalid_source_is_template_error() {
        let err = TemplateFormRenderer::from_source("{% for %}").unwrap_err();
        assert!(matches!(err, crate::error::FormError::Template(_)));
    }

    #[test]
    fn test_from_dir_loads_published_view() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("custom.html"),
            "{% for name, f in form|items %}<p>{{ f.model }}</p>{% endfor %}",
        )
        .unwrap();

        let renderer = TemplateFormRenderer::from_dir(dir.path(), "custom.html");
        let out = renderer.render(&sample_fields(), &FormsConfig::default()).unwrap();
        assert!(out.starts_with("<p>App\\User</p>"));

        let missing = TemplateFormRenderer::from_dir(dir.path(), "absent.html");
        assert!(missing.render(&FieldMap::new(), &FormsConfig::default()).is_err());
    }
}
