//! Compiled form rendering
//!
//! [`FormView`] is an askama template over a flattened copy of a
//! [`FieldMap`]. Every field becomes a `<label>` followed by either a
//! `<select>` (relation dropdowns) or a plain `<input>`, and the form ends
//! with a submit button styled by `css.submit`.

use askama::Template;

use super::field::{FieldDescriptor, FieldMap};
use crate::config::FormsConfig;
use crate::error::FormResult;

/// One `<option>` of a dropdown
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    /// Option value
    pub key: String,
    /// Option text
    pub label: String,
    /// Whether the option matches the field's selected key
    pub selected: bool,
}

/// Render-ready view of a [`FieldDescriptor`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    /// Element ID
    pub id: String,
    /// Input name, also used as label text
    pub name: String,
    /// Input type, empty when unresolved
    pub input_type: String,
    /// CSS class, empty when unresolved
    pub class: String,
    /// Current value
    pub value: String,
    /// Whether the input carries `disabled`
    pub disabled: bool,
    /// Render as `<select>`
    pub select: bool,
    /// Dropdown options, empty for plain inputs
    pub options: Vec<OptionView>,
}

impl From<&FieldDescriptor> for FieldView {
    fn from(field: &FieldDescriptor) -> Self {
        let select = field.is_select();
        let options = if select {
            field
                .options
                .iter()
                .flatten()
                .map(|(key, label)| OptionView {
                    selected: field.selected.as_deref() == Some(key.as_str()),
                    key: key.clone(),
                    label: label.clone(),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            id: field.id.clone(),
            name: field.name.clone(),
            input_type: field.input_type().to_string(),
            class: field.class().to_string(),
            value: field.value.clone(),
            disabled: field.disabled.is_disabled(),
            select,
            options,
        }
    }
}

/// The built-in form template
///
/// # Examples
///
/// ```rust
/// use acton_schema_forms::config::FormsConfig;
/// use acton_schema_forms::forms::{FieldDescriptor, FieldMap, FormView};
///
/// let mut name = FieldDescriptor::new("App\\User", "name");
/// name.input_type = Some("text".into());
/// name.value = "Ada".into();
/// let fields: FieldMap = std::iter::once(name).collect();
///
/// let html = FormView::new(&fields, &FormsConfig::default()).render_html().unwrap();
/// assert!(html.contains(r#"<input id="name" name="name" class="" type="text" value="Ada">"#));
/// ```
#[derive(Debug, Clone, Template)]
#[template(path = "form.html")]
pub struct FormView {
    /// Fields in form order
    pub fields: Vec<FieldView>,
    /// Class of the submit button
    pub submit_class: String,
}

impl FormView {
    /// Build the view for a field map
    #[must_use]
    pub fn new(fields: &FieldMap, config: &FormsConfig) -> Self {
        Self {
            fields: fields.iter().map(|(_, f)| FieldView::from(f)).collect(),
            submit_class: config.css.submit.clone(),
        }
    }

    /// Render to an HTML string
    ///
    /// # Errors
    ///
    /// Returns [`FormError::Render`](crate::error::FormError::Render) if the
    /// template fails.
    pub fn render_html(&self) -> FormResult<String> {
        Ok(self.render()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn role_select(disabled: bool) -> FieldMap {
        let mut role = FieldDescriptor::new("App\\User", "role_id");
        role.input_type = Some("select".into());
        role.class = Some("form-control".into());
        role.selected = Some("2".into());
        role.options = Some(IndexMap::from([
            ("1".to_string(), "Admin".to_string()),
            ("2".to_string(), "Editor".to_string()),
        ]));
        let fields: FieldMap = std::iter::once(role).collect();
        if disabled {
            fields.disable(["role_id"])
        } else {
            fields
        }
    }

    #[test]
    fn test_input_rendering() {
        let mut email = FieldDescriptor::new("App\\User", "email");
        email.input_type = Some("email".into());
        email.class = Some("form-control".into());
        email.value = "ada@example.com".into();
        let fields: FieldMap = std::iter::once(email).collect();

        let html = FormView::new(&fields, &FormsConfig::default())
            .render_html()
            .unwrap();
        assert!(html.contains("<label>email</label>"));
        assert!(html.contains(
            r#"<input id="email" name="email" class="form-control" type="email" value="ada@example.com">"#
        ));
    }

    #[test]
    fn test_select_rendering_marks_selected() {
        let html = FormView::new(&role_select(false), &FormsConfig::default())
            .render_html()
            .unwrap();
        assert!(html.contains(r#"<select id="role_id" name="role_id" class="form-control">"#));
        assert!(html.contains(r#"<option value="1">Admin</option>"#));
        assert!(html.contains(r#"<option value="2" selected>Editor</option>"#));
        assert!(!html.contains("<input"));
    }

    #[test]
    fn test_disabled_select_disables_options() {
        let html = FormView::new(&role_select(true), &FormsConfig::default())
            .render_html()
            .unwrap();
        assert!(html.contains(r#"<option value="1" disabled>Admin</option>"#));
        assert!(html.contains(r#"<option value="2" selected disabled>Editor</option>"#));
    }

    #[test]
    fn test_select_without_options_falls_back_to_input() {
        let mut role = FieldDescriptor::new("App\\User", "role_id");
        role.input_type = Some("select".into());
        let fields: FieldMap = std::iter::once(role).collect();

        let html = FormView::new(&fields, &FormsConfig::default())
            .render_html()
            .unwrap();
        assert!(html.contains(r#"type="select""#));
        assert!(!html.contains("<select"));
    }

    #[test]
    fn test_values_are_escaped() {
        let mut name = FieldDescriptor::new("App\\User", "name");
        name.value = r#""><script>"#.into();
        let fields: FieldMap = std::iter::once(name).collect();

        let html = FormView::new(&fields, &FormsConfig::default())
            .render_html()
            .unwrap();
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_submit_button_uses_configured_class() {
        let mut config = FormsConfig::default();
        config.css.submit = "btn btn-primary".into();

        let html = FormView::new(&FieldMap::new(), &config).render_html().unwrap();
        assert_eq!(html.trim(), r#"<button type="submit" class="btn btn-primary">Save</button>"#);
    }
}
