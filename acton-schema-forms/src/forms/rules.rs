//! Checking submitted values against the configured validation rules
//!
//! Rule strings use the `|`-separated vocabulary of the type configuration:
//!
//! | Rule               | Passes when                                            |
//! |--------------------|--------------------------------------------------------|
//! | `required`         | the value is present and not blank                     |
//! | `string`           | always (submitted values are strings)                  |
//! | `integer`          | the value parses as a signed integer                   |
//! | `numeric`          | the value parses as a number                           |
//! | `email`            | the value is a valid email address                     |
//! | `date_format:<f>`  | the value matches the PHP-style date format `f`        |
//! | `max:<n>`/`min:<n>`| length (or numeric value for numeric fields) in bounds |
//!
//! Rules other than `required` are skipped for empty values. Unknown rules
//! are ignored.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use indexmap::IndexMap;
use validator::ValidateEmail;

use super::error::ValidationErrors;
use super::field::{FieldDescriptor, FieldMap};

impl FieldMap {
    /// Validation rule string per field
    ///
    /// Combines the configured rule string with `max:<length>` when the
    /// column declares a length. Fields with neither are left out.
    #[must_use]
    pub fn rules(&self) -> IndexMap<String, String> {
        self.iter()
            .filter_map(|(name, field)| {
                let rules = field_rules(field);
                (!rules.is_empty()).then(|| (name.to_string(), rules.join("|")))
            })
            .collect()
    }

    /// Check submitted values against each field's rules
    ///
    /// Disabled fields are skipped since their inputs are not submitted.
    /// Missing values are treated as empty.
    ///
    /// # Errors
    ///
    /// Returns every failed rule, grouped by field in form order.
    pub fn check(&self, submitted: &HashMap<String, String>) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (name, field) in self.iter() {
            if field.disabled.is_disabled() {
                continue;
            }
            let value = submitted.get(name).map_or("", String::as_str);
            let rules = field_rules(field);
            let required = rules.iter().any(|r| *r == "required");
            if value.trim().is_empty() && !required {
                continue;
            }
            let numeric = rules
                .iter()
                .any(|r| matches!(r.as_str(), "integer" | "numeric"));

            for rule in rules.iter().map(String::as_str) {
                let (rule_name, arg) = rule.split_once(':').unwrap_or((rule, ""));
                if let Some(message) = apply(rule_name, arg, value, numeric) {
                    errors.add_with_code(name, format!("The {name} {message}"), rule_name);
                }
            }
        }

        if errors.has_errors() {
            tracing::debug!(
                fields = ?errors.fields_with_errors(),
                "Submitted values failed validation"
            );
            Err(errors)
        } else {
            Ok(())
        }
    }
}

fn field_rules(field: &FieldDescriptor) -> Vec<String> {
    let mut rules: Vec<String> = field
        .validation
        .as_deref()
        .unwrap_or_default()
        .split('|')
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .collect();
    if let Some(length) = field.length {
        rules.push(format!("max:{length}"));
    }
    rules
}

/// Apply one rule, returning the failure message
fn apply(rule: &str, arg: &str, value: &str, numeric: bool) -> Option<String> {
    match rule {
        "required" => value
            .trim()
            .is_empty()
            .then(|| "field is required.".to_string()),
        "string" => None,
        "integer" => value
            .parse::<i64>()
            .is_err()
            .then(|| "must be an integer.".to_string()),
        "numeric" => value
            .parse::<f64>()
            .is_err()
            .then(|| "must be a number.".to_string()),
        "email" => (!value.validate_email())
            .then(|| "must be a valid email address.".to_string()),
        "date_format" => (!matches_date_format(value, arg))
            .then(|| format!("does not match the format {arg}.")),
        "max" | "min" => bound(rule, arg, value, numeric),
        other => {
            tracing::trace!(rule = other, "Ignoring unknown validation rule");
            None
        }
    }
}

fn bound(rule: &str, arg: &str, value: &str, numeric: bool) -> Option<String> {
    let Ok(limit) = arg.parse::<f64>() else {
        tracing::trace!(rule, arg, "Ignoring malformed bound");
        return None;
    };

    let (size, unit) = match value.parse::<f64>() {
        Ok(n) if numeric => (n, ""),
        _ => {
            #[allow(clippy::cast_precision_loss)]
            let chars = value.chars().count() as f64;
            (chars, " characters")
        }
    };

    match rule {
        "max" if size > limit => Some(format!("may not be greater than {arg}{unit}.")),
        "min" if size < limit => Some(format!("must be at least {arg}{unit}.")),
        _ => None,
    }
}

/// Translate a PHP `date()` format into a chrono strftime format
fn strftime_format(php: &str) -> String {
    let mut out = String::with_capacity(php.len() * 2);
    let mut chars = php.chars();
    while let Some(c) = chars.next() {
        let directive = match c {
            'Y' => "%Y",
            'y' => "%y",
            'm' | 'n' => "%m",
            'd' | 'j' => "%d",
            'H' | 'G' => "%H",
            'h' | 'g' => "%I",
            'i' => "%M",
            's' => "%S",
            'A' | 'a' => "%p",
            'D' => "%a",
            'l' => "%A",
            'M' => "%b",
            'F' => "%B",
            'U' => "%s",
            '%' => "%%",
            '\\' => {
                if let Some(escaped) = chars.next() {
                    push_literal(&mut out, escaped);
                }
                continue;
            }
            literal => {
                push_literal(&mut out, literal);
                continue;
            }
        };
        out.push_str(directive);
    }
    out
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}

fn matches_date_format(value: &str, php_format: &str) -> bool {
    let format = strftime_format(php_format);
    NaiveDateTime::parse_from_str(value, &format).is_ok()
        || NaiveDate::parse_from_str(value, &format).is_ok()
        || NaiveTime::parse_from_str(value, &format).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormsConfig;
    use crate::forms::build_fields;
    use crate::model::{DynamicModel, Record};
    use crate::testing::{user_columns, user_meta};

    fn user_fields() -> FieldMap {
        let user = DynamicModel::new(user_meta(), Record::new());
        build_fields(&user_columns(), &user, &FormsConfig::default())
    }

    fn submitted(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_rules_combine_configured_and_length() {
        let rules = user_fields().rules();
        assert_eq!(rules.get("name").map(String::as_str), Some("string|max:255"));
        assert_eq!(rules.get("born_on").map(String::as_str), Some("date_format:Y-m-d"));
        assert_eq!(rules.get("role_id").map(String::as_str), Some("integer"));
        assert!(!rules.contains_key("email"));
    }

    #[test]
    fn test_valid_submission_passes() {
        let input = submitted(&[
            ("name", "Ada"),
            ("email", "ada@example.com"),
            ("born_on", "1815-12-10"),
            ("role_id", "2"),
        ]);
        assert!(user_fields().check(&input).is_ok());
    }

    #[test]
    fn test_invalid_submission_collects_errors_in_form_order() {
        let long_name = "x".repeat(256);
        let input = submitted(&[
            ("name", long_name.as_str()),
            ("born_on", "10/12/1815"),
            ("role_id", "admin"),
        ]);
        let errors = user_fields().check(&input).unwrap_err();

        assert_eq!(errors.fields_with_errors(), vec!["name", "born_on", "role_id"]);
        assert_eq!(errors.for_field("name")[0].code.as_deref(), Some("max"));
        assert_eq!(errors.for_field("born_on")[0].code.as_deref(), Some("date_format"));
        assert_eq!(errors.for_field("role_id")[0].code.as_deref(), Some("integer"));
    }

    #[test]
    fn test_empty_optional_values_skip_rules() {
        let input = submitted(&[("role_id", "")]);
        assert!(user_fields().check(&input).is_ok());
    }

    #[test]
    fn test_required_and_email_rules() {
        let mut field = FieldDescriptor::new("App\\User", "email");
        field.validation = Some("required|email".into());
        let fields: FieldMap = std::iter::once(field).collect();

        let errors = fields.check(&HashMap::new()).unwrap_err();
        assert_eq!(errors.for_field("email")[0].code.as_deref(), Some("required"));

        let errors = fields.check(&submitted(&[("email", "not-an-address")])).unwrap_err();
        assert_eq!(errors.for_field("email")[0].code.as_deref(), Some("email"));

        assert!(fields.check(&submitted(&[("email", "ada@example.com")])).is_ok());
    }

    #[test]
    fn test_disabled_fields_are_not_checked() {
        let mut field = FieldDescriptor::new("App\\User", "name");
        field.validation = Some("required".into());
        let fields: FieldMap = std::iter::once(field).collect();

        assert!(fields.clone().check(&HashMap::new()).is_err());
        assert!(fields.disable(["name"]).check(&HashMap::new()).is_ok());
    }

    #[test]
    fn test_numeric_bounds_compare_values() {
        let mut field = FieldDescriptor::new("App\\User", "age");
        field.validation = Some("integer|min:18|max:130".into());
        let fields: FieldMap = std::iter::once(field).collect();

        assert!(fields.check(&submitted(&[("age", "42")])).is_ok());
        let errors = fields.check(&submitted(&[("age", "7")])).unwrap_err();
        assert_eq!(errors.for_field("age")[0].code.as_deref(), Some("min"));
    }

    #[test]
    fn test_unknown_rule_is_ignored() {
        let mut field = FieldDescriptor::new("App\\User", "slug");
        field.validation = Some("alpha_dash".into());
        let fields: FieldMap = std::iter::once(field).collect();
        assert!(fields.check(&submitted(&[("slug", "a b")])).is_ok());
    }

    #[test]
    fn test_php_date_formats() {
        assert_eq!(strftime_format("Y-m-d"), "%Y-%m-%d");
        assert_eq!(strftime_format("d/m/Y H:i"), "%d/%m/%Y %H:%M");
        assert_eq!(strftime_format("\\Y Y"), "Y %Y");

        assert!(matches_date_format("2024-02-29", "Y-m-d"));
        assert!(!matches_date_format("2023-02-29", "Y-m-d"));
        assert!(matches_date_format("10/12/1815 09:30", "d/m/Y H:i"));
        assert!(matches_date_format("09:30:00", "H:i:s"));
    }
}
