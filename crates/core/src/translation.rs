//! Translation overlay for translatable entity fields.
//!
//! Translations are stored as JSON objects keyed by field name. A value is
//! resolved by starting from the base column and applying each translation
//! layer in order, so later layers win. Blank strings never override.

use serde_json::Value;

/// Object type stored in `translations.object_type` for configurator groups.
pub const OBJECT_TYPE_CONFIGURATOR_GROUP: &str = "configurator_group";

/// Object type stored in `translations.object_type` for configurator options.
pub const OBJECT_TYPE_CONFIGURATOR_OPTION: &str = "configurator_option";

/// Translatable field names.
pub const FIELD_NAME: &str = "name";
pub const FIELD_DESCRIPTION: &str = "description";

/// Resolve a required text field.
///
/// `layers` is ordered from lowest to highest priority (fallback shop first,
/// current shop last).
pub fn translate(base: &str, field: &str, layers: &[Option<&Value>]) -> String {
    translated_value(field, layers)
        .map(str::to_string)
        .unwrap_or_else(|| base.to_string())
}

/// Resolve an optional text field. See [`translate`].
pub fn translate_optional(
    base: Option<&str>,
    field: &str,
    layers: &[Option<&Value>],
) -> Option<String> {
    translated_value(field, layers)
        .or(base)
        .map(str::to_string)
}

fn translated_value<'a>(field: &str, layers: &[Option<&'a Value>]) -> Option<&'a str> {
    layers
        .iter()
        .rev()
        .copied()
        .flatten()
        .find_map(|layer| {
            layer
                .get(field)
                .and_then(Value::as_str)
                .filter(|s| !s.trim().is_empty())
        })
}
