//! Field metadata for resource types.
//!
//! Each resource type publishes which fields exist, which are shown by
//! default, and which the server can sort on. Managers use it to reject
//! unknown field names before a request is sent, and the shell uses it for
//! column headings.

/// A field name with its display label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Field name on the wire.
    pub name: &'static str,
    /// Column heading.
    pub label: &'static str,
}

impl Field {
    /// Creates a new field.
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label }
    }
}

/// Returns the field names of a field set, in order.
#[must_use]
pub fn field_names(fields: &[Field]) -> Vec<&'static str> {
    fields.iter().map(|f| f.name).collect()
}

/// Returns the label for `name`, or `name` itself when unknown.
#[must_use]
pub fn label_for<'a>(fields: &[Field], name: &'a str) -> &'a str {
    fields
        .iter()
        .find(|f| f.name == name)
        .map_or(name, |f| f.label)
}

/// Resolves a field given either its name or its label.
#[must_use]
pub fn resolve_field(fields: &[Field], name_or_label: &str) -> Option<&'static str> {
    fields
        .iter()
        .find(|f| f.name == name_or_label || f.label == name_or_label)
        .map(|f| f.name)
}

/// Returns the requested names that are not in `fields`, in request order.
#[must_use]
pub fn invalid_fields<'a, S: AsRef<str>>(requested: &'a [S], fields: &[Field]) -> Vec<&'a str> {
    requested
        .iter()
        .map(<S as AsRef<str>>::as_ref)
        .filter(|name| !fields.iter().any(|f| f.name == *name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELDS: &[Field] = &[
        Field::new("uuid", "UUID"),
        Field::new("created_at", "Created At"),
    ];

    #[test]
    fn test_field_names() {
        assert_eq!(field_names(FIELDS), vec!["uuid", "created_at"]);
    }

    #[test]
    fn test_label_for() {
        assert_eq!(label_for(FIELDS, "created_at"), "Created At");
        assert_eq!(label_for(FIELDS, "extra"), "extra");
    }

    #[test]
    fn test_resolve_field_by_name_or_label() {
        assert_eq!(resolve_field(FIELDS, "created_at"), Some("created_at"));
        assert_eq!(resolve_field(FIELDS, "Created At"), Some("created_at"));
        assert_eq!(resolve_field(FIELDS, "attributes"), None);
    }

    #[test]
    fn test_invalid_fields() {
        let requested = ["uuid", "foo", "bar"];
        assert_eq!(invalid_fields(&requested, FIELDS), vec!["foo", "bar"]);
        assert!(invalid_fields(&["uuid"], FIELDS).is_empty());
    }
}
