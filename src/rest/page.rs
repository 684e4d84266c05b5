//! One page of a list response.
//!
//! [`Page<T>`] holds the decoded entities of a list response together with
//! the server's `next` link. It implements `Deref<Target = [T]>`, so it can
//! be used like a slice:
//!
//! ```rust,ignore
//! let page: Page<Resource> = Page::from_body(response.body)?;
//! for resource in page.iter() {
//!     println!("{:?}", resource.uuid());
//! }
//! if let Some(next) = page.next() {
//!     // follow it
//! }
//! ```

use std::ops::Deref;

use serde_json::Value;

use crate::rest::{Entity, ResourceError, RestResource};

/// Decoded entities of one list response plus its continuation link.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    items: Vec<T>,
    next: Option<String>,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub const fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self { items, next }
    }

    /// Returns the server-supplied `next` link, if any.
    #[must_use]
    pub fn next(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Returns true when the server announced a further page.
    #[must_use]
    pub const fn has_next_page(&self) -> bool {
        self.next.is_some()
    }

    /// Consumes the page, returning its entities.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: RestResource> Page<T> {
    /// Decodes a list body of the form
    /// `{"<PLURAL>": [ ... ], "next": "<url>"}`.
    ///
    /// A body without the collection key is an empty page. A blank `next`
    /// counts as absent.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::UnexpectedResponse`] if the body is not an
    /// object, the collection is not an array, or an element is not an
    /// object.
    pub fn from_body(body: Value) -> Result<Self, ResourceError> {
        let unexpected = |reason: &str| ResourceError::UnexpectedResponse {
            resource: T::NAME,
            reason: reason.to_string(),
        };

        let Value::Object(mut body) = body else {
            return Err(unexpected("expected a JSON object"));
        };

        let next = body
            .get("next")
            .and_then(Value::as_str)
            .filter(|link| !link.trim().is_empty())
            .map(String::from);

        let items = match body.remove(T::PLURAL) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(values)) => values
                .into_iter()
                .map(|value| {
                    Entity::from_value(value)
                        .map(T::from_entity)
                        .ok_or_else(|| unexpected("expected every list element to be an object"))
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(unexpected(&format!("expected '{}' to be an array", T::PLURAL)));
            }
        };

        Ok(Self { items, next })
    }
}

impl<T> Deref for Page<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
