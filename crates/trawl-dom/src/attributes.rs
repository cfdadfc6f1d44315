//! Ordered element attribute lists.
//!
//! [§ 4.9.2 Interface NamedNodeMap](https://dom.spec.whatwg.org/#interface-namednodemap)
//! "A NamedNodeMap has an associated element (an element)."
//! "A NamedNodeMap object's attribute list is its element's attribute list."
//!
//! Unlike a hash map, the list keeps source order so serialization and
//! generic-tree conversion reproduce attributes exactly as written.

/// A single `name="value"` pair. The name keeps its source casing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name as written in the source.
    pub name: String,
    /// Attribute value, with character references already decoded.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// An element's attribute list.
///
/// Names are unique under ASCII case-insensitive comparison. When a name is
/// inserted twice the first occurrence wins, matching how the tokenizer drops
/// duplicate attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    list: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty attribute list.
    #[must_use]
    pub const fn new() -> Self {
        Self { list: Vec::new() }
    }

    /// Look up an attribute value by name (ASCII case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.list
            .iter()
            .find(|attr| attr.name.eq_ignore_ascii_case(name))
            .map(|attr| attr.value.as_str())
    }

    /// Whether an attribute with this name is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append an attribute unless one with the same name already exists.
    ///
    /// Returns `false` (and leaves the list untouched) for a duplicate.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.list.push(Attribute::new(name, value));
        true
    }

    /// Iterate attributes in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.list.iter()
    }

    /// Number of attributes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Whether the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for (name, value) in iter {
            let _ = attrs.insert(name, value);
        }
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_wins() {
        let attrs: Attributes = [("id", "a"), ("ID", "b"), ("class", "c")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs.get("id"), Some("a"));
        assert_eq!(attrs.get("Id"), Some("a"));
    }

    #[test]
    fn test_order_is_preserved() {
        let attrs: Attributes = [("z", "1"), ("a", "2"), ("m", "3")].into_iter().collect();
        let names: Vec<_> = attrs.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["z", "a", "m"]);
    }
}
