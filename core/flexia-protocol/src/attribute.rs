use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Characters that separate attribute names in both dictionary lines and specifiers.
pub fn is_attribute_separator(c: char) -> bool {
    c == ',' || c.is_whitespace()
}

/// A single grammatical tag ("gen", "pl", "masc", ...).
///
/// Always trimmed, lowercased and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[archive(check_bytes)]
#[archive_attr(derive(Debug))]
pub struct Attribute(String);

impl Attribute {
    /// Normalizes a raw tag. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Attribute {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ArchivedAttribute {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An immutable set of attributes.
///
/// Stored sorted and deduplicated so that equal sets compare and hash equal
/// regardless of the order they were written in, and so the archived form can
/// be searched without rebuilding anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Attribute>", into = "Vec<Attribute>"))]
#[archive(check_bytes)]
#[archive_attr(derive(Debug))]
pub struct AttributeSet {
    attrs: Vec<Attribute>,
}

impl AttributeSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a comma/whitespace separated list, e.g. `"gen,pl"` or `"Gen PL"`.
    pub fn parse(list: &str) -> Self {
        list.split(is_attribute_separator)
            .filter_map(Attribute::new)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attrs.iter()
    }

    pub fn contains(&self, attr: &str) -> bool {
        self.attrs
            .binary_search_by(|a| a.as_str().cmp(attr))
            .is_ok()
    }

    /// True when every attribute of `query` is present in `self`.
    pub fn is_superset_of(&self, query: &AttributeSet) -> bool {
        covers(&self.attrs, &query.attrs)
    }

    /// True when every attribute of `self` is present in `other`.
    pub fn is_subset_of(&self, other: &AttributeSet) -> bool {
        covers(&other.attrs, &self.attrs)
    }
}

impl ArchivedAttributeSet {
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    pub fn is_superset_of(&self, query: &AttributeSet) -> bool {
        covers(self.attrs.as_slice(), &query.attrs)
    }
}

// Both sides are sorted by the same string ordering.
fn covers<A: AsRef<str>>(have: &[A], want: &[Attribute]) -> bool {
    if want.len() > have.len() {
        return false;
    }
    want.iter().all(|w| {
        have.binary_search_by(|h| h.as_ref().cmp(w.as_str()))
            .is_ok()
    })
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = Attribute>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<_>>())
    }
}

impl From<Vec<Attribute>> for AttributeSet {
    fn from(mut attrs: Vec<Attribute>) -> Self {
        attrs.sort_unstable();
        attrs.dedup();
        Self { attrs }
    }
}

impl From<AttributeSet> for Vec<Attribute> {
    fn from(set: AttributeSet) -> Self {
        set.attrs
    }
}

impl fmt::Display for AttributeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, attr) in self.attrs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            f.write_str(attr.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_normalization() {
        let set = AttributeSet::parse(" PL,Gen,,gen\tpl ");
        assert_eq!(set.len(), 2);
        assert!(set.contains("gen"));
        assert!(set.contains("pl"));
        assert_eq!(set.to_string(), "gen,pl");
    }

    #[test]
    fn test_order_insensitive_equality() {
        assert_eq!(AttributeSet::parse("nom,sg,masc"), AttributeSet::parse("masc sg nom"));
    }

    #[test]
    fn test_blank_attribute_rejected() {
        assert!(Attribute::new("   ").is_none());
        assert_eq!(Attribute::new(" NOM ").unwrap().as_str(), "nom");
        assert!(AttributeSet::parse(" , ,").is_empty());
    }

    #[test]
    fn test_superset_and_subset() {
        let form = AttributeSet::parse("gen,pl,masc");
        let query = AttributeSet::parse("gen,pl");

        assert!(form.is_superset_of(&query));
        assert!(!query.is_superset_of(&form));
        assert!(query.is_subset_of(&form));
        assert!(!form.is_subset_of(&query));
        assert!(!form.is_superset_of(&AttributeSet::parse("dat")));
    }

    #[test]
    fn test_empty_query_is_always_covered() {
        let empty = AttributeSet::empty();
        assert!(empty.is_superset_of(&empty));
        assert!(AttributeSet::parse("nom").is_superset_of(&empty));
        assert!(empty.is_subset_of(&AttributeSet::parse("nom")));
    }
}
