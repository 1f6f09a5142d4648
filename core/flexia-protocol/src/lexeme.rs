use alloc::string::String;
use alloc::vec::Vec;

use rkyv::{Archive, Deserialize, Serialize};

use crate::attribute::AttributeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Normalizes a surface word into the key lemmas are stored under.
pub fn lemma_key(word: &str) -> String {
    word.to_uppercase()
}

/// One surface spelling of a lemma and the attributes it satisfies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[archive_attr(derive(Debug))]
pub struct WordForm {
    pub surface: String,
    pub attributes: AttributeSet,
}

impl WordForm {
    pub fn new(surface: impl Into<String>, attributes: AttributeSet) -> Self {
        Self {
            surface: surface.into(),
            attributes,
        }
    }
}

/// All known forms of a lemma, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
#[archive_attr(derive(Debug))]
pub struct LemmaEntry {
    key: String,
    forms: Vec<WordForm>,
}

impl LemmaEntry {
    /// `key` must already be normalized with [`lemma_key`].
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            forms: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn forms(&self) -> &[WordForm] {
        &self.forms
    }

    pub fn push(&mut self, form: WordForm) {
        self.forms.push(form);
    }

    /// First form whose attributes cover `query`. Earlier declarations win.
    pub fn find(&self, query: &AttributeSet) -> Option<&WordForm> {
        self.forms
            .iter()
            .find(|form| form.attributes.is_superset_of(query))
    }
}

impl ArchivedLemmaEntry {
    pub fn key(&self) -> &str {
        self.key.as_str()
    }

    pub fn forms(&self) -> &[ArchivedWordForm] {
        self.forms.as_slice()
    }

    pub fn find(&self, query: &AttributeSet) -> Option<&ArchivedWordForm> {
        self.forms
            .iter()
            .find(|form| form.attributes.is_superset_of(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> LemmaEntry {
        let mut entry = LemmaEntry::new(lemma_key("кот"));
        entry.push(WordForm::new("кот", AttributeSet::parse("nom,sg")));
        entry.push(WordForm::new("котов", AttributeSet::parse("gen,pl")));
        entry
    }

    #[test]
    fn test_find_superset() {
        let entry = cat();
        let found = entry.find(&AttributeSet::parse("gen,pl")).unwrap();
        assert_eq!(found.surface, "котов");

        // Under-specified query still matches the fuller form
        let found = entry.find(&AttributeSet::parse("pl")).unwrap();
        assert_eq!(found.surface, "котов");

        assert!(entry.find(&AttributeSet::parse("dat")).is_none());
    }

    #[test]
    fn test_first_declared_wins() {
        let mut entry = LemmaEntry::new("ДОМ");
        entry.push(WordForm::new("дома", AttributeSet::parse("gen,sg")));
        entry.push(WordForm::new("дому", AttributeSet::parse("gen,sg,partitive")));

        let found = entry.find(&AttributeSet::parse("gen")).unwrap();
        assert_eq!(found.surface, "дома");
    }
}
