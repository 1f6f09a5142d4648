use flexia_protocol::AttributeSet;

use crate::index::{ArchivedDictionaryIndex, DictionaryIndex};

/// Outcome of asking a lexicon for a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Found(&'a str),
    /// The lemma is known but none of its forms cover the query.
    Unsatisfied,
    UnknownLemma,
}

/// Read-only form lookup, implemented by every index backend.
pub trait Lexicon {
    /// Finds the first form of `key` whose attributes are a superset of `query`.
    fn find_form(&self, key: &str, query: &AttributeSet) -> Lookup<'_>;

    /// Like [`Lexicon::find_form`], falling back to `key` itself when nothing matches.
    fn word_variation<'a>(&'a self, key: &'a str, query: &AttributeSet) -> &'a str {
        match self.find_form(key, query) {
            Lookup::Found(surface) => surface,
            miss => {
                tracing::trace!(key, %query, ?miss, "no matching form, keeping lemma");
                key
            }
        }
    }
}

impl Lexicon for DictionaryIndex {
    fn find_form(&self, key: &str, query: &AttributeSet) -> Lookup<'_> {
        match self.entry(key) {
            None => Lookup::UnknownLemma,
            Some(entry) => entry
                .find(query)
                .map_or(Lookup::Unsatisfied, |form| Lookup::Found(&form.surface)),
        }
    }
}

impl Lexicon for ArchivedDictionaryIndex {
    fn find_form(&self, key: &str, query: &AttributeSet) -> Lookup<'_> {
        match self.entry(key) {
            None => Lookup::UnknownLemma,
            Some(entry) => entry
                .find(query)
                .map_or(Lookup::Unsatisfied, |form| Lookup::Found(form.surface.as_str())),
        }
    }
}

impl<L: Lexicon + ?Sized> Lexicon for &L {
    fn find_form(&self, key: &str, query: &AttributeSet) -> Lookup<'_> {
        (**self).find_form(key, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> DictionaryIndex {
        DictionaryIndex::build(["1", "КОТ", "кот nom,sg", "котов gen,pl", "2", "СОБАКА"])
    }

    #[test]
    fn test_superset_lookup() {
        let index = index();
        assert_eq!(index.word_variation("КОТ", &AttributeSet::parse("gen,pl")), "котов");
        assert_eq!(index.find_form("КОТ", &AttributeSet::parse("pl")), Lookup::Found("котов"));
    }

    #[test]
    fn test_unsatisfied_returns_lemma() {
        let index = index();
        let query = AttributeSet::parse("dat");
        assert_eq!(index.find_form("КОТ", &query), Lookup::Unsatisfied);
        assert_eq!(index.word_variation("КОТ", &query), "КОТ");
    }

    #[test]
    fn test_unknown_lemma_returns_key() {
        let index = index();
        let query = AttributeSet::parse("gen");
        assert_eq!(index.find_form("ПЁС", &query), Lookup::UnknownLemma);
        assert_eq!(index.word_variation("ПЁС", &query), "ПЁС");
    }

    #[test]
    fn test_empty_query_hits_header() {
        // Header with no attributes covers an empty query
        let index = index();
        assert_eq!(index.word_variation("СОБАКА", &AttributeSet::empty()), "СОБАКА");
        assert_eq!(index.word_variation("КОТ", &AttributeSet::empty()), "КОТ");
    }

    #[test]
    fn test_through_reference() {
        let index = index();
        let by_ref: &dyn Lexicon = &index;
        assert_eq!(by_ref.word_variation("КОТ", &AttributeSet::parse("gen")), "котов");
    }
}
