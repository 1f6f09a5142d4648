use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flexia_protocol::{lemma_key, ArchivedLemmaEntry, LemmaEntry, WordForm};
use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::error::{DictError, Result};
use crate::line::DictLine;

/// Every known lemma, keyed by its uppercase form.
///
/// Produced by [`IndexBuilder`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct DictionaryIndex {
    lemmas: HashMap<String, LemmaEntry>,
}

impl DictionaryIndex {
    /// Builds an index from dictionary lines in one pass.
    pub fn build<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut builder = IndexBuilder::new();
        for line in lines {
            builder.push_line(line.as_ref());
        }
        builder.finish().0
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = IndexBuilder::new();
        for line in reader.lines() {
            builder.push_line(&line?);
        }
        Ok(builder.finish().0)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let read_err = |source| DictError::Read {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(read_err)?;
        let mut builder = IndexBuilder::new();
        for line in BufReader::new(file).lines() {
            builder.push_line(&line.map_err(read_err)?);
        }
        Ok(builder.finish().0)
    }

    /// Number of distinct lemmas.
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    /// Looks up a lemma by an already normalized key.
    pub fn entry(&self, key: &str) -> Option<&LemmaEntry> {
        self.lemmas.get(key)
    }

    pub fn lemmas(&self) -> impl Iterator<Item = &LemmaEntry> {
        self.lemmas.values()
    }

    /// Total number of word forms across all lemmas, lemma headers included.
    pub fn form_count(&self) -> usize {
        self.lemmas.values().map(|e| e.forms().len()).sum()
    }
}

impl ArchivedDictionaryIndex {
    pub fn len(&self) -> usize {
        self.lemmas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lemmas.is_empty()
    }

    pub fn entry(&self, key: &str) -> Option<&ArchivedLemmaEntry> {
        self.lemmas.get(key)
    }
}

/// Counters collected while building, reported once at the end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub lines: usize,
    pub separators: usize,
    pub headers: usize,
    pub variations: usize,
    pub lemmas: usize,
}

/// Single-writer construction of a [`DictionaryIndex`].
///
/// A usable line directly after a separator (or at the very start) opens a
/// lemma group; every following usable line is another form of that lemma.
/// Groups with no separator between them are read as one group.
#[derive(Debug)]
pub struct IndexBuilder {
    lemmas: HashMap<String, LemmaEntry>,
    current: Option<String>,
    at_separator: bool,
    stats: BuildStats,
}

impl IndexBuilder {
    pub fn new() -> Self {
        Self {
            lemmas: HashMap::new(),
            current: None,
            at_separator: true,
            stats: BuildStats::default(),
        }
    }

    pub fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;

        let (surface, attributes) = match DictLine::classify(line) {
            DictLine::Separator => {
                self.at_separator = true;
                self.stats.separators += 1;
                return;
            }
            DictLine::Entry { surface, attributes } => (surface, attributes),
        };
        let form = WordForm::new(surface, attributes);

        if self.at_separator {
            let key = lemma_key(surface);
            self.lemmas
                .entry(key.clone())
                .or_insert_with(|| LemmaEntry::new(key.clone()))
                .push(form);
            self.current = Some(key);
            self.at_separator = false;
            self.stats.headers += 1;
        } else if let Some(entry) = self.current.as_deref().and_then(|k| self.lemmas.get_mut(k)) {
            entry.push(form);
            self.stats.variations += 1;
        }
    }

    /// Freezes the index.
    pub fn finish(self) -> (DictionaryIndex, BuildStats) {
        let mut stats = self.stats;
        stats.lemmas = self.lemmas.len();

        tracing::debug!(
            lines = stats.lines,
            separators = stats.separators,
            headers = stats.headers,
            variations = stats.variations,
            lemmas = stats.lemmas,
            "dictionary index built"
        );

        (DictionaryIndex { lemmas: self.lemmas }, stats)
    }
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flexia_protocol::AttributeSet;
    use std::io::Cursor;

    const CATS: &str = "1\nКОТ nom,sg\nкота gen,sg\nкотов gen,pl\n\n2\nСОБАКА nom,sg\nсобак gen,pl\n";

    #[test]
    fn test_groups_and_headers() {
        let index = DictionaryIndex::build(CATS.lines());

        assert_eq!(index.len(), 2);
        assert_eq!(index.form_count(), 5);

        let cat = index.entry("КОТ").expect("КОТ missing");
        let surfaces: Vec<&str> = cat.forms().iter().map(|f| f.surface.as_str()).collect();
        assert_eq!(surfaces, vec!["КОТ", "кота", "котов"]);
        assert_eq!(cat.forms()[0].attributes, AttributeSet::parse("nom,sg"));
    }

    #[test]
    fn test_header_keeps_original_case() {
        let index = DictionaryIndex::build(["Кошка fem"]);
        let entry = index.entry("КОШКА").expect("КОШКА missing");
        assert_eq!(entry.key(), "КОШКА");
        assert_eq!(entry.forms()[0].surface, "Кошка");
    }

    #[test]
    fn test_redeclared_lemma_appends() {
        let index = DictionaryIndex::build(["1", "кот", "котов gen,pl", "2", "КОТ", "коту dat,sg"]);

        assert_eq!(index.len(), 1);
        let surfaces: Vec<&str> = index
            .entry("КОТ")
            .unwrap()
            .forms()
            .iter()
            .map(|f| f.surface.as_str())
            .collect();
        assert_eq!(surfaces, vec!["кот", "котов", "КОТ", "коту"]);
    }

    #[test]
    fn test_missing_separator_merges_groups() {
        let index = DictionaryIndex::build(["КОТ", "котов gen,pl", "СОБАКА", "собак gen,pl"]);

        assert_eq!(index.len(), 1);
        assert!(index.entry("СОБАКА").is_none());
        assert_eq!(index.entry("КОТ").unwrap().forms().len(), 4);
    }

    #[test]
    fn test_padded_line_splits_groups() {
        let index = DictionaryIndex::build(["КОТ", "котов gen,pl", " СОБАКА", "собак gen,pl"]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.entry("КОТ").unwrap().forms().len(), 2);
        assert!(index.entry("СОБАКА").is_none());

        let next = index.entry("СОБАК").expect("line after the padded one opens a lemma");
        assert_eq!(next.forms()[0].surface, "собак");
    }

    #[test]
    fn test_stats() {
        let mut builder = IndexBuilder::new();
        for line in CATS.lines() {
            builder.push_line(line);
        }
        let (index, stats) = builder.finish();

        assert_eq!(stats.lines, 8);
        assert_eq!(stats.separators, 3);
        assert_eq!(stats.headers, 2);
        assert_eq!(stats.variations, 3);
        assert_eq!(stats.lemmas, index.len());
    }

    #[test]
    fn test_from_reader_handles_crlf() {
        let text = "1\r\nКОТ\r\nкотов gen,pl\r\n";
        let index = DictionaryIndex::from_reader(Cursor::new(text)).unwrap();

        let forms = index.entry("КОТ").unwrap().forms();
        assert_eq!(forms[1].surface, "котов");
        assert_eq!(forms[1].attributes, AttributeSet::parse("gen,pl"));
    }

    #[test]
    fn test_from_path_reports_missing_file() {
        let err = DictionaryIndex::from_path("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, DictError::Read { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }
}
