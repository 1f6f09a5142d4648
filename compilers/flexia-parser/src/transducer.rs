use flexia_dict::{Lexicon, Lookup};
use flexia_protocol::lemma_key;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::parser::tokenize_with_spans;
use crate::token::{AnnotatedToken, Span};

/// What happened to a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Outcome {
    /// No attributes were requested; the word was uppercased.
    Passthrough,
    /// Replaced by a dictionary form.
    Inflected,
    /// Attributes were requested for a word the dictionary does not know.
    UnknownLemma,
    /// The lemma is known but none of its forms satisfy the request.
    Unsatisfied,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MorphedToken<'a> {
    pub span: Span,
    pub source: &'a str,
    pub output: String,
    pub outcome: Outcome,
}

/// Rewrites annotated sentences against a read-only lexicon.
///
/// The transducer only borrows the lexicon, so any number of them can share
/// one index across threads.
#[derive(Debug)]
pub struct Transducer<'d, L: ?Sized> {
    lexicon: &'d L,
}

impl<'d, L: ?Sized> Clone for Transducer<'d, L> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'d, L: ?Sized> Copy for Transducer<'d, L> {}

impl<'d, L: Lexicon + ?Sized> Transducer<'d, L> {
    pub fn new(lexicon: &'d L) -> Self {
        Self { lexicon }
    }

    /// Primary entry point: annotated sentence -> inflected sentence.
    pub fn morph(&self, sentence: &str) -> String {
        self.analyze(sentence)
            .into_iter()
            .map(|token| token.output)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Per-token report of what [`Transducer::morph`] does to `sentence`.
    pub fn analyze<'s>(&self, sentence: &'s str) -> Vec<MorphedToken<'s>> {
        let tokens: Vec<MorphedToken<'s>> = tokenize_with_spans(sentence)
            .into_iter()
            .map(|token| self.transduce(token))
            .collect();

        tracing::debug!(
            tokens = tokens.len(),
            inflected = tokens.iter().filter(|t| t.outcome == Outcome::Inflected).count(),
            "sentence morphed"
        );
        tokens
    }

    fn transduce<'s>(&self, token: AnnotatedToken<'s>) -> MorphedToken<'s> {
        let key = lemma_key(token.word);

        let (output, outcome) = match &token.request {
            None => (key, Outcome::Passthrough),
            Some(query) => match self.lexicon.find_form(&key, query) {
                Lookup::Found(surface) => (surface.to_string(), Outcome::Inflected),
                Lookup::Unsatisfied => (key, Outcome::Unsatisfied),
                Lookup::UnknownLemma => (key, Outcome::UnknownLemma),
            },
        };

        MorphedToken {
            span: token.span,
            source: token.text,
            output,
            outcome,
        }
    }
}

/// Shorthand for `Transducer::new(lexicon).morph(sentence)`.
pub fn morph<L: Lexicon + ?Sized>(sentence: &str, lexicon: &L) -> String {
    Transducer::new(lexicon).morph(sentence)
}
