use flexia_protocol::AttributeSet;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Byte range of a token inside the input sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedToken<'a> {
    pub span: Span,
    /// The raw token exactly as written, specifier included.
    pub text: &'a str,
    /// The word to emit or look up, specifier stripped.
    pub word: &'a str,
    /// Requested attributes. `None` for bare words, `{}` and unusable specifiers.
    pub request: Option<AttributeSet>,
}
