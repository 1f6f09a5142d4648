#![no_std] // Keeps the value types usable from WASM builds

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod attribute;
pub mod lexeme;

// Re-export core types for convenience
pub use attribute::{is_attribute_separator, Attribute, AttributeSet, ArchivedAttribute, ArchivedAttributeSet};
pub use lexeme::{lemma_key, ArchivedLemmaEntry, ArchivedWordForm, LemmaEntry, WordForm};
