pub mod error;
pub mod index;
pub mod lexicon;
pub mod line;
pub mod snapshot;

pub use error::{DictError, Result};
pub use index::{ArchivedDictionaryIndex, BuildStats, DictionaryIndex, IndexBuilder};
pub use lexicon::{Lexicon, Lookup};
pub use line::DictLine;
