pub mod parser;
pub mod token;
pub mod transducer;

pub use parser::{parse_token, tokenize_with_spans};
pub use token::{AnnotatedToken, Span};
pub use transducer::{morph, MorphedToken, Outcome, Transducer};
