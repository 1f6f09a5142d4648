use wasm_bindgen::prelude::*;
use flexia_dict::{snapshot, DictionaryIndex};
use flexia_parser::{Outcome, Transducer};
use serde::Serialize;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// The structured response sent back to JavaScript
#[derive(Debug, Serialize)]
pub struct TokenReport {
    pub source: String,
    pub output: String,
    pub outcome: Outcome,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Serialize)]
pub struct MorphReport {
    pub output: String,
    pub tokens: Vec<TokenReport>,
    pub debug_info: String,
}

/// The engine instance running in the browser. Owns its index.
#[wasm_bindgen]
pub struct FlexiaEngine {
    index: DictionaryIndex,
}

#[wasm_bindgen]
impl FlexiaEngine {
    /// Builds the index from dictionary text (loaded via fetch() in JS).
    #[wasm_bindgen(constructor)]
    pub fn new(dictionary: &str) -> Self {
        Self {
            index: DictionaryIndex::build(dictionary.lines()),
        }
    }

    /// Loads a snapshot produced by `lexicon-compiler compile`.
    pub fn from_snapshot(data: Vec<u8>) -> Result<FlexiaEngine, JsError> {
        let bytes = snapshot::aligned(&data);
        let index = snapshot::from_bytes(&bytes)?;
        Ok(Self { index })
    }

    pub fn morph(&self, sentence: &str) -> String {
        Transducer::new(&self.index).morph(sentence)
    }

    /// Per-token report as a plain JS object.
    pub fn inspect(&self, sentence: &str) -> Result<JsValue, JsError> {
        serde_wasm_bindgen::to_value(&self.report(sentence)).map_err(|e| JsError::new(&e.to_string()))
    }

    pub fn lemma_count(&self) -> usize {
        self.index.len()
    }
}

impl FlexiaEngine {
    pub fn report(&self, sentence: &str) -> MorphReport {
        let tokens: Vec<TokenReport> = Transducer::new(&self.index)
            .analyze(sentence)
            .into_iter()
            .map(|t| TokenReport {
                source: t.source.to_string(),
                output: t.output,
                outcome: t.outcome,
                start: t.span.start,
                end: t.span.end,
            })
            .collect();

        let output = tokens
            .iter()
            .map(|t| t.output.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        MorphReport {
            output,
            tokens,
            debug_info: format!("Lemmas: {}, Forms: {}", self.index.len(), self.index.form_count()),
        }
    }
}
