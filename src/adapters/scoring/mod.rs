//! Scoring Adapters
//!
//! Implementations of the Scorer port.
//!
//! - **LexicalScorer** - weighted keyword and punctuation counting

mod lexical_scorer;
pub mod lexicon;

pub use lexical_scorer::LexicalScorer;
