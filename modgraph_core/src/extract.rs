mod collector;
pub mod extractor;
pub mod grammar;

pub use extractor::{ExtractDiagnostic, Extraction, ImportExtractor, SUPPORTED_EXTENSIONS};
pub use grammar::GrammarProfile;

/// Accepts or rejects a non-relative specifier.
pub type SpecifierFilter<'f> = &'f dyn Fn(&str) -> bool;
