//! PPTX (Office Open XML) backend for template extraction.
//!
//! Reads the slide layouts of .pptx files, which are ZIP archives containing
//! XML documents, into the raw presentation description used by the core.

pub mod parser;

pub use parser::PptxLayoutParser;
