//! PDF assembly backend for downloaded slide decks.
//!
//! Embeds each slide image as one page, sized from the image at a fixed
//! resolution.

pub mod assembler;

pub use assembler::PdfAssembler;
