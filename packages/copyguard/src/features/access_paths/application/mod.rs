/*
 * Access Path Application Layer
 */

mod extractor;

pub use extractor::AccessPathExtractor;
