/*
 * Diagnostics Application Layer
 */

mod reporter;

pub use reporter::{FindingReporter, ARITY_MESSAGE};
