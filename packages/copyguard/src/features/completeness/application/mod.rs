/*
 * Completeness Application Layer
 */

mod verifier;

pub use verifier::{CompletenessReport, CompletenessVerifier};
