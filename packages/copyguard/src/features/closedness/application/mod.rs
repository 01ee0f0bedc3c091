/*
 * Closedness Application Layer
 */

mod verifier;

pub use verifier::{ClosednessOutcome, ClosednessReport, ClosednessVerifier};
