/*
 * Completeness Verification
 *
 * Matches the access paths a copy procedure reads against the leaves of
 * its parameter's type graph and reports what the copy never touches.
 *
 * Architecture:
 * - Application: CompletenessVerifier (first missing path per member)
 */

pub mod application;

pub use application::{CompletenessReport, CompletenessVerifier};
