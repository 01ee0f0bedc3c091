/*
 * Closedness Verification
 *
 * Checks that a copy parameter's type and every type reachable through
 * its copyable members is non-extensible (sealed/final). Primitives are
 * closed; collection types are structural plumbing and only their
 * element types are checked.
 *
 * Architecture:
 * - Domain: ClosednessViolation
 * - Application: ClosednessVerifier (explicit-stack pre-order walk)
 */

pub mod application;
pub mod domain;

pub use application::{ClosednessOutcome, ClosednessReport, ClosednessVerifier};
pub use domain::ClosednessViolation;
