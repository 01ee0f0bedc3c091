/*
 * Closedness Domain Models
 */

mod violation;

pub use violation::ClosednessViolation;
