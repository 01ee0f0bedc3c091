/*
 * Analyzer Domain Models
 */

mod procedure;

pub use procedure::{Parameter, Procedure};
