/*
 * Java Front End Application Layer
 */

mod frontend;

pub use frontend::{JavaFrontend, JavaProgram};
