//! Shared models

mod marker;
mod span;

pub use marker::{Marker, MarkerSet};
pub use span::Span;
