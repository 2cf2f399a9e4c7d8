//! IDE features built on the finders.
//!
//! Functions here take a host and a symbol and return plain data. Turning
//! that into margin glyphs, tooltips or navigation lists is left to the
//! caller.

mod inheritance;

pub use inheritance::{InheritanceRelations, inheritance_relations};
