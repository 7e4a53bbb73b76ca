//! Text primitives shared by the editing crates: character classes,
//! visible columns and indentation arithmetic.

pub mod chars;
pub mod column;
pub mod indent;
