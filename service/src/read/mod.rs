//! Read entities definitions.

pub mod accession;
pub mod list;
