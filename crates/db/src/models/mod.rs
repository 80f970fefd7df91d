//! Row types and the records returned by repositories.

pub mod title;
