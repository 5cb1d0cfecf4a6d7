//! Repositories for the persisted trust lists.
//!
//! Both lists of an entity kind share one table; the `trusted` column tells them apart.
//! Rows are returned in insertion order, which is the order the lists are displayed in.

pub mod character;
pub mod corporation;

#[cfg(test)]
mod tests;
