//! Game implementations.

pub mod checkers;
