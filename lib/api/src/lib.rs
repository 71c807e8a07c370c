//! # relevant API
//!
//! REST surface for the relevant content engine: index population, the
//! configuration-facing listings, and the relevance query endpoint.

pub mod rest;

pub use rest::{RestApi, SelectionInput};
