//! Request handlers.
//!
//! Each submodule provides async handler functions for one surface. Handlers
//! delegate to the resolver and the repositories in `pagehost_db`, and map
//! errors via [`crate::error::AppError`].

pub mod clients;
pub mod components;
pub mod pages;
pub mod render;
