//! relsite library
//!
//! Scaffolds a bilingual static site whose GitHub Actions workflow publishes
//! a versioned snapshot to GitHub Pages on every release, applies such a
//! release locally, and points a repository's Pages source at the published
//! branch.
#![deny(unsafe_code)]

pub mod core;
pub mod generation;
pub mod infrastructure;
pub mod pages;
pub mod release;

pub use crate::{
    core::{Error, Result, SiteConfig},
    generation::scaffold,
    release::release_site,
};
