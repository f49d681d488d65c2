//! File collaborators: histogram and power-curve import, energy table export.

pub mod export;
pub mod import;
