//! Pure business services.

pub mod stats;
