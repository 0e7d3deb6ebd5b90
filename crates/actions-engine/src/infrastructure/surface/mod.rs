//! Host surfaces that receive synthesized events.

pub mod headless;
pub mod mock;
