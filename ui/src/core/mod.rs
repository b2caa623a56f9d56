//! Platform-agnostic building blocks: the data model, its provider, and the
//! helpers that turn numbers into display strings.

pub mod dayparts;
pub mod format;
pub mod platform;
pub mod provider;
pub mod snapshot;
pub mod theme;
pub mod timing;
