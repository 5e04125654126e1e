//! Client-side authentication state and its persistence.

pub(crate) mod core;
pub(crate) mod persist;
