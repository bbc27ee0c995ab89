//! One module per frontend entry point.

pub mod editable;
pub mod requires;
pub mod sdist;
pub mod wheel;
