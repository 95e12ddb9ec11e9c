//! Side-effectful services the HTTP handlers delegate to.

pub mod photo_storage;
