//! Business logic use cases

pub mod display;
