//! Core traits implemented by injectable types and host containers.

mod component;
mod injectable;

pub use component::{Component, ComponentHost};
pub use injectable::{Injectable, Upcast};
