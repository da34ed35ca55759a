//! Array types and operations
//!
//! This module provides the core `NdArray` type and related types for
//! shape metadata, element storage and indexing.

mod core;
mod index;
mod shape;
mod storage;

pub use core::NdArray;
pub use index::{Assignment, AxisIndex, Selection, SliceKey};
pub use shape::Shape;
pub use storage::Storage;
