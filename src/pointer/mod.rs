//! Pointer module - Slash separated addresses into document trees.
//!
//! Pointers name a single node: `""` is the document root and each
//! `/`-separated segment selects a mapping key or sequence index. Keys
//! containing `~` or `/` travel in escaped form.

mod pointer;

pub use pointer::*;
