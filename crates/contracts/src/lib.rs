//! Browser-independent types and rules shared by the page scripts.

pub mod shared;
