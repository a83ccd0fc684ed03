//! Page chrome rendered by the server and driven from here.

pub mod left;
