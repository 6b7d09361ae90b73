//! Endpoints tagged `connections`.

pub mod get_tablesource;
