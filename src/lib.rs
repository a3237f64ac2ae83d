// Allow dead code for items that are part of the public API but only used in tests
#![allow(dead_code)]

pub mod cmd;
pub mod dialect;
pub mod generator;
pub mod graph;
pub mod json_schema;
pub mod model;
pub mod parser;
