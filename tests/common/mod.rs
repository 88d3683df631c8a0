#![allow(dead_code)]

pub mod alloc_counter;
pub mod fixtures;
