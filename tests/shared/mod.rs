#![allow(dead_code)]

pub mod util;
