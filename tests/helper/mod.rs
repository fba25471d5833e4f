#![allow(dead_code)]

pub mod manifest;
