//! Business services

pub mod matching;
