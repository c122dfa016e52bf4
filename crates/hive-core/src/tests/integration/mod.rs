#![cfg(test)]

pub mod concurrency_tests;
pub mod reentrancy_tests;
