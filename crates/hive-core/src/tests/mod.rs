#![cfg(test)]

pub mod common;
mod integration;
