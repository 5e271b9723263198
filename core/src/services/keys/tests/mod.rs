//! Tests for the key service

#[cfg(test)]
mod manager_tests;
