// Licensed under the Apache-2.0 license

//! Integration tests for mars-util-host
//!
//! This module organizes all integration tests in a single library
//! to avoid the need to list each test file in Cargo.toml


// Test modules - each contains its own #[test] functions
#[cfg(test)]
pub mod integration_tests;

#[cfg(test)]
pub mod test_session_lock;





#[cfg(test)]
pub mod test_keys;



#[cfg(test)]
pub mod test_concurrency;

#[cfg(test)]
pub mod test_udp_transport;

#[cfg(test)]
pub mod test_config;
