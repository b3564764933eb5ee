//! Store Comprehensive Test Suite
//!
//! End-to-end checks of the public `streamvault` API.
//!
//! ## Test Tiers
//!
//! - **Tier 1**: Reference scenarios (new stream, duplicate, gap, unknown)
//! - **Tier 2**: Append invariants (all-or-nothing, isolation, round-trip)
//! - **Tier 3**: Range clipping
//! - **Tier 4**: Concurrent writers and readers
//! - **Tier 5**: Key modes and configuration
//! - **Tier 6**: Property tests
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test store_comprehensive
//! ```

// Test modules
mod test_utils;

// Tier 1: Reference Scenarios
mod tier1_scenarios;




// Tier 5: Key Modes and Configuration
mod tier5_key_modes;
