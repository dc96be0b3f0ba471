//! Shared helpers for relay-bot integration tests.

pub mod mock_bot;
