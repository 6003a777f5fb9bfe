//! Phase-ordering tests that need to seed router contents directly
