//! Unit tests for the task ledger.
