//! Unit tests for the garden rules.
