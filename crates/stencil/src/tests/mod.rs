//! Unit tests for the pattern compiler.

mod support;

mod reference_tests;
mod strategy_tests;
