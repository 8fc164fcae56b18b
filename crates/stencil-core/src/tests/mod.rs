//! Unit tests for `stencil_core` types.

mod config_tests;
mod constraint_tests;
mod handler_tests;
mod resolve_tests;
mod template_tests;
