//! End-to-end tests for the command-line host
//!
//! - `run` - Loading YAML inputs and rendering the optimization report
