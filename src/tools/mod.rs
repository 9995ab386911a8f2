//! Agentic tools exposed to the LLM.
//!
//! Each tool implements rig-core's `Tool` trait for native tool calling
//! support.

pub mod merge_request;

pub use merge_request::MergeRequestTool;
