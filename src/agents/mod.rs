//! Review and translation agents.
//!
//! Both agents borrow an [`AgentSession`] for each invocation; the
//! session owns the LLM backend lifecycle.

pub mod builtin;
pub mod review;
pub mod session;
pub mod translate;

pub use review::ReviewAgent;
pub use session::AgentSession;
pub use translate::TranslationAgent;
