//! Core business logic for vidplan.
//!
//! Every operation takes an explicit [`RequestContext`], resolves the caller
//! through the identity gate first, and only then touches the stores.

pub mod aggregate;
pub mod filter;
pub mod guard;
pub mod identity;
pub mod services;

pub use identity::RequestContext;
pub use services::*;
