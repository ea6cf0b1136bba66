//! Client-side session state for Bank of Columbia front ends.
//!
//! [`AuthContext`] resolves "who am I" once per page session and publishes
//! the result; [`ProtectedRoute`] turns that state into a render or redirect
//! decision for a route's access requirement.

pub mod context;
pub mod error;
pub mod guard;
pub mod source;

pub use context::{AuthContext, AuthSnapshot};
pub use error::ClientError;
pub use guard::ProtectedRoute;
pub use source::{HttpIdentitySource, IdentitySource};
