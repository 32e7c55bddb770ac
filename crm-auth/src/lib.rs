//! Authentication and Authorization
//!
//! The session store owns the single current identity of a running instance
//! and mediates login, logout, password reset and restore-at-startup. The
//! route guard decides which views that identity may reach and which
//! navigation entries it is shown.

pub mod error;
pub mod guard;
pub mod identity;
pub mod registry;
pub mod session;
pub mod storage;

pub use crm_core::GuardPolicy;
pub use error::AuthError;
pub use guard::{Decision, NavItem, RouteGuard, View};
pub use identity::{Identity, Role};
pub use registry::{IdentityProvider, StaticRegistry};
pub use session::{SessionStore, SESSION_KEY};
pub use storage::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
