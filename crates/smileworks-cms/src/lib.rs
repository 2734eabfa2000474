//! Smileworks CMS Library
//!
//! Talks to the headless content backend: a thin REST client behind the
//! [`ContentBackend`] trait, typed data accessors with log-and-degrade
//! failure semantics, the three-strategy page resolver, request-scoped
//! auxiliary data collection, and the form-submission mutations.

pub mod assets;
pub mod auxiliary;
pub mod backend;
pub mod error;
pub mod health;
pub mod mutations;
pub mod query;
pub mod resolver;
pub mod store;

pub use auxiliary::collect_auxiliary;
pub use backend::{ContentBackend, HttpBackend, OfflineBackend, backend_from_config};
pub use error::{CmsError, Result};
pub use query::Query;
pub use resolver::{RESERVED_PREFIXES, Resolution, Resolver, STRATEGY_ORDER, Strategy};
pub use store::ContentStore;
