//! Domain error to API error mapping
//!
//! A [`Mapper`] holds one [`MappingPolicy`] per domain error code plus a
//! default, an ordered list of adapters for third-party failures, and an
//! optional handler for anything left over. Policies can be written in code
//! or compiled from a [`rampart_config::MappingConfig`].

#![allow(clippy::must_use_candidate)]

mod config;
mod error;
mod mapped;
mod mapper;
mod policy;
pub mod template;

pub use error::{MapperError, TemplateError};
pub use mapped::Mapped;
pub use mapper::{Adapter, Mapper, MapperBuilder, UnknownHandler};
pub use policy::{BuildFn, DEFAULT_POLICY_TITLE, MappingPolicy, Overrides};
pub use template::Template;
