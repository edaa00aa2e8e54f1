//! Authority resolution, authorization-request construction, and redirect parsing for OAuth 2.0 /
//! OpenID Connect clients of the Microsoft identity platform.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod authority;
pub mod config;
pub mod error;
pub mod obs;
pub mod query;
pub mod request;
pub mod response;

mod _prelude {
	pub use std::fmt::{Debug, Display, Formatter, Result as FmtResult};

	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use url;
