//! Application configuration consumed and completed by the authority resolver.

/// Fluent builder surface populating the configuration.
pub mod builder;

pub use builder::*;

// self
use crate::{
	_prelude::*,
	authority::{AadAuthorityAudience, Authority, AzureCloudInstance},
};

/// Raw, possibly-conflicting authority inputs for one client application.
///
/// The fields are plain data: setters never resolve anything, and every precedence and
/// exclusivity rule lives in [`authority::resolve`](crate::authority::resolve), which reads these
/// fields and writes exactly one resolved [`Authority`] back into [`authority`](Self::authority).
#[derive(Clone, Debug, Default)]
pub struct ApplicationConfiguration {
	/// Application (client) identifier issued by the identity provider.
	pub client_id: String,
	/// Pre-built authority, set when an authority URI was supplied directly; replaced wholesale
	/// by the resolved authority at build time.
	pub authority: Option<Authority>,
	/// Literal instance host URI, mutually exclusive with `azure_cloud_instance`.
	pub instance: Option<String>,
	/// Named cloud deployment, mutually exclusive with `instance`.
	pub azure_cloud_instance: Option<AzureCloudInstance>,
	/// Literal tenant identifier.
	pub tenant_id: Option<String>,
	/// Declared account audience; mutually exclusive with `tenant_id` unless it is the
	/// own-organization audience.
	pub audience: Option<AadAuthorityAudience>,
	/// Whether the resolved authority must be validated against server-published metadata.
	pub validate_authority: bool,
	/// Custom instance-discovery metadata JSON, mutually exclusive with the URI form.
	pub custom_instance_metadata: Option<String>,
	/// URI from which custom instance-discovery metadata should be fetched.
	pub custom_instance_metadata_uri: Option<Url>,
	/// Redirect URI registered for the application.
	pub redirect_uri: Option<Url>,
}
