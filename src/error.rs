//! Crate-level error types shared across the authority, configuration, and request surfaces.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum Error {
	/// Local configuration problem detected while building an application.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The `state` echoed by the authorization endpoint does not match the one sent.
	#[error("Authorization state mismatch.")]
	StateMismatch,
}

/// Configuration and validation failures detected at application-build time.
///
/// Every variant pairs the human-readable [`Display`] message with a stable machine-readable
/// code exposed via [`code`](Self::code). All are detected synchronously while the configuration
/// is built; none are retried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ThisError)]
pub enum ConfigError {
	/// The authority URI already pins a tenant that differs from the separately supplied one.
	#[error("Authority `{authority}` already specifies a tenant that differs from `{tenant}`.")]
	AuthorityTenantSpecifiedTwice {
		/// Canonical authority that already carries a tenant.
		authority: String,
		/// Conflicting tenant supplied separately.
		tenant: String,
	},
	/// A literal instance URI and a named cloud instance were both configured.
	#[error("Set either the instance URI or the Azure cloud instance, not both.")]
	InstanceAndAzureCloudInstanceAreMutuallyExclusive,
	/// A literal tenant and a non-own-organization audience were both configured.
	#[error("Set either the tenant identifier or the AAD authority audience, not both.")]
	TenantIdAndAadAuthorityInstanceAreMutuallyExclusive,
	/// Both custom instance-metadata sources were configured.
	#[error("Set either the custom instance metadata JSON or its URI, not both.")]
	CustomMetadataInstanceOrUri,
	/// Authority validation was requested alongside custom instance metadata.
	#[error("Authority validation is not supported when custom instance metadata is provided.")]
	ValidateAuthorityOrCustomMetadata,
	/// The own-organization audience needs a tenant to substitute into the authority.
	#[error("The own-organization audience requires specifying a tenant identifier.")]
	AzureAdMyOrgRequiresTenant,

	/// The authority URI is not an absolute HTTPS URI with a recognized path shape.
	#[error("Authority URI `{uri}` is invalid: {reason}.")]
	InvalidAuthorityFormat {
		/// Offending authority URI.
		uri: String,
		/// Short reason describing the malformation.
		reason: &'static str,
	},
	/// The tenant identifier is malformed.
	#[error("Tenant identifier `{tenant}` is invalid: {reason}.")]
	InvalidTenant {
		/// Offending tenant identifier.
		tenant: String,
		/// Short reason describing the malformation.
		reason: &'static str,
	},
	/// No application (client) identifier was supplied.
	#[error("A non-empty client identifier is required.")]
	NoClientId,
}
impl ConfigError {
	/// Stable machine-readable code identifying the failure class.
	pub const fn code(&self) -> &'static str {
		match self {
			ConfigError::AuthorityTenantSpecifiedTwice { .. } => "authority_tenant_specified_twice",
			ConfigError::InstanceAndAzureCloudInstanceAreMutuallyExclusive =>
				"instance_and_azure_cloud_instance_are_mutually_exclusive",
			ConfigError::TenantIdAndAadAuthorityInstanceAreMutuallyExclusive =>
				"tenant_id_and_aad_authority_instance_are_mutually_exclusive",
			ConfigError::CustomMetadataInstanceOrUri => "custom_metadata_instance_or_uri",
			ConfigError::ValidateAuthorityOrCustomMetadata =>
				"validate_authority_or_custom_metadata",
			ConfigError::AzureAdMyOrgRequiresTenant => "azure_ad_my_org_requires_tenant",
			ConfigError::InvalidAuthorityFormat { .. } => "invalid_authority_format",
			ConfigError::InvalidTenant { .. } => "invalid_tenant",
			ConfigError::NoClientId => "no_client_id",
		}
	}
}
