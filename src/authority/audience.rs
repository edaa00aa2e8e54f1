// self
use crate::{_prelude::*, error::ConfigError};

/// Account classes an application may accept, expanded into the authority's tenant segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AadAuthorityAudience {
	/// Accounts from the application's own tenant only.
	AzureAdMyOrg,
	/// Work or school accounts from any tenant.
	AzureAdMultipleOrgs,
	/// Work or school accounts plus personal Microsoft accounts.
	AzureAdAndPersonalMicrosoftAccount,
	/// Personal Microsoft accounts only.
	PersonalMicrosoftAccount,
}
impl AadAuthorityAudience {
	/// Expands the audience into its tenant path segment.
	///
	/// [`AzureAdMyOrg`](Self::AzureAdMyOrg) substitutes the separately supplied tenant and fails
	/// with [`ConfigError::AzureAdMyOrgRequiresTenant`] when none was given.
	pub fn tenant_segment(self, tenant: Option<&str>) -> Result<String, ConfigError> {
		match self {
			AadAuthorityAudience::AzureAdMyOrg =>
				tenant.map(str::to_owned).ok_or(ConfigError::AzureAdMyOrgRequiresTenant),
			AadAuthorityAudience::AzureAdMultipleOrgs => Ok("organizations".to_owned()),
			AadAuthorityAudience::AzureAdAndPersonalMicrosoftAccount => Ok("common".to_owned()),
			AadAuthorityAudience::PersonalMicrosoftAccount => Ok("consumers".to_owned()),
		}
	}
}
