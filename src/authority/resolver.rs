//! Precedence engine producing exactly one [`Authority`] from an application configuration.

// self
use crate::{
	authority::{self, AadAuthorityAudience, Authority, AuthorityType, AzureCloudInstance},
	config::ApplicationConfiguration,
	error::ConfigError,
	obs::{self, StageKind},
};

const DEFAULT_TENANT_SEGMENT: &str = "common";

/// Applies the authority precedence rules to `config` and returns the single resolved authority.
///
/// A pre-built authority wins, optionally merged with a separately supplied tenant; otherwise a
/// public tenant authority is synthesized from the instance and audience inputs. The
/// custom-metadata exclusivity rules are validated on every path. Resolution is pure: resolving
/// the same configuration twice yields identical canonical authorities.
pub fn resolve(config: &ApplicationConfiguration) -> Result<Authority, ConfigError> {
	let _guard = obs::StageSpan::new(StageKind::AuthorityResolution).entered();

	match resolve_inner(config) {
		Ok(authority) => {
			obs::record_stage_outcome(StageKind::AuthorityResolution, "success");

			Ok(authority)
		},
		Err(err) => {
			obs::record_stage_outcome(StageKind::AuthorityResolution, "failure");

			Err(err)
		},
	}
}

fn resolve_inner(config: &ApplicationConfiguration) -> Result<Authority, ConfigError> {
	let resolved = match config.authority.as_ref() {
		Some(existing) => merge_tenant(existing, config.tenant_id.as_deref())?,
		None => synthesize(config)?,
	};

	validate_custom_metadata(config)?;

	Ok(resolved)
}

/// Merges a separately supplied tenant into a pre-built authority.
///
/// Overriding is only legal when the authority is B2C (the policy pins the tenant), when its
/// existing tenant is a reserved alias, or when the override matches the existing tenant exactly.
fn merge_tenant(existing: &Authority, tenant: Option<&str>) -> Result<Authority, ConfigError> {
	let Some(tenant) = tenant else { return Ok(existing.clone()) };
	let conflicting = existing.authority_type() != AuthorityType::B2c
		&& !existing.is_common_organizations_or_consumers()
		&& existing.tenant() != Some(tenant);

	if conflicting {
		return Err(ConfigError::AuthorityTenantSpecifiedTwice {
			authority: existing.canonical_authority().as_str().to_owned(),
			tenant: tenant.to_owned(),
		});
	}

	existing.with_tenant(tenant)
}

fn synthesize(config: &ApplicationConfiguration) -> Result<Authority, ConfigError> {
	let instance = resolve_instance(config)?;
	let segment = resolve_audience_segment(config)?;
	let uri = format!("{instance}/{segment}");

	Authority::create(&uri, config.validate_authority)
}

fn resolve_instance(config: &ApplicationConfiguration) -> Result<String, ConfigError> {
	match (config.instance.as_deref(), config.azure_cloud_instance) {
		(Some(_), Some(_)) => Err(ConfigError::InstanceAndAzureCloudInstanceAreMutuallyExclusive),
		(Some(instance), None) => Ok(instance.trim_end_matches([' ', '/']).to_owned()),
		(None, Some(cloud)) => Ok(cloud.base_url().to_owned()),
		(None, None) => Ok(AzureCloudInstance::AzurePublic.base_url().to_owned()),
	}
}

fn resolve_audience_segment(config: &ApplicationConfiguration) -> Result<String, ConfigError> {
	match (config.audience, config.tenant_id.as_deref()) {
		(Some(audience), Some(_)) if audience != AadAuthorityAudience::AzureAdMyOrg =>
			Err(ConfigError::TenantIdAndAadAuthorityInstanceAreMutuallyExclusive),
		(Some(audience), tenant) => audience.tenant_segment(tenant),
		(None, Some(tenant)) => {
			authority::validate_tenant(tenant)?;

			Ok(tenant.to_owned())
		},
		(None, None) => Ok(DEFAULT_TENANT_SEGMENT.to_owned()),
	}
}

/// At most one custom metadata source is allowed, and either one disables server-side validation.
fn validate_custom_metadata(config: &ApplicationConfiguration) -> Result<(), ConfigError> {
	let has_json = config.custom_instance_metadata.is_some();
	let has_uri = config.custom_instance_metadata_uri.is_some();

	if has_json && has_uri {
		return Err(ConfigError::CustomMetadataInstanceOrUri);
	}
	if config.validate_authority && (has_json || has_uri) {
		return Err(ConfigError::ValidateAuthorityOrCustomMetadata);
	}

	Ok(())
}
