// self
use aad_authority::{
	authority::{AadAuthorityAudience, Authority, AuthorityType, AzureCloudInstance, is_same_cloud},
	config::ClientApplicationBuilder,
	error::ConfigError,
};

const CLIENT_ID: &str = "client-it";

#[test]
fn default_configuration_resolves_to_common_on_the_public_cloud() {
	let config = ClientApplicationBuilder::new(CLIENT_ID)
		.build()
		.expect("Default configuration should build successfully.");
	let authority = config.authority.as_ref().expect("Build must write the authority back.");

	assert_eq!(authority.authority_type(), AuthorityType::Aad);
	assert_eq!(
		authority.canonical_authority().as_str(),
		"https://login.microsoftonline.com/common/",
	);
}

#[test]
fn instance_and_cloud_instance_fail_with_the_stable_code() {
	let err = ClientApplicationBuilder::new(CLIENT_ID)
		.instance("https://login.microsoftonline.de")
		.azure_cloud_instance(AzureCloudInstance::AzureGermany)
		.build()
		.expect_err("Conflicting instance inputs must be rejected.");

	assert_eq!(err, ConfigError::InstanceAndAzureCloudInstanceAreMutuallyExclusive);
	assert_eq!(err.code(), "instance_and_azure_cloud_instance_are_mutually_exclusive");
}

#[test]
fn tenant_and_audience_fail_with_the_stable_code() {
	let err = ClientApplicationBuilder::new(CLIENT_ID)
		.tenant_id("contoso")
		.audience(AadAuthorityAudience::AzureAdMultipleOrgs)
		.build()
		.expect_err("Conflicting tenant inputs must be rejected.");

	assert_eq!(err, ConfigError::TenantIdAndAadAuthorityInstanceAreMutuallyExclusive);
	assert_eq!(err.code(), "tenant_id_and_aad_authority_instance_are_mutually_exclusive");
}

#[test]
fn authority_uri_with_a_different_tenant_fails_as_specified_twice() {
	let err = ClientApplicationBuilder::new(CLIENT_ID)
		.authority("https://login.microsoftonline.com/contoso")
		.tenant_id("fabrikam")
		.build()
		.expect_err("Conflicting tenant override must be rejected.");

	assert!(matches!(err, ConfigError::AuthorityTenantSpecifiedTwice { .. }));
	assert_eq!(err.code(), "authority_tenant_specified_twice");
}

#[test]
fn alias_authority_accepts_a_tenant_override() {
	let config = ClientApplicationBuilder::new(CLIENT_ID)
		.authority("https://login.microsoftonline.com/organizations")
		.tenant_id("contoso.onmicrosoft.com")
		.build()
		.expect("Alias tenant override should be accepted.");
	let authority = config.authority.as_ref().expect("Build must write the authority back.");

	assert_eq!(
		authority.canonical_authority().as_str(),
		"https://login.microsoftonline.com/contoso.onmicrosoft.com/",
	);
}

#[test]
fn resolution_is_idempotent_across_identical_builders() {
	let build = || {
		ClientApplicationBuilder::new(CLIENT_ID)
			.azure_cloud_instance(AzureCloudInstance::AzureChina)
			.tenant_id("contoso")
			.build()
			.expect("Cloud-instance configuration should build successfully.")
	};
	let first = build();
	let second = build();

	assert_eq!(
		first.authority.as_ref().map(|a| a.canonical_authority().as_str().to_owned()),
		second.authority.as_ref().map(|a| a.canonical_authority().as_str().to_owned()),
	);
	assert_eq!(
		first.authority.as_ref().map(|a| a.canonical_authority().as_str().to_owned()),
		Some("https://login.partner.microsoftonline.cn/contoso/".to_owned()),
	);
}

#[test]
fn with_tenant_round_trips_replacing_only_the_tenant_segment() {
	let authority = Authority::create("https://login.microsoftonline.com/common", false)
		.expect("Authority fixture should be valid.");
	let rewritten = authority
		.with_tenant("contoso.onmicrosoft.com")
		.expect("Tenant rewrite should succeed for AAD authorities.");

	assert_eq!(
		rewritten.canonical_authority().as_str(),
		"https://login.microsoftonline.com/contoso.onmicrosoft.com/",
	);
	assert_eq!(
		rewritten.canonical_authority().host_str(),
		authority.canonical_authority().host_str(),
	);
	assert_eq!(rewritten.canonical_authority().scheme(), "https");
}

#[test]
fn validate_authority_with_custom_metadata_fails_for_either_source() {
	let json_err = ClientApplicationBuilder::new(CLIENT_ID)
		.validate_authority(true)
		.custom_instance_metadata(r#"{"tenant_discovery_endpoint":"https://example.com"}"#)
		.build()
		.expect_err("Validation combined with metadata JSON must be rejected.");
	let uri_err = ClientApplicationBuilder::new(CLIENT_ID)
		.validate_authority(true)
		.custom_instance_metadata_uri(
			aad_authority::url::Url::parse("https://metadata.example.com/instances")
				.expect("Metadata URI fixture should parse successfully."),
		)
		.build()
		.expect_err("Validation combined with a metadata URI must be rejected.");

	assert_eq!(json_err, ConfigError::ValidateAuthorityOrCustomMetadata);
	assert_eq!(uri_err, ConfigError::ValidateAuthorityOrCustomMetadata);
	assert_eq!(json_err.code(), "validate_authority_or_custom_metadata");
}

#[test]
fn no_client_id_fails_before_any_resolution() {
	let err = ClientApplicationBuilder::new("")
		.instance("https://login.microsoftonline.de")
		.azure_cloud_instance(AzureCloudInstance::AzureGermany)
		.build()
		.expect_err("Empty client identifiers must be rejected first.");

	assert_eq!(err, ConfigError::NoClientId);
	assert_eq!(err.code(), "no_client_id");
}

#[test]
fn sovereign_cloud_hosts_compare_as_aliases() {
	assert!(is_same_cloud("login.windows.net", "login.microsoftonline.com"));
	assert!(!is_same_cloud("login.microsoftonline.com", "login.partner.microsoftonline.cn"));
}
