// self
use crate::{
	_prelude::*,
	authority::{self, AadAuthorityAudience, Authority, AzureCloudInstance},
	config::ApplicationConfiguration,
	error::ConfigError,
};

/// Fluent builder for client application configurations.
///
/// Setters only assign fields. Classification of the authority URI, every exclusivity rule, and
/// the final resolution all run once, inside [`build`](Self::build), so conflicting inputs fail
/// deterministically at configuration-build time rather than at request time.
#[derive(Clone, Debug)]
pub struct ClientApplicationBuilder {
	client_id: String,
	authority_uri: Option<String>,
	instance: Option<String>,
	azure_cloud_instance: Option<AzureCloudInstance>,
	tenant_id: Option<String>,
	audience: Option<AadAuthorityAudience>,
	validate_authority: bool,
	custom_instance_metadata: Option<String>,
	custom_instance_metadata_uri: Option<Url>,
	redirect_uri: Option<Url>,
}
impl ClientApplicationBuilder {
	/// Creates a builder for the provided client identifier.
	pub fn new(client_id: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			authority_uri: None,
			instance: None,
			azure_cloud_instance: None,
			tenant_id: None,
			audience: None,
			validate_authority: false,
			custom_instance_metadata: None,
			custom_instance_metadata_uri: None,
			redirect_uri: None,
		}
	}

	/// Sets the authority from a URI string; classification happens at build time.
	pub fn authority(mut self, uri: impl Into<String>) -> Self {
		self.authority_uri = Some(uri.into());

		self
	}

	/// Sets the literal instance host URI.
	pub fn instance(mut self, instance: impl Into<String>) -> Self {
		self.instance = Some(instance.into());

		self
	}

	/// Selects a named cloud deployment.
	pub fn azure_cloud_instance(mut self, cloud: AzureCloudInstance) -> Self {
		self.azure_cloud_instance = Some(cloud);

		self
	}

	/// Sets the tenant identifier.
	pub fn tenant_id(mut self, tenant: impl Into<String>) -> Self {
		self.tenant_id = Some(tenant.into());

		self
	}

	/// Declares the accepted account audience.
	pub fn audience(mut self, audience: AadAuthorityAudience) -> Self {
		self.audience = Some(audience);

		self
	}

	/// Requests server-side validation of the resolved authority before first use.
	pub fn validate_authority(mut self, validate: bool) -> Self {
		self.validate_authority = validate;

		self
	}

	/// Supplies instance-discovery metadata as a JSON document.
	pub fn custom_instance_metadata(mut self, json: impl Into<String>) -> Self {
		self.custom_instance_metadata = Some(json.into());

		self
	}

	/// Supplies the URI of an instance-discovery metadata document.
	pub fn custom_instance_metadata_uri(mut self, uri: Url) -> Self {
		self.custom_instance_metadata_uri = Some(uri);

		self
	}

	/// Registers the redirect URI the authorization endpoint should call back.
	pub fn redirect_uri(mut self, uri: Url) -> Self {
		self.redirect_uri = Some(uri);

		self
	}

	/// Validates the inputs, resolves the single canonical authority, and returns the completed
	/// configuration.
	pub fn build(self) -> Result<ApplicationConfiguration, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::NoClientId);
		}

		let prebuilt = self
			.authority_uri
			.as_deref()
			.map(|uri| Authority::create(uri, self.validate_authority))
			.transpose()?;
		let mut config = ApplicationConfiguration {
			client_id: self.client_id,
			authority: prebuilt,
			instance: self.instance,
			azure_cloud_instance: self.azure_cloud_instance,
			tenant_id: self.tenant_id,
			audience: self.audience,
			validate_authority: self.validate_authority,
			custom_instance_metadata: self.custom_instance_metadata,
			custom_instance_metadata_uri: self.custom_instance_metadata_uri,
			redirect_uri: self.redirect_uri,
		};
		let resolved = authority::resolve(&config)?;

		config.authority = Some(resolved);

		Ok(config)
	}
}
