//! Authority model: issuer classification, canonicalization, and tenant rewriting.
//!
//! An authority is the OAuth2/OIDC issuer tokens are requested from. The model is a closed set of
//! variants (public tenant directory, ADFS, B2C policy), each wrapping a shared [`AuthorityInfo`]
//! whose canonical URI is always an absolute HTTPS URI ending in `/`.

/// Audience enum and its tenant-segment expansion table.
pub mod audience;
/// Named cloud instances and their host-alias tables.
pub mod cloud;
/// Precedence engine resolving a configuration into one authority.
pub mod resolver;

pub use audience::*;
pub use cloud::*;
pub use resolver::*;

// self
use crate::{_prelude::*, error::ConfigError};

/// Reserved tenant aliases standing in for account classes rather than a concrete directory.
pub const RESERVED_TENANT_ALIASES: [&str; 3] = ["common", "organizations", "consumers"];

const ADFS_PATH_SEGMENT: &str = "adfs";
const B2C_PATH_SEGMENT: &str = "tfp";

/// Authority classes recognized by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorityType {
	/// Public tenant directory authority (`https://{instance}/{tenant}/`).
	Aad,
	/// Active Directory Federation Services authority (`https://{host}/adfs/`).
	Adfs,
	/// B2C policy authority (`https://{host}/tfp/{tenant}/{policy}/`).
	B2c,
}
impl AuthorityType {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthorityType::Aad => "aad",
			AuthorityType::Adfs => "adfs",
			AuthorityType::B2c => "b2c",
		}
	}
}
impl Display for AuthorityType {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Immutable descriptor shared by every authority variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityInfo {
	/// Authority class derived from the URI path shape.
	pub authority_type: AuthorityType,
	/// Canonical absolute HTTPS authority URI, trailing slash included.
	pub canonical_authority: Url,
	/// Whether the authority must be verified against server-published metadata before first use.
	pub validate_authority: bool,
}
impl AuthorityInfo {
	/// Host component of the canonical authority.
	pub fn host(&self) -> &str {
		self.canonical_authority.host_str().unwrap_or_default()
	}
}

/// Resolved OAuth2/OIDC authority, dispatched over the closed variant set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authority {
	/// Public tenant directory authority.
	Aad(AadAuthority),
	/// ADFS authority.
	Adfs(AdfsAuthority),
	/// B2C policy authority.
	B2c(B2cAuthority),
}
impl Authority {
	/// Classifies `uri` by path shape and constructs the matching variant.
	///
	/// The first path segment decides the class: `adfs` yields an ADFS authority, `tfp` a B2C
	/// authority (which additionally requires tenant and policy segments), anything else a public
	/// tenant authority. Fails with [`ConfigError::InvalidAuthorityFormat`] when the URI is not
	/// an absolute HTTPS URI or the path shape is incomplete.
	pub fn create(uri: &str, validate_authority: bool) -> Result<Self, ConfigError> {
		let parsed = parse_authority_uri(uri)?;
		let segments = path_segments(&parsed);
		let Some(first) = segments.first() else {
			return Err(invalid_format(uri, "the URI is missing its tenant path segment"));
		};

		if first.eq_ignore_ascii_case(ADFS_PATH_SEGMENT) {
			let info = AuthorityInfo {
				authority_type: AuthorityType::Adfs,
				canonical_authority: canonicalize(&parsed, &[ADFS_PATH_SEGMENT]),
				validate_authority,
			};

			return Ok(Self::Adfs(AdfsAuthority { info }));
		}
		if first.eq_ignore_ascii_case(B2C_PATH_SEGMENT) {
			let (tenant, policy) = match (segments.get(1), segments.get(2)) {
				(Some(tenant), Some(policy)) => (tenant.clone(), policy.clone()),
				_ =>
					return Err(invalid_format(
						uri,
						"the B2C path is missing its tenant or policy segment",
					)),
			};

			validate_tenant(&tenant)?;

			let info = AuthorityInfo {
				authority_type: AuthorityType::B2c,
				canonical_authority: canonicalize(
					&parsed,
					&[B2C_PATH_SEGMENT, &tenant, &policy],
				),
				validate_authority,
			};

			return Ok(Self::B2c(B2cAuthority { info, tenant, policy }));
		}

		let tenant = first.clone();

		validate_tenant(&tenant)?;

		let info = AuthorityInfo {
			authority_type: AuthorityType::Aad,
			canonical_authority: canonicalize(&parsed, &[&tenant]),
			validate_authority,
		};

		Ok(Self::Aad(AadAuthority { info, tenant }))
	}

	/// Rewrites the tenant path segment, preserving host, scheme, and authority class.
	///
	/// ADFS and B2C authorities carry no rewritable tenant segment and are returned unchanged.
	pub fn with_tenant(&self, tenant: &str) -> Result<Self, ConfigError> {
		let Self::Aad(aad) = self else { return Ok(self.clone()) };

		validate_tenant(tenant)?;

		let mut canonical = aad.info.canonical_authority.clone();

		canonical.set_path(&format!("{tenant}/"));

		let info = AuthorityInfo {
			authority_type: AuthorityType::Aad,
			canonical_authority: canonical,
			validate_authority: aad.info.validate_authority,
		};

		Ok(Self::Aad(AadAuthority { info, tenant: tenant.to_owned() }))
	}

	/// Shared descriptor for the variant.
	pub fn info(&self) -> &AuthorityInfo {
		match self {
			Authority::Aad(aad) => &aad.info,
			Authority::Adfs(adfs) => &adfs.info,
			Authority::B2c(b2c) => &b2c.info,
		}
	}

	/// Authority class discriminant.
	pub fn authority_type(&self) -> AuthorityType {
		self.info().authority_type
	}

	/// Canonical authority URI (absolute, HTTPS, trailing slash).
	pub fn canonical_authority(&self) -> &Url {
		&self.info().canonical_authority
	}

	/// Tenant identifier, when the variant carries one.
	pub fn tenant(&self) -> Option<&str> {
		match self {
			Authority::Aad(aad) => Some(&aad.tenant),
			Authority::Adfs(_) => None,
			Authority::B2c(b2c) => Some(&b2c.tenant),
		}
	}

	/// True when the tenant equals one of the reserved aliases, compared case-insensitively.
	pub fn is_common_organizations_or_consumers(&self) -> bool {
		self.tenant().is_some_and(|tenant| {
			RESERVED_TENANT_ALIASES.iter().any(|alias| alias.eq_ignore_ascii_case(tenant))
		})
	}
}
impl Display for Authority {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.canonical_authority().as_str())
	}
}

/// Public tenant directory authority with its tenant path segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AadAuthority {
	/// Shared authority descriptor.
	pub info: AuthorityInfo,
	/// Tenant identifier extracted from the path (GUID, domain, or reserved alias).
	pub tenant: String,
}

/// ADFS authority pinned to its `adfs` path segment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdfsAuthority {
	/// Shared authority descriptor.
	pub info: AuthorityInfo,
}

/// B2C authority carrying the tenant and sign-in policy from its `tfp` path.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct B2cAuthority {
	/// Shared authority descriptor.
	pub info: AuthorityInfo,
	/// Tenant identifier extracted from the path.
	pub tenant: String,
	/// Sign-in policy name extracted from the path.
	pub policy: String,
}

pub(crate) fn validate_tenant(tenant: &str) -> Result<(), ConfigError> {
	if tenant.is_empty() {
		return Err(ConfigError::InvalidTenant {
			tenant: tenant.to_owned(),
			reason: "tenant identifiers cannot be empty",
		});
	}
	if tenant.chars().any(char::is_whitespace) {
		return Err(ConfigError::InvalidTenant {
			tenant: tenant.to_owned(),
			reason: "tenant identifiers cannot contain whitespace",
		});
	}

	Ok(())
}

fn parse_authority_uri(uri: &str) -> Result<Url, ConfigError> {
	let trimmed = uri.trim();

	if trimmed.is_empty() {
		return Err(invalid_format(uri, "the URI is empty"));
	}

	let parsed = Url::parse(trimmed)
		.map_err(|_| invalid_format(uri, "the URI is not a well-formed absolute URI"))?;

	if parsed.scheme() != "https" {
		return Err(invalid_format(uri, "the URI must use the https scheme"));
	}
	if parsed.host_str().is_none() {
		return Err(invalid_format(uri, "the URI is missing a host"));
	}

	Ok(parsed)
}

fn path_segments(parsed: &Url) -> Vec<String> {
	parsed
		.path_segments()
		.map(|segments| segments.filter(|s| !s.is_empty()).map(str::to_owned).collect())
		.unwrap_or_default()
}

fn canonicalize(parsed: &Url, segments: &[&str]) -> Url {
	let mut canonical = parsed.clone();

	canonical.set_path(&format!("{}/", segments.join("/")));
	canonical.set_query(None);
	canonical.set_fragment(None);

	canonical
}

fn invalid_format(uri: &str, reason: &'static str) -> ConfigError {
	ConfigError::InvalidAuthorityFormat { uri: uri.to_owned(), reason }
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn classifies_public_tenant_authorities() {
		let authority = Authority::create("https://login.microsoftonline.com/contoso", false)
			.expect("AAD authority fixture should be valid.");

		assert_eq!(authority.authority_type(), AuthorityType::Aad);
		assert_eq!(authority.tenant(), Some("contoso"));
		assert_eq!(
			authority.canonical_authority().as_str(),
			"https://login.microsoftonline.com/contoso/",
		);
	}

	#[test]
	fn classifies_adfs_authorities() {
		let authority = Authority::create("https://adfs.contoso.com/adfs", false)
			.expect("ADFS authority fixture should be valid.");

		assert_eq!(authority.authority_type(), AuthorityType::Adfs);
		assert_eq!(authority.tenant(), None);
		assert_eq!(authority.canonical_authority().as_str(), "https://adfs.contoso.com/adfs/");
	}

	#[test]
	fn classifies_b2c_authorities_and_requires_a_policy() {
		let authority = Authority::create(
			"https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com/b2c_1_susi",
			false,
		)
		.expect("B2C authority fixture should be valid.");

		assert_eq!(authority.authority_type(), AuthorityType::B2c);
		assert_eq!(authority.tenant(), Some("contoso.onmicrosoft.com"));
		assert_eq!(
			authority.canonical_authority().as_str(),
			"https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com/b2c_1_susi/",
		);

		let err = Authority::create("https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com", false)
			.expect_err("B2C authorities without a policy segment must be rejected.");

		assert!(matches!(err, ConfigError::InvalidAuthorityFormat { .. }));
	}

	#[test]
	fn rejects_malformed_authority_uris() {
		for uri in ["", "   ", "not a uri", "http://login.microsoftonline.com/contoso",
			"https://login.microsoftonline.com", "https://login.microsoftonline.com/"]
		{
			let err = Authority::create(uri, false)
				.expect_err("Malformed authority URIs must be rejected.");

			assert!(matches!(err, ConfigError::InvalidAuthorityFormat { .. }), "uri: {uri}");
		}
	}

	#[test]
	fn canonicalization_normalizes_slash_query_and_fragment() {
		let authority = Authority::create(
			"https://login.microsoftonline.com/contoso/extra/segments?x=1#frag",
			false,
		)
		.expect("Authority with extra URI parts should still classify.");

		assert_eq!(
			authority.canonical_authority().as_str(),
			"https://login.microsoftonline.com/contoso/",
		);
	}

	#[test]
	fn with_tenant_replaces_only_the_tenant_segment() {
		let authority = Authority::create("https://login.microsoftonline.com:8443/common", true)
			.expect("AAD authority fixture should be valid.");
		let rewritten = authority
			.with_tenant("contoso.onmicrosoft.com")
			.expect("Tenant rewrite should succeed for AAD authorities.");

		assert_eq!(
			rewritten.canonical_authority().as_str(),
			"https://login.microsoftonline.com:8443/contoso.onmicrosoft.com/",
		);
		assert_eq!(rewritten.tenant(), Some("contoso.onmicrosoft.com"));
		assert!(rewritten.info().validate_authority, "Validation flag must be preserved.");
	}

	#[test]
	fn with_tenant_leaves_adfs_and_b2c_unchanged() {
		let adfs = Authority::create("https://adfs.contoso.com/adfs", false)
			.expect("ADFS authority fixture should be valid.");
		let b2c = Authority::create(
			"https://contoso.b2clogin.com/tfp/contoso.onmicrosoft.com/b2c_1_susi",
			false,
		)
		.expect("B2C authority fixture should be valid.");

		assert_eq!(
			adfs.with_tenant("ignored").expect("ADFS rewrite should be a no-op."),
			adfs,
		);
		assert_eq!(b2c.with_tenant("ignored").expect("B2C rewrite should be a no-op."), b2c);
	}

	#[test]
	fn reserved_aliases_compare_case_insensitively() {
		for tenant in ["common", "Organizations", "CONSUMERS"] {
			let authority =
				Authority::create(&format!("https://login.microsoftonline.com/{tenant}"), false)
					.expect("Alias authority fixture should be valid.");

			assert!(authority.is_common_organizations_or_consumers(), "tenant: {tenant}");
		}

		let concrete = Authority::create("https://login.microsoftonline.com/contoso", false)
			.expect("Concrete tenant fixture should be valid.");

		assert!(!concrete.is_common_organizations_or_consumers());
	}

	#[test]
	fn tenant_validation_rejects_empty_and_whitespace() {
		assert!(validate_tenant("contoso").is_ok());
		assert!(matches!(validate_tenant(""), Err(ConfigError::InvalidTenant { .. })));
		assert!(matches!(validate_tenant("has space"), Err(ConfigError::InvalidTenant { .. })));
	}
}
