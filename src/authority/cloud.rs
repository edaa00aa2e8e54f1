// self
use crate::_prelude::*;

/// Named sovereign/regional deployments of the identity provider.
///
/// Each cloud publishes a base login host plus a set of historical host aliases that must be
/// treated as equivalent when comparing authorities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AzureCloudInstance {
	/// Global public cloud.
	AzurePublic,
	/// Chinese sovereign cloud.
	AzureChina,
	/// German sovereign cloud.
	AzureGermany,
	/// United States government cloud.
	AzureUsGovernment,
}
impl AzureCloudInstance {
	const ALL: [Self; 4] =
		[Self::AzurePublic, Self::AzureChina, Self::AzureGermany, Self::AzureUsGovernment];

	/// Base authority URI for the cloud, without a trailing slash.
	pub const fn base_url(self) -> &'static str {
		match self {
			AzureCloudInstance::AzurePublic => "https://login.microsoftonline.com",
			AzureCloudInstance::AzureChina => "https://login.partner.microsoftonline.cn",
			AzureCloudInstance::AzureGermany => "https://login.microsoftonline.de",
			AzureCloudInstance::AzureUsGovernment => "https://login.microsoftonline.us",
		}
	}

	/// Known login host aliases for the cloud, preferred host first.
	pub const fn aliases(self) -> &'static [&'static str] {
		match self {
			AzureCloudInstance::AzurePublic => &[
				"login.microsoftonline.com",
				"login.windows.net",
				"login.microsoft.com",
				"sts.windows.net",
			],
			AzureCloudInstance::AzureChina =>
				&["login.partner.microsoftonline.cn", "login.chinacloudapi.cn"],
			AzureCloudInstance::AzureGermany => &["login.microsoftonline.de"],
			AzureCloudInstance::AzureUsGovernment =>
				&["login.microsoftonline.us", "login.usgovcloudapi.net"],
		}
	}

	/// Looks up the cloud that publishes `host` as one of its aliases.
	pub fn from_host(host: &str) -> Option<Self> {
		Self::ALL
			.into_iter()
			.find(|cloud| cloud.aliases().iter().any(|alias| alias.eq_ignore_ascii_case(host)))
	}
}

/// True when both hosts are published aliases of the same cloud.
pub fn is_same_cloud(lhs: &str, rhs: &str) -> bool {
	matches!(
		(AzureCloudInstance::from_host(lhs), AzureCloudInstance::from_host(rhs)),
		(Some(lhs), Some(rhs)) if lhs == rhs
	)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn base_urls_are_https_hosts_without_trailing_slash() {
		for cloud in AzureCloudInstance::ALL {
			let base = cloud.base_url();

			assert!(base.starts_with("https://"), "cloud: {cloud:?}");
			assert!(!base.ends_with('/'), "cloud: {cloud:?}");
		}
	}

	#[test]
	fn alias_lookup_is_case_insensitive() {
		assert_eq!(
			AzureCloudInstance::from_host("Login.Windows.Net"),
			Some(AzureCloudInstance::AzurePublic),
		);
		assert_eq!(
			AzureCloudInstance::from_host("login.chinacloudapi.cn"),
			Some(AzureCloudInstance::AzureChina),
		);
		assert_eq!(AzureCloudInstance::from_host("login.example.com"), None);
	}

	#[test]
	fn alias_comparison_groups_hosts_by_cloud() {
		assert!(is_same_cloud("login.windows.net", "login.microsoftonline.com"));
		assert!(is_same_cloud("login.microsoftonline.us", "login.usgovcloudapi.net"));
		assert!(!is_same_cloud("login.microsoftonline.com", "login.microsoftonline.de"));
		assert!(!is_same_cloud("login.example.com", "login.example.com"));
	}
}
