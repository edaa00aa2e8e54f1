//! Typed parsing of authorization-endpoint callbacks (redirect URIs and form-POST bodies).
//!
//! A failed sign-in is an expected, recoverable outcome, so non-success classifications are
//! first-class [`AuthorizationResult`] values rather than errors: callers branch on
//! [`AuthorizationResult::status`] to decide whether to re-prompt (user cancel), abort (protocol
//! error), or surface a generic failure (unknown error).

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
// self
use crate::{
	_prelude::*,
	obs::{self, StageKind},
	query::{self, ParameterMap},
};

const CANCEL_ERROR_SUBCODE: &str = "cancel";
const BROKER_REDIRECT_PREFIX: &str = "msauth://";

/// Error code attached to unknown-error results.
pub const AUTHENTICATION_FAILED_ERROR: &str = "authentication_failed";
/// Description attached to unknown-error results.
pub const AUTHORIZATION_SERVER_INVALID_RESPONSE: &str =
	"The authorization server returned an invalid response.";
/// Error code attached to user-cancel results.
pub const AUTHENTICATION_CANCELED_ERROR: &str = "authentication_canceled";
/// Description attached to user-cancel results.
#[cfg(not(target_os = "android"))]
pub const AUTHENTICATION_CANCELED_DESCRIPTION: &str = "User canceled authentication.";
/// Description attached to user-cancel results on Android, where the embedded browser owns the
/// cancellation gesture.
#[cfg(target_os = "android")]
pub const AUTHENTICATION_CANCELED_DESCRIPTION: &str =
	"The user canceled the authentication flow in the embedded browser.";

/// Terminal classification of an authorization-endpoint callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationStatus {
	/// The endpoint returned an authorization code.
	Success,
	/// The transport layer reported a non-success HTTP status.
	HttpError,
	/// The endpoint returned a protocol-level error.
	ProtocolError,
	/// The end-user canceled the sign-in.
	UserCancel,
	/// The response could not be interpreted.
	UnknownError,
}
impl AuthorizationStatus {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			AuthorizationStatus::Success => "success",
			AuthorizationStatus::HttpError => "http_error",
			AuthorizationStatus::ProtocolError => "protocol_error",
			AuthorizationStatus::UserCancel => "user_cancel",
			AuthorizationStatus::UnknownError => "unknown_error",
		}
	}
}
impl Display for AuthorizationStatus {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Parsed outcome of an authorization-endpoint callback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorizationResult {
	/// Terminal classification of the callback.
	pub status: AuthorizationStatus,
	/// Authorization code, present exactly when `status` is [`AuthorizationStatus::Success`].
	pub code: Option<String>,
	/// Protocol error code, absent on success.
	pub error: Option<String>,
	/// Human-readable error description, absent on success.
	pub error_description: Option<String>,
	/// Alternate host the identity provider signaled for the token endpoint.
	pub cloud_instance_host: Option<String>,
	/// Opaque account blob echoed by the identity provider (see [`ClientInfo::decode`]).
	pub client_info: Option<String>,
	/// Anti-forgery state echoed back; comparing it to the sent value is the caller's
	/// responsibility.
	pub state: Option<String>,
}
impl AuthorizationResult {
	/// Parses the redirect URI returned by the authorization endpoint.
	///
	/// Empty input, or a redirect without a query string, yields an unknown-error result, with
	/// one exception: broker hand-back redirects (`msauth://…`) carry the code as the whole
	/// redirect string and classify as success.
	pub fn from_redirect(redirect: &str) -> Self {
		let _guard = obs::StageSpan::new(StageKind::ResponseParse).entered();
		let result = Self::parse_redirect(redirect);

		obs::record_stage_outcome(StageKind::ResponseParse, result.status.as_str());

		result
	}

	/// Parses a raw POST body delivered by form-post response modes.
	///
	/// The body is decoded as UTF-8 (lossily), trailing NUL padding is stripped, and the text is
	/// parsed as an `&`-delimited key-value string. Empty input yields an unknown-error result.
	pub fn from_post_body(body: &[u8]) -> Self {
		let _guard = obs::StageSpan::new(StageKind::ResponseParse).entered();
		let result = Self::parse_post_body(body);

		obs::record_stage_outcome(StageKind::ResponseParse, result.status.as_str());

		result
	}

	/// Constructs an empty result for a non-success status.
	///
	/// Success results require a populated code and may only be produced by the classification
	/// routines; asking for one here is a programming error and panics.
	pub(crate) fn with_status(status: AuthorizationStatus) -> Self {
		assert_ne!(
			status,
			AuthorizationStatus::Success,
			"Success results must carry a code and are produced by classification only.",
		);

		Self {
			status,
			code: None,
			error: None,
			error_description: None,
			cloud_instance_host: None,
			client_info: None,
			state: None,
		}
	}

	fn parse_redirect(redirect: &str) -> Self {
		if redirect.trim().is_empty() {
			return Self::unknown_error();
		}

		// The fragment never carries parameters in this protocol.
		let without_fragment = redirect.split_once('#').map_or(redirect, |(head, _)| head);
		let query = without_fragment.split_once('?').map_or("", |(_, query)| query);

		if query.is_empty() {
			// Broker hand-back redirects carry no query at all.
			if is_broker_redirect(redirect) {
				return Self::success(redirect.to_owned());
			}

			return Self::unknown_error();
		}

		let parameters = query::parse_key_value_list(query, '&', true);

		Self::classify(&parameters, Some(redirect))
	}

	fn parse_post_body(body: &[u8]) -> Self {
		if body.is_empty() {
			return Self::unknown_error();
		}

		let text = String::from_utf8_lossy(body);
		let text = text.trim_end_matches('\0');

		if text.is_empty() {
			return Self::unknown_error();
		}

		let parameters = query::parse_key_value_list(text, '&', true);

		Self::classify(&parameters, None)
	}

	/// Single-pass classification over parsed parameters, shared by both entry points.
	fn classify(parameters: &ParameterMap, original_redirect: Option<&str>) -> Self {
		if let Some(error) = parameters.get("error") {
			if parameters
				.get("error_subcode")
				.is_some_and(|subcode| subcode.eq_ignore_ascii_case(CANCEL_ERROR_SUBCODE))
			{
				return Self::user_cancel();
			}

			let mut result = Self::with_status(AuthorizationStatus::ProtocolError);

			result.error = Some(error.to_owned());
			result.error_description = parameters.get("error_description").map(str::to_owned);

			return result;
		}

		let Some(code) = parameters.get("code") else {
			if let Some(redirect) = original_redirect
				&& is_broker_redirect(redirect)
			{
				return Self::success(redirect.to_owned());
			}

			return Self::unknown_error();
		};
		let mut result = Self::success(code.to_owned());

		result.state = parameters.get("state").map(str::to_owned);
		result.cloud_instance_host = parameters.get("cloud_instance_host").map(str::to_owned);
		result.client_info = parameters.get("client_info").map(str::to_owned);

		result
	}

	fn success(code: String) -> Self {
		Self {
			status: AuthorizationStatus::Success,
			code: Some(code),
			error: None,
			error_description: None,
			cloud_instance_host: None,
			client_info: None,
			state: None,
		}
	}

	fn user_cancel() -> Self {
		let mut result = Self::with_status(AuthorizationStatus::UserCancel);

		result.error = Some(AUTHENTICATION_CANCELED_ERROR.to_owned());
		result.error_description = Some(AUTHENTICATION_CANCELED_DESCRIPTION.to_owned());

		result
	}

	fn unknown_error() -> Self {
		let mut result = Self::with_status(AuthorizationStatus::UnknownError);

		result.error = Some(AUTHENTICATION_FAILED_ERROR.to_owned());
		result.error_description = Some(AUTHORIZATION_SERVER_INVALID_RESPONSE.to_owned());

		result
	}
}

fn is_broker_redirect(redirect: &str) -> bool {
	redirect
		.get(..BROKER_REDIRECT_PREFIX.len())
		.is_some_and(|prefix| prefix.eq_ignore_ascii_case(BROKER_REDIRECT_PREFIX))
}

/// Errors produced while decoding the `client_info` blob.
#[derive(Debug, ThisError)]
pub enum ClientInfoError {
	/// The blob is not valid base64url data.
	#[error("Client info is not valid base64url data.")]
	InvalidEncoding(#[from] base64::DecodeError),
	/// The decoded blob is not the expected JSON object.
	#[error("Client info is not the expected JSON object.")]
	InvalidJson(#[from] serde_json::Error),
}

/// Account identifiers decoded from the `client_info` blob echoed on success.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
	/// Unique account object identifier.
	#[serde(default)]
	pub uid: Option<String>,
	/// Unique identifier of the tenant the account belongs to.
	#[serde(default)]
	pub utid: Option<String>,
}
impl ClientInfo {
	/// Decodes the base64url JSON blob; padded and unpadded encodings are both accepted.
	pub fn decode(encoded: &str) -> Result<Self, ClientInfoError> {
		let bytes = URL_SAFE_NO_PAD.decode(encoded.trim_end_matches('='))?;

		Ok(serde_json::from_slice(&bytes)?)
	}
}
