//! Interactive authorization-request construction for the Authorization Code + PKCE flow.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};
// self
use crate::{
	_prelude::*,
	authority::Authority,
	obs::{self, StageKind},
};

const STATE_LEN: usize = 32;
const PKCE_VERIFIER_LEN: usize = 64;
const AUTHORIZE_ENDPOINT_PATH: &str = "oauth2/v2.0/authorize";

/// Supported PKCE challenge methods surfaced via [`AuthorizationSession`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PkceCodeChallengeMethod {
	/// SHA-256 based PKCE (RFC 7636 S256).
	S256,
}
impl PkceCodeChallengeMethod {
	/// Returns the RFC 7636 identifier for the challenge method.
	pub fn as_str(self) -> &'static str {
		match self {
			PkceCodeChallengeMethod::S256 => "S256",
		}
	}
}

/// Authorization Code + PKCE handshake metadata returned by [`build_authorization_request`].
#[derive(Clone)]
pub struct AuthorizationSession {
	/// Resolved authority the request targets.
	pub authority: Authority,
	/// Opaque anti-forgery value that must round-trip via the redirect handler.
	pub state: String,
	/// Redirect URI supplied when constructing the authorize URL.
	pub redirect_uri: Url,
	/// Fully-formed HTTPS authorize URL that callers should send end-users to.
	pub authorize_url: Url,
	pkce: PkcePair,
}
impl AuthorizationSession {
	/// PKCE code challenge derived from the secret verifier.
	pub fn code_challenge(&self) -> &str {
		&self.pkce.challenge
	}

	/// PKCE challenge method (currently always `S256`).
	pub fn code_challenge_method(&self) -> PkceCodeChallengeMethod {
		self.pkce.method
	}

	/// Secret PKCE verifier to present during the code exchange.
	pub fn code_verifier(&self) -> &str {
		&self.pkce.verifier
	}

	/// Validates the `state` echoed by the authorization endpoint against the one sent.
	pub fn validate_state(&self, returned_state: &str) -> Result<()> {
		if returned_state == self.state { Ok(()) } else { Err(Error::StateMismatch) }
	}
}
impl Debug for AuthorizationSession {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AuthorizationSession")
			.field("authority", &self.authority.canonical_authority().as_str())
			.field("state", &self.state)
			.field("redirect_uri", &self.redirect_uri)
			.field("authorize_url", &self.authorize_url)
			.field("code_challenge", &self.pkce.challenge)
			.field("code_challenge_method", &self.pkce.method)
			.finish()
	}
}

#[derive(Clone)]
struct PkcePair {
	verifier: String,
	challenge: String,
	method: PkceCodeChallengeMethod,
}
impl PkcePair {
	fn generate() -> Self {
		let verifier = random_string(PKCE_VERIFIER_LEN);
		let challenge = compute_pkce_challenge(&verifier);

		Self { verifier, challenge, method: PkceCodeChallengeMethod::S256 }
	}
}

/// Builds the authorize URL and handshake state for a resolved authority.
///
/// The URL targets the authority's v2.0 authorize endpoint and carries the code-flow parameters,
/// a fresh anti-forgery `state`, and an S256 PKCE challenge. The code exchange itself is the
/// caller's concern; the session exposes the verifier for it.
pub fn build_authorization_request(
	authority: &Authority,
	client_id: &str,
	redirect_uri: Url,
	scopes: &[&str],
) -> AuthorizationSession {
	let _guard = obs::StageSpan::new(StageKind::AuthorizeRequest).entered();
	let state = random_string(STATE_LEN);
	let pkce = PkcePair::generate();
	let authorize_url = build_authorize_url(authority, client_id, &redirect_uri, scopes, &state, &pkce);

	obs::record_stage_outcome(StageKind::AuthorizeRequest, "success");

	AuthorizationSession { authority: authority.clone(), state, redirect_uri, authorize_url, pkce }
}

fn build_authorize_url(
	authority: &Authority,
	client_id: &str,
	redirect_uri: &Url,
	scopes: &[&str],
	state: &str,
	pkce: &PkcePair,
) -> Url {
	let mut url = authority.canonical_authority().clone();
	// The canonical authority path always ends in `/`.
	let path = format!("{}{AUTHORIZE_ENDPOINT_PATH}", url.path());

	url.set_path(&path);

	let mut pairs = url.query_pairs_mut();

	pairs.append_pair("response_type", "code");
	pairs.append_pair("client_id", client_id);
	pairs.append_pair("redirect_uri", redirect_uri.as_str());

	if !scopes.is_empty() {
		pairs.append_pair("scope", &scopes.join(" "));
	}

	pairs.append_pair("state", state);
	pairs.append_pair("code_challenge", &pkce.challenge);
	pairs.append_pair("code_challenge_method", pkce.method.as_str());

	drop(pairs);

	url
}

fn random_string(len: usize) -> String {
	rand::rng().sample_iter(Alphanumeric).take(len).map(char::from).collect()
}

fn compute_pkce_challenge(verifier: &str) -> String {
	let mut hasher = Sha256::new();
	hasher.update(verifier.as_bytes());
	let digest = hasher.finalize();
	URL_SAFE_NO_PAD.encode(digest)
}
