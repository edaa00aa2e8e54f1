//! Optional observability helpers for the resolver, request builder, and response parser.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `aad_authority.stage` with the `stage`
//!   (call site) field.
//! - Enable `metrics` to increment the `aad_authority_stage_total` counter for every stage
//!   completion, labeled by `stage` + `outcome`.

// self
use crate::_prelude::*;

/// Pipeline stages observed by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StageKind {
	/// Authority precedence resolution.
	AuthorityResolution,
	/// Authorize-URL construction.
	AuthorizeRequest,
	/// Authorization-response parsing.
	ResponseParse,
}
impl StageKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			StageKind::AuthorityResolution => "authority_resolution",
			StageKind::AuthorizeRequest => "authorize_request",
			StageKind::ResponseParse => "response_parse",
		}
	}
}
impl Display for StageKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Records a stage outcome via the global metrics recorder (when enabled).
pub fn record_stage_outcome(kind: StageKind, outcome: &'static str) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"aad_authority_stage_total",
			"stage" => kind.as_str(),
			"outcome" => outcome
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (kind, outcome);
	}
}

/// A span builder used by crate stages.
#[derive(Clone, Debug)]
pub struct StageSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl StageSpan {
	/// Creates a new span tagged with the provided stage.
	pub fn new(kind: StageKind) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("aad_authority.stage", stage = kind.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = kind;

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> StageSpanGuard {
		#[cfg(feature = "tracing")]
		{
			StageSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			StageSpanGuard {}
		}
	}
}

/// RAII guard returned by [`StageSpan::entered`].
pub struct StageSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for StageSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("StageSpanGuard(..)")
	}
}
