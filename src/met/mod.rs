//! # Met Museum API Integration Module
//!
//! Client layer for the two public collection endpoints the pipeline uses:
//!
//! - `GET {api}/search?hasImages=true&artistOrCulture=true&q={query}` — id
//!   list for a free-text artist query ([`search`])
//! - `GET {api}/objects/{id}` — full object record ([`objects`])
//!
//! Both go through [`client::MetClient`], which owns the throttle handling:
//! HTTP 403/429 trigger capped exponential backoff with jitter, any other
//! non-2xx status fails the call immediately, and an exhausted retry budget
//! escalates to [`client::FetchError::ExhaustedRetries`].
//!
//! The two call sites are tuned differently. A search response is the only
//! way to scan an artist, so it carries the larger retry budget and a failure
//! is fatal for that artist. A single object fetch is recoverable — on final
//! failure [`objects::fetch_object`] degrades to `None` and the scan simply
//! advances past that id.
//!
//! The Met API needs no authentication, but it does expect a descriptive
//! `User-Agent` and throttles bursts aggressively; all pacing decisions live
//! with the caller, this layer only reacts to explicit throttle signals.

pub mod client;
pub mod objects;
pub mod search;
