//! Execution-override payloads

use serde_json::{json, Value};
use std::fmt;

/// What a run request is aimed at
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunTarget {
    /// A single step, by slug
    Step(String),
    /// The whole pipeline
    Pipeline,
}

impl fmt::Display for RunTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunTarget::Step(slug) => write!(f, "step {}", slug),
            RunTarget::Pipeline => write!(f, "pipeline"),
        }
    }
}

/// Build the override payload for a run request
///
/// The offline preference only affects the ingest stage: running ingest
/// directly gets `prefer_online: false`, running the whole pipeline nests
/// the same flag under the ingest key, and every other combination sends no
/// overrides at all. This is the complete policy.
pub fn compose_overrides(target: &RunTarget, prefer_offline: bool) -> Value {
    if !prefer_offline {
        return json!({});
    }

    match target {
        RunTarget::Step(slug) if slug == "ingest" => {
            json!({ "overrides": { "prefer_online": false } })
        }
        RunTarget::Step(_) => json!({}),
        RunTarget::Pipeline => {
            json!({ "overrides": { "ingest": { "prefer_online": false } } })
        }
    }
}
