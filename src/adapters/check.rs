use crate::types::CheckRequest;
use serde_json::Value;

/// Echoes the requested version back as the only known version.
pub fn run(request: CheckRequest) -> Vec<Value> {
    request.version.into_iter().collect()
}
