//! Response structure checks

use serde_json::Value;

use crate::{SourceError, SourceResult};

/// Pull the application list out of a cluster-apps reply.
///
/// The reply must be exactly `{"apps": {"app": [...]}}`; anything else is
/// rejected as a whole, so no part of a malformed reply is ever processed.
pub fn extract_apps_list(reply: Value) -> SourceResult<Vec<Value>> {
    let Value::Object(mut root) = reply else {
        return Err(SourceError::UnexpectedShape("reply is not an object".into()));
    };

    let Some(Value::Object(mut apps)) = root.remove("apps") else {
        return Err(SourceError::UnexpectedShape("'apps' is not an object".into()));
    };

    match apps.remove("app") {
        Some(Value::Array(list)) => Ok(list),
        _ => Err(SourceError::UnexpectedShape("'apps.app' is not a list".into())),
    }
}
