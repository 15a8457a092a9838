//! Application identity section.

use serde::Serialize;
use serde_json::Value;

use crate::value::{as_object, opt_str, ErrorSink, FieldPath};

/// Environment label assumed when `app.env` is absent.
pub const DEFAULT_ENV: &str = "dev";

/// Environment label that activates the production resilience rules.
pub const PROD_ENV: &str = "prod";

/// The `app` section: deployment identity and environment label.
#[derive(Debug, Clone, Serialize)]
pub struct AppSection {
    /// Application name, used for resource naming by the provisioning layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Environment label (`dev`, `staging`, `prod`). Defaults to `dev`.
    pub env: String,
    /// Target region.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl AppSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = opt_str(obj, path, "name", sink);
        let env = opt_str(obj, path, "env", sink).unwrap_or_else(|| DEFAULT_ENV.to_string());
        let region = opt_str(obj, path, "region", sink);
        Some(Self { name, env, region })
    }
}
