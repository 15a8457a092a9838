//! Analytics and platform sections: OpenSearch, Airbyte, data quality,
//! SageMaker, hardening, and the vector store.

use serde::Serialize;
use serde_json::Value;

use crate::value::{
    as_object, bool_or, opt_enum, opt_int_in, opt_record_list, opt_str, opt_str_list,
    ErrorSink, FieldPath,
};

#[derive(Debug, Clone, Serialize)]
pub struct OpenSearchDomain {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ebs_volume_gb: Option<i64>,
}

impl OpenSearchDomain {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_named(obj, path, sink);
        let instance_type = opt_str(obj, path, "instance_type", sink);
        let instance_count = opt_int_in(obj, path, "instance_count", 1, 20, sink);
        let ebs_volume_gb = opt_int_in(obj, path, "ebs_volume_gb", 10, 1000, sink);
        Some(Self {
            name: name?,
            instance_type,
            instance_count,
            ebs_volume_gb,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OpenSearchSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<OpenSearchDomain>,
}

impl OpenSearchSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let domain = match obj.get("domain") {
            None | Some(Value::Null) => None,
            Some(v) => OpenSearchDomain::from_value(v, &path.key("domain"), sink),
        };
        Some(Self { domain })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AirbyteConnection {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

impl AirbyteConnection {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_named(obj, path, sink);
        let source = opt_str(obj, path, "source", sink);
        let destination = opt_str(obj, path, "destination", sink);
        Some(Self {
            name: name?,
            source,
            destination,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AirbyteSection {
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connections: Option<Vec<AirbyteConnection>>,
}

impl AirbyteSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let enabled = bool_or(obj, path, "enabled", false, sink);
        let connections =
            opt_record_list(obj, path, "connections", sink, AirbyteConnection::from_value);
        Some(Self {
            enabled,
            connections,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QualityRuleset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<String>>,
}

impl QualityRuleset {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_named(obj, path, sink);
        let table = opt_str(obj, path, "table", sink);
        let rules = opt_str_list(obj, path, "rules", sink);
        Some(Self {
            name: name?,
            table,
            rules,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DataQualitySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rulesets: Option<Vec<QualityRuleset>>,
}

impl DataQualitySection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let rulesets = opt_record_list(obj, path, "rulesets", sink, QualityRuleset::from_value);
        Some(Self { rulesets })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Notebook {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
}

impl Notebook {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_named(obj, path, sink);
        let instance_type = opt_str(obj, path, "instance_type", sink);
        Some(Self {
            name: name?,
            instance_type,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SageMakerSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notebooks: Option<Vec<Notebook>>,
}

impl SageMakerSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let notebooks = opt_record_list(obj, path, "notebooks", sink, Notebook::from_value);
        Some(Self { notebooks })
    }
}

/// The `cloud_native_hardening` section: org-wide guardrail toggles.
#[derive(Debug, Clone, Serialize)]
pub struct HardeningSection {
    pub enforce_encryption: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_email: Option<String>,
}

impl HardeningSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let enforce_encryption = bool_or(obj, path, "enforce_encryption", false, sink);
        let alarm_email = opt_str(obj, path, "alarm_email", sink);
        Some(Self {
            enforce_encryption,
            alarm_email,
        })
    }
}

/// The `vector_store` section.
#[derive(Debug, Clone, Serialize)]
pub struct VectorStoreSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension: Option<i64>,
}

impl VectorStoreSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let engine = opt_enum(obj, path, "engine", &["opensearch", "pgvector"], sink);
        let dimension = opt_int_in(obj, path, "dimension", 1, 4096, sink);
        Some(Self { engine, dimension })
    }
}

/// Required `name` field shared by every record in this module.
fn req_named(
    obj: &serde_json::Map<String, Value>,
    path: &FieldPath,
    sink: &mut ErrorSink,
) -> Option<String> {
    crate::value::req_str(obj, path, "name", sink)
}
