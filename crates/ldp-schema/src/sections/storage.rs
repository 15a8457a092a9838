//! Storage sections: S3 buckets, the Glue catalog, and Lake Formation
//! grants.

use serde::Serialize;
use serde_json::Value;

use crate::value::{
    as_object, bool_or, opt_enum, opt_int_in, opt_record_list, opt_str, opt_str_list,
    reject_duplicate_ids, req_record_list, req_str, ErrorSink, FieldPath,
};

/// Disposition of a resource when its stack is torn down. Validated here,
/// enacted by the provisioning layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RemovalPolicy {
    #[serde(rename = "RETAIN")]
    Retain,
    #[serde(rename = "DESTROY")]
    Destroy,
}

impl RemovalPolicy {
    /// Parse an optional removal-policy field. Absent and `null` both mean
    /// "unset"; any other value must be `RETAIN` or `DESTROY`.
    pub(crate) fn from_field(
        obj: &serde_json::Map<String, Value>,
        path: &FieldPath,
        key: &str,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s == "RETAIN" => Some(Self::Retain),
            Some(Value::String(s)) if s == "DESTROY" => Some(Self::Destroy),
            Some(_) => {
                sink.push(
                    &path.key(key),
                    "removal_policy must be one of 'RETAIN', 'DESTROY', or null",
                );
                None
            }
        }
    }
}

/// One S3 bucket declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Bucket {
    /// Logical identifier, unique within the bucket list.
    pub id: String,
    /// Physical bucket name; generated from `id` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Object versioning. Defaults to off.
    pub versioned: bool,
    /// Server-side encryption mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encryption: Option<String>,
    /// Teardown disposition; production requires `RETAIN`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub removal_policy: Option<RemovalPolicy>,
    /// Days before objects transition out of the bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lifecycle_days: Option<i64>,
}

impl Bucket {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        // Parse every field before deciding the record's fate, so a missing
        // id does not hide the other violations in the same record.
        let id = req_str(obj, path, "id", sink);
        let name = opt_str(obj, path, "name", sink);
        let versioned = bool_or(obj, path, "versioned", false, sink);
        let encryption = opt_enum(obj, path, "encryption", &["s3-managed", "kms"], sink);
        let removal_policy = RemovalPolicy::from_field(obj, path, "removal_policy", sink);
        let lifecycle_days = opt_int_in(obj, path, "lifecycle_days", 1, 3650, sink);
        Some(Self {
            id: id?,
            name,
            versioned,
            encryption,
            removal_policy,
            lifecycle_days,
        })
    }
}

/// The `s3` section: the bucket list is its entire content and is mandatory.
#[derive(Debug, Clone, Serialize)]
pub struct S3Section {
    pub buckets: Vec<Bucket>,
}

impl S3Section {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let buckets = req_record_list(obj, path, "buckets", sink, Bucket::from_value)?;
        reject_duplicate_ids(
            buckets.iter().enumerate().map(|(i, b)| (i, b.id.as_str())),
            &path.key("buckets"),
            "bucket ID",
            sink,
        );
        Some(Self { buckets })
    }
}

/// One Glue catalog database.
#[derive(Debug, Clone, Serialize)]
pub struct GlueDatabase {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GlueDatabase {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_str(obj, path, "name", sink);
        let description = opt_str(obj, path, "description", sink);
        Some(Self {
            name: name?,
            description,
        })
    }
}

/// One Glue ETL job.
#[derive(Debug, Clone, Serialize)]
pub struct GlueJob {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_location: Option<String>,
    /// DPU allocation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_capacity: Option<i64>,
}

impl GlueJob {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_str(obj, path, "name", sink);
        let script_location = opt_str(obj, path, "script_location", sink);
        let max_capacity = opt_int_in(obj, path, "max_capacity", 2, 100, sink);
        Some(Self {
            name: name?,
            script_location,
            max_capacity,
        })
    }
}

/// The `glue` section. Mandatory, but may legitimately be empty — a bare
/// catalog with no databases or jobs yet.
#[derive(Debug, Clone, Serialize)]
pub struct GlueSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub databases: Option<Vec<GlueDatabase>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<GlueJob>>,
}

impl GlueSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let databases = opt_record_list(obj, path, "databases", sink, GlueDatabase::from_value);
        let jobs = opt_record_list(obj, path, "jobs", sink, GlueJob::from_value);
        Some(Self { databases, jobs })
    }
}

/// One Lake Formation grant.
#[derive(Debug, Clone, Serialize)]
pub struct LfPermission {
    pub principal: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

impl LfPermission {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let principal = req_str(obj, path, "principal", sink);
        let database = opt_str(obj, path, "database", sink);
        let access = opt_enum(obj, path, "access", &["read", "write", "admin"], sink);
        Some(Self {
            principal: principal?,
            database,
            access,
        })
    }
}

/// The `lake_formation` section.
#[derive(Debug, Clone, Serialize)]
pub struct LakeFormationSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admins: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<LfPermission>>,
}

impl LakeFormationSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let admins = opt_str_list(obj, path, "admins", sink);
        let permissions = opt_record_list(obj, path, "permissions", sink, LfPermission::from_value);
        Some(Self {
            admins,
            permissions,
        })
    }
}
