//! # Section Tree — Typed Environment Document
//!
//! The typed schema hierarchy for environment configuration documents. Each
//! section is an independent struct with an explicit `from_value`
//! constructor that records every field violation into the shared
//! [`ErrorSink`](crate::value::ErrorSink) — construction never stops at the
//! first problem. Serializing the tree back to JSON yields the *normalized
//! document*: defaults applied, unknown keys dropped, unset optional fields
//! omitted.

mod analytics;
mod app;
mod compute;
mod networking;
mod storage;

pub use analytics::{
    AirbyteConnection, AirbyteSection, DataQualitySection, HardeningSection, Notebook,
    OpenSearchDomain, OpenSearchSection, QualityRuleset, SageMakerSection, VectorStoreSection,
};
pub use app::{AppSection, DEFAULT_ENV, PROD_ENV};
pub use compute::{
    EventBridgeSection, EventRule, LambdaFunction, LambdaSection, MskCluster, MskSection,
    State, StateMachine, StepFunctionsSection,
};
pub use networking::{NetworkingSection, SecurityGroup, Subnet};
pub use storage::{
    Bucket, GlueDatabase, GlueJob, GlueSection, LakeFormationSection, LfPermission,
    RemovalPolicy, S3Section,
};

use serde::Serialize;
use serde_json::Value;

use crate::value::{as_object, ErrorSink, FieldPath};

/// The fully-typed environment document.
///
/// `app`, `s3`, and `glue` are mandatory; every other section is optional.
/// Unset optional sections are omitted from the normalized serialization.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub app: AppSection,
    pub s3: S3Section,
    pub glue: GlueSection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub networking: Option<NetworkingSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub msk: Option<MskSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lambda: Option<LambdaSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opensearch: Option<OpenSearchSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub airbyte: Option<AirbyteSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_quality: Option<DataQualitySection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lake_formation: Option<LakeFormationSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sagemaker: Option<SageMakerSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_native_hardening: Option<HardeningSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_functions: Option<StepFunctionsSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eventbridge: Option<EventBridgeSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_store: Option<VectorStoreSection>,
}

/// Parse a mandatory section; absence or `null` is a violation.
fn required<T>(
    root: &serde_json::Map<String, Value>,
    name: &str,
    sink: &mut ErrorSink,
    parse: impl Fn(&Value, &FieldPath, &mut ErrorSink) -> Option<T>,
) -> Option<T> {
    let path = FieldPath::section(name);
    match root.get(name) {
        None | Some(Value::Null) => {
            sink.push(&path, "section is required");
            None
        }
        Some(value) => parse(value, &path, sink),
    }
}

/// Parse an optional section; absence or `null` simply leaves it unset.
fn optional<T>(
    root: &serde_json::Map<String, Value>,
    name: &str,
    sink: &mut ErrorSink,
    parse: impl Fn(&Value, &FieldPath, &mut ErrorSink) -> Option<T>,
) -> Option<T> {
    match root.get(name) {
        None | Some(Value::Null) => None,
        Some(value) => parse(value, &FieldPath::section(name), sink),
    }
}

impl Document {
    /// Construct the typed tree from a parsed document, recording every
    /// field-level violation. Returns `None` when a mandatory section is
    /// unusable; optional sections that fail to parse are dropped (their
    /// violations keep the sink non-empty, so no normalized document is
    /// produced from a partial tree).
    pub fn from_value(raw: &Value, sink: &mut ErrorSink) -> Option<Self> {
        let root = as_object(raw, &FieldPath::root(), sink)?;

        let app = required(root, "app", sink, AppSection::from_value);
        let s3 = required(root, "s3", sink, S3Section::from_value);
        let glue = required(root, "glue", sink, GlueSection::from_value);

        let networking = optional(root, "networking", sink, NetworkingSection::from_value);
        let msk = optional(root, "msk", sink, MskSection::from_value);
        let lambda = optional(root, "lambda", sink, LambdaSection::from_value);
        let opensearch = optional(root, "opensearch", sink, OpenSearchSection::from_value);
        let airbyte = optional(root, "airbyte", sink, AirbyteSection::from_value);
        let data_quality = optional(root, "data_quality", sink, DataQualitySection::from_value);
        let lake_formation =
            optional(root, "lake_formation", sink, LakeFormationSection::from_value);
        let sagemaker = optional(root, "sagemaker", sink, SageMakerSection::from_value);
        let cloud_native_hardening =
            optional(root, "cloud_native_hardening", sink, HardeningSection::from_value);
        let step_functions =
            optional(root, "step_functions", sink, StepFunctionsSection::from_value);
        let eventbridge = optional(root, "eventbridge", sink, EventBridgeSection::from_value);
        let vector_store = optional(root, "vector_store", sink, VectorStoreSection::from_value);

        Some(Self {
            app: app?,
            s3: s3?,
            glue: glue?,
            networking,
            msk,
            lambda,
            opensearch,
            airbyte,
            data_quality,
            lake_formation,
            sagemaker,
            cloud_native_hardening,
            step_functions,
            eventbridge,
            vector_store,
        })
    }
}
