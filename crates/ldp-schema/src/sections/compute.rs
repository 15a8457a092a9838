//! Compute and orchestration sections: MSK, Lambda, Step Functions, and
//! EventBridge.

use serde::Serialize;
use serde_json::Value;

use crate::value::{
    as_object, bool_or, opt_enum, opt_int_in, opt_record_list, opt_str, opt_str_list,
    reject_duplicate_ids, req_str, ErrorSink, FieldPath,
};

/// The managed Kafka cluster.
#[derive(Debug, Clone, Serialize)]
pub struct MskCluster {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_type: Option<String>,
    /// Subnet ids the brokers attach to; must exist in `networking.subnets`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_subnet_ids: Option<Vec<String>>,
    /// Security groups applied to the brokers; must exist in
    /// `networking.security_groups`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
}

impl MskCluster {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_str(obj, path, "name", sink);
        let broker_count = opt_int_in(obj, path, "broker_count", 1, 15, sink);
        let instance_type = opt_str(obj, path, "instance_type", sink);
        let vpc_subnet_ids = opt_str_list(obj, path, "vpc_subnet_ids", sink);
        let security_group_ids = opt_str_list(obj, path, "security_group_ids", sink);
        Some(Self {
            name: name?,
            broker_count,
            instance_type,
            vpc_subnet_ids,
            security_group_ids,
        })
    }
}

/// The `msk` section.
#[derive(Debug, Clone, Serialize)]
pub struct MskSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cluster: Option<MskCluster>,
}

impl MskSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let cluster = match obj.get("cluster") {
            None | Some(Value::Null) => None,
            Some(v) => MskCluster::from_value(v, &path.key("cluster"), sink),
        };
        Some(Self { cluster })
    }
}

/// One Lambda function declaration.
#[derive(Debug, Clone, Serialize)]
pub struct LambdaFunction {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_mb: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<i64>,
    /// VPC attachment; ids must exist in `networking`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_group_ids: Option<Vec<String>>,
}

impl LambdaFunction {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let id = req_str(obj, path, "id", sink);
        let handler = opt_str(obj, path, "handler", sink);
        let runtime = opt_str(obj, path, "runtime", sink);
        let memory_mb = opt_int_in(obj, path, "memory_mb", 128, 10240, sink);
        let timeout_seconds = opt_int_in(obj, path, "timeout_seconds", 1, 900, sink);
        let subnet_ids = opt_str_list(obj, path, "subnet_ids", sink);
        let security_group_ids = opt_str_list(obj, path, "security_group_ids", sink);
        Some(Self {
            id: id?,
            handler,
            runtime,
            memory_mb,
            timeout_seconds,
            subnet_ids,
            security_group_ids,
        })
    }
}

/// The `lambda` section.
#[derive(Debug, Clone, Serialize)]
pub struct LambdaSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<LambdaFunction>>,
}

impl LambdaSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let functions = opt_record_list(obj, path, "functions", sink, LambdaFunction::from_value);
        if let Some(functions) = &functions {
            reject_duplicate_ids(
                functions.iter().enumerate().map(|(i, f)| (i, f.id.as_str())),
                &path.key("functions"),
                "function ID",
                sink,
            );
        }
        Some(Self { functions })
    }
}

/// One state inside a state machine definition.
#[derive(Debug, Clone, Serialize)]
pub struct State {
    pub id: String,
    /// State kind; the provisioning layer maps this onto the ASL type.
    pub kind: String,
    /// Id of the state this one transitions to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl State {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let id = req_str(obj, path, "id", sink);
        let kind = match obj.get("kind") {
            None | Some(Value::Null) => {
                sink.push(&path.key("kind"), "is required");
                None
            }
            Some(_) => opt_enum(
                obj,
                path,
                "kind",
                &["task", "choice", "wait", "parallel", "map", "succeed", "fail"],
                sink,
            ),
        };
        let next = opt_str(obj, path, "next", sink);
        Some(Self {
            id: id?,
            kind: kind?,
            next,
        })
    }
}

/// One Step Functions state machine.
#[derive(Debug, Clone, Serialize)]
pub struct StateMachine {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub states: Option<Vec<State>>,
}

impl StateMachine {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_str(obj, path, "name", sink);
        let states = opt_record_list(obj, path, "states", sink, State::from_value);
        if let Some(states) = &states {
            reject_duplicate_ids(
                states.iter().enumerate().map(|(i, s)| (i, s.id.as_str())),
                &path.key("states"),
                "state ID",
                sink,
            );
        }
        Some(Self {
            name: name?,
            states,
        })
    }
}

/// The `step_functions` section.
#[derive(Debug, Clone, Serialize)]
pub struct StepFunctionsSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_machines: Option<Vec<StateMachine>>,
}

impl StepFunctionsSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let state_machines =
            opt_record_list(obj, path, "state_machines", sink, StateMachine::from_value);
        Some(Self { state_machines })
    }
}

/// One EventBridge rule.
#[derive(Debug, Clone, Serialize)]
pub struct EventRule {
    pub name: String,
    /// Schedule expression (`rate(...)` or `cron(...)`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    pub enabled: bool,
}

impl EventRule {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let name = req_str(obj, path, "name", sink);
        let schedule = opt_str(obj, path, "schedule", sink);
        let enabled = bool_or(obj, path, "enabled", true, sink);
        Some(Self {
            name: name?,
            schedule,
            enabled,
        })
    }
}

/// The `eventbridge` section.
#[derive(Debug, Clone, Serialize)]
pub struct EventBridgeSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rules: Option<Vec<EventRule>>,
}

impl EventBridgeSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let rules = opt_record_list(obj, path, "rules", sink, EventRule::from_value);
        Some(Self { rules })
    }
}
