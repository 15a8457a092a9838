//! Networking section: the VPC layout every other section references.

use serde::Serialize;
use serde_json::Value;

use crate::value::{
    as_object, opt_cidr, opt_record_list, opt_str, reject_duplicate_ids, req_str, ErrorSink,
    FieldPath,
};

/// One subnet declaration. Referenced by id from `msk` and `lambda`.
#[derive(Debug, Clone, Serialize)]
pub struct Subnet {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cidr: Option<String>,
    /// Availability zone.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub az: Option<String>,
}

impl Subnet {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let id = req_str(obj, path, "id", sink);
        let cidr = opt_cidr(obj, path, "cidr", sink);
        let az = opt_str(obj, path, "az", sink);
        Some(Self { id: id?, cidr, az })
    }
}

/// One security group declaration.
#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroup {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecurityGroup {
    fn from_value(value: &Value, path: &FieldPath, sink: &mut ErrorSink) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let id = req_str(obj, path, "id", sink);
        let description = opt_str(obj, path, "description", sink);
        Some(Self {
            id: id?,
            description,
        })
    }
}

/// The `networking` section.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkingSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_cidr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnets: Option<Vec<Subnet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<SecurityGroup>>,
}

impl NetworkingSection {
    pub(crate) fn from_value(
        value: &Value,
        path: &FieldPath,
        sink: &mut ErrorSink,
    ) -> Option<Self> {
        let obj = as_object(value, path, sink)?;
        let vpc_cidr = opt_cidr(obj, path, "vpc_cidr", sink);
        let subnets = opt_record_list(obj, path, "subnets", sink, Subnet::from_value);
        if let Some(subnets) = &subnets {
            reject_duplicate_ids(
                subnets.iter().enumerate().map(|(i, s)| (i, s.id.as_str())),
                &path.key("subnets"),
                "subnet ID",
                sink,
            );
        }
        let security_groups =
            opt_record_list(obj, path, "security_groups", sink, SecurityGroup::from_value);
        if let Some(groups) = &security_groups {
            reject_duplicate_ids(
                groups.iter().enumerate().map(|(i, g)| (i, g.id.as_str())),
                &path.key("security_groups"),
                "security group ID",
                sink,
            );
        }
        Some(Self {
            vpc_cidr,
            subnets,
            security_groups,
        })
    }

    /// Declared subnet ids, in declaration order.
    pub fn subnet_ids(&self) -> impl Iterator<Item = &str> {
        self.subnets
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|s| s.id.as_str())
    }

    /// Declared security-group ids, in declaration order.
    pub fn security_group_ids(&self) -> impl Iterator<Item = &str> {
        self.security_groups
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|g| g.id.as_str())
    }
}
