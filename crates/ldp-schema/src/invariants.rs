//! # Whole-Document Invariants — Cross-Section Rules
//!
//! An explicit second pass over the fully-typed [`Document`], run only when
//! every section parsed without field errors. Field parsing never sees more
//! than one section at a time; these rules are the ones that need the whole
//! tree.

use std::collections::BTreeSet;

use crate::sections::{Document, RemovalPolicy, PROD_ENV};
use crate::value::{ErrorSink, FieldPath};

/// Evaluate every cross-section rule, accumulating violations.
pub(crate) fn check_invariants(doc: &Document, sink: &mut ErrorSink) {
    check_prod_resilience(doc, sink);
    check_referential_integrity(doc, sink);
}

/// Production environments must not be able to lose data on teardown, and
/// must span at least two subnets.
fn check_prod_resilience(doc: &Document, sink: &mut ErrorSink) {
    if doc.app.env != PROD_ENV {
        return;
    }

    let buckets_path = FieldPath::section("s3").key("buckets");
    for (i, bucket) in doc.s3.buckets.iter().enumerate() {
        if bucket.removal_policy != Some(RemovalPolicy::Retain) {
            sink.push(
                &buckets_path.index(i).key("removal_policy"),
                format!(
                    "environment 'prod' requires removal_policy RETAIN for bucket '{}'",
                    bucket.id
                ),
            );
        }
    }

    let subnet_count = doc
        .networking
        .as_ref()
        .map(|n| n.subnet_ids().count())
        .unwrap_or(0);
    if subnet_count < 2 {
        sink.push(
            &FieldPath::section("networking").key("subnets"),
            format!("environment 'prod' requires at least 2 subnets, found {subnet_count}"),
        );
    }
}

/// Every subnet / security-group id referenced from `msk` or `lambda` must
/// be declared in `networking`.
fn check_referential_integrity(doc: &Document, sink: &mut ErrorSink) {
    let (subnet_ids, group_ids): (BTreeSet<&str>, BTreeSet<&str>) = match &doc.networking {
        Some(net) => (net.subnet_ids().collect(), net.security_group_ids().collect()),
        None => (BTreeSet::new(), BTreeSet::new()),
    };

    if let Some(cluster) = doc.msk.as_ref().and_then(|m| m.cluster.as_ref()) {
        let cluster_path = FieldPath::section("msk").key("cluster");
        check_refs(
            cluster.vpc_subnet_ids.as_deref(),
            &subnet_ids,
            &cluster_path.key("vpc_subnet_ids"),
            "subnet ID",
            sink,
        );
        check_refs(
            cluster.security_group_ids.as_deref(),
            &group_ids,
            &cluster_path.key("security_group_ids"),
            "security group ID",
            sink,
        );
    }

    if let Some(functions) = doc.lambda.as_ref().and_then(|l| l.functions.as_deref()) {
        let functions_path = FieldPath::section("lambda").key("functions");
        for (i, function) in functions.iter().enumerate() {
            let function_path = functions_path.index(i);
            check_refs(
                function.subnet_ids.as_deref(),
                &subnet_ids,
                &function_path.key("subnet_ids"),
                "subnet ID",
                sink,
            );
            check_refs(
                function.security_group_ids.as_deref(),
                &group_ids,
                &function_path.key("security_group_ids"),
                "security group ID",
                sink,
            );
        }
    }
}

fn check_refs(
    referenced: Option<&[String]>,
    declared: &BTreeSet<&str>,
    path: &FieldPath,
    label: &str,
    sink: &mut ErrorSink,
) {
    for id in referenced.unwrap_or_default() {
        if !declared.contains(id.as_str()) {
            sink.push(path, format!("{label} '{id}' not found in networking config"));
        }
    }
}
