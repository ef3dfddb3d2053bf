//! Category-keyed remediation and prevention text.

use sleuth_core::models::well_known;
use sleuth_core::models::Category;

/// Remediation and prevention guidance for one category.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub remediation: &'static str,
    pub next_action: &'static str,
    pub prevention: &'static str,
}

const NETWORK: Template = Template {
    remediation: "Restore connectivity: check CoreDNS health, network policies and service endpoints",
    next_action: "Run a DNS lookup and a connectivity probe from an affected pod",
    prevention: "Alert on DNS error rate and endpoint churn",
};

const METRICS: Template = Template {
    remediation: "Relieve the saturated workload: scale out or raise its resource limits",
    next_action: "Compare current utilization against the last known-good baseline",
    prevention: "Set utilization alerts below the saturation point",
};

const RESOURCE: Template = Template {
    remediation: "Free capacity on the affected nodes: reclaim disk, evict low-priority pods or add nodes",
    next_action: "Inspect node conditions for DiskPressure, MemoryPressure and PIDPressure",
    prevention: "Enforce resource quotas and alert on node pressure conditions",
};

const MEMORY: Template = Template {
    remediation: "Raise memory limits or fix the leak in the OOM-killed containers",
    next_action: "Review container memory usage against limits and recent OOMKilled events",
    prevention: "Track memory growth per release and load-test memory limits",
};

const CLUSTER: Template = Template {
    remediation: "Stabilize the control plane: check etcd latency and API server health",
    next_action: "Check control plane component status and etcd member health",
    prevention: "Monitor etcd fsync latency and API server request latency",
};

const LOGS: Template = Template {
    remediation: "Address the dominant error pattern in the application logs",
    next_action: "Correlate the first error occurrence with recent deployments",
    prevention: "Alert on error-rate increases per service",
};

const EVENTS: Template = Template {
    remediation: "Resolve the failing scheduling or image pull reported in cluster events",
    next_action: "List warning events for the affected namespace in time order",
    prevention: "Forward warning events to the alerting pipeline",
};

const STORAGE: Template = Template {
    remediation: "Recover the affected volumes: check claim binding, mounts and provisioner health",
    next_action: "Inspect PVC status and volume attach events",
    prevention: "Alert on volume capacity and pending claims",
};

const SECURITY: Template = Template {
    remediation: "Repair the failing credentials or RBAC bindings",
    next_action: "Audit recent RBAC and secret changes for the affected service accounts",
    prevention: "Rotate certificates ahead of expiry and review RBAC changes",
};

const GENERIC: Template = Template {
    remediation: "Investigate and remediate the reported anomaly",
    next_action: "Collect additional evidence for the affected components",
    prevention: "Add monitoring for the affected components",
};

/// Template for a category; unknown categories get generic guidance.
pub fn for_category(category: &Category) -> &'static Template {
    match category.as_str() {
        well_known::NETWORK => &NETWORK,
        well_known::METRICS => &METRICS,
        well_known::RESOURCE => &RESOURCE,
        well_known::MEMORY => &MEMORY,
        well_known::CLUSTER => &CLUSTER,
        well_known::LOGS => &LOGS,
        well_known::EVENTS => &EVENTS,
        well_known::STORAGE => &STORAGE,
        well_known::SECURITY => &SECURITY,
        _ => &GENERIC,
    }
}
