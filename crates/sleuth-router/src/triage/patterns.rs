use regex::Regex;
use std::sync::LazyLock;

/// A compiled triage pattern for one category.
pub struct CategoryPattern {
    pub category: &'static str,
    pub regex: &'static LazyLock<Option<Regex>>,
}

macro_rules! triage_pattern {
    ($name:ident, $regex_str:expr) => {
        pub static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($regex_str).ok());
    };
}

// ── Categories ─────────────────────────────────────────────────────────────
triage_pattern!(
    RE_NETWORK,
    r"(?i)\b(?:network|dns|ingress|egress|connection refused|connectivity|unreachable|packet loss|latency|timeouts?|endpoints?|load ?balancer)\b"
);

triage_pattern!(
    RE_METRICS,
    r"(?i)\b(?:metrics?|cpu|throttl\w*|slow|spikes?|usage|utili[sz]ation|high load)\b"
);

triage_pattern!(
    RE_RESOURCE,
    r"(?i)\b(?:resources?|quota|limits?|disk[- ]pressure|disk|evict\w*|insufficient|exhaust\w*|pending)\b"
);

triage_pattern!(
    RE_MEMORY,
    r"(?i)\b(?:memory|oom\w*|out of memory|leak\w*|heap)\b"
);

triage_pattern!(
    RE_CLUSTER,
    r"(?i)\b(?:nodes?|control[- ]plane|etcd|api[- ]?server|scheduler|kubelet|not ?ready|cluster)\b"
);

triage_pattern!(
    RE_LOGS,
    r"(?i)\b(?:errors?|exceptions?|logs?|stack ?trace|panic\w*|fatal|crash\w*)\b"
);

triage_pattern!(
    RE_EVENTS,
    r"(?i)\b(?:events?|restart\w*|crashloop\w*|backoff|imagepull\w*|errimagepull|warnings?|failed scheduling)\b"
);

triage_pattern!(
    RE_STORAGE,
    r"(?i)\b(?:storage|volumes?|pvc|persistentvolume\w*|mount\w*|db|database)\b"
);

triage_pattern!(
    RE_SECURITY,
    r"(?i)\b(?:rbac|forbidden|unauthori[sz]ed|permission\w*|denied|secrets?|certificates?|tls)\b"
);

// ── Entity hints ───────────────────────────────────────────────────────────
triage_pattern!(
    RE_NAMESPACE_HINT,
    r"(?i)(?:\bnamespace[\s:=]+|\s-n\s+)([a-z0-9][a-z0-9-]*)"
);

triage_pattern!(RE_NODE_HINT, r"(?i)\bnode[\s:=/]+([a-z0-9][a-z0-9.-]*[a-z0-9])");

triage_pattern!(
    RE_DEPLOYMENT_HINT,
    r"(?i)\b(?:deployment|deploy)[\s:=/]+([a-z0-9][a-z0-9-]*)"
);

triage_pattern!(
    RE_SERVICE_HINT,
    r"(?i)\b(?:service|svc)[\s:=/]+([a-z0-9][a-z0-9-]*)"
);

pub fn all_patterns() -> Vec<CategoryPattern> {
    vec![
        CategoryPattern { category: "network", regex: &RE_NETWORK },
        CategoryPattern { category: "metrics", regex: &RE_METRICS },
        CategoryPattern { category: "resource", regex: &RE_RESOURCE },
        CategoryPattern { category: "memory", regex: &RE_MEMORY },
        CategoryPattern { category: "cluster", regex: &RE_CLUSTER },
        CategoryPattern { category: "logs", regex: &RE_LOGS },
        CategoryPattern { category: "events", regex: &RE_EVENTS },
        CategoryPattern { category: "storage", regex: &RE_STORAGE },
        CategoryPattern { category: "security", regex: &RE_SECURITY },
    ]
}
