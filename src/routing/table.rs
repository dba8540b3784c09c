//! Route table: ordered path rules mapped to backend services.

use crate::config::ServicesConfig;

/// The backend services the gateway fronts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Auth,
    Ledger,
    Hr,
    Student,
    Reporting,
}

impl Service {
    /// Every backend, in display order.
    pub const ALL: [Service; 5] = [
        Service::Auth,
        Service::Ledger,
        Service::Hr,
        Service::Student,
        Service::Reporting,
    ];

    /// Stable lowercase name, used for logs and metric labels.
    pub fn name(&self) -> &'static str {
        match self {
            Service::Auth => "auth",
            Service::Ledger => "ledger",
            Service::Hr => "hr",
            Service::Student => "student",
            Service::Reporting => "reporting",
        }
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// How a rule matches an inbound path.
#[derive(Debug, Clone, Copy)]
enum Pattern {
    Exact(&'static str),
    Prefix(&'static str),
}

impl Pattern {
    fn matches(&self, path: &str) -> bool {
        match self {
            Pattern::Exact(p) => path == *p,
            Pattern::Prefix(p) => path.starts_with(p),
        }
    }
}

/// How the matched path is transformed before forwarding.
#[derive(Debug, Clone, Copy)]
enum Rewrite {
    /// Forward the path unchanged.
    Keep,
    /// Drop a leading prefix (e.g., `/hr/employees` → `/employees`).
    StripPrefix(&'static str),
}

impl Rewrite {
    fn apply<'a>(&self, path: &'a str) -> &'a str {
        match self {
            Rewrite::Keep => path,
            Rewrite::StripPrefix(p) => path.strip_prefix(p).unwrap_or(path),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    pattern: Pattern,
    service: Service,
    rewrite: Rewrite,
}

/// A resolved route: which service to call and with what path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoute<'a> {
    /// The backend service the request goes to.
    pub service: Service,
    /// Base URL of that service, without a trailing slash.
    pub base: &'a str,
    /// The forwarded path (inbound path after rewrite).
    pub path: &'a str,
}

impl ResolvedRoute<'_> {
    /// Full target URL, with the query string appended verbatim when
    /// present and non-empty.
    pub fn target_url(&self, query: Option<&str>) -> String {
        match query {
            Some(q) if !q.is_empty() => format!("{}{}?{}", self.base, self.path, q),
            _ => format!("{}{}", self.base, self.path),
        }
    }
}

/// Immutable routing table for the back-office services.
///
/// Rules are evaluated top to bottom; the first match wins. A miss means
/// the gateway answers 404 itself, a routine outcome rather than an error.
#[derive(Debug)]
pub struct RouteTable {
    rules: Vec<Rule>,
    bases: ServiceBases,
}

#[derive(Debug)]
struct ServiceBases {
    auth: String,
    ledger: String,
    hr: String,
    student: String,
    reporting: String,
}

impl RouteTable {
    /// Build the standard table from the configured service base URLs.
    /// Trailing slashes on base URLs are trimmed so URL assembly stays
    /// purely concatenative.
    pub fn new(services: &ServicesConfig) -> Self {
        let rules = vec![
            Rule { pattern: Pattern::Prefix("/auth/"), service: Service::Auth, rewrite: Rewrite::Keep },
            Rule { pattern: Pattern::Prefix("/admin/"), service: Service::Auth, rewrite: Rewrite::Keep },
            Rule { pattern: Pattern::Prefix("/transactions/"), service: Service::Ledger, rewrite: Rewrite::Keep },
            Rule { pattern: Pattern::Exact("/transactions"), service: Service::Ledger, rewrite: Rewrite::Keep },
            Rule { pattern: Pattern::Prefix("/hr/"), service: Service::Hr, rewrite: Rewrite::StripPrefix("/hr") },
            Rule { pattern: Pattern::Exact("/students"), service: Service::Student, rewrite: Rewrite::Keep },
            Rule { pattern: Pattern::Prefix("/students/"), service: Service::Student, rewrite: Rewrite::Keep },
            // Back-compat alias kept for old clients; only the marker
            // prefix is dropped.
            Rule { pattern: Pattern::Prefix("/_student/students"), service: Service::Student, rewrite: Rewrite::StripPrefix("/_student") },
            Rule { pattern: Pattern::Prefix("/student-reports/"), service: Service::Student, rewrite: Rewrite::Keep },
            Rule { pattern: Pattern::Prefix("/reports/"), service: Service::Reporting, rewrite: Rewrite::Keep },
        ];

        Self {
            rules,
            bases: ServiceBases {
                auth: trim_base(&services.auth),
                ledger: trim_base(&services.ledger),
                hr: trim_base(&services.hr),
                student: trim_base(&services.student),
                reporting: trim_base(&services.reporting),
            },
        }
    }

    /// Resolve an inbound path to a backend service and forwarded path.
    ///
    /// Returns `None` when no rule matches; the caller turns that into a
    /// 404 with an empty body without attempting a forward.
    pub fn resolve<'a>(&'a self, path: &'a str) -> Option<ResolvedRoute<'a>> {
        for rule in &self.rules {
            if rule.pattern.matches(path) {
                return Some(ResolvedRoute {
                    service: rule.service,
                    base: self.base(rule.service),
                    path: rule.rewrite.apply(path),
                });
            }
        }
        None
    }

    /// Base URL configured for a service, without a trailing slash.
    pub fn base(&self, service: Service) -> &str {
        match service {
            Service::Auth => &self.bases.auth,
            Service::Ledger => &self.bases.ledger,
            Service::Hr => &self.bases.hr,
            Service::Student => &self.bases.student,
            Service::Reporting => &self.bases.reporting,
        }
    }
}

fn trim_base(base: &str) -> String {
    base.trim_end_matches('/').to_string()
}
