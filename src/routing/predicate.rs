//! Request predicates used to select a route.

use std::fmt;
use std::sync::Arc;

use crate::parser::{HttpRequest, Method};
use crate::routing::error::Error;
use crate::routing::pattern::PathPattern;

/// Signature of a user-supplied predicate.
pub type PredicateFn = dyn Fn(&HttpRequest) -> bool + Send + Sync;

/// A pure match decision over a request.
///
/// Predicates hold no mutable state and can be shared across any number of
/// concurrent dispatches. Composites evaluate their children left to right
/// and stop as soon as the outcome is known, so cheap checks (the method)
/// belong before expensive ones (the path).
#[derive(Clone)]
pub enum Predicate {
    /// Matches every request. Used for catch-all entries.
    Always,
    ByMethod(Method),
    /// Matches the path component of the request target, ignoring the query.
    ByPath(PathPattern),
    /// Logical AND. An empty list matches.
    All(Vec<Predicate>),
    /// Logical OR. An empty list never matches.
    Any(Vec<Predicate>),
    Custom(Arc<PredicateFn>),
}

impl Predicate {
    pub fn method(method: Method) -> Self {
        Predicate::ByMethod(method)
    }

    /// Compile a path pattern into a predicate.
    pub fn path(pattern: &str) -> Result<Self, Error> {
        Ok(Predicate::ByPath(PathPattern::parse(pattern)?))
    }

    pub fn all(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::All(children.into_iter().collect())
    }

    pub fn any(children: impl IntoIterator<Item = Predicate>) -> Self {
        Predicate::Any(children.into_iter().collect())
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&HttpRequest) -> bool + Send + Sync + 'static,
    {
        Predicate::Custom(Arc::new(f))
    }

    /// `method` AND `pattern`, with the method checked first.
    pub fn route(method: Method, pattern: &str) -> Result<Self, Error> {
        Ok(Predicate::All(vec![Predicate::method(method), Predicate::path(pattern)?]))
    }

    /// Evaluate the predicate against a request.
    pub fn matches(&self, request: &HttpRequest) -> bool {
        match self {
            Predicate::Always => true,
            Predicate::ByMethod(method) => request.method == *method,
            Predicate::ByPath(pattern) => pattern.matches(request.path_only()),
            Predicate::All(children) => children.iter().all(|child| child.matches(request)),
            Predicate::Any(children) => children.iter().any(|child| child.matches(request)),
            Predicate::Custom(f) => f(request),
        }
    }
}

fn join(f: &mut fmt::Formatter<'_>, children: &[Predicate], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{child}")?;
    }
    Ok(())
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => f.write_str("*"),
            Predicate::ByMethod(method) => write!(f, "{method}"),
            Predicate::ByPath(pattern) => write!(f, "{pattern}"),
            Predicate::All(children) if children.is_empty() => f.write_str("*"),
            Predicate::All(children) => join(f, children, " "),
            Predicate::Any(children) => {
                f.write_str("(")?;
                join(f, children, " | ")?;
                f.write_str(")")
            }
            Predicate::Custom(_) => f.write_str("<custom>"),
        }
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Always => f.write_str("Always"),
            Predicate::ByMethod(method) => f.debug_tuple("ByMethod").field(method).finish(),
            Predicate::ByPath(pattern) => f.debug_tuple("ByPath").field(&pattern.as_str()).finish(),
            Predicate::All(children) => f.debug_tuple("All").field(children).finish(),
            Predicate::Any(children) => f.debug_tuple("Any").field(children).finish(),
            Predicate::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
