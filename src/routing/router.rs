//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store ordered route bindings
//! - Look up the destination for a path, descending into nested tables
//! - Return the resolved destination or an explicit no-match
//! - Build paths back from route names (reverse)
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in definition order; first match wins
//! - Nested tables are shared `Arc`s and resolved recursively on the stripped remainder
//! - Explicit NoMatch rather than silent default

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::error::{PatternError, RouteError};
use super::matcher::{ExactMatcher, Matcher, Params, PathPattern, PrefixMatcher};

/// Where a binding sends a matched path.
pub enum Destination<E> {
    /// A handler invoked directly.
    Endpoint(E),
    /// A nested table that resolves whatever the prefix left over.
    Include(Arc<RouteTable<E>>),
}

impl<E: fmt::Debug> fmt::Debug for Destination<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Destination::Endpoint(e) => f.debug_tuple("Endpoint").field(e).finish(),
            Destination::Include(t) => f.debug_tuple("Include").field(t).finish(),
        }
    }
}

/// A single `(pattern, destination)` entry of a table.
#[derive(Debug)]
pub struct Binding<E> {
    matcher: Box<dyn Matcher>,
    destination: Destination<E>,
    name: Option<String>,
}

impl<E> Binding<E> {
    /// Bind a handler to a prefix. The handler receives whatever follows the prefix.
    pub fn mount(prefix: &str, endpoint: E) -> Result<Self, PatternError> {
        Ok(Self {
            matcher: Box::new(PrefixMatcher::new(PathPattern::parse(prefix)?)),
            destination: Destination::Endpoint(endpoint),
            name: None,
        })
    }

    /// Bind a handler to a pattern that must match the whole remaining path.
    pub fn exact(pattern: &str, endpoint: E) -> Result<Self, PatternError> {
        Ok(Self {
            matcher: Box::new(ExactMatcher::new(PathPattern::parse(pattern)?)),
            destination: Destination::Endpoint(endpoint),
            name: None,
        })
    }

    /// Delegate everything under `prefix` to a nested table.
    pub fn include(prefix: &str, table: Arc<RouteTable<E>>) -> Result<Self, PatternError> {
        Ok(Self {
            matcher: Box::new(PrefixMatcher::new(PathPattern::parse(prefix)?)),
            destination: Destination::Include(table),
            name: None,
        })
    }

    /// Name the binding so it can be reversed.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn pattern(&self) -> &PathPattern {
        self.matcher.pattern()
    }

    pub fn destination(&self) -> &Destination<E> {
        &self.destination
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// One step of delegation into a nested table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    /// The text the include pattern consumed.
    pub prefix: String,
    /// The suffix handed to the nested table.
    pub forwarded: String,
}

/// Outcome of a successful lookup.
#[derive(Debug)]
pub struct Resolution<'a, E> {
    pub endpoint: &'a E,
    /// Part of the path the endpoint's own pattern did not consume.
    /// Always empty for exact bindings.
    pub remainder: String,
    /// Parameters captured along the whole chain of patterns.
    pub params: Params,
    /// Include steps taken, outermost first.
    pub hops: Vec<Hop>,
    /// Concatenation of every pattern on the way, e.g. `polls/<int:question_id>/vote/`.
    pub route: String,
    /// Fully qualified name, e.g. `polls:vote`, when the endpoint binding is named.
    pub name: Option<String>,
}

/// Kind of row produced by [`RouteTable::routes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Mount,
    Exact,
}

/// A flattened listing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: String,
    pub name: Option<String>,
    pub kind: RouteKind,
}

/// Accumulated state while descending through includes.
#[derive(Default, Clone)]
struct Trail {
    route: String,
    namespaces: Vec<String>,
    params: Params,
    hops: Vec<Hop>,
}

impl Trail {
    fn qualify(&self, name: Option<&str>) -> Option<String> {
        let name = name?;
        let mut parts: Vec<&str> = self.namespaces.iter().map(String::as_str).collect();
        parts.push(name);
        Some(parts.join(":"))
    }
}

/// An ordered, immutable route table.
#[derive(Debug)]
pub struct RouteTable<E> {
    namespace: Option<String>,
    bindings: Vec<Binding<E>>,
}

impl<E> RouteTable<E> {
    pub fn new(bindings: Vec<Binding<E>>) -> Self {
        Self {
            namespace: None,
            bindings,
        }
    }

    /// A table whose named routes are reversed as `namespace:name`.
    pub fn with_namespace(namespace: impl Into<String>, bindings: Vec<Binding<E>>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            bindings,
        }
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn bindings(&self) -> &[Binding<E>] {
        &self.bindings
    }

    /// Find the destination for `path`.
    ///
    /// Paths are framework-relative (`"polls/3/vote/"`, no leading slash).
    /// An include whose prefix matches but whose nested table has nothing
    /// for the remainder does not stop the scan; later bindings are still tried.
    pub fn resolve(&self, path: &str) -> Result<Resolution<'_, E>, RouteError> {
        let mut tried = Vec::new();
        self.resolve_in(path, &Trail::default(), &mut tried)
            .ok_or_else(|| RouteError::NoMatch {
                path: path.to_string(),
                tried,
            })
    }

    fn resolve_in<'a>(
        &'a self,
        path: &str,
        trail: &Trail,
        tried: &mut Vec<String>,
    ) -> Option<Resolution<'a, E>> {
        for binding in &self.bindings {
            let full_pattern = format!("{}{}", trail.route, binding.pattern());

            let Some(m) = binding.matcher.matches(path) else {
                tried.push(full_pattern);
                continue;
            };
            let rest = &path[m.consumed..];

            match &binding.destination {
                Destination::Endpoint(endpoint) => {
                    let mut params = trail.params.clone();
                    params.extend(m.params);
                    return Some(Resolution {
                        endpoint,
                        remainder: rest.to_string(),
                        params,
                        hops: trail.hops.clone(),
                        route: full_pattern,
                        name: trail.qualify(binding.name()),
                    });
                }
                Destination::Include(table) => {
                    let mut nested = trail.clone();
                    nested.route = full_pattern;
                    nested.params.extend(m.params);
                    nested.hops.push(Hop {
                        prefix: path[..m.consumed].to_string(),
                        forwarded: rest.to_string(),
                    });
                    if let Some(ns) = table.namespace() {
                        nested.namespaces.push(ns.to_string());
                    }
                    if let Some(found) = table.resolve_in(rest, &nested, tried) {
                        return Some(found);
                    }
                }
            }
        }
        None
    }

    /// Build the path for a named route.
    ///
    /// `name` is either a plain binding name or `namespace:name` (namespaces may nest).
    /// Parameters not used by any pattern on the way are ignored.
    pub fn reverse(
        &self,
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<String, RouteError> {
        self.reverse_in(name, params)
            .ok_or_else(|| RouteError::NoReverseMatch {
                name: name.to_string(),
            })
    }

    fn reverse_in(&self, name: &str, params: &BTreeMap<String, String>) -> Option<String> {
        if let Some((ns, inner)) = name.split_once(':') {
            for binding in &self.bindings {
                let Destination::Include(table) = &binding.destination else {
                    continue;
                };
                let found = if table.namespace() == Some(ns) {
                    table.reverse_in(inner, params)
                } else if table.namespace().is_none() {
                    table.reverse_in(name, params)
                } else {
                    None
                };
                if let (Some(tail), Some(head)) = (found, binding.pattern().reverse(params)) {
                    return Some(head + &tail);
                }
            }
            return None;
        }

        for binding in &self.bindings {
            match &binding.destination {
                Destination::Endpoint(_) if binding.name() == Some(name) => {
                    if let Some(path) = binding.pattern().reverse(params) {
                        return Some(path);
                    }
                }
                Destination::Include(table) if table.namespace().is_none() => {
                    if let (Some(tail), Some(head)) =
                        (table.reverse_in(name, params), binding.pattern().reverse(params))
                    {
                        return Some(head + &tail);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Flatten the table (and nested tables) into one row per endpoint.
    pub fn routes(&self) -> Vec<RouteEntry> {
        let mut out = Vec::new();
        self.collect_routes(&Trail::default(), &mut out);
        out
    }

    fn collect_routes(&self, trail: &Trail, out: &mut Vec<RouteEntry>) {
        for binding in &self.bindings {
            let pattern = format!("{}{}", trail.route, binding.pattern());
            match &binding.destination {
                Destination::Endpoint(_) => out.push(RouteEntry {
                    pattern,
                    name: trail.qualify(binding.name()),
                    kind: if binding.matcher.is_prefix() {
                        RouteKind::Mount
                    } else {
                        RouteKind::Exact
                    },
                }),
                Destination::Include(table) => {
                    let mut nested = trail.clone();
                    nested.route = pattern;
                    if let Some(ns) = table.namespace() {
                        nested.namespaces.push(ns.to_string());
                    }
                    table.collect_routes(&nested, out);
                }
            }
        }
    }
}
