//! Rule-driven agent router.
//!
//! Evaluation algorithm:
//!
//! 1. Iterate rules in declaration order.
//! 2. The first rule whose `action` matches (exactly, or via `"*"`) decides
//!    the route: its `role` and `fallback` flag.
//! 3. If no rule matched, use the built-in `StandardRouter` mapping.

use tracing::debug;

use vheal_contracts::action::{ActionKind, Route};
use vheal_core::{router::StandardRouter, traits::AgentRouter};

use crate::config::RouteRule;

/// An `AgentRouter` that reads its routes from configuration.
#[derive(Debug, Clone, Default)]
pub struct TomlRouter {
    rules: Vec<RouteRule>,
}

impl TomlRouter {
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }
}

impl AgentRouter for TomlRouter {
    fn route(&self, action: ActionKind) -> Route {
        if let Some(rule) = self.rules.iter().find(|r| r.matches(action)) {
            debug!(rule_id = %rule.id, action = %action, role = %rule.role, "route matched");
            return Route { role: rule.role, allow_fallback: rule.fallback };
        }

        debug!(action = %action, "no route matched; using standard mapping");
        StandardRouter::route_for(action)
    }
}
