//! Engine configuration schema.
//!
//! An `EngineConfig` is deserialized from TOML and carries everything needed
//! to stand up an orchestrator: selection policy, routing rules, the agent
//! roster and the seed patients.
//!
//! Example:
//! ```toml
//! [engine]
//! selection = "random"
//! seed = 42
//!
//! [[routes]]
//! id = "assist-to-checklist"
//! action = "assist"
//! role = "checklist-monitoring"
//!
//! [[agents]]
//! name = "Checklist Agent"
//! role = "checklist-monitoring"
//!
//! [[patients]]
//! id = "PT002"
//! name = "Maria Garcia"
//! age = 45
//! condition = "Pneumonia treatment"
//! room = "215B"
//! doctor = "Dr. Michael Chen"
//! admission_date = "2024-12-16"
//! estimated_discharge = "2024-12-19"
//! priority = "Medium"
//! discharge_status = "Pending Medical Review"
//! tasks = { vitals_check = true, lab_results = false }
//! ```

use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use vheal_contracts::{
    action::ActionKind,
    agent::{AgentRole, AgentSpec},
    error::{DischargeError, DischargeResult},
    patient::PatientSeed,
};

/// Which `TaskSelector` the orchestrator uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Uniform random among open tasks.
    #[default]
    Random,
    /// First open task in declared checklist order.
    FirstDeclared,
}

/// The `[engine]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub selection: SelectionStrategy,

    /// Seed for the random selector. Ignored by `first-declared`.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Artificial hold between assigning and releasing an agent.
    #[serde(default)]
    pub processing_delay_ms: u64,
}

impl EngineSettings {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

/// One routing rule from a `[[routes]]` entry.
///
/// Rules are matched in declaration order and the first match wins.
/// `action` is an action name (`assist`, `summary-generation`, ...) or the
/// wildcard `"*"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Stable identifier used in logs.
    pub id: String,

    #[serde(default)]
    pub description: Option<String>,

    pub action: String,

    pub role: AgentRole,

    /// Whether any ready agent may take the action when no agent with
    /// `role` is ready.
    #[serde(default = "default_fallback")]
    pub fallback: bool,
}

fn default_fallback() -> bool {
    true
}

impl RouteRule {
    pub fn matches(&self, action: ActionKind) -> bool {
        self.action == "*" || self.action == action.as_str()
    }
}

/// The top-level structure deserialized from an engine TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSettings,

    /// Ordered routing rules. First match wins.
    #[serde(default)]
    pub routes: Vec<RouteRule>,

    /// The agent roster, in pool order.
    #[serde(default)]
    pub agents: Vec<AgentSpec>,

    /// Seed patients, in registry order.
    #[serde(default)]
    pub patients: Vec<PatientSeed>,
}

impl EngineConfig {
    /// Parse `s` as TOML and validate it.
    ///
    /// Returns `ConfigError` if the TOML is malformed, does not match the
    /// schema, or names an unknown action in a route.
    pub fn from_toml_str(s: &str) -> DischargeResult<Self> {
        let config: EngineConfig = toml::from_str(s).map_err(|e| DischargeError::ConfigError {
            reason: format!("failed to parse engine TOML: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path` and parse it as engine configuration.
    pub fn from_file(path: &Path) -> DischargeResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DischargeError::ConfigError {
            reason: format!("failed to read engine config '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check cross-field rules that serde cannot express.
    ///
    /// Patient seeds are validated when they are loaded into the registry.
    pub fn validate(&self) -> DischargeResult<()> {
        for rule in &self.routes {
            if rule.action != "*" {
                rule.action.parse::<ActionKind>().map_err(|_| DischargeError::ConfigError {
                    reason: format!("route '{}' names unknown action '{}'", rule.id, rule.action),
                })?;
            }
        }
        for agent in &self.agents {
            if agent.name.trim().is_empty() {
                return Err(DischargeError::ConfigError {
                    reason: format!("agent with role '{}' has an empty name", agent.role),
                });
            }
        }
        Ok(())
    }
}
