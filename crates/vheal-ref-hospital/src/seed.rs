//! Fictional ward data for the VHeal reference runtime.
//!
//! Everything here comes from the embedded `config/hospital.toml`. No
//! external systems are contacted.

use tracing::debug;

use vheal_config::EngineConfig;
use vheal_contracts::{agent::AgentSpec, error::DischargeResult, patient::PatientSeed};

/// The embedded reference ward document.
pub const REFERENCE_WARD: &str = include_str!("../config/hospital.toml");

/// Parse the embedded reference ward.
pub fn reference_config() -> DischargeResult<EngineConfig> {
    let config = EngineConfig::from_toml_str(REFERENCE_WARD)?;
    debug!(
        patients = config.patients.len(),
        agents = config.agents.len(),
        "reference ward loaded"
    );
    Ok(config)
}

/// Summary, Coordination, Checklist and Alert agents, in that order.
pub fn standard_roster() -> DischargeResult<Vec<AgentSpec>> {
    Ok(reference_config()?.agents)
}

/// PT001, PT002 and PT003.
pub fn sample_patients() -> DischargeResult<Vec<PatientSeed>> {
    Ok(reference_config()?.patients)
}
