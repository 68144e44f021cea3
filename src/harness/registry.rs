//! Scenario discovery and lookup
//!
//! Scenarios are registered through an explicit manifest of modules, each
//! contributing one [`TestCase`] factory. A factory that fails to build is
//! recorded and set aside so one broken scenario never takes down the rest;
//! two scenarios claiming the same action identifier, on the other hand, is
//! a configuration bug and aborts discovery outright.

use std::collections::BTreeMap;

use tracing::warn;

use super::case::TestCase;
use crate::common::{Error, Result};
use crate::scenarios;

/// One registrable scenario module
#[derive(Debug, Clone, Copy)]
pub struct ScenarioModule {
    /// Module name, used when reporting a factory failure
    pub name: &'static str,
    /// Factory producing the module's scenario
    pub build: fn() -> Result<TestCase>,
}

/// A scenario factory that could not produce its test case
#[derive(Debug, Clone)]
pub struct DiscoveryFailure {
    pub module: &'static str,
    pub reason: String,
}

/// All successfully built scenarios, keyed by action identifier
#[derive(Debug)]
pub struct ScenarioRegistry {
    cases: BTreeMap<String, TestCase>,
    failures: Vec<DiscoveryFailure>,
}

impl ScenarioRegistry {
    /// Build the registry from every shipped scenario module
    pub fn discover() -> Result<Self> {
        Self::from_modules(scenarios::modules())
    }

    /// Build a registry from an explicit module list
    pub fn from_modules(modules: &[ScenarioModule]) -> Result<Self> {
        let mut cases: BTreeMap<String, TestCase> = BTreeMap::new();
        let mut failures = Vec::new();

        for module in modules {
            let case = match (module.build)() {
                Ok(case) => case,
                Err(e) => {
                    warn!(module = module.name, error = %e, "scenario module failed to load");
                    failures.push(DiscoveryFailure {
                        module: module.name,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let action = case.action().to_string();
            if cases.contains_key(&action) {
                return Err(Error::DuplicateScenario(action));
            }
            cases.insert(action, case);
        }

        Ok(Self { cases, failures })
    }

    /// Look up the scenario for an action identifier
    pub fn get(&self, action: &str) -> Result<&TestCase> {
        self.cases
            .get(action)
            .ok_or_else(|| Error::ScenarioNotFound(action.to_string()))
    }

    pub fn contains(&self, action: &str) -> bool {
        self.cases.contains_key(action)
    }

    /// All registered action identifiers in sorted order
    pub fn list_all(&self) -> Vec<&str> {
        self.cases.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Factories that failed during discovery
    pub fn discovery_failures(&self) -> &[DiscoveryFailure] {
        &self.failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beta() -> Result<TestCase> {
        Ok(TestCase::new("beta scan"))
    }

    fn alpha() -> Result<TestCase> {
        Ok(TestCase::new("alpha scan"))
    }

    fn alpha_again() -> Result<TestCase> {
        Ok(TestCase::new("alpha scan"))
    }

    fn broken() -> Result<TestCase> {
        Err(Error::Internal("factory blew up".to_string()))
    }

    #[test]
    fn test_listing_is_sorted() {
        let registry = ScenarioRegistry::from_modules(&[
            ScenarioModule { name: "beta", build: beta },
            ScenarioModule { name: "alpha", build: alpha },
        ])
        .unwrap();
        assert_eq!(registry.list_all(), vec!["alpha scan", "beta scan"]);
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("beta scan"));
    }

    #[test]
    fn test_duplicate_identifiers_abort_discovery() {
        let err = ScenarioRegistry::from_modules(&[
            ScenarioModule { name: "alpha", build: alpha },
            ScenarioModule { name: "alpha_again", build: alpha_again },
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateScenario(action) if action == "alpha scan"));
    }

    #[test]
    fn test_factory_failure_is_isolated() {
        let registry = ScenarioRegistry::from_modules(&[
            ScenarioModule { name: "broken", build: broken },
            ScenarioModule { name: "alpha", build: alpha },
        ])
        .unwrap();
        assert_eq!(registry.list_all(), vec!["alpha scan"]);
        assert_eq!(registry.discovery_failures().len(), 1);
        assert_eq!(registry.discovery_failures()[0].module, "broken");
        assert!(registry.discovery_failures()[0].reason.contains("factory blew up"));
    }

    #[test]
    fn test_unknown_action_lookup_fails() {
        let registry = ScenarioRegistry::from_modules(&[]).unwrap();
        assert!(registry.is_empty());
        let err = registry.get("ghost").unwrap_err();
        assert!(matches!(err, Error::ScenarioNotFound(_)));
    }
}
