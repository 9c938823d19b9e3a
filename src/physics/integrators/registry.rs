//! Name-based lookup of integration strategies
//!
//! Each integrator describes itself (canonical name, aliases, convergence
//! order); the registry indexes instances by every name they answer to so
//! configuration files can select strategies by string.

use super::Integrator;
use crate::error::{Result, SimulationError};
use std::collections::{BTreeSet, HashMap};

/// Registry mapping names (canonical and aliases) to integrator instances
pub struct IntegratorRegistry {
    integrators: HashMap<String, Box<dyn Integrator>>,
}

impl IntegratorRegistry {
    /// Create an empty registry without any pre-registered integrators
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Register the built-in strategies
    pub fn with_standard_integrators(mut self) -> Self {
        use super::{
            ExplicitEuler, RungeKuttaSecondOrder, RungeKuttaSecondOrderMidpoint, SemiImplicitEuler,
        };

        self.register_integrator(Box::new(ExplicitEuler));
        self.register_integrator(Box::new(SemiImplicitEuler));
        self.register_integrator(Box::new(RungeKuttaSecondOrder));
        self.register_integrator(Box::new(RungeKuttaSecondOrderMidpoint));

        self
    }

    /// Register a single integrator, returning self for chaining
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.register_integrator(integrator);
        self
    }

    pub fn register_integrator(&mut self, integrator: Box<dyn Integrator>) {
        for alias in integrator.aliases() {
            self.integrators
                .insert(alias.to_string(), integrator.clone_box());
        }
        self.integrators
            .insert(integrator.name().to_string(), integrator);
    }

    /// Instantiate the integrator registered under `name`
    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>> {
        self.integrators
            .get(name)
            .map(|integrator| integrator.clone_box())
            .ok_or_else(|| {
                let aliases: Vec<String> = self
                    .list_aliases()
                    .into_iter()
                    .map(|(alias, _)| alias)
                    .collect();
                SimulationError::invalid(format!(
                    "unknown integrator '{}'. Available integrators: {}. Aliases: {}",
                    name,
                    self.list_available().join(", "),
                    aliases.join(", ")
                ))
            })
    }

    /// Canonical name for `name`, which may be an alias
    pub fn resolve(&self, name: &str) -> Option<&'static str> {
        self.integrators.get(name).map(|integrator| integrator.name())
    }

    /// Sorted canonical names
    pub fn list_available(&self) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .integrators
            .values()
            .map(|integrator| integrator.name())
            .collect();
        names.into_iter().map(str::to_string).collect()
    }

    /// Sorted `(alias, canonical name)` pairs
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter(|(key, integrator)| key.as_str() != integrator.name())
            .map(|(key, integrator)| (key.clone(), integrator.name().to_string()))
            .collect();
        aliases.sort();
        aliases
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::components::Body;
    use crate::physics::forces::{AccelerationField, DegenerateSeparation};
    use crate::physics::math::Scalar;

    #[derive(Debug, Clone)]
    struct TestIntegrator;

    impl Integrator for TestIntegrator {
        fn clone_box(&self) -> Box<dyn Integrator> {
            Box::new(self.clone())
        }

        fn step(
            &self,
            _: &mut [Body],
            _: &dyn AccelerationField,
            _: Scalar,
        ) -> std::result::Result<(), DegenerateSeparation> {
            Ok(())
        }

        fn convergence_order(&self) -> usize {
            3
        }

        fn name(&self) -> &'static str {
            "test_integrator"
        }

        fn aliases(&self) -> Vec<&'static str> {
            vec!["ti"]
        }
    }

    #[test]
    fn test_standard_integrators_resolve() {
        let registry = IntegratorRegistry::default();

        assert_eq!(
            registry.list_available(),
            vec![
                "explicit_euler",
                "runge_kutta_second_order",
                "runge_kutta_second_order_midpoint",
                "semi_implicit_euler",
            ]
        );

        for name in registry.list_available() {
            let integrator = registry.create(&name).unwrap();
            assert_eq!(integrator.name(), name);
        }
    }

    #[test]
    fn test_alias_resolution() {
        let registry = IntegratorRegistry::default();

        assert_eq!(registry.create("rk2").unwrap().name(), "runge_kutta_second_order");
        assert_eq!(
            registry.create("midpoint").unwrap().name(),
            "runge_kutta_second_order_midpoint"
        );
        assert_eq!(registry.create("euler_cromer").unwrap().name(), "semi_implicit_euler");
        assert_eq!(registry.create("forward_euler").unwrap().name(), "explicit_euler");
        assert_eq!(registry.resolve("rk2"), Some("runge_kutta_second_order"));
        assert_eq!(registry.resolve("nope"), None);
    }

    #[test]
    fn test_no_plain_euler_alias() {
        // The two Euler forms behave differently; neither owns the bare name
        let registry = IntegratorRegistry::default();
        assert!(registry.create("euler").is_err());
    }

    #[test]
    fn test_unknown_integrator_error() {
        let registry = IntegratorRegistry::default();
        let error = registry.create("nonexistent").unwrap_err();

        assert!(matches!(error, SimulationError::InvalidConfiguration(_)));
        let message = error.to_string();
        assert!(message.contains("unknown integrator 'nonexistent'"));
        assert!(message.contains("explicit_euler"));
        assert!(message.contains("rk2"));
    }

    #[test]
    fn test_custom_registration() {
        let registry = IntegratorRegistry::new().with_integrator(Box::new(TestIntegrator));

        assert_eq!(registry.list_available(), vec!["test_integrator"]);
        assert_eq!(
            registry.list_aliases(),
            vec![("ti".to_string(), "test_integrator".to_string())]
        );
        assert_eq!(registry.create("ti").unwrap().convergence_order(), 3);
    }

    #[test]
    fn test_empty_registry() {
        let registry = IntegratorRegistry::new();
        assert!(registry.list_available().is_empty());
        assert!(registry.list_aliases().is_empty());
        assert!(registry.create("rk2").is_err());
    }

    #[test]
    fn test_case_sensitivity() {
        let registry = IntegratorRegistry::default();
        assert!(registry.create("RK2").is_err());
        assert!(registry.create("rk2").is_ok());
    }
}
