//! Shopping scenario (`ss12`)

use crate::environment::Environment;
use crate::scenario::{OracleEvent, Scenario, ScenarioError};
use arena_apps::{Item, Product};
use arena_events::{Action, OperationType};
use arena_validation::ScenarioValidationResult;

/// `ss12`: add an item to the cart (trivially-true validator)
pub struct CartAdd;

impl CartAdd {
    const ITEM_ID: &'static str = "mug-blue";
}

impl Scenario for CartAdd {
    fn id(&self) -> &'static str {
        "ss12"
    }

    fn init_and_populate_apps(&mut self, env: &mut Environment) -> Result<(), ScenarioError> {
        env.shopping.add_product(
            Product::new("mug", "Coffee Mug")
                .with_variant("blue", Item::new(Self::ITEM_ID, 12.50, true))
                .with_variant("red", Item::new("mug-red", 12.50, false)),
        );
        env.post_user_message("Add the blue coffee mug to my cart.");
        Ok(())
    }

    fn build_events_flow(&mut self, env: &mut Environment) -> Vec<OracleEvent> {
        let _ = env;
        vec![OracleEvent::new(
            Action::new("ShoppingApp", "add_to_cart", OperationType::Write)
                .with_arg("item_id", Self::ITEM_ID)
                .with_arg("quantity", 1),
        )
        .with_effect(|env| env.shopping.add_to_cart(Self::ITEM_ID, 1).map(|_| ()))]
    }

    fn validate(&self, _env: &Environment) -> ScenarioValidationResult {
        ScenarioValidationResult::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::run_and_validate;

    #[test]
    fn replay_fills_the_cart() {
        let mut scenario = CartAdd;
        let mut env = Environment::new();
        scenario.init_and_populate_apps(&mut env).unwrap();

        let flow = scenario.build_events_flow(&mut env);
        for mut oracle in flow {
            oracle.apply(&mut env).unwrap();
            env.record_agent(oracle.action);
        }

        assert_eq!(env.shopping.view_cart(), vec![("mug-blue".to_string(), 1)]);
    }

    #[test]
    fn passes_end_to_end() {
        let report = run_and_validate(&mut CartAdd).unwrap();
        assert!(report.passed());
    }
}
