//! Build a tree in code, mixing expression predicates with a closure predicate

use anyhow::Result;
use arbor_core::{predicate, Facts, Node, Predicate, Results, Value, Verdict};
use arbor_expr::Expression;
use arbor_sdk::{DecisionEngineBuilder, DecisionRequest};
use std::sync::Arc;

fn result(action: &str) -> Results {
    let mut results = Results::new();
    results.insert("action".to_string(), Value::from(action));
    results
}

fn main() -> Result<()> {
    arbor_demos::init_tracing()?;

    // Closure predicates describe themselves however they like
    let blocked_country = predicate::from_fn(|facts: &Facts| {
        let country = facts.get("country").and_then(Value::as_str).unwrap_or_default();
        Ok(Verdict::new(
            matches!(country, "KP" | "IR"),
            format!("country {} is blocked", country),
        ))
    });

    let mut high_value = Node::new();
    high_value.append_result_rule(Expression::new("account_age_days < 30")?.shared(), result("review"))?;
    high_value.append_result_rule(Expression::new("true")?.shared(), result("approve"))?;

    let mut root = Node::new();
    root.append_result_rule(blocked_country, result("reject"))?;
    root.append_decision_rule(Expression::new("amount >= 1000")?.shared(), Arc::new(high_value))?;
    root.append_result_rule(Expression::new("amount < 1000")?.shared(), result("approve"))?;

    let engine = DecisionEngineBuilder::new()
        .add_tree("payments", Arc::new(root))
        .with_audit_seed(["payments-v1"])
        .build()?;

    let requests = [
        serde_json::json!({"country": "DE", "amount": 2500, "account_age_days": 12}),
        serde_json::json!({"country": "DE", "amount": 40, "account_age_days": 400}),
        serde_json::json!({"country": "KP", "amount": 10, "account_age_days": 1}),
    ];

    for request in requests {
        let facts: Facts = serde_json::from_value(request)?;
        let response = engine.decide(DecisionRequest::new("payments", facts))?;
        match &response.outcome {
            Some(decision) => println!("{:?} via {:?}", decision.results, decision.audit),
            None => println!("no decision"),
        }
    }

    Ok(())
}
