//! End-to-end pricing tree built from expression predicates
//!
//! Four levels (colour, clarity, cut, carat weight) where only one path
//! leads to a priced leaf; every other branch ends in an empty node.

use arbor_core::{Decision, Facts, Node, Predicate, Results, Value};
use arbor_expr::Expression;
use std::sync::Arc;

fn expr(source: &str) -> arbor_core::SharedPredicate {
    Expression::new(source).unwrap().shared()
}

fn price(per_carat: i64) -> Results {
    let mut results = Results::new();
    results.insert("pricePerCarat".to_string(), Value::Int(per_carat));
    results
}

fn create_diamond_tree() -> Node {
    // Final level (carat weight)
    let mut weight = Node::new();
    weight.append_result_rule(expr("weight < 1"), price(1000)).unwrap();
    for (band, per_carat) in (1..9).zip((1500..).step_by(500)) {
        let source = format!("(weight >= {}) && (weight < {})", band, band + 1);
        weight
            .append_result_rule(expr(&source), price(per_carat))
            .unwrap();
    }
    weight.append_result_rule(expr("weight >= 9"), price(5500)).unwrap();

    // Cut
    let mut cut = Node::new();
    for name in ["marquise", "princess", "pear", "oval", "heart"] {
        cut.append_decision_rule(expr(&format!("cut == '{}'", name)), Arc::new(Node::new()))
            .unwrap();
    }
    cut.append_decision_rule(expr("cut == 'emerald'"), Arc::new(weight))
        .unwrap();

    // Clarity
    let mut clarity = Node::new();
    for grade in ["FL", "IF", "VVS1", "VVS2", "VS1", "VS2", "SI1", "SI2", "I1", "I2"] {
        clarity
            .append_decision_rule(
                expr(&format!("clarity == '{}'", grade)),
                Arc::new(Node::new()),
            )
            .unwrap();
    }
    clarity
        .append_decision_rule(expr("clarity == 'I3'"), Arc::new(cut))
        .unwrap();

    // Root (colour D to Z)
    let mut root = Node::new();
    for color in ('D'..='Y').map(String::from) {
        root.append_decision_rule(
            expr(&format!("color == '{}'", color)),
            Arc::new(Node::new()),
        )
        .unwrap();
    }
    root.append_decision_rule(expr("color == 'Z'"), Arc::new(clarity))
        .unwrap();

    root
}

fn diamond(color: &str, clarity: &str, cut: &str, weight: Value) -> Facts {
    let mut facts = Facts::new();
    facts.insert("color".to_string(), Value::from(color));
    facts.insert("clarity".to_string(), Value::from(clarity));
    facts.insert("cut".to_string(), Value::from(cut));
    facts.insert("weight".to_string(), weight);
    facts
}

#[test]
fn test_diamond_tree_shape() {
    let root = create_diamond_tree();
    assert_eq!(root.len(), 23);
    assert_eq!(root.height(), 4);
    assert_eq!(root.node_count(), 41);
}

#[test]
fn test_diamond_priced_path() {
    let root = create_diamond_tree();
    let facts = diamond("Z", "I3", "emerald", Value::Int(11));

    let decision = root.eval(&facts, Some(Vec::new())).unwrap();

    assert_eq!(
        decision,
        Some(Decision {
            results: price(5500),
            audit: vec![
                "color == 'Z'".to_string(),
                "clarity == 'I3'".to_string(),
                "cut == 'emerald'".to_string(),
                "weight >= 9".to_string(),
                "pricePerCarat:5500".to_string(),
            ],
        })
    );
}

#[test]
fn test_diamond_weight_bands() {
    let root = create_diamond_tree();

    let cases = [
        (Value::Float(0.5), 1000, "weight < 1"),
        (Value::Int(1), 1500, "(weight >= 1) && (weight < 2)"),
        (Value::Float(4.2), 3000, "(weight >= 4) && (weight < 5)"),
        (Value::Float(8.99), 5000, "(weight >= 8) && (weight < 9)"),
    ];

    for (weight, per_carat, band) in cases {
        let facts = diamond("Z", "I3", "emerald", weight.clone());
        let decision = root.decide(&facts).unwrap().unwrap();
        assert_eq!(decision.results, price(per_carat), "weight {}", weight);
        assert_eq!(decision.audit[3], band);
    }
}

#[test]
fn test_diamond_unpriced_branch() {
    let root = create_diamond_tree();

    // Matches color D, whose child node has no rules
    let facts = diamond("D", "I3", "emerald", Value::Int(11));
    assert!(root.decide(&facts).unwrap().is_none());

    let facts = diamond("Z", "FL", "emerald", Value::Int(11));
    assert!(root.decide(&facts).unwrap().is_none());
}

#[test]
fn test_diamond_missing_fact() {
    let root = create_diamond_tree();
    let mut facts = diamond("Z", "I3", "emerald", Value::Int(11));
    facts.remove("weight");

    let err = root.decide(&facts).unwrap_err();
    assert_eq!(err.to_string(), "No fact 'weight' found");
}
