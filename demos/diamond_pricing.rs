//! Price diamonds with a tree loaded from `demos/trees/diamond.yaml`
//!
//! Run with `RUST_LOG=arbor_core=debug` to watch the traversal.

use anyhow::Result;
use arbor_sdk::{DecisionEngineBuilder, DecisionRequest, Facts, Value};
use std::path::PathBuf;

fn diamond(color: &str, clarity: &str, cut: &str, weight: f64) -> Facts {
    let mut facts = Facts::new();
    facts.insert("color".to_string(), Value::from(color));
    facts.insert("clarity".to_string(), Value::from(clarity));
    facts.insert("cut".to_string(), Value::from(cut));
    facts.insert("weight".to_string(), Value::from(weight));
    facts
}

fn main() -> Result<()> {
    arbor_demos::init_tracing()?;

    let tree_file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/trees/diamond.yaml");
    let engine = DecisionEngineBuilder::new()
        .add_tree_file(tree_file)
        .enable_tracing(true)
        .build()?;

    let stones = [
        diamond("Z", "I3", "emerald", 11.0),
        diamond("Z", "I3", "emerald", 2.4),
        diamond("D", "FL", "princess", 1.0),
    ];

    for facts in stones {
        let response = engine.decide(DecisionRequest::new("diamond_pricing", facts))?;
        println!("{}", serde_json::to_string_pretty(&response)?);
    }

    Ok(())
}
