//! Tree compiler
//!
//! Turns a [`TreeDefinition`] into a frozen [`Node`] graph. Every `when`
//! clause is parsed into an [`Expression`], each named node is compiled
//! exactly once and shared through `Arc` by all of its references, and
//! references are resolved depth-first with a stack of the names being
//! compiled so a node that (indirectly) references itself is reported
//! instead of looping.

use crate::definition::{ChildDefinition, NodeDefinition, RuleDefinition, TreeDefinition};
use crate::error::{Result, SdkError};
use arbor_core::{Node, Predicate};
use arbor_expr::Expression;
use std::collections::HashMap;
use std::sync::Arc;

/// Compiles tree definitions into evaluable nodes
pub struct TreeCompiler<'a> {
    definition: &'a TreeDefinition,
    /// Named nodes that finished compiling
    compiled: HashMap<&'a str, Arc<Node>>,
    /// Named nodes currently being compiled, outermost first
    resolving: Vec<&'a str>,
}

impl<'a> TreeCompiler<'a> {
    /// Compile a definition and return its root node
    pub fn compile(definition: &'a TreeDefinition) -> Result<Arc<Node>> {
        if definition.id.trim().is_empty() {
            return Err(SdkError::DefinitionError {
                tree: definition.id.clone(),
                location: "tree.id".to_string(),
                message: "tree id is empty".to_string(),
            });
        }

        let mut compiler = TreeCompiler {
            definition,
            compiled: HashMap::new(),
            resolving: Vec::new(),
        };

        let root = Arc::new(compiler.compile_node(&definition.root, "root")?);

        // Unreferenced named nodes are still checked
        for name in definition.nodes.keys() {
            if !compiler.compiled.contains_key(name.as_str()) {
                tracing::debug!(tree = %definition.id, node = %name, "named node is never referenced");
                compiler.resolve(name, "nodes")?;
            }
        }

        tracing::debug!(
            tree = %definition.id,
            rules = root.len(),
            height = root.height(),
            named_nodes = compiler.compiled.len(),
            "compiled tree"
        );
        Ok(root)
    }

    fn compile_node(&mut self, node: &'a NodeDefinition, location: &str) -> Result<Node> {
        let mut compiled = Node::new();

        for (index, rule) in node.rules.iter().enumerate() {
            let location = format!("{}.rules[{}]", location, index);
            let predicate = self.compile_predicate(rule, &location)?;

            match (&rule.then, &rule.result) {
                (Some(child), None) => {
                    let child = self.compile_child(child, &location)?;
                    compiled.append_decision_rule(predicate, child)?;
                }
                (None, Some(result)) => {
                    compiled.append_result_rule(predicate, result.clone())?;
                }
                _ => {
                    return Err(self.definition_error(
                        &location,
                        "rule needs exactly one of `then` or `result`",
                    ))
                }
            }
        }

        Ok(compiled)
    }

    fn compile_predicate(
        &self,
        rule: &RuleDefinition,
        location: &str,
    ) -> Result<arbor_core::SharedPredicate> {
        if rule.when.trim().is_empty() {
            return Err(self.definition_error(location, "`when` is empty"));
        }

        let expression = Expression::new(rule.when.as_str()).map_err(|source| {
            SdkError::ExpressionError {
                tree: self.definition.id.clone(),
                location: format!("{}.when", location),
                source,
            }
        })?;
        Ok(expression.shared())
    }

    fn compile_child(&mut self, child: &'a ChildDefinition, location: &str) -> Result<Arc<Node>> {
        match child {
            ChildDefinition::Ref(reference) => self.resolve(&reference.name, location),
            ChildDefinition::Inline(node) => {
                let location = format!("{}.then", location);
                Ok(Arc::new(self.compile_node(node, &location)?))
            }
        }
    }

    /// Compile a named node, or hand out the shared copy if it is already built
    fn resolve(&mut self, name: &str, location: &str) -> Result<Arc<Node>> {
        if let Some(node) = self.compiled.get(name) {
            return Ok(Arc::clone(node));
        }

        if let Some(start) = self.resolving.iter().position(|entry| *entry == name) {
            let mut path: Vec<&str> = self.resolving[start..].to_vec();
            path.push(name);
            return Err(SdkError::CyclicReference {
                tree: self.definition.id.clone(),
                path: path.join(" -> "),
            });
        }

        let (key, definition) = self
            .definition
            .nodes
            .get_key_value(name)
            .ok_or_else(|| SdkError::UnknownReference {
                tree: self.definition.id.clone(),
                name: name.to_string(),
                location: location.to_string(),
            })?;

        self.resolving.push(key.as_str());
        let node = self.compile_node(definition, &format!("nodes.{}", key));
        self.resolving.pop();

        let node = Arc::new(node?);
        self.compiled.insert(key.as_str(), Arc::clone(&node));
        Ok(node)
    }

    fn definition_error(&self, location: &str, message: &str) -> SdkError {
        SdkError::DefinitionError {
            tree: self.definition.id.clone(),
            location: location.to_string(),
            message: message.to_string(),
        }
    }
}
