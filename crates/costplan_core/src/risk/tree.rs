//! Decision-tree evaluation by backward induction.

use crate::error::TreeError;
use crate::model::{DecisionChoice, DecisionTree, NodeId, TreeEvaluation, TreeNode};

/// Evaluate a decision tree.
///
/// Structure is validated first, then a single recursive post-order pass
/// computes expected values: terminals return their value, chance nodes
/// the probability-weighted sum of their children, decision nodes the
/// maximum child value, recording which child achieved it. Each node is
/// visited exactly once (the arena enforces single ownership), so no
/// caching is needed.
pub fn evaluate_tree(tree: &DecisionTree) -> Result<TreeEvaluation, TreeError> {
    tree.validate()?;

    let root = tree.root().ok_or(TreeError::EmptyTree)?;
    let mut best_path = Vec::new();
    let expected_value = evaluate_node(tree, root, &mut best_path);

    Ok(TreeEvaluation {
        expected_value,
        best_path,
    })
}

fn evaluate_node(tree: &DecisionTree, id: NodeId, choices: &mut Vec<DecisionChoice>) -> f64 {
    // validate() has already checked every index, child ordering, and
    // branch non-emptiness, so lookups here cannot fail
    match tree.node(id).expect("validated node index") {
        TreeNode::Terminal { value } => *value,
        TreeNode::Chance { children } => children
            .iter()
            .map(|(child, probability)| probability * evaluate_node(tree, *child, choices))
            .sum(),
        TreeNode::Decision { children } => {
            let mut best_child = children[0];
            let mut best_value = evaluate_node(tree, best_child, choices);
            for child in &children[1..] {
                let value = evaluate_node(tree, *child, choices);
                if value > best_value {
                    best_value = value;
                    best_child = *child;
                }
            }
            choices.push(DecisionChoice {
                decision: id,
                chosen: best_child,
                expected_value: best_value,
            });
            best_value
        }
    }
}
