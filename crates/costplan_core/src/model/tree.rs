use serde::{Deserialize, Serialize};

use crate::error::TreeError;

/// Index of a node in a [`DecisionTree`] arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

/// One node of a decision tree.
///
/// Child references are arena indices, not owned boxes, so the no-cycles
/// invariant is checkable: children must be appended before their parent,
/// and [`DecisionTree::validate`] rejects any forward reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TreeNode {
    /// Caller picks the child with the maximum expected value
    Decision { children: Vec<NodeId> },
    /// Nature picks a child with the attached probability
    Chance { children: Vec<(NodeId, f64)> },
    /// A resolved outcome value
    Terminal { value: f64 },
}

/// Tolerance for chance-node probabilities summing to 1
const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Arena-allocated decision tree.
///
/// Nodes are appended leaves-first; the last node appended is the root.
/// The arena owns every node exactly once: sharing a subtree between two
/// parents is a validation error, so backward induction visits each node
/// exactly once without caching.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a terminal node and return its id
    pub fn terminal(&mut self, value: f64) -> NodeId {
        self.push(TreeNode::Terminal { value })
    }

    /// Append a chance node over `(child, probability)` pairs
    pub fn chance(&mut self, children: Vec<(NodeId, f64)>) -> NodeId {
        self.push(TreeNode::Chance { children })
    }

    /// Append a decision node over existing children
    pub fn decision(&mut self, children: Vec<NodeId>) -> NodeId {
        self.push(TreeNode::Decision { children })
    }

    fn push(&mut self, node: TreeNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Root of the tree: the last node appended
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId(self.nodes.len() - 1))
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    /// Verify every structural invariant before evaluation:
    /// - non-empty arena
    /// - child indices in bounds and strictly below their parent
    ///   (leaves-first ordering, which rules out cycles)
    /// - branch nodes have at least one child
    /// - chance probabilities are non-negative and sum to 1
    /// - no node is referenced by two parents, and every non-root node is
    ///   referenced exactly once (single ownership, one connected tree)
    pub fn validate(&self) -> Result<(), TreeError> {
        if self.nodes.is_empty() {
            return Err(TreeError::EmptyTree);
        }

        let len = self.nodes.len();
        let mut referenced = vec![false; len];

        let mut check_child = |parent: usize, child: NodeId| -> Result<(), TreeError> {
            if child.0 >= len {
                return Err(TreeError::NodeOutOfBounds {
                    node: child.0,
                    len,
                });
            }
            if child.0 >= parent {
                return Err(TreeError::ForwardReference {
                    node: parent,
                    child: child.0,
                });
            }
            if referenced[child.0] {
                return Err(TreeError::SharedChild(child.0));
            }
            referenced[child.0] = true;
            Ok(())
        };

        for (index, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Terminal { .. } => {}
                TreeNode::Decision { children } => {
                    if children.is_empty() {
                        return Err(TreeError::EmptyBranch(index));
                    }
                    for child in children {
                        check_child(index, *child)?;
                    }
                }
                TreeNode::Chance { children } => {
                    if children.is_empty() {
                        return Err(TreeError::EmptyBranch(index));
                    }
                    let mut sum = 0.0;
                    for (child, probability) in children {
                        if *probability < 0.0 {
                            return Err(TreeError::NegativeProbability {
                                node: index,
                                probability: *probability,
                            });
                        }
                        sum += probability;
                        check_child(index, *child)?;
                    }
                    if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                        return Err(TreeError::UnnormalizedProbabilities { node: index, sum });
                    }
                }
            }
        }

        // Every node except the root must be owned by exactly one parent
        for (index, seen) in referenced.iter().enumerate().take(len - 1) {
            if !seen {
                return Err(TreeError::OrphanNode(index));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_tree_builds_leaves_first() {
        let mut tree = DecisionTree::new();
        let win = tree.terminal(100.0);
        let lose = tree.terminal(-20.0);
        let gamble = tree.chance(vec![(win, 0.6), (lose, 0.4)]);
        let sure = tree.terminal(30.0);
        let root = tree.decision(vec![gamble, sure]);

        assert_eq!(tree.root(), Some(root));
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_empty_tree_rejected() {
        assert_eq!(DecisionTree::new().validate(), Err(TreeError::EmptyTree));
    }

    #[test]
    fn test_unnormalized_probabilities_rejected() {
        let mut tree = DecisionTree::new();
        let a = tree.terminal(1.0);
        let b = tree.terminal(2.0);
        tree.chance(vec![(a, 0.5), (b, 0.3)]);
        assert!(matches!(
            tree.validate(),
            Err(TreeError::UnnormalizedProbabilities { .. })
        ));
    }

    #[test]
    fn test_shared_child_rejected() {
        let mut tree = DecisionTree::new();
        let shared = tree.terminal(5.0);
        let left = tree.decision(vec![shared]);
        tree.decision(vec![left, shared]);
        assert_eq!(tree.validate(), Err(TreeError::SharedChild(0)));
    }

    #[test]
    fn test_empty_branch_rejected() {
        let mut tree = DecisionTree::new();
        tree.decision(vec![]);
        assert_eq!(tree.validate(), Err(TreeError::EmptyBranch(0)));
    }
}
