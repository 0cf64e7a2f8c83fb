//! Regression models
//!
//! A CART regression tree and the bagged forest built on top of it. Both are
//! immutable after fitting and serializable.

pub mod forest;
pub mod tree;

pub use forest::{ForestRegressor, MaxFeatures, DEFAULT_N_TREES};
pub use tree::{RegressionTree, TreeNode};
