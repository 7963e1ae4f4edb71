//! Abstract Syntax Tree (AST) definition.

pub mod display;
pub mod expr;
pub mod node_id;
pub mod nodes;
pub mod ops;
pub mod types;

pub use expr::*;
pub use node_id::{NodeId, NodeIdGenerator};
pub use nodes::*;
pub use ops::{BinaryOp, UnaryOp};
pub use types::Type;
