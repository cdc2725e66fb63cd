use serde::{Deserialize, Serialize};

/// One item of a permission-scoped collection view. `write` means the
/// caller may mutate, delete, or scale the underlying object; `false`
/// means read-only visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceView {
    pub data: serde_json::Value,
    pub write: bool,
}
