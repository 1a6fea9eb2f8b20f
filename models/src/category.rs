use serde::{Deserialize, Serialize};

/// Upload category offered by the service (e.g. `meeting`, `contract`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}
