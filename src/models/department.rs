use serde::{Deserialize, Serialize};

use crate::domain::DepartmentId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,

    /// Display label, unique within the loaded set.
    pub name: String,

    pub description: String,

    pub head: Option<String>,

    pub budget: u64,
}

impl Department {
    #[must_use]
    pub fn draft(&self) -> DepartmentDraft {
        DepartmentDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            head: self.head.clone(),
            budget: self.budget,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentDraft {
    pub name: String,
    pub description: String,
    pub head: Option<String>,
    pub budget: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepartmentForm {
    pub name: String,
    pub description: String,
    pub head: String,
    pub budget: String,
}

impl DepartmentForm {
    #[must_use]
    pub fn from_department(department: &Department) -> Self {
        Self {
            name: department.name.clone(),
            description: department.description.clone(),
            head: department.head.clone().unwrap_or_default(),
            budget: department.budget.to_string(),
        }
    }
}
