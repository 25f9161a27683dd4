use serde::{Serialize, Deserialize};
use std::collections::{BTreeMap, HashMap};

/// Classification of task types. The `Approval` category carries a domain
/// rule: two approval steps may never be connected back-to-back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Intake,
    Automation,
    Review,
    Approval,
    Notification,
    Archival,
}

impl TaskCategory {
    /// Display metadata for pickers and CLI listings.
    pub fn info(&self) -> CategoryInfo {
        match self {
            TaskCategory::Intake => CategoryInfo { name: "Document Intake", color: "#2563eb" },
            TaskCategory::Automation => CategoryInfo { name: "Automated Processing", color: "#7c3aed" },
            TaskCategory::Review => CategoryInfo { name: "Human Review", color: "#d97706" },
            TaskCategory::Approval => CategoryInfo { name: "Approval", color: "#dc2626" },
            TaskCategory::Notification => CategoryInfo { name: "Notification", color: "#0891b2" },
            TaskCategory::Archival => CategoryInfo { name: "Archival", color: "#4b5563" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryInfo {
    pub name: &'static str,
    pub color: &'static str,
}

/// Static configuration for one task type: display defaults plus the
/// input/output port names the execution engine expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskConfiguration {
    pub name: String,
    pub description: String,
    pub category: TaskCategory,
    pub requires_approval: bool,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

/// One category's entry in the grouped listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub name: &'static str,
    pub color: &'static str,
    pub tasks: Vec<String>,
}

/// Read-only registry mapping a task-type identifier to its configuration.
/// The authoring model treats this purely as a lookup; unknown task types
/// are not errors, callers fall back to generic defaults.
#[derive(Debug, Clone, Default)]
pub struct TaskCatalog {
    entries: HashMap<String, TaskConfiguration>,
    // Remembers registration order so grouped listings stay stable.
    order: Vec<String>,
}

impl TaskCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in document-management task set.
    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        catalog.register("UPLOAD_DOCUMENT", TaskConfiguration {
            name: "Upload Document".to_string(),
            description: "Receive a document into the system".to_string(),
            category: TaskCategory::Intake,
            requires_approval: false,
            inputs: vec![],
            outputs: vec!["document".to_string()],
        });
        catalog.register("CLASSIFY_DOCUMENT", TaskConfiguration {
            name: "Classify Document".to_string(),
            description: "Assign a document class and routing hints".to_string(),
            category: TaskCategory::Automation,
            requires_approval: false,
            inputs: vec!["document".to_string()],
            outputs: vec!["document".to_string(), "classification".to_string()],
        });
        catalog.register("EXTRACT_METADATA", TaskConfiguration {
            name: "Extract Metadata".to_string(),
            description: "Pull structured fields out of the document".to_string(),
            category: TaskCategory::Automation,
            requires_approval: false,
            inputs: vec!["document".to_string()],
            outputs: vec!["metadata".to_string()],
        });
        catalog.register("MANUAL_REVIEW", TaskConfiguration {
            name: "Manual Review".to_string(),
            description: "A reviewer inspects the document and its extracted data".to_string(),
            category: TaskCategory::Review,
            requires_approval: false,
            inputs: vec!["document".to_string(), "metadata".to_string()],
            outputs: vec!["review".to_string()],
        });
        catalog.register("APPROVE_DOCUMENT", TaskConfiguration {
            name: "Approve Document".to_string(),
            description: "Business sign-off on the document".to_string(),
            category: TaskCategory::Approval,
            requires_approval: true,
            inputs: vec!["document".to_string(), "review".to_string()],
            outputs: vec!["decision".to_string()],
        });
        catalog.register("LEGAL_APPROVAL", TaskConfiguration {
            name: "Legal Approval".to_string(),
            description: "Legal sign-off for regulated document classes".to_string(),
            category: TaskCategory::Approval,
            requires_approval: true,
            inputs: vec!["document".to_string()],
            outputs: vec!["decision".to_string()],
        });
        catalog.register("NOTIFY_STAKEHOLDERS", TaskConfiguration {
            name: "Notify Stakeholders".to_string(),
            description: "Send outcome notifications to subscribed parties".to_string(),
            category: TaskCategory::Notification,
            requires_approval: false,
            inputs: vec!["decision".to_string()],
            outputs: vec![],
        });
        catalog.register("ARCHIVE_DOCUMENT", TaskConfiguration {
            name: "Archive Document".to_string(),
            description: "Move the document into long-term storage".to_string(),
            category: TaskCategory::Archival,
            requires_approval: false,
            inputs: vec!["document".to_string()],
            outputs: vec![],
        });
        catalog
    }

    pub fn register(&mut self, task_type: &str, config: TaskConfiguration) {
        if self.entries.insert(task_type.to_string(), config).is_none() {
            self.order.push(task_type.to_string());
        }
    }

    pub fn get(&self, task_type: &str) -> Option<&TaskConfiguration> {
        self.entries.get(task_type)
    }

    /// Whether a task type belongs to the approval category. Unknown types
    /// never do.
    pub fn is_approval(&self, task_type: &str) -> bool {
        self.get(task_type)
            .map(|cfg| cfg.category == TaskCategory::Approval)
            .unwrap_or(false)
    }

    /// Task types grouped by category, each group carrying the category's
    /// display name and color. BTreeMap keeps the grouping deterministic.
    pub fn tasks_by_category(&self) -> BTreeMap<TaskCategory, CategoryGroup> {
        let mut groups: BTreeMap<TaskCategory, CategoryGroup> = BTreeMap::new();
        for task_type in &self.order {
            let Some(cfg) = self.entries.get(task_type) else { continue };
            let info = cfg.category.info();
            groups
                .entry(cfg.category)
                .or_insert_with(|| CategoryGroup {
                    name: info.name,
                    color: info.color,
                    tasks: Vec::new(),
                })
                .tasks
                .push(task_type.clone());
        }
        groups
    }
}
