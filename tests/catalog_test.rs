use docflow::catalog::{TaskCatalog, TaskCategory};

#[test]
fn test_lookup_known_task_type() {
    let catalog = TaskCatalog::builtin();
    let cfg = catalog.get("MANUAL_REVIEW").expect("Missing catalog entry");

    assert_eq!(cfg.name, "Manual Review");
    assert_eq!(cfg.category, TaskCategory::Review);
    assert!(!cfg.requires_approval);
    assert!(cfg.inputs.contains(&"document".to_string()));
}

#[test]
fn test_lookup_unknown_task_type_is_none() {
    let catalog = TaskCatalog::builtin();
    assert!(catalog.get("TELEPORT_DOCUMENT").is_none());
}

#[test]
fn test_approval_category_membership() {
    let catalog = TaskCatalog::builtin();
    assert!(catalog.is_approval("APPROVE_DOCUMENT"));
    assert!(catalog.is_approval("LEGAL_APPROVAL"));
    assert!(!catalog.is_approval("MANUAL_REVIEW"));
    // Unknown types are never approval steps
    assert!(!catalog.is_approval("TELEPORT_DOCUMENT"));
}

#[test]
fn test_tasks_grouped_by_category() {
    let catalog = TaskCatalog::builtin();
    let groups = catalog.tasks_by_category();

    let approval = groups.get(&TaskCategory::Approval).expect("Missing approval group");
    assert_eq!(approval.name, "Approval");
    assert!(approval.tasks.contains(&"APPROVE_DOCUMENT".to_string()));
    assert!(approval.tasks.contains(&"LEGAL_APPROVAL".to_string()));

    let automation = groups.get(&TaskCategory::Automation).expect("Missing automation group");
    assert_eq!(
        automation.tasks,
        vec!["CLASSIFY_DOCUMENT".to_string(), "EXTRACT_METADATA".to_string()]
    );

    // Every registered task appears in exactly one group
    let total: usize = groups.values().map(|g| g.tasks.len()).sum();
    assert_eq!(total, 8);
}

#[test]
fn test_category_display_metadata() {
    let info = TaskCategory::Approval.info();
    assert_eq!(info.name, "Approval");
    assert!(info.color.starts_with('#'));
}
