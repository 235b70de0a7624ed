use export_core::{ElementId, WidgetKind, WidgetRegistry, WidgetState};

#[test]
fn mount_is_idempotent_per_element() {
    let mut registry = WidgetRegistry::new();
    let elem = ElementId::new("export-form-1");
    assert!(registry.is_empty());

    assert!(registry.mount(elem.clone(), || WidgetState::new(WidgetKind::Pdf)));
    assert!(!registry.mount(elem.clone(), || WidgetState::new(WidgetKind::Excel)));

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get(&elem).map(WidgetState::kind), Some(WidgetKind::Pdf));
}

#[test]
fn distinct_elements_get_distinct_controllers() {
    let mut registry = WidgetRegistry::new();
    registry.mount(ElementId::new("a"), || WidgetState::new(WidgetKind::Excel));
    registry.mount(ElementId::new("b"), || WidgetState::new(WidgetKind::Pdf));

    assert_eq!(registry.len(), 2);
    assert!(registry.contains(&ElementId::new("a")));
    assert!(registry.get(&ElementId::new("c")).is_none());
}
