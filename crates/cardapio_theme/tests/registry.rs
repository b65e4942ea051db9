use cardapio_theme::{
    build_theme_tokens, MemoryTarget, TenantId, ThemeConfig, ThemeInput, ThemeRegistry,
    ThemeSource, ThemeStatus,
};

fn tenant(slug: &str) -> TenantId {
    TenantId::new(slug).unwrap()
}

#[test]
fn reapplying_replaces_instead_of_appending() {
    let mut registry = ThemeRegistry::new(MemoryTarget::new());
    let id = tenant("pizzaria-bella");

    let first = build_theme_tokens(&ThemeInput::new("#b91c1c", "#f59e0b"), &ThemeConfig::default())
        .unwrap();
    let second = build_theme_tokens(&ThemeInput::new("#1d4ed8", "#10b981"), &ThemeConfig::default())
        .unwrap();
    registry.apply(&id, &first).unwrap();
    registry.apply(&id, &second).unwrap();

    let target = registry.target();
    assert_eq!(target.len(), 1);
    assert_eq!(target.style("tenant-theme-pizzaria-bella"), Some(second.css.as_str()));
    assert_eq!(registry.applied_css(&id), Some(second.css.as_str()));
}

#[test]
fn tenants_are_isolated() {
    let mut registry = ThemeRegistry::new(MemoryTarget::new());
    let a = tenant("sushi-ya");
    let b = tenant("boteco");
    let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();

    registry.apply(&a, &result).unwrap();
    registry.apply(&b, &result).unwrap();
    registry.remove(&a).unwrap();

    assert_eq!(registry.status(&a), ThemeStatus::Removed);
    assert_eq!(registry.status(&b), ThemeStatus::Applied);
    assert_eq!(registry.target().len(), 1);
    assert_eq!(registry.applied_tenants().collect::<Vec<_>>(), vec![&b]);
}

#[test]
fn remove_leaves_no_element() {
    let mut registry = ThemeRegistry::new(MemoryTarget::new());
    let id = tenant("cafe");
    let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();
    registry.apply(&id, &result).unwrap();
    registry.remove(&id).unwrap();
    registry.remove(&id).unwrap();
    assert!(registry.into_target().is_empty());
}

#[test]
fn fallback_prefers_last_known_good() {
    let mut registry = ThemeRegistry::new(MemoryTarget::new());
    let id = tenant("lanchonete");

    let good = ThemeInput::new("#7c3aed", "#f97316");
    assert_eq!(
        registry
            .apply_or_fallback(&id, &good, &ThemeConfig::default())
            .unwrap(),
        ThemeSource::Requested
    );
    let good_css = registry.applied_css(&id).unwrap().to_string();

    let broken = ThemeConfig {
        step_keys: vec![],
        ..ThemeConfig::default()
    };
    assert_eq!(
        registry.apply_or_fallback(&id, &good, &broken).unwrap(),
        ThemeSource::LastKnownGood
    );
    assert_eq!(registry.applied_css(&id), Some(good_css.as_str()));
}

#[test]
fn fallback_without_history_uses_default() {
    let mut registry = ThemeRegistry::new(MemoryTarget::new());
    let id = tenant("padaria");
    let broken = ThemeConfig {
        correction_step: -1.0,
        ..ThemeConfig::default()
    };
    assert_eq!(
        registry
            .apply_or_fallback(&id, &ThemeInput::default(), &broken)
            .unwrap(),
        ThemeSource::Default
    );
    let default = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();
    assert_eq!(registry.applied_css(&id), Some(default.css.as_str()));
}

#[test]
fn recovery_after_failed_write() {
    let mut registry = ThemeRegistry::new(MemoryTarget::new());
    let id = tenant("bistro");
    let result = build_theme_tokens(&ThemeInput::default(), &ThemeConfig::default()).unwrap();

    registry.target_mut().fail_writes(true);
    assert!(registry.apply(&id, &result).is_err());
    assert_eq!(registry.status(&id), ThemeStatus::Unapplied);
    assert!(registry.last_error(&id).is_some());
    assert!(registry.target().is_empty());

    registry.target_mut().fail_writes(false);
    registry.apply(&id, &result).unwrap();
    assert!(registry.last_error(&id).is_none());
    assert_eq!(registry.status(&id), ThemeStatus::Applied);
    assert_eq!(registry.target().len(), 1);
}
