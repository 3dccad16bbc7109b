mod common;

use common::{day, open_state, setup_state, temp_base, test_config};
use economy_core::catalog::{BuildingCategory, BuildingKind};
use economy_core::config::EconomyConfig;
use economy_core::economy::GrowthCurve;
use economy_core::errors::EconomyError;

#[test]
fn buying_then_selling_restores_the_balance() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Harbour").unwrap();
    state.buy("Harbour", BuildingKind::MarketStall, None, 1).unwrap();
    assert_eq!(state.total_balance(), 37976.0);
    state.sell("Harbour", BuildingKind::MarketStall, None, 1).unwrap();
    assert_eq!(state.total_balance(), 40000.0);
}

#[test]
fn new_buildings_lock_in_the_current_multiplier() {
    let base = temp_base();
    let config = EconomyConfig {
        growth: GrowthCurve::Lorentz {
            saturation_income: 1000.0,
        },
        ..test_config()
    };
    let mut state = open_state(&base, day(2022, 10, 20), config);
    assert_eq!(state.growth_multiplier(), 1.0);

    state.create_region("Works").unwrap();
    state.buy("Works", BuildingKind::SmallFactory, None, 1).unwrap();
    let grown = state.growth_multiplier();
    assert!(grown > 1.0);

    state.buy("Works", BuildingKind::Pier, None, 1).unwrap();
    let buildings = &state.snapshot().regions.buildings("Works").unwrap();
    assert_eq!(buildings[0].growth_multiplier, 1.0);
    assert_eq!(buildings[1].growth_multiplier, grown);
    assert!(state.growth_multiplier() > grown);
}

#[test]
fn sizes_are_validated_per_kind() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Suburbs").unwrap();
    for (kind, size) in [
        (BuildingKind::House, None),
        (BuildingKind::House, Some(3)),
        (BuildingKind::Airport, Some(0)),
        (BuildingKind::Pier, Some(2)),
    ] {
        assert_eq!(
            state.buy("Suburbs", kind, size, 1).unwrap_err(),
            EconomyError::InvalidSize { kind, size }
        );
    }
    assert_eq!(state.total_balance(), 40000.0);
}

#[test]
fn regions_reject_reserved_and_duplicate_names() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Docks").unwrap();
    assert_eq!(
        state.create_region("Docks").unwrap_err(),
        EconomyError::DuplicateRegionName("Docks".into())
    );
    assert!(matches!(
        state.create_region("Total"),
        Err(EconomyError::InvalidRegionName(_))
    ));
    assert!(matches!(
        state.create_region("   "),
        Err(EconomyError::InvalidRegionName(_))
    ));
}

#[test]
fn deleting_a_region_drops_its_buildings_without_refund() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Docks").unwrap();
    state.buy("Docks", BuildingKind::Dock, None, 2).unwrap();
    let balance = state.total_balance();
    assert_eq!(state.delete_region("Docks").unwrap(), 2);
    assert_eq!(state.total_balance(), balance);
    assert_eq!(state.calc_income().total, 0.0);
    assert!(matches!(
        state.sell("Docks", BuildingKind::Dock, None, 1),
        Err(EconomyError::UnknownRegion(_))
    ));
}

#[test]
fn statistics_cover_regions_and_total() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Town").unwrap();
    state.create_region("Port").unwrap();
    state.buy("Town", BuildingKind::House, Some(4), 1).unwrap();
    state.buy("Town", BuildingKind::Hospital, None, 1).unwrap();
    state.buy("Port", BuildingKind::Pier, None, 1).unwrap();

    let population = state.calc_population();
    assert_eq!(population.total, 4);
    assert_eq!(population.get("Port"), Some(0));

    let employment = state.calc_employment();
    assert_eq!(employment.get("Town"), Some(0.75));
    assert_eq!(employment.get("Port"), Some(0.0));
    assert_eq!(employment.total, 1.0);

    let industry = state.calc_industry_income();
    assert_eq!(industry.total[&BuildingCategory::PublicService], 624.0);
    assert_eq!(industry.total[&BuildingCategory::Transport], 112.0);

    let groups = state.groups("Total").unwrap();
    assert_eq!(groups.len(), 3);
}

#[test]
fn quotes_project_the_purchase_without_applying_it() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Town").unwrap();
    state.buy("Town", BuildingKind::House, Some(2), 1).unwrap();

    let preview = state
        .preview_purchase("Town", BuildingKind::PostOffice, None, 1)
        .unwrap();
    assert_eq!(preview.cost, 4600.0);
    assert_eq!(preview.income, 200.0);
    let projection = preview.projection.unwrap();
    assert_eq!(projection.balance, 40000.0 - 2300.0 - 4600.0);
    assert_eq!(projection.employment, 1.0);

    assert!(state
        .preview_purchase("Total", BuildingKind::PostOffice, None, 1)
        .unwrap()
        .projection
        .is_none());
    assert_eq!(state.groups("Town").unwrap().len(), 1);
}

#[test]
fn region_names_match_regardless_of_padding() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region(" North").unwrap();
    assert_eq!(state.region_names(), vec!["North".to_string()]);
    state.buy(" North", BuildingKind::Pier, None, 1).unwrap();
    state.sell("North ", BuildingKind::Pier, None, 1).unwrap();
    assert_eq!(state.total_balance(), 40000.0);
    assert_eq!(state.delete_region("  North  ").unwrap(), 0);
    assert!(state.region_names().is_empty());
}

#[test]
fn oversized_purchases_are_rejected_without_side_effects() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Harbour").unwrap();
    let err = state
        .buy("Harbour", BuildingKind::MarketStall, None, u32::MAX)
        .unwrap_err();
    assert!(matches!(err, EconomyError::InvalidInput(_)));
    assert_eq!(state.total_balance(), 40000.0);
    assert!(state.groups("Harbour").unwrap().is_empty());
}
