mod common;

use std::fs;

use common::{day, setup_state, start_day};
use economy_core::catalog::BuildingKind;
use economy_core::core::services::Metric;

#[test]
fn series_follow_the_economy_day_by_day() {
    let (mut state, _base) = setup_state(day(2022, 10, 20));
    state.create_region("Town").unwrap();
    state.buy("Town", BuildingKind::House, Some(4), 1).unwrap();
    state.advance_day(Some(1)).unwrap();
    state.buy("Town", BuildingKind::PostOffice, None, 1).unwrap();
    state.advance_day(Some(1)).unwrap();

    let population = state.load_historical_series(Metric::Population).unwrap();
    assert_eq!(
        population,
        vec![(start_day(), 4.0), (day(2022, 10, 11), 4.0), (day(2022, 10, 12), 4.0)]
    );

    let income = state.load_historical_series(Metric::Income).unwrap();
    let values: Vec<f64> = income.iter().map(|(_, value)| *value).collect();
    assert_eq!(values, vec![0.0, 200.0, 200.0]);

    let employment = state.load_historical_series(Metric::Employment).unwrap();
    assert_eq!(employment[0].1, 0.0);
    assert_eq!(employment[2].1, 50.0);

    let spending = state.load_historical_series(Metric::Expenditure).unwrap();
    assert_eq!(spending[0].1, 4600.0);
    assert_eq!(spending[1].1, 4600.0);
    assert_eq!(spending[2].1, 0.0);
}

#[test]
fn unreadable_backups_are_skipped() {
    let (mut state, base) = setup_state(day(2022, 10, 20));
    state.advance_day(Some(1)).unwrap();
    fs::write(base.join("backups").join("2022-10-05.json"), "{ not json").unwrap();
    fs::write(base.join("backups").join("notes.txt"), "ignored").unwrap();

    let balance = state.load_historical_series(Metric::Balance).unwrap();
    let days: Vec<_> = balance.iter().map(|(day, _)| *day).collect();
    assert_eq!(days, vec![start_day(), day(2022, 10, 11)]);
}
