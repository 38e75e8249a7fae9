//! End-to-end allocation scenarios on small, hand-checked inputs.

mod common;

use load_scheduler::sched::allocator::Allocator;
use load_scheduler::sched::plan;
use load_scheduler::sched::report::ScheduleReport;
use load_scheduler::tariff::{HOURS_PER_DAY, Provider, TariffCurve};

use common::{CEILING, appliance, assert_close, flat_tariff};

#[test]
fn single_all_day_appliance_fills_every_hour() {
    let tariff = flat_tariff(0.10);
    let appliances = vec![appliance("Fridge", 1.0, 24, 0, 24, 2)];

    let schedule = Allocator::new(&tariff).run(&appliances);
    for hour in 0..HOURS_PER_DAY {
        assert_eq!(schedule.slot(hour).appliances, vec!["Fridge".to_string()]);
        assert_close(schedule.slot(hour).power_kw, 1.0);
    }
    assert_close(schedule.total_cost(), 2.40);
    assert!(schedule.forced().is_empty());

    let report = ScheduleReport::from_schedule(&schedule, CEILING);
    assert_eq!(report.total_cost, 2.4);
}

#[test]
fn two_large_appliances_never_share_an_hour() {
    let tariff = Provider::Dei.curve();
    let appliances = vec![
        appliance("Oven", 2.0, 1, 0, 24, 2),
        appliance("Dryer", 2.0, 1, 0, 24, 2),
    ];

    let schedule = Allocator::new(&tariff).run(&appliances);
    let oven = &schedule.placements()[0];
    let dryer = &schedule.placements()[1];
    assert_eq!(oven.hours.len(), 1);
    assert_eq!(dryer.hours.len(), 1);
    assert_ne!(oven.hours[0], dryer.hours[0]);
    assert!(schedule.forced().is_empty());

    let expected = 2.0 * tariff[oven.hours[0]] + 2.0 * tariff[dryer.hours[0]];
    assert_close(schedule.total_cost(), expected);
}

#[test]
fn narrow_window_spills_to_neighbouring_hours_before_forcing() {
    let tariff = flat_tariff(0.10);
    let appliances = vec![
        appliance("A", 2.0, 1, 5, 6, 1),
        appliance("B", 2.0, 1, 5, 6, 1),
        appliance("C", 2.0, 1, 5, 6, 1),
    ];

    let schedule = Allocator::new(&tariff).run(&appliances);
    let hours: Vec<Vec<usize>> = schedule
        .placements()
        .iter()
        .map(|p| p.hours.clone())
        .collect();
    assert_eq!(hours, vec![vec![5], vec![4], vec![6]]);
    assert!(schedule.forced().is_empty());
    assert!(schedule.hours_over(CEILING).is_empty());
}

#[test]
fn forcing_happens_only_once_every_hour_is_saturated() {
    let tariff = flat_tariff(0.10);
    let mut appliances: Vec<_> = (0..HOURS_PER_DAY)
        .map(|i| appliance(&format!("Load {i}"), 2.0, 1, 5, 6, 1))
        .collect();

    let schedule = Allocator::new(&tariff).run(&appliances);
    assert!(schedule.forced().is_empty());
    assert!(schedule.slots().iter().all(|s| s.appliances.len() == 1));

    appliances.push(appliance("Extra", 2.0, 1, 5, 6, 1));
    let schedule = Allocator::new(&tariff).run(&appliances);
    assert_eq!(schedule.forced(), ["Extra".to_string()]);
    assert_eq!(schedule.placements()[HOURS_PER_DAY].hours, vec![5]);
    assert_eq!(schedule.hours_over(CEILING), vec![5]);
}

#[test]
fn flexible_appliance_is_dropped_when_nothing_fits() {
    let tariff = flat_tariff(0.10);
    let appliances = vec![
        appliance("Base", 3.0, 24, 0, 24, 1),
        appliance("Dryer", 1.0, 2, 0, 24, 2),
    ];

    let schedule = Allocator::new(&tariff).run(&appliances);
    let dryer = &schedule.placements()[1];
    assert!(dryer.hours.is_empty());
    assert_eq!(dryer.shortfall(), 2);
    assert!(!dryer.forced);
    assert!(schedule.forced().is_empty());
}

#[test]
fn input_order_breaks_priority_ties() {
    let tariff = Provider::Dei.curve();
    let appliances = vec![
        appliance("Late", 0.5, 1, 0, 24, 3),
        appliance("First", 0.5, 1, 0, 24, 2),
        appliance("Second", 0.5, 1, 0, 24, 2),
        appliance("Must", 0.5, 1, 0, 24, 1),
    ];

    let schedule = Allocator::new(&tariff).run(&appliances);
    let names: Vec<&str> = schedule
        .placements()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["Must", "First", "Second", "Late"]);
    assert_eq!(
        schedule.slot(0).appliances,
        ["Must", "First", "Second", "Late"]
    );
}

#[test]
fn window_hours_are_taken_in_ascending_order() {
    // Hours 8 and 9 are the cheapest in the window but come last.
    let mut prices = vec![0.20; HOURS_PER_DAY];
    prices[6] = 0.30;
    prices[7] = 0.30;
    prices[8] = 0.10;
    prices[9] = 0.10;
    let tariff = TariffCurve::new(prices).unwrap();
    let report = plan(&[appliance("Washer", 1.0, 2, 6, 10, 2)], &tariff, CEILING);

    assert_eq!(report.summary[0].hours, vec![6, 7]);
    assert_eq!(report.total_cost, 0.6);
    assert_eq!(report.rows[6].devices, "Washer");
    assert_eq!(report.rows[8].devices, "");
}

#[test]
fn overloaded_preset_reports_forced_appliances() {
    use load_scheduler::config::ScenarioConfig;

    let scenario = ScenarioConfig::overloaded().build().unwrap();
    let report = plan(&scenario.appliances, &scenario.tariff, scenario.max_power_kw);
    assert!(report.has_forced());
    assert!(report.forced.contains(&"Clothes dryer".to_string()));
    assert!(!report.hours_over_ceiling.is_empty());
    assert!(report.to_string().contains("Warning:"));
}
