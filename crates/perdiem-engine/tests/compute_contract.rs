use perdiem_engine::money::parse_dollars;
use perdiem_engine::{Cents, TARIFF_V1, Trip, compute, compute_amount};

fn trip(days: &str, miles: &str, receipts: &str) -> Trip {
    match Trip::parse(days, miles, receipts) {
        Ok(trip) => trip,
        Err(reason) => panic!("{reason}"),
    }
}

fn amount(days: &str, miles: &str, receipts: &str) -> Cents {
    compute_amount(&trip(days, miles, receipts), &TARIFF_V1)
}

#[test]
fn pinned_scenarios_match_the_frozen_tariff() {
    // low-receipt penalty only
    assert_eq!(amount("3", "93", "1.42").to_string(), "329.51");
    // five-day bonus; 100 mi/day sits outside the efficiency window
    assert_eq!(amount("5", "500", "200.00").to_string(), "867.00");
    // terminal-99 artifact fires; 205.75/day stays under the 500 threshold
    assert_eq!(amount("8", "795", "1645.99").to_string(), "1494.21");
    // terminal-49 artifact plus high-daily-spend penalty
    assert_eq!(amount("1", "1082", "1809.49").to_string(), "1344.08");
}

#[test]
fn pinned_scenario_breakdowns() {
    let evaluation = compute(&trip("8", "795", "1645.99"), &TARIFF_V1);
    assert_eq!(evaluation.breakdown.per_diem.to_string(), "800.00");
    assert_eq!(evaluation.breakdown.mileage.to_string(), "360.00");
    assert_eq!(evaluation.breakdown.receipts.to_string(), "334.21");
    assert!(evaluation.trace.artifact_bonus);
    assert!(!evaluation.trace.high_spend_penalty);
    assert!(!evaluation.trace.five_day_bonus);

    let penalized = compute(&trip("1", "1082", "1809.49"), &TARIFF_V1);
    assert_eq!(penalized.breakdown.per_diem.to_string(), "50.00");
    assert!(penalized.trace.high_spend_penalty);
    assert!(penalized.trace.artifact_bonus);
}

#[test]
fn repeated_calls_are_bit_identical() {
    let sample = trip("5", "500", "200.00");
    let first = compute(&sample, &TARIFF_V1);
    for _ in 0..100 {
        assert_eq!(compute(&sample, &TARIFF_V1), first);
    }
}

#[test]
fn concurrent_calls_agree_without_locks() {
    let sample = trip("8", "795", "1645.99");
    let expected = compute_amount(&sample, &TARIFF_V1);

    std::thread::scope(|scope| {
        let handles = (0..8)
            .map(|_| scope.spawn(|| compute_amount(&sample, &TARIFF_V1)))
            .collect::<Vec<_>>();
        for handle in handles {
            match handle.join() {
                Ok(total) => assert_eq!(total, expected),
                Err(_) => panic!("compute thread panicked"),
            }
        }
    });
}

#[test]
fn output_is_never_negative() {
    let days = ["1", "2", "3", "5", "7", "8", "14", "30"];
    let miles = ["0", "1", "99.999", "100", "400", "1082"];
    let receipts = ["0", "0.01", "1.42", "49.99", "50.00", "828.10", "2600.00"];
    for day in days {
        for mile in miles {
            for receipt in receipts {
                let total = amount(day, mile, receipt);
                assert!(
                    total >= Cents::ZERO,
                    "negative total for {day}/{mile}/{receipt}"
                );
            }
        }
    }
}

#[test]
fn rounding_is_closed_over_the_output() {
    for (day, mile, receipt) in [
        ("3", "93", "1.42"),
        ("5", "500", "200.00"),
        ("8", "795", "1645.99"),
        ("1", "1082", "1809.49"),
    ] {
        let total = amount(day, mile, receipt);
        let text = total.to_string();
        let fraction = text.rsplit('.').next().unwrap_or("");
        assert_eq!(fraction.len(), 2, "output {text} must carry 2 digits");
        // re-rounding the printed amount is a no-op
        assert_eq!(parse_dollars(&text), Ok(total));
    }
}

#[test]
fn mileage_contribution_is_monotone_in_miles() {
    // 30 days puts the efficiency window far above the sampled range, so
    // the pure tier function is observed
    let mut previous = Cents::ZERO;
    for miles in (0..1500).step_by(7) {
        let text = miles.to_string();
        let evaluation = compute(&trip("30", &text, "200.00"), &TARIFF_V1);
        assert!(
            evaluation.breakdown.mileage >= previous,
            "mileage dropped at {miles} miles"
        );
        previous = evaluation.breakdown.mileage;
    }
}

#[test]
fn tier_boundaries_have_no_downward_jump() {
    for boundary in ["100", "400"] {
        let at = compute(&trip("1", boundary, "0"), &TARIFF_V1).breakdown.mileage;
        let just_over = format!("{boundary}.001");
        let above = compute(&trip("1", &just_over, "0"), &TARIFF_V1)
            .breakdown
            .mileage;
        assert!(above >= at);
    }
}

#[test]
fn artifact_outputs_differ_by_exactly_the_fixed_correction() {
    // neighbors whose receipt rate rounds to the same cent, so the whole
    // difference is the artifact bonus
    let with_99 = amount("8", "795", "1645.99");
    let without = amount("8", "795", "1645.98");
    assert_eq!(with_99 - without, TARIFF_V1.artifact_bonus);

    let with_49 = amount("1", "1082", "1809.49");
    let neighbor = amount("1", "1082", "1809.48");
    assert_eq!(with_49 - neighbor, TARIFF_V1.artifact_bonus);
}

#[test]
fn one_day_trips_are_safe_in_per_day_ratios() {
    // extreme mileage and spending per day on a single-day trip must not
    // panic or misclassify
    let evaluation = compute(&trip("1", "1082", "1809.49"), &TARIFF_V1);
    assert!(evaluation.trace.high_spend_penalty);
    assert!(!evaluation.trace.efficiency_bonus);

    let calm = compute(&trip("1", "200", "10.00"), &TARIFF_V1);
    assert!(calm.trace.efficiency_bonus);
    assert!(!calm.trace.high_spend_penalty);
}
