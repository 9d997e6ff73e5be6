//! End-to-end pricing flows: unit selection -> cost sheet -> discount -> demand

use estate_pricing_core::{
    apply_discount, compute_emi, split, AreaUnit, ConfigDrivenCalculator, CostSheetEngine, Decimal,
    GstPolicy, MultiUnitAggregator, PricingCalculator, PricingError, RateSchedule,
    ReminderDefaults, StampDutyConfig, UnitInput,
};

fn tower_b_schedule() -> RateSchedule {
    RateSchedule {
        basic_rate: 7200.0,
        development: 300.0,
        dg_backup: 45.0,
        recreation: 80.0,
        society_legal: 35.0,
        floor_rise: 30.0,
        other_charges: 250_000.0,
    }
}

/// Single unit: breakdown, discount, then installments over the final amount
#[test]
fn test_single_unit_booking_flow() {
    let engine = CostSheetEngine::default();
    let unit = UnitInput::sqft(1150.0, 11).with_id("B-1103");
    let sheet = engine
        .build_cost_sheet(&unit, &tower_b_schedule(), 0.05)
        .unwrap();

    assert_eq!(sheet.chargeable_floors, 5);
    assert_eq!(sheet.subtotal + sheet.gst_amount, sheet.total);

    let discounted = apply_discount(sheet.total, 1.5).unwrap();
    assert!(discounted.final_amount < sheet.total);

    let plan = split(discounted.final_amount, 4).unwrap();
    assert_eq!(plan.installments.len(), 4);
    assert_eq!(plan.amounts.iter().sum::<Decimal>(), plan.total);
}

/// Discounting each unit separately and summing must match one discount on the sum
#[test]
fn test_multi_unit_discount_not_compounded() {
    let units = vec![
        UnitInput::sqft(980.0, 4),
        UnitInput::new(95.0, AreaUnit::Sqm, 8),
    ];
    let aggregator = MultiUnitAggregator::default();
    let aggregate = aggregator
        .aggregate(&units, &tower_b_schedule(), 0.18, 5.0)
        .unwrap();

    let expected = aggregate.combined_subtotal * (1.0 - 0.05);
    assert!((aggregate.grand_total - expected).abs() < 1e-6);
    assert_eq!(aggregate.discount_pct, 5.0);
}

#[test]
fn test_calculator_trait_object_flow() {
    let calc = ConfigDrivenCalculator::new(
        Default::default(),
        StampDutyConfig::default().with_rate("maharashtra", "residential", 0.05),
        GstPolicy {
            enforce_slabs: true,
            ..GstPolicy::default()
        },
        ReminderDefaults::default(),
    )
    .unwrap();
    let calc: Box<dyn PricingCalculator> = Box::new(calc);

    let aggregate = calc
        .aggregate(
            &[UnitInput::sqft(1000.0, 1), UnitInput::sqft(1000.0, 1)],
            &tower_b_schedule(),
            None,
            0.0,
        )
        .unwrap();
    assert_eq!(aggregate.unit_sheets.len(), 2);
    assert_eq!(aggregate.unit_sheets[0].gst_rate, 0.18);

    let demand = calc.derive_demand(aggregate.grand_total, Some(0.05), 3).unwrap();
    assert_eq!(demand.installments.len(), 3);

    let duty = calc
        .compute_stamp_duty(aggregate.grand_total, "Maharashtra", "Residential")
        .unwrap();
    assert!(duty.total > 0.0);

    assert!(matches!(
        calc.aggregate(&[], &tower_b_schedule(), None, 0.0),
        Err(PricingError::EmptySelection)
    ));
}

#[test]
fn test_loan_on_discounted_price() {
    let loan = compute_emi(4_000_000.0, 8.75, 25).unwrap();
    assert_eq!(loan.months, 300);
    assert!(loan.total_interest > 0.0);
    assert!((loan.total_payable - loan.emi * 300.0).abs() < 1e-6);
}

#[test]
fn test_value_objects_serialize_for_document_generator() {
    let engine = CostSheetEngine::default();
    let sheet = engine
        .build_cost_sheet(&UnitInput::sqft(500.0, 0), &tower_b_schedule(), 0.12)
        .unwrap();
    let json = serde_json::to_value(&sheet).unwrap();
    assert_eq!(json["lines"].as_array().unwrap().len(), 7);
    assert_eq!(json["gst_rate"], 0.12);

    let unit: UnitInput =
        serde_json::from_str(r#"{"area_value": 1200, "area_unit": "sqyard", "floor": 3}"#)
            .unwrap();
    assert_eq!(unit.area_unit, AreaUnit::Sqyard);
}
