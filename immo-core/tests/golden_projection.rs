//! End-to-end projection of the reference apartment purchase.
//!
//! Expected values are cents, rounded half away from zero.

use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use immo_core::calculations::common::round_half_up;
use immo_core::{
    DepreciationRates, FinancingKind, FinancingTerms, OngoingCosts, ProjectionAssumptions,
    ProjectionInput, PurchaseCost, TaxProfile, TaxStatus, YearRecord, project,
};

fn reference_input() -> ProjectionInput {
    ProjectionInput {
        purchase: PurchaseCost {
            purchase_price: dec!(300000),
            transfer_tax_rate: dec!(5),
            notary_rate: dec!(1.5),
            broker_rate: dec!(3.57),
            land_value: dec!(60000),
            building_value: dec!(220000),
            furniture_value: dec!(20000),
            maintenance_cost: dec!(10000),
            maintenance_distribution_years: 5,
            broker_as_consulting: false,
        },
        ongoing: OngoingCosts {
            monthly_rent: dec!(1200),
            vacancy_rate: dec!(3),
            property_tax: dec!(400),
            management_fee: dec!(300),
            maintenance_reserve_per_area: dec!(5),
            property_size: dec!(70),
            insurance: dec!(150),
        },
        financing: FinancingTerms {
            kind: FinancingKind::Loan,
            down_payment: dec!(60000),
            interest_rate: dec!(3.5),
            amortization_rate: dec!(2),
        },
        depreciation: DepreciationRates {
            building_rate: dec!(2),
            furniture_rate: dec!(10),
        },
        tax: TaxProfile {
            annual_income: dec!(60000),
            status: TaxStatus::Single,
            church_tax: false,
            church_tax_rate: dec!(9),
        },
        projection: ProjectionAssumptions {
            appreciation_rate: dec!(2),
            rent_increase_rate: dec!(2),
            period_years: 10,
        },
    }
}

/// One expected row: year, rent, operating costs, cashflow before financing,
/// interest, principal, payment, balance, cashflow before tax, taxable result,
/// new income, new tax, savings, cashflow after tax, property value, equity.
type Row = [Decimal; 16];

#[rustfmt::skip]
const EXPECTED: [Row; 10] = [
    [dec!(1), dec!(13968.00), dec!(1200.00), dec!(12768.00), dec!(9457.35), dec!(5404.20), dec!(14861.55), dec!(264805.80), dec!(-2093.55), dec!(-5089.35), dec!(54910.65), dec!(12476), dec!(1939), dec!(-154.55), dec!(300000.00), dec!(35194.20)],
    [dec!(2), dec!(14247.36), dec!(1224.00), dec!(13023.36), dec!(9268.20), dec!(5593.35), dec!(14861.55), dec!(259212.45), dec!(-1838.19), dec!(-4644.84), dec!(55355.16), dec!(12642), dec!(1773), dec!(-65.19), dec!(306000.00), dec!(46787.55)],
    [dec!(3), dec!(14532.31), dec!(1248.48), dec!(13283.83), dec!(9072.44), dec!(5789.11), dec!(14861.55), dec!(253423.34), dec!(-1577.72), dec!(-4188.61), dec!(55811.39), dec!(12812), dec!(1603), dec!(25.28), dec!(312120.00), dec!(58696.66)],
    [dec!(4), dec!(14822.95), dec!(1273.45), dec!(13549.50), dec!(8869.82), dec!(5991.73), dec!(14861.55), dec!(247431.61), dec!(-1312.05), dec!(-3720.31), dec!(56279.69), dec!(12989), dec!(1426), dec!(113.95), dec!(318362.40), dec!(70930.79)],
    [dec!(5), dec!(15119.41), dec!(1298.92), dec!(13820.49), dec!(8660.11), dec!(6201.44), dec!(14861.55), dec!(241230.16), dec!(-1041.06), dec!(-3239.61), dec!(56760.39), dec!(13170), dec!(1245), dec!(203.94), dec!(324729.65), dec!(83499.49)],
    [dec!(6), dec!(15421.80), dec!(1324.90), dec!(14096.90), dec!(8443.06), dec!(6418.49), dec!(14861.55), dec!(234811.67), dec!(-764.65), dec!(-746.15), dec!(59253.85), dec!(14125), dec!(290), dec!(-474.65), dec!(331224.24), dec!(96412.57)],
    [dec!(7), dec!(15730.24), dec!(1351.39), dec!(14378.84), dec!(8218.41), dec!(6643.14), dec!(14861.55), dec!(228168.53), dec!(-482.71), dec!(-239.57), dec!(59760.43), dec!(14322), dec!(93), dec!(-389.71), dec!(337848.73), dec!(109680.20)],
    [dec!(8), dec!(16044.84), dec!(1378.42), dec!(14666.42), dec!(7985.90), dec!(6875.65), dec!(14861.55), dec!(221292.87), dec!(-195.13), dec!(280.52), dec!(60280.52), dec!(14525), dec!(-110), dec!(-305.13), dec!(344605.70), dec!(123312.83)],
    [dec!(9), dec!(16365.74), dec!(1405.99), dec!(14959.75), dec!(7745.25), dec!(7116.30), dec!(14861.55), dec!(214176.57), dec!(98.20), dec!(814.50), dec!(60814.50), dec!(14734), dec!(-319), dec!(-220.80), dec!(351497.81), dec!(137321.24)],
    [dec!(10), dec!(16693.05), dec!(1434.11), dec!(15258.94), dec!(7496.18), dec!(7365.37), dec!(14861.55), dec!(206811.21), dec!(397.39), dec!(1362.76), dec!(61362.76), dec!(14950), dec!(-535), dec!(-137.61), dec!(358527.77), dec!(151716.57)],
];

fn actual_row(r: &YearRecord) -> Row {
    [
        Decimal::from(r.year),
        r.rent,
        r.ongoing_costs,
        r.cashflow_before_financing,
        r.interest,
        r.principal,
        r.financing_payment,
        r.loan_balance,
        r.cashflow_before_tax,
        r.taxable_result,
        r.new_total_income,
        r.new_tax,
        r.tax_savings,
        r.cashflow_after_tax,
        r.property_value,
        r.equity,
    ]
    .map(round_half_up)
}

#[test]
fn test_reference_projection_matches_golden_table() {
    let result = project(&reference_input()).expect("reference input is valid");

    assert_eq!(result.records.len(), EXPECTED.len());
    for (record, expected) in result.records.iter().zip(EXPECTED.iter()) {
        assert_eq!(actual_row(record), *expected, "year {}", record.year);
    }
}

#[test]
fn test_reference_purchase_and_financing() {
    let result = project(&reference_input()).expect("reference input is valid");

    assert_eq!(result.purchase.transfer_tax, dec!(15000));
    assert_eq!(result.purchase.notary_costs, dec!(4500));
    assert_eq!(result.purchase.broker_fee, dec!(10710));
    assert_eq!(result.purchase.total_cost, dec!(330210));
    assert_eq!(result.summary.loan_amount, dec!(270210));
    assert_eq!(result.summary.annuity, dec!(14861.55));
    assert_eq!(round_half_up(result.summary.monthly_payment), dec!(1238.46));
    assert!(result.warnings.is_empty());
}

#[test]
fn test_reference_summary() {
    let result = project(&reference_input()).expect("reference input is valid");
    let summary = &result.summary;

    assert_eq!(summary.initial_equity, dec!(60000));
    assert_eq!(round_half_up(summary.monthly_cashflow), dec!(-12.88));
    assert_eq!(round_half_up(summary.final_property_value), dec!(358527.77));
    assert_eq!(round_half_up(summary.final_loan_balance), dec!(206811.21));
    assert_eq!(round_half_up(summary.final_equity), dec!(151716.57));
    assert_eq!(round_half_up(summary.equity_growth), dec!(91716.57));

    let roi = summary.annualized_roi.expect("initial equity is positive");
    assert_eq!(round_half_up(roi * dec!(100)), dec!(9.72));
}

#[test]
fn test_reference_tax_overview() {
    let result = project(&reference_input()).expect("reference input is valid");

    assert_eq!(result.tax_overview.income_tax, dec!(14415));
    assert_eq!(result.tax_overview.church_tax, Decimal::ZERO);
    assert_eq!(result.tax_overview.effective_rate, Some(dec!(24.025)));
}

#[test]
fn test_chart_series_follows_records() {
    let result = project(&reference_input()).expect("reference input is valid");
    let series = result.chart_series();

    assert_eq!(series.years, (1..=10).collect::<Vec<u32>>());
    assert_eq!(series.cashflows[0], result.records[0].cashflow_after_tax);
    assert_eq!(series.property_values[9], result.summary.final_property_value);
    assert_eq!(series.equity_values[9], result.summary.final_equity);
    assert_eq!(series.loan_balances[9], result.summary.final_loan_balance);
}

#[test]
fn test_married_investor_saves_less_per_euro_of_loss() {
    let single = project(&reference_input()).expect("reference input is valid");
    let mut input = reference_input();
    input.tax.status = TaxStatus::Married;
    let married = project(&input).expect("reference input is valid");

    assert_eq!(married.records[0].prior_tax, dec!(8608));
    assert_eq!(married.records[0].new_tax, dec!(7184));
    assert_eq!(married.records[0].tax_savings, dec!(1424));
    assert!(married.records[0].tax_savings < single.records[0].tax_savings);
}

#[test]
fn test_tax_savings_split_and_loan_term() {
    let result = project(&reference_input()).expect("reference input is valid");

    assert_eq!(result.cumulative_church_tax_savings(), Decimal::ZERO);
    assert_eq!(
        result.cumulative_income_tax_savings(),
        result.cumulative_tax_savings()
    );
    assert_eq!(result.cumulative_income_tax_savings(), dec!(7405));
    assert_eq!(result.loan_repaid_in_year(), None);
}

#[test]
fn test_church_tax_share_of_savings() {
    let mut input = reference_input();
    input.tax.church_tax = true;
    let result = project(&input).expect("reference input is valid");

    assert_eq!(result.cumulative_income_tax_savings(), dec!(7405));
    assert_eq!(result.cumulative_church_tax_savings(), dec!(666.45));
}

#[test]
fn test_cash_purchase_has_no_loan_to_repay() {
    let mut input = reference_input();
    input.financing = FinancingTerms::cash();
    let result = project(&input).expect("reference input is valid");

    assert_eq!(result.loan_repaid_in_year(), Some(1));
}

#[test]
fn test_reference_marginal_rate() {
    let result = project(&reference_input()).expect("reference input is valid");

    assert_eq!(result.tax_overview.marginal_rate.round_dp(2), dec!(39.00));
}
