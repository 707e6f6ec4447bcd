use std::io::Write;

use immo_core::calculations::common::round_half_up;
use immo_core::{ProjectionResult, YearRecord};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when exporting the year table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("exported table is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

type Cell = fn(&YearRecord) -> Decimal;

/// One line of the year table: a label and how to read its value.
struct Line {
    label: &'static str,
    value: Cell,
}

const fn line(
    label: &'static str,
    value: Cell,
) -> Line {
    Line { label, value }
}

static INCOME: [Line; 4] = [
    line("Mieteinnahmen", |r| r.rent),
    line("  Mieteinnahmen (brutto)", |r| r.gross_rent),
    line("  Leerstand", |r| -r.vacancy_loss),
    line("  Effektive Mieteinnahmen", |r| r.rent),
];

static OPERATING: [Line; 6] = [
    line("Bewirtschaftungskosten", |r| r.ongoing_costs),
    line("  Grundsteuer", |r| r.operating_costs.property_tax),
    line("  Hausverwaltung", |r| r.operating_costs.management_fee),
    line("  Instandhaltungsrücklage", |r| r.operating_costs.maintenance_reserve),
    line("  Versicherungen", |r| r.operating_costs.insurance),
    line("Cashflow vor Finanzierung", |r| r.cashflow_before_financing),
];

static FINANCING: [Line; 4] = [
    line("Finanzierung", |r| r.financing_payment),
    line("  Zinsanteil", |r| r.interest),
    line("  Tilgungsanteil", |r| r.principal),
    line("Cashflow vor Steuern", |r| r.cashflow_before_tax),
];

static DEPRECIATION: [Line; 4] = [
    line("Abschreibungen & Steuern", |r| r.total_depreciation),
    line("  AfA Gebäude", |r| r.building_depreciation),
    line("  AfA Möbel", |r| r.furniture_depreciation),
    line("  Erhaltungsaufwand", |r| r.maintenance_deduction),
];

static CONSULTING: Line = line("  Maklerkosten als Beratungsleistung", |r| {
    r.first_year_deductible_costs
});

static TAX: [Line; 9] = [
    line("  Ergebnis vor Steuern", |r| r.taxable_result),
    line("  Zu versteuerndes Einkommen (vorher)", |r| r.prior_income),
    line("  Neues zu versteuerndes Gesamteinkommen", |r| r.new_total_income),
    line("  Einkommensteuer (vorher)", |r| r.prior_tax),
    line("  Einkommensteuer (nachher)", |r| r.new_tax),
    line("  Kirchensteuer (vorher)", |r| r.prior_church_tax),
    line("  Kirchensteuer (nachher)", |r| r.new_church_tax),
    line("Steuerersparnis", |r| r.tax_savings),
    line("Cashflow nach Steuern", |r| r.cashflow_after_tax),
];

static ASSETS: [Line; 4] = [
    line("Vermögenswerte", |r| r.equity),
    line("  Immobilienwert", |r| r.property_value),
    line("  Restschuld", |r| r.loan_balance),
    line("  Eigenkapital", |r| r.equity),
];

const EQUITY_RETURN_LABEL: &str = "  Eigenkapitalrendite (%)";

/// Formats an amount with two decimals and a decimal comma (`-154,55`).
pub fn format_amount(value: Decimal) -> String {
    let mut rounded = round_half_up(value);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }
    rounded.rescale(2);
    rounded.to_string().replace('.', ",")
}

/// Writes the year table of a projection as semicolon-separated CSV.
///
/// One row per line item and one column per year, with German labels and
/// decimal commas. Amounts are rounded to cents; the projection itself is
/// not modified.
pub struct YearTableExporter;

impl YearTableExporter {
    pub fn write<W: Write>(
        result: &ProjectionResult,
        writer: W,
    ) -> Result<(), ExportError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .from_writer(writer);
        let records = &result.records;

        let mut header = vec!["Kategorie".to_string()];
        header.extend(records.iter().map(|r| format!("Jahr {}", r.year)));
        csv_writer.write_record(&header)?;

        let mut lines: Vec<&Line> = Vec::new();
        lines.extend(&INCOME);
        lines.extend(&OPERATING);
        lines.extend(&FINANCING);
        lines.extend(&DEPRECIATION);
        if result.has_first_year_deductible_costs() {
            lines.push(&CONSULTING);
        }
        lines.extend(&TAX);
        lines.extend(&ASSETS);

        for line in lines {
            let mut row = vec![line.label.to_string()];
            row.extend(records.iter().map(|r| format_amount((line.value)(r))));
            csv_writer.write_record(&row)?;
        }

        let mut row = vec![EQUITY_RETURN_LABEL.to_string()];
        row.extend(
            records
                .iter()
                .map(|r| r.equity_return.map(format_amount).unwrap_or_default()),
        );
        csv_writer.write_record(&row)?;

        csv_writer.flush()?;
        Ok(())
    }

    /// Renders the year table into a string.
    pub fn render(result: &ProjectionResult) -> Result<String, ExportError> {
        let mut buffer = Vec::new();
        Self::write(result, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}
