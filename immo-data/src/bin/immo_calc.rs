use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use immo_core::{ProjectionResult, project};
use immo_data::{ScenarioLoader, YearTableExporter, format_amount, init_logging};
use rust_decimal::Decimal;
use tracing::info;

/// Project a rental property purchase over its holding period.
///
/// The scenario is a TOML file with the sections [purchase], [ongoing],
/// [financing], [depreciation], [tax] and [projection]. Rates are given in
/// percent (3.5 means 3.5 %).
#[derive(Parser, Debug)]
#[command(name = "immo-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the scenario TOML file
    #[arg(short, long)]
    scenario: PathBuf,

    /// Write the year table as semicolon-separated CSV to this file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "immo_core=trace" (overrides RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Also append log output to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_level.as_deref(), args.log_file.as_deref())?;

    let scenario = ScenarioLoader::load(&args.scenario)
        .with_context(|| format!("Failed to load scenario: {}", args.scenario.display()))?;
    info!(path = %args.scenario.display(), "scenario loaded");

    let result = project(&scenario.input).context("Projection failed")?;

    if let Some(name) = &scenario.name {
        println!("Szenario: {name}");
    }
    if let Some(state) = scenario.federal_state {
        println!("Bundesland: {}", state.name());
    }
    print_purchase(&result);
    print_tax_overview(&result);
    print_summary(&result);

    for warning in &result.warnings {
        println!("Hinweis: {warning}");
    }

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("Failed to create: {}", path.display()))?;
        YearTableExporter::write(&result, BufWriter::new(file))
            .with_context(|| format!("Failed to write year table: {}", path.display()))?;
        println!();
        println!("Jahrestabelle geschrieben: {}", path.display());
    }

    Ok(())
}

fn euro(value: Decimal) -> String {
    format!("{} €", format_amount(value))
}

fn print_purchase(result: &ProjectionResult) {
    let p = &result.purchase;
    println!();
    println!("Kaufkosten");
    println!("  Kaufpreis:              {}", euro(p.purchase_price));
    println!("  Grunderwerbsteuer:      {}", euro(p.transfer_tax));
    println!("  Notar und Grundbuch:    {}", euro(p.notary_costs));
    println!("  Makler:                 {}", euro(p.broker_fee));
    println!("  Gesamtkosten:           {}", euro(p.total_cost));
    println!("  Gebäudewert (AfA):      {}", euro(p.building_value));
    println!("  Möbelwert (AfA):        {}", euro(p.furniture_value));
}

fn print_tax_overview(result: &ProjectionResult) {
    let t = &result.tax_overview;
    println!();
    println!("Steuern ohne Immobilie ({})", t.status.as_str());
    println!("  Einkommensteuer:        {}", euro(t.income_tax));
    println!("  Kirchensteuer:          {}", euro(t.church_tax));
    if let Some(rate) = t.effective_rate {
        println!("  Durchschnittssteuersatz: {} %", format_amount(rate));
    }
    println!("  Grenzsteuersatz:        {} %", format_amount(t.marginal_rate));
}

fn print_summary(result: &ProjectionResult) {
    let s = &result.summary;
    println!();
    println!("Zusammenfassung nach {} Jahren", result.period_years());
    println!("  Eigenkapital (Start):   {}", euro(s.initial_equity));
    println!("  Darlehen:               {}", euro(s.loan_amount));
    println!("  Monatliche Rate:        {}", euro(s.monthly_payment));
    println!("  Monatlicher Cashflow:   {}", euro(s.monthly_cashflow));
    println!("  Immobilienwert:         {}", euro(s.final_property_value));
    println!("  Restschuld:             {}", euro(s.final_loan_balance));
    let repaid = result.loan_repaid_in_year().filter(|_| !s.loan_amount.is_zero());
    if let Some(year) = repaid {
        println!("  Darlehen getilgt:       Jahr {year}");
    }
    println!("  Eigenkapital (Ende):    {}", euro(s.final_equity));
    println!("  Vermögenszuwachs:       {}", euro(s.equity_growth));
    match s.annualized_roi {
        Some(roi) => println!(
            "  Rendite p.a.:           {} %",
            format_amount(roi * Decimal::ONE_HUNDRED)
        ),
        None => println!("  Rendite p.a.:           n/a"),
    }
    println!("  Steuerersparnis gesamt: {}", euro(result.cumulative_tax_savings()));
    println!(
        "    davon Einkommensteuer: {}",
        euro(result.cumulative_income_tax_savings())
    );
    println!(
        "    davon Kirchensteuer:   {}",
        euro(result.cumulative_church_tax_savings())
    );
}
