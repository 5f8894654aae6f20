use analytics::estimated_annual_income;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Table};
use configuration::Config;
use core_types::SeriesPoint;
use portfolio_backtester::{FetchOutcome, PortfolioState};
use rust_decimal::Decimal;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn pct(fraction: Decimal) -> String {
    format!("{:.2}%", fraction * Decimal::ONE_HUNDRED)
}

pub fn print_allocations(config: &Config) {
    let mut table = new_table();
    table.set_header(vec!["Symbol", "Name", "Weight", "Proxy", "Est. Yield"]);
    for a in &config.portfolio.allocations {
        table.add_row(vec![
            Cell::new(&a.symbol),
            Cell::new(&a.display_name),
            Cell::new(pct(a.weight_fraction)),
            Cell::new(a.proxy_symbol.as_deref().unwrap_or("-")),
            Cell::new(pct(a.estimated_yield_fraction)),
        ]);
    }
    println!("{table}");

    let total = config.total_weight();
    let total_cell = if total == Decimal::ONE {
        Cell::new(pct(total)).fg(Color::Green)
    } else {
        Cell::new(pct(total)).fg(Color::Yellow)
    };
    let mut summary = new_table();
    summary.add_row(vec![Cell::new("Total weight"), total_cell]);
    summary.add_row(vec![
        Cell::new("Starting capital"),
        Cell::new(format!("{:.2}", config.portfolio.start_value)),
    ]);
    summary.add_row(vec![
        Cell::new("Estimated annual income"),
        Cell::new(format!(
            "{:.2}",
            estimated_annual_income(&config.portfolio.allocations, config.portfolio.start_value)
        )),
    ]);
    println!("{summary}");
}

pub fn print_fetch_status(state: &PortfolioState) {
    let mut table = new_table();
    table.set_header(vec!["Symbol", "Status", "Points", "Detail"]);
    for (symbol, outcome) in &state.raw {
        let row = match outcome {
            FetchOutcome::Fetched { series } => vec![
                Cell::new(symbol),
                Cell::new("fetched").fg(Color::Green),
                Cell::new(series.len()),
                Cell::new(first_last(series)),
            ],
            FetchOutcome::Failed { reason } => vec![
                Cell::new(symbol),
                Cell::new("failed").fg(Color::Red),
                Cell::new(0),
                Cell::new(reason),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
}

fn first_last(series: &[SeriesPoint]) -> String {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => format!("{} .. {}", first.date, last.date),
        _ => "no data".to_string(),
    }
}

fn optional_pct(value: Option<f64>) -> String {
    value.map_or("n/a".to_string(), |v| format!("{:.2}%", v))
}

pub fn print_summary(state: &PortfolioState) {
    let report = &state.report;
    let mut table = new_table();
    table.set_header(vec!["Metric", "Value"]);
    table.add_row(vec!["As of".to_string(), state.as_of.to_string()]);
    table.add_row(vec!["Months".to_string(), report.months.to_string()]);
    table.add_row(vec!["Start value".to_string(), format!("{:.2}", report.start_value)]);
    table.add_row(vec!["Final value".to_string(), format!("{:.2}", report.final_value)]);
    table.add_row(vec!["Total return".to_string(), format!("{:.2}%", report.total_return_pct)]);
    table.add_row(vec![
        "Annualized return".to_string(),
        optional_pct(report.annualized_return_pct),
    ]);
    table.add_row(vec!["Trailing CAGR".to_string(), optional_pct(report.trailing_cagr_pct)]);
    table.add_row(vec![
        "Max drawdown".to_string(),
        format!("{:.2} ({:.2}%)", report.max_drawdown, report.max_drawdown_pct),
    ]);
    table.add_row(vec![
        "Projected end value".to_string(),
        report
            .projected_end_value
            .map_or("no projection available".to_string(), |v| format!("{:.2}", v)),
    ]);
    table.add_row(vec![
        "Estimated annual income".to_string(),
        format!("{:.2}", report.estimated_annual_income),
    ]);
    table.add_row(vec!["Total weight".to_string(), pct(report.total_weight)]);
    println!("{table}");
}

/// Prints every `every`-th point of the backtest and forecast, always
/// including the last one of each.
pub fn print_series(state: &PortfolioState, every: usize) {
    let mut table = new_table();
    table.set_header(vec!["Date", "Value", "Kind"]);
    for (points, kind) in [(&state.backtest, "backtest"), (&state.forecast, "forecast")] {
        let len = points.len();
        for (i, point) in points.iter().enumerate() {
            if (len - 1 - i) % every == 0 {
                table.add_row(vec![
                    point.date.to_string(),
                    format!("{:.2}", point.value),
                    kind.to_string(),
                ]);
            }
        }
    }
    println!("{table}");
}
