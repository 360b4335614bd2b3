//! Fund detail display.

use anyhow::Result;
use comfy_table::Cell;

use crate::fetch::Fetch;
use crate::service::FundDataService;
use crate::ui;

pub async fn run<F: Fetch>(service: &FundDataService<F>, code: &str) -> Result<()> {
    let record = service.get_detail(code).await?;
    let valuation = &record.valuation;

    let title = if valuation.name.is_empty() {
        valuation.code.clone()
    } else {
        format!("{} ({})", valuation.name, valuation.code)
    };
    println!("{}\n", ui::style_text(&title, ui::StyleType::Title));

    let mut table = ui::new_styled_table();
    let mut row = |label: &str, cell: Cell| {
        table.add_row(vec![Cell::new(ui::style_text(label, ui::StyleType::Label)), cell]);
    };

    row(
        &format!("NAV ({})", valuation.nav_date),
        ui::text_cell(&valuation.nav),
    );
    row(
        &format!("Estimate ({})", valuation.estimate_time),
        ui::text_cell(&valuation.estimate_value),
    );
    row(
        "Estimated change (%)",
        ui::signed_cell(&valuation.estimate_change_pct),
    );
    row("Listed rate (%)", ui::text_cell(&record.source_rate));
    row("Effective rate (%)", ui::text_cell(&record.rate));
    row("Minimum purchase", ui::text_cell(&record.min_purchase));
    row("Return 1M (%)", ui::signed_cell(&record.yield_1m));
    row("Return 3M (%)", ui::signed_cell(&record.yield_3m));
    row("Return 6M (%)", ui::signed_cell(&record.yield_6m));
    row("Return 1Y (%)", ui::signed_cell(&record.yield_1y));

    let managers: Vec<&str> = record.managers.iter().map(|m| m.name.as_str()).collect();
    row("Managers", ui::text_cell(&managers.join(", ")));
    row(
        "Stock holdings",
        ui::text_cell(&record.stock_holdings.len().to_string()),
    );
    row(
        "Bond holdings",
        ui::text_cell(&record.bond_holdings.len().to_string()),
    );

    println!("{table}");

    if !record.net_worth_trend.is_empty() {
        println!(
            "\n{}",
            ui::style_text("Recent NAV", ui::StyleType::Label)
        );
        let mut recent = ui::new_styled_table();
        recent.set_header(vec![
            ui::header_cell("Date"),
            ui::header_cell("NAV"),
            ui::header_cell("Change (%)"),
        ]);
        for point in record.net_worth_trend.iter().rev().take(5) {
            recent.add_row(vec![
                ui::text_cell(&point.date),
                ui::text_cell(&point.nav),
                ui::signed_cell(&point.daily_change_pct),
            ]);
        }
        println!("{recent}");
    }

    Ok(())
}
