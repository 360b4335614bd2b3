//! Watch-list display: batch valuations merged with holding profit.

use anyhow::Result;
use comfy_table::Cell;

use crate::favorites::FavoritesStore;
use crate::fetch::Fetch;
use crate::service::FundDataService;
use crate::ui;

pub async fn run<F: Fetch>(
    service: &FundDataService<F>,
    favorites: &FavoritesStore,
    refresh: bool,
) -> Result<()> {
    let entries = favorites.list().await;
    if entries.is_empty() {
        println!("Watch list is empty. Add a fund with `fundwatch add <code>`.");
        return Ok(());
    }

    let pb = ui::new_progress_bar(entries.len() as u64, true);
    pb.set_message("Fetching valuations...");
    let items = service.get_batch_valuation(&entries, !refresh).await;
    pb.finish_and_clear();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("NAV"),
        ui::header_cell("Estimate"),
        ui::header_cell("Change (%)"),
        ui::header_cell("Market Value"),
        ui::header_cell("Profit"),
        ui::header_cell("Rate (%)"),
    ]);

    for item in &items {
        let valuation = &item.valuation;
        let (market_value, profit, rate) = match &item.profit {
            Some(p) => (
                p.market_value.as_str(),
                p.profit.as_str(),
                p.profit_rate_pct.as_str(),
            ),
            None => ("", "", ""),
        };
        table.add_row(vec![
            Cell::new(&valuation.code),
            Cell::new(&valuation.name),
            ui::text_cell(&valuation.nav),
            ui::text_cell(&valuation.estimate_value),
            ui::signed_cell(&valuation.estimate_change_pct),
            ui::text_cell(market_value),
            ui::signed_cell(profit),
            ui::signed_cell(rate),
        ]);
    }

    println!("{table}");

    let dropped = entries.len() - items.len();
    if dropped > 0 {
        println!(
            "{}",
            ui::style_text(
                &format!("{dropped} fund(s) unavailable right now."),
                ui::StyleType::Subtle
            )
        );
    }
    if let Some(first) = items.first()
        && !first.valuation.estimate_time.is_empty()
    {
        println!(
            "{}",
            ui::style_text(
                &format!("Estimates as of {}", first.valuation.estimate_time),
                ui::StyleType::Subtle
            )
        );
    }

    Ok(())
}
