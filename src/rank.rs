//! Fund ranking display.

use anyhow::Result;
use comfy_table::Cell;

use crate::fetch::Fetch;
use crate::service::FundDataService;
use crate::ui;

pub async fn run<F: Fetch>(
    service: &FundDataService<F>,
    fund_type: &str,
    sort: &str,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let entries = service.get_rank(fund_type, sort, page, page_size).await;
    if entries.is_empty() {
        println!("Ranking is unavailable right now.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("NAV"),
        ui::header_cell("Date"),
        ui::header_cell("Day"),
        ui::header_cell("Week"),
        ui::header_cell("1M"),
        ui::header_cell("3M"),
        ui::header_cell("6M"),
        ui::header_cell("1Y"),
    ]);
    for entry in &entries {
        table.add_row(vec![
            Cell::new(&entry.code),
            Cell::new(&entry.name),
            ui::text_cell(&entry.nav),
            ui::text_cell(&entry.nav_date),
            ui::signed_cell(&entry.day_change_pct),
            ui::signed_cell(&entry.week_change_pct),
            ui::signed_cell(&entry.month_change_pct),
            ui::signed_cell(&entry.three_month_change_pct),
            ui::signed_cell(&entry.six_month_change_pct),
            ui::signed_cell(&entry.year_change_pct),
        ]);
    }

    println!("{table}");
    Ok(())
}
