//! Historical NAV display.

use anyhow::Result;

use crate::fetch::Fetch;
use crate::service::FundDataService;
use crate::ui;

pub async fn run<F: Fetch>(
    service: &FundDataService<F>,
    code: &str,
    page: usize,
    page_size: usize,
) -> Result<()> {
    let history = service.get_history(code, page, page_size).await;
    if history.points.is_empty() {
        println!("No history available for {code}.");
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Date"),
        ui::header_cell("NAV"),
        ui::header_cell("Accumulated"),
        ui::header_cell("Change (%)"),
    ]);
    for point in &history.points {
        table.add_row(vec![
            ui::text_cell(&point.date),
            ui::text_cell(&point.nav),
            ui::text_cell(&point.accumulated_nav),
            ui::signed_cell(&point.daily_change_pct),
        ]);
    }

    println!("{table}");

    let pages = history.total.div_ceil(history.page_size.max(1));
    println!(
        "{}",
        ui::style_text(
            &format!(
                "Page {} of {} ({} records)",
                history.page, pages, history.total
            ),
            ui::StyleType::Subtle
        )
    );
    Ok(())
}
