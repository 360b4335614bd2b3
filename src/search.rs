//! Fund search display.

use anyhow::Result;
use comfy_table::Cell;

use crate::favorites::FavoritesStore;
use crate::fetch::Fetch;
use crate::service::FundDataService;
use crate::ui;

pub async fn run<F: Fetch>(
    service: &FundDataService<F>,
    favorites: &FavoritesStore,
    keyword: &str,
) -> Result<()> {
    favorites.add_search_history(keyword).await;

    let results = service.search(keyword).await;
    if results.is_empty() {
        println!("No funds found for '{}'.", keyword.trim());
        return Ok(());
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Code"),
        ui::header_cell("Name"),
        ui::header_cell("Type"),
        ui::header_cell("Pinyin"),
    ]);

    for result in &results {
        let watched = if favorites.contains(&result.code).await {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(watched),
            Cell::new(&result.code),
            Cell::new(&result.name),
            Cell::new(&result.fund_type),
            Cell::new(&result.pinyin),
        ]);
    }

    println!("{table}");
    println!(
        "{}",
        ui::style_text("* already on the watch list", ui::StyleType::Subtle)
    );
    Ok(())
}
