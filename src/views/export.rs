//! CSV export of the loaded asset list

use chrono::NaiveDate;

use crate::models::Asset;

pub const CSV_HEADER: &str =
    "Name,Category,Serial Number,Brand,Model,Location,Status,Condition,Purchase Date,Purchase Price,Supplier";

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn csv_line(asset: &Asset) -> String {
    let text = |value: &Option<String>| value.clone().unwrap_or_default();
    let fields = [
        asset.name.clone(),
        asset.category_name().unwrap_or_default().to_string(),
        text(&asset.serial_number),
        text(&asset.brand),
        text(&asset.model),
        asset.location.as_str().to_string(),
        asset.asset_status.as_str().to_string(),
        asset.condition_status.as_str().to_string(),
        asset.purchase_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
        // A zero price exports as empty, like a missing one
        asset
            .purchase_price
            .filter(|p| !p.is_zero())
            .map(|p| p.normalize().to_string())
            .unwrap_or_default(),
        text(&asset.supplier_vendor),
    ];
    fields.iter().map(|f| quote(f)).collect::<Vec<_>>().join(",")
}

/// Header row plus one row per asset, in the given order
pub fn assets_to_csv(assets: &[Asset]) -> String {
    std::iter::once(CSV_HEADER.to_string())
        .chain(assets.iter().map(csv_line))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("assets-{}.csv", date.format("%Y-%m-%d"))
}
