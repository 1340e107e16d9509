// tests/common/mod.rs
//
// Page builders shaped like a Nellis search results page.
//
#![allow(dead_code)]

pub const SEARCH_URL: &str = "https://www.nellisauction.com/search?query=tools";

/// One listing card: image link, title link with heading, label spans.
pub fn card(id: u32, title: &str, labels: &[&str]) -> String {
    let slug = title.replace(' ', "-");
    let spans: String = labels.iter().map(|l| format!(r#"<span class="text-gray-900">{l}</span>"#)).collect();
    format!(
        r#"<div class="col" data-ax="item-card-container"><a href="/p/{slug}/{id}"><img src="/img/{id}.jpg" alt=""></a><a data-ax="item-card-title-link" href="/p/{slug}/{id}"><h6 class="line-clamp-2">{title}</h6></a><div class="flex">{spans}</div></div>"#
    )
}

pub fn page(cards: &[String]) -> String {
    format!(
        r#"<!DOCTYPE html><html><head><title>Search</title><script>window.__n = "<div>";</script></head><body><header><a href="/">Home</a></header><div id="results">{}</div></body></html>"#,
        cards.concat()
    )
}

/// Five listings:
/// 1 used, 2 none, 3 minor damage, 4 none (Henderson), 5 unknown-missing.
/// Everything but 4 is at North Las Vegas.
pub fn five_listings() -> String {
    page(&[
        card(101, "Cordless Drill Kit", &["Used", "North Las Vegas"]),
        card(102, "Standing Desk Frame", &["North Las Vegas"]),
        card(103, "Air Fryer 6 Quart", &["Minor Damage", "North Las Vegas"]),
        card(104, "Patio Umbrella", &["Henderson"]),
        card(105, "Robot Vacuum", &["Unknown If Missing Parts", "North Las Vegas"]),
    ])
}
