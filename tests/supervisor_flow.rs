// tests/supervisor_flow.rs
//
// Change supervisor on virtual time.
//
mod common;

use std::time::Duration;

use nellis_helper::config::{Settings, Timings};
use nellis_helper::dom::query::select_first;
use nellis_helper::dom::{PageTree, Tree};
use nellis_helper::engine::markers;
use nellis_helper::host::{Host, RecordingHost};
use nellis_helper::messages::{Ack, Message};
use nellis_helper::supervisor::{Event, Phase, Supervisor, Task};
use nellis_helper::Result;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn stored(settings: Settings) -> impl FnMut() -> Result<Settings> {
    move || Ok(settings.clone())
}

fn started(html: &str, settings: Settings) -> (Supervisor<nellis_helper::supervisor::ManualScheduler>, Tree, RecordingHost) {
    let mut tree = Tree::parse(html);
    let mut host = RecordingHost::at(common::SEARCH_URL);
    let mut sup = Supervisor::manual(Timings::default());
    sup.init(&mut tree, &mut host, &mut stored(settings));
    (sup, tree, host)
}

#[test]
fn saved_location_redirects_once() {
    let saved = Settings { location_filter: "Dean Martin".into(), ..Settings::default() };
    let (sup, _, host) = started(&common::five_listings(), saved.clone());
    assert_eq!(sup.phase(), Phase::Redirecting);
    assert_eq!(sup.passes(), 0);
    assert_eq!(host.navigations, vec!["https://www.nellisauction.com/search?query=tools&Location+Name=Dean+Martin"]);

    // the reload lands on the corrected address
    let mut tree = Tree::parse(&common::five_listings());
    let mut host = RecordingHost::at(&host.navigations[0]);
    let mut sup = Supervisor::manual(Timings::default());
    assert_eq!(sup.init(&mut tree, &mut host, &mut stored(saved)), Phase::Loading(5));
    assert!(host.navigations.is_empty());
}

#[test]
fn late_listings_picked_up_by_retries() {
    let mut tree = Tree::parse(&common::page(&[]));
    let mut host = RecordingHost::at(common::SEARCH_URL);
    let mut sup = Supervisor::manual(Timings::default());
    sup.init(&mut tree, &mut host, &mut stored(Settings::default()));

    sup.advance(&mut tree, ms(1000));
    sup.advance(&mut tree, ms(1000));
    assert_eq!(sup.phase(), Phase::Loading(3));

    let results = tree.by_id("results").unwrap();
    tree.append_html(results, &common::card(1, "Shop Vacuum", &["Used"]));
    sup.advance(&mut tree, ms(1000));
    assert_eq!(sup.phase(), Phase::Loading(2));
    sup.advance(&mut tree, ms(1000));
    assert_eq!(sup.phase(), Phase::Settled);
    assert_eq!(sup.passes(), 4);
}

#[test]
fn mutations_debounced_into_one_pass() {
    let (mut sup, mut tree, host) = started(&common::five_listings(), Settings::default());
    sup.advance(&mut tree, ms(1000));
    let before = sup.passes();

    let results = tree.by_id("results").unwrap();
    for i in 0..3u32 {
        tree.append_html(results, &common::card(200 + i, "Folding Table", &[]));
        sup.handle(&mut tree, &host, Event::Mutation);
        sup.advance(&mut tree, ms(300));
    }
    assert_eq!(sup.passes(), before);
    sup.advance(&mut tree, ms(200));
    assert_eq!(sup.passes(), before + 1);
    assert_eq!(sup.last_summary().map(|s| s.listings), Some(8));
}

#[test]
fn mutation_without_new_listings_runs_nothing() {
    let (mut sup, mut tree, host) = started(&common::five_listings(), Settings::default());
    sup.advance(&mut tree, ms(1000));
    let before = sup.passes();
    sup.handle(&mut tree, &host, Event::Mutation);
    sup.advance(&mut tree, ms(500));
    assert_eq!(sup.passes(), before);
}

#[test]
fn navigation_clears_then_settles() {
    let (mut sup, mut tree, mut host) = started(&common::five_listings(), Settings::default());
    sup.advance(&mut tree, ms(1000));
    assert_eq!(markers::annotations(&tree).len(), 5);

    host.set_url("https://www.nellisauction.com/search?query=tools&page=2");
    sup.handle(&mut tree, &host, Event::AddressChanged);
    assert!(!markers::any_processed(&tree));
    assert!(markers::annotations(&tree).is_empty());
    assert_eq!(sup.scheduler().pending_tasks(), vec![Task::NavigationSettle]);

    sup.advance(&mut tree, ms(999));
    assert!(!markers::any_processed(&tree));
    sup.advance(&mut tree, ms(1));
    assert!(markers::any_processed(&tree));
    assert_eq!(markers::annotations(&tree).len(), 5);
}

#[test]
fn address_change_seen_through_mutation() {
    let (mut sup, mut tree, mut host) = started(&common::five_listings(), Settings::default());
    sup.advance(&mut tree, ms(1000));
    host.set_url("https://www.nellisauction.com/search?query=lamps");
    sup.handle(&mut tree, &host, Event::Mutation);
    assert!(!markers::any_processed(&tree));
    let mut tasks = sup.scheduler().pending_tasks();
    tasks.sort();
    assert_eq!(tasks, vec![Task::Debounce, Task::NavigationSettle]);
}

#[test]
fn history_pop_behaves_like_navigation() {
    let (mut sup, mut tree, host) = started(&common::five_listings(), Settings::default());
    sup.advance(&mut tree, ms(1000));
    sup.handle(&mut tree, &host, Event::HistoryPop);
    assert!(markers::annotations(&tree).is_empty());
    sup.advance(&mut tree, ms(1000));
    assert_eq!(markers::annotations(&tree).len(), 5);
}

#[test]
fn apply_message_replaces_settings_and_runs_now() {
    let (mut sup, mut tree, host) = started(&common::five_listings(), Settings::default());
    let before = sup.passes();
    let settings = Settings { hide_used: true, show_amazon_links: false, ..Settings::default() };
    let ack = sup.handle(&mut tree, &host, Event::Message(Message::ApplyFilters { settings: settings.clone() }));
    assert_eq!(ack, Some(Ack { success: true }));
    assert_eq!(sup.passes(), before + 1);
    assert_eq!(sup.settings(), &settings);
    assert_eq!(sup.last_summary().map(|s| s.hidden_ids.clone()), Some(vec!["101".to_string()]));
    assert!(select_first(&tree, tree.root(), &markers::ANNOTATION).is_none());
}

#[test]
fn get_settings_is_not_answered_by_the_page() {
    let (mut sup, mut tree, host) = started(&common::five_listings(), Settings::default());
    assert_eq!(sup.handle(&mut tree, &host, Event::Message(Message::GetSettings)), None);
}

#[test]
fn unreadable_store_uses_defaults() {
    let mut tree = Tree::parse(&common::five_listings());
    let mut host = RecordingHost::at(common::SEARCH_URL);
    let mut sup = Supervisor::manual(Timings::default());
    let mut source = nellis_helper::store::SettingsStore::new("/nonexistent/\0bad");
    assert_eq!(sup.init(&mut tree, &mut host, &mut source), Phase::Loading(5));
    assert_eq!(sup.settings(), &Settings::default());
    assert_eq!(sup.last_summary().map(|s| s.annotated), Some(5));
}
