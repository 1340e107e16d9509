// src/supervisor/supervisor.rs

use std::time::Duration;

use crate::config::{Settings, Timings};
use crate::dom::PageTreeMut;
use crate::engine::{apply_pass, markers, PassSummary};
use crate::host::Host;
use crate::messages::{Ack, Message};
use crate::specs::listings;
use crate::store::SettingsSource;

use super::events::Event;
use super::redirect::location_redirect;
use super::scheduler::{ManualScheduler, Scheduler, Task, TimerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    /// A full navigation to the saved location was requested; nothing else runs.
    Redirecting,
    /// Passes left before giving up on listings appearing.
    Loading(u32),
    Settled,
}

pub struct Supervisor<S: Scheduler> {
    scheduler: S,
    timings: Timings,
    settings: Settings,
    phase: Phase,
    watching: bool,
    last_url: String,
    debounce: Option<TimerId>,
    passes: usize,
    last_summary: Option<PassSummary>,
}

impl<S: Scheduler> Supervisor<S> {
    pub fn new(scheduler: S, timings: Timings) -> Self {
        Self {
            scheduler,
            timings,
            settings: Settings::default(),
            phase: Phase::Uninitialized,
            watching: false,
            last_url: s!(),
            debounce: None,
            passes: 0,
            last_summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_watching(&self) -> bool {
        self.watching
    }

    /// Apply passes run so far.
    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn last_summary(&self) -> Option<&PassSummary> {
        self.last_summary.as_ref()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start-up: settings, redirect check, then the loading passes.
    ///
    /// A settings fetch failure is logged and replaced by the defaults.
    pub fn init<T, H, F>(&mut self, tree: &mut T, host: &mut H, source: &mut F) -> Phase
    where
        T: PageTreeMut + ?Sized,
        H: Host + ?Sized,
        F: SettingsSource + ?Sized,
    {
        if self.phase != Phase::Uninitialized {
            return self.phase;
        }
        let url = host.current_url();
        logd!("Content script loaded on {url}");

        self.settings = source.fetch().unwrap_or_else(|e| {
            logw!("Could not load settings, using defaults ({e})");
            Settings::default()
        });

        if let Some(to) = location_redirect(&self.settings, &url) {
            host.navigate(&to);
            self.phase = Phase::Redirecting;
            return self.phase;
        }

        self.last_url = url;
        self.watching = true;
        self.enter_loading(tree, self.timings.retry_attempts);
        self.phase
    }

    /// React to one signal. Only messages produce a reply.
    pub fn handle<T, H>(&mut self, tree: &mut T, host: &H, event: Event) -> Option<Ack>
    where
        T: PageTreeMut + ?Sized,
        H: Host + ?Sized,
    {
        match event {
            Event::Message(Message::ApplyFilters { settings }) => {
                logd!("Received settings: {settings:?}");
                self.settings = settings;
                self.run_pass(tree);
                Some(Ack { success: true })
            }
            Event::Message(Message::GetSettings) => None,
            _ if !self.watching => None,
            Event::Mutation => {
                let url = host.current_url();
                if url != self.last_url {
                    logd!("URL changed, reapplying filters");
                    self.on_navigation(tree, url);
                }
                if let Some(id) = self.debounce.take() {
                    self.scheduler.cancel(id);
                }
                self.debounce = Some(self.scheduler.schedule_after(self.timings.debounce, Task::Debounce));
                None
            }
            Event::AddressChanged | Event::HistoryPop => {
                logd!("Navigation detected, reapplying filters");
                self.on_navigation(tree, host.current_url());
                None
            }
        }
    }

    /// Run a timer's continuation.
    pub fn fire<T: PageTreeMut + ?Sized>(&mut self, tree: &mut T, task: Task) {
        match task {
            Task::RetryCheck => {
                let Phase::Loading(left) = self.phase else { return };
                if markers::any_processed(tree) {
                    self.phase = Phase::Settled;
                } else if left > 0 {
                    logd!("Retrying... ({left} attempts left)");
                    self.enter_loading(tree, left - 1);
                } else {
                    logd!("no listings after loading retries, giving up");
                    self.phase = Phase::Settled;
                }
            }
            Task::Debounce => {
                self.debounce = None;
                let fresh = listings::discover(tree).len();
                if fresh > 0 {
                    logd!("Found {fresh} new product links");
                    self.run_pass(tree);
                }
            }
            Task::NavigationSettle => {
                self.run_pass(tree);
            }
        }
    }

    /// One apply pass with the current settings snapshot.
    pub fn run_pass<T: PageTreeMut + ?Sized>(&mut self, tree: &mut T) -> &PassSummary {
        let summary = apply_pass(tree, &self.settings);
        self.passes += 1;
        self.last_summary.insert(summary)
    }

    fn enter_loading<T: PageTreeMut + ?Sized>(&mut self, tree: &mut T, left: u32) {
        self.phase = Phase::Loading(left);
        self.run_pass(tree);
        self.scheduler.schedule_after(self.timings.retry_check, Task::RetryCheck);
    }

    fn on_navigation<T: PageTreeMut + ?Sized>(&mut self, tree: &mut T, url: String) {
        self.last_url = url;
        markers::forget_processed(tree);
        self.scheduler.schedule_after(self.timings.nav_settle, Task::NavigationSettle);
    }
}

impl Supervisor<ManualScheduler> {
    pub fn manual(timings: Timings) -> Self {
        Self::new(ManualScheduler::new(), timings)
    }

    /// Move virtual time forward by `by`, firing every timer that comes due
    /// (including ones scheduled by earlier firings) in due order.
    pub fn advance<T: PageTreeMut + ?Sized>(&mut self, tree: &mut T, by: Duration) {
        let until = self.scheduler.now() + by;
        while let Some((_, task)) = self.scheduler.pop_due(until) {
            self.fire(tree, task);
        }
        self.scheduler.set_now(until);
    }

    /// Fire timers until none are left.
    pub fn run_until_idle<T: PageTreeMut + ?Sized>(&mut self, tree: &mut T) {
        while let Some(due) = self.scheduler.next_due() {
            let by = due.saturating_sub(self.scheduler.now());
            self.advance(tree, by);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Tree;
    use crate::error::Error;
    use crate::host::RecordingHost;

    const URL: &str = "https://www.nellisauction.com/search?query=lamp";
    const CARD: &str = r#"<div data-ax="item-card-container"><a data-ax="item-card-title-link" href="/p/Desk-Lamp/7"><h6>Desk Lamp</h6></a><span>Used</span></div>"#;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn defaults() -> impl FnMut() -> crate::error::Result<Settings> {
        || Ok(Settings::default())
    }

    #[test]
    fn settles_once_listings_are_marked() {
        let mut tree = Tree::parse(CARD);
        let mut host = RecordingHost::at(URL);
        let mut sup = Supervisor::manual(Timings::default());
        assert_eq!(sup.init(&mut tree, &mut host, &mut defaults()), Phase::Loading(5));
        assert_eq!(sup.passes(), 1);
        sup.advance(&mut tree, ms(1000));
        assert_eq!(sup.phase(), Phase::Settled);
        assert_eq!(sup.passes(), 1);
    }

    #[test]
    fn empty_page_gives_up_after_retries() {
        let mut tree = Tree::parse("<main></main>");
        let mut host = RecordingHost::at(URL);
        let mut sup = Supervisor::manual(Timings::default());
        sup.init(&mut tree, &mut host, &mut defaults());
        sup.advance(&mut tree, ms(1000));
        assert_eq!(sup.phase(), Phase::Loading(4));
        sup.run_until_idle(&mut tree);
        assert_eq!(sup.phase(), Phase::Settled);
        assert_eq!(sup.passes(), 6);
    }

    #[test]
    fn failed_fetch_falls_back_to_defaults() {
        let mut tree = Tree::parse(CARD);
        let mut host = RecordingHost::at(URL);
        let mut sup = Supervisor::manual(Timings::default());
        let mut failing = || -> crate::error::Result<Settings> { Err(Error::Settings(s!("store offline"))) };
        assert_eq!(sup.init(&mut tree, &mut host, &mut failing), Phase::Loading(5));
        assert_eq!(sup.settings(), &Settings::default());
    }

    #[test]
    fn events_before_init_are_ignored_but_messages_are_not() {
        let mut tree = Tree::parse(CARD);
        let host = RecordingHost::at(URL);
        let mut sup = Supervisor::manual(Timings::default());
        assert_eq!(sup.handle(&mut tree, &host, Event::Mutation), None);
        assert_eq!(sup.scheduler().pending(), 0);
        let ack = sup.handle(&mut tree, &host, Event::Message(Message::ApplyFilters { settings: Settings::default() }));
        assert_eq!(ack, Some(Ack { success: true }));
    }
}
