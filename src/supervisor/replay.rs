// src/supervisor/replay.rs
// Scripted event source: a saved page plus a JSON list of what happened next.
//
// {"url": "https://www.nellisauction.com/search",
//  "steps": [{"wait": {"ms": 600}},
//            {"append": {"into": "results", "html": "<div ...>"}},
//            {"navigate": {"url": "...?page=2", "html": "..."}},
//            {"apply": {"settings": {"hideUsed": true}}}]}

use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use crate::config::{Settings, Timings};
use crate::dom::{PageTreeMut, Tree};
use crate::engine::PassSummary;
use crate::error::Result;
use crate::host::{Host, RecordingHost};
use crate::messages::{Ack, Message};
use crate::store::SettingsSource;

use super::events::{Batch, Event, EventSource};
use super::scheduler::ManualScheduler;
use super::supervisor::{Phase, Supervisor};

pub const DEFAULT_URL: &str = "https://www.nellisauction.com/search";

#[derive(Clone, Debug, Deserialize)]
pub struct Script {
    #[serde(default = "default_url")]
    pub url: String,
    /// Overrides the settings store for this run.
    #[serde(default)]
    pub settings: Option<Settings>,
    pub steps: Vec<Step>,
}

fn default_url() -> String {
    s!(DEFAULT_URL)
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Wait { ms: u64 },
    /// Append `html` to the element with id `into` (default: body).
    Append {
        #[serde(default)]
        into: Option<String>,
        html: String,
    },
    /// Client-side navigation; `html` replaces the body when given.
    Navigate {
        url: String,
        #[serde(default)]
        html: Option<String>,
    },
    HistoryPop {
        url: String,
        #[serde(default)]
        html: Option<String>,
    },
    Apply { settings: Settings },
}

impl Script {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

/// Replays a script's steps one batch at a time.
pub struct ScriptSource {
    steps: VecDeque<Step>,
}

impl ScriptSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps: steps.into() }
    }
}

impl EventSource<Tree> for ScriptSource {
    fn next_batch(&mut self, tree: &mut Tree, host: &mut dyn Host) -> Option<Batch> {
        let step = self.steps.pop_front()?;
        let batch = match step {
            Step::Wait { ms } => Batch { wait: Duration::from_millis(ms), events: Vec::new() },
            Step::Append { into, html } => {
                let parent = into.as_deref().and_then(|id| tree.by_id(id)).unwrap_or_else(|| tree.body());
                tree.append_html(parent, &html);
                Batch { events: vec![Event::Mutation], ..Default::default() }
            }
            Step::Navigate { url, html } => navigation(tree, host, &url, html, Event::AddressChanged),
            Step::HistoryPop { url, html } => navigation(tree, host, &url, html, Event::HistoryPop),
            Step::Apply { settings } => {
                Batch { events: vec![Event::Message(Message::ApplyFilters { settings })], ..Default::default() }
            }
        };
        Some(batch)
    }
}

fn navigation(tree: &mut Tree, host: &mut dyn Host, url: &str, html: Option<String>, signal: Event) -> Batch {
    host.set_url(url);
    let mut events = vec![signal];
    if let Some(html) = html {
        let body = tree.body();
        tree.replace_children(body, &html);
        events.push(Event::Mutation);
    }
    Batch { events, ..Default::default() }
}

/// Feed every batch to the supervisor, then let pending timers run out.
pub fn drive<T, H, E>(sup: &mut Supervisor<ManualScheduler>, tree: &mut T, host: &mut H, source: &mut E) -> Vec<Ack>
where
    T: PageTreeMut + ?Sized,
    H: Host,
    E: EventSource<T> + ?Sized,
{
    let mut acks = Vec::new();
    while let Some(batch) = source.next_batch(tree, host) {
        for ev in batch.events {
            acks.extend(sup.handle(tree, &*host, ev));
        }
        sup.advance(tree, batch.wait);
    }
    sup.run_until_idle(tree);
    acks
}

#[derive(Clone, Debug)]
pub struct ReplayReport {
    pub phase: Phase,
    pub passes: usize,
    pub acks: usize,
    pub final_url: String,
    /// Full navigations requested (the saved-location redirect).
    pub navigations: Vec<String>,
    pub last_summary: Option<PassSummary>,
}

impl fmt::Display for ReplayReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "phase: {:?}", self.phase)?;
        writeln!(f, "passes: {}, acks: {}", self.passes, self.acks)?;
        writeln!(f, "url: {}", self.final_url)?;
        for n in &self.navigations {
            writeln!(f, "redirect: {n}")?;
        }
        if let Some(s) = &self.last_summary {
            writeln!(f, "{s}")?;
        }
        Ok(())
    }
}

/// Load `page`, run start-up, replay `script`. Returns the final page.
pub fn run_script<F: SettingsSource + ?Sized>(page: &str, script: Script, store: &mut F, timings: Timings) -> (Tree, ReplayReport) {
    let mut tree = Tree::parse(page);
    let mut host = RecordingHost::at(&script.url);
    let mut sup = Supervisor::manual(timings);

    match script.settings {
        Some(s) => sup.init(&mut tree, &mut host, &mut || -> Result<Settings> { Ok(s.clone()) }),
        None => sup.init(&mut tree, &mut host, store),
    };

    let acks = if sup.phase() == Phase::Redirecting {
        Vec::new()
    } else {
        drive(&mut sup, &mut tree, &mut host, &mut ScriptSource::new(script.steps))
    };

    let report = ReplayReport {
        phase: sup.phase(),
        passes: sup.passes(),
        acks: acks.len(),
        final_url: host.url.clone(),
        navigations: host.navigations,
        last_summary: sup.last_summary().cloned(),
    };
    (tree, report)
}
