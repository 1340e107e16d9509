// src/host.rs
// The host execution context around the page: its address, full navigations,
// and new browsing contexts (tabs). The engine never touches these directly.

pub trait Host {
    fn current_url(&self) -> String;
    /// Client-side address change (history push or pop): no reload.
    fn set_url(&mut self, url: &str);
    /// Full navigation (page reload at `url`).
    fn navigate(&mut self, url: &str);
    /// Open `url` in a new browsing context, leaving this page alone.
    fn open_new_context(&mut self, url: &str);
}

/// In-memory host that records what it was asked to do.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingHost {
    pub url: String,
    pub navigations: Vec<String>,
    pub opened: Vec<String>,
}

impl RecordingHost {
    pub fn at(url: &str) -> Self {
        Self { url: s!(url), ..Default::default() }
    }
}

impl Host for RecordingHost {
    fn current_url(&self) -> String {
        self.url.clone()
    }

    fn set_url(&mut self, url: &str) {
        self.url = s!(url);
    }

    fn navigate(&mut self, url: &str) {
        self.url = s!(url);
        self.navigations.push(s!(url));
    }

    fn open_new_context(&mut self, url: &str) {
        self.opened.push(s!(url));
    }
}
