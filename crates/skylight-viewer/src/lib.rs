//! Native viewer for Skylight gallery pages.
//!
//! This crate ties the page model (anchor references), EXIF metadata
//! injection, the fading metadata panel, press-release gesture
//! navigation, and back/forward history into the [`ViewerWidget`] --
//! the top-level component a frontend drives with input events and
//! frame ticks. Pages come from a pluggable [`DocumentFetcher`], with
//! file and HTTP implementations provided.

pub mod animation;
pub mod gesture;
pub mod loader;
pub mod metadata;
pub mod nav;
pub mod page;
pub mod panel;

#[cfg(test)]
pub(crate) mod test_utils;

// ------------------------------------------------------------------
// Public re-exports
// ------------------------------------------------------------------

pub use gesture::{Gesture, GestureTracker, Zone};
pub use loader::http::HttpFetcher;
pub use loader::{DocumentFetcher, FileFetcher, Url};
pub use nav::{HistoryEntry, NavigationController};
pub use page::PageRefs;
pub use panel::{ExifPanel, PanelState};

// ------------------------------------------------------------------
// Imports
// ------------------------------------------------------------------

use log::{debug, info, warn};

use skylight_markup::dom::Document;
use skylight_markup::parser;
use skylight_types::error::{Result, SkylightError};
use skylight_types::input::InputEvent;

// ------------------------------------------------------------------
// ViewerConfig
// ------------------------------------------------------------------

/// Page geometry and timing knobs for the viewer.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Page width in pixels. Release positions are normalized against
    /// it before zone classification.
    pub page_width: u32,
    /// Page height in pixels.
    pub page_height: u32,
    /// Metadata panel fade duration in milliseconds.
    pub fade_ms: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            page_width: 1024,
            page_height: 768,
            fade_ms: panel::DEFAULT_FADE_MS,
        }
    }
}

// ------------------------------------------------------------------
// ViewerWidget
// ------------------------------------------------------------------

/// Top-level viewer component.
///
/// Owns the current document and its resolved anchor references, the
/// metadata panel, the gesture tracker, and navigation history. The
/// frontend feeds it [`InputEvent`]s with a monotonic timestamp and
/// calls [`ViewerWidget::tick`] once per frame to advance animations.
pub struct ViewerWidget {
    /// Geometry and timing configuration.
    pub config: ViewerConfig,

    /// Document source (file, HTTP, or a test double).
    fetcher: Box<dyn DocumentFetcher>,

    /// Back/forward history.
    nav: NavigationController,

    /// Parsed document of the current page.
    document: Option<Document>,

    /// Anchor references resolved once per page load.
    refs: PageRefs,

    /// EXIF metadata panel for the current page.
    panel: ExifPanel,

    /// Press/release pairing for gesture recognition.
    tracker: GestureTracker,

    /// Blocking error message, shown until acknowledged.
    error_banner: Option<String>,

    /// Whether the frontend should shut down.
    quit: bool,
}

impl ViewerWidget {
    /// Create a widget with the given configuration and page source.
    pub fn new(config: ViewerConfig, fetcher: Box<dyn DocumentFetcher>) -> Self {
        let fade_ms = config.fade_ms;
        Self {
            config,
            fetcher,
            nav: NavigationController::new(),
            document: None,
            refs: PageRefs::default(),
            panel: ExifPanel::new(fade_ms),
            tracker: GestureTracker::new(),
            error_banner: None,
            quit: false,
        }
    }

    // ---------------------------------------------------------------
    // Loading / navigation
    // ---------------------------------------------------------------

    /// Load a page and make it the current history entry.
    ///
    /// A fetcher that cannot speak the url's scheme raises the error
    /// banner and leaves the current page in place; that case returns
    /// `Ok`. Every other failure is returned to the caller.
    pub fn load(&mut self, url: &str) -> Result<()> {
        let Some(parsed) = Url::parse(url) else {
            return Err(SkylightError::Fetch(format!("not a valid url: {url}")));
        };
        if !self.present(&parsed)? {
            return Ok(());
        }
        let title = self
            .document
            .as_ref()
            .and_then(|doc| doc.title())
            .unwrap_or_default();
        self.nav.navigate(&parsed.to_string(), &title);
        info!("loaded {parsed} ({title})");
        Ok(())
    }

    /// Step back in history and re-present that page.
    pub fn go_back(&mut self) {
        let Some(entry) = self.nav.go_back() else {
            debug!("back history is empty");
            return;
        };
        self.re_present(&entry.url);
    }

    /// Step forward in history and re-present that page.
    pub fn go_forward(&mut self) {
        let Some(entry) = self.nav.go_forward() else {
            debug!("forward history is empty");
            return;
        };
        self.re_present(&entry.url);
    }

    /// Fetch, parse, and present a page without touching history.
    ///
    /// Returns `Ok(false)` when the fetcher rejected the url's scheme;
    /// the banner is raised and the previous page stays presented.
    fn present(&mut self, url: &Url) -> Result<bool> {
        let body = match self.fetcher.fetch(url) {
            Ok(body) => body,
            Err(SkylightError::UnsupportedScheme(scheme)) => {
                warn!("cannot open {url}: scheme {scheme:?} is not supported");
                self.error_banner =
                    Some(format!("cannot open {url}: scheme {scheme:?} is not supported"));
                return Ok(false);
            },
            Err(e) => return Err(e),
        };

        let mut doc = parser::parse(&String::from_utf8_lossy(&body));
        let refs = PageRefs::resolve(&doc);
        let mut panel = ExifPanel::new(self.config.fade_ms);
        let injected = metadata::load_exif_table(&mut doc, &refs, url, self.fetcher.as_mut());
        panel.set_table(injected);

        self.document = Some(doc);
        self.refs = refs;
        self.panel = panel;
        self.error_banner = None;
        Ok(true)
    }

    /// Re-present a history entry. History failures never surface as
    /// errors; the page just stays where it was.
    fn re_present(&mut self, url: &str) {
        let Some(parsed) = Url::parse(url) else {
            debug!("history entry is not a valid url: {url}");
            return;
        };
        if let Err(e) = self.present(&parsed) {
            warn!("could not reload {url}: {e}");
        }
    }

    // ---------------------------------------------------------------
    // Input
    // ---------------------------------------------------------------

    /// Handle an input event. `now_ms` is a monotonic timestamp used
    /// to time press-release gestures. Returns whether the event was
    /// consumed.
    pub fn handle_input(&mut self, event: &InputEvent, now_ms: u64) -> bool {
        if self.error_banner.is_some() {
            return self.handle_banner_input(event);
        }
        match event {
            InputEvent::PointerPress { .. } => {
                self.tracker.press(now_ms);
                true
            },
            InputEvent::PointerRelease { x, y } => match self.tracker.release(*x, *y, now_ms) {
                Some(gesture) => {
                    self.finish_gesture(&gesture);
                    true
                },
                None => false,
            },
            InputEvent::Key('b') => {
                self.go_back();
                true
            },
            InputEvent::Key('f') => {
                self.go_forward();
                true
            },
            InputEvent::Key('q') | InputEvent::Quit => {
                self.quit = true;
                true
            },
            InputEvent::Key(_) => false,
        }
    }

    /// While the banner is up, the first event acknowledges it and
    /// nothing else happens. Quit still works.
    fn handle_banner_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key('q') | InputEvent::Quit => self.quit = true,
            _ => self.error_banner = None,
        }
        true
    }

    /// Route a completed gesture: long presses navigate by zone, short
    /// presses are ordinary clicks, and the one click behavior on a
    /// photo page is the metadata toggle.
    fn finish_gesture(&mut self, gesture: &Gesture) {
        let px = gesture.x as f32 / self.config.page_width.max(1) as f32;
        let zone = gesture::classify(px, gesture.y, gesture.duration_ms);
        debug!(
            "gesture at ({}, {}) over {} ms -> {:?}",
            gesture.x, gesture.y, gesture.duration_ms, zone
        );
        match zone {
            Zone::None => {
                if gesture.duration_ms < gesture::MIN_GESTURE_MS {
                    self.panel.toggle();
                }
            },
            zone => self.navigate_zone(zone),
        }
    }

    /// Follow the current page's link for a navigation zone. A page
    /// without that link, or with a bare anchor, ignores the gesture.
    fn navigate_zone(&mut self, zone: Zone) {
        let Some(link) = self.refs.link_for_zone(zone) else {
            debug!("no {zone:?} link on this page");
            return;
        };
        let Some(doc) = self.document.as_ref() else {
            return;
        };
        let Some(href) = doc.element(link).and_then(|a| a.href()).map(String::from) else {
            debug!("{zone:?} link has no href");
            return;
        };
        let target = self.resolve_href(&href);
        if let Err(e) = self.load(&target) {
            debug!("navigation to {target} failed: {e}");
        }
    }

    /// Resolve an href against the current page url.
    fn resolve_href(&self, href: &str) -> String {
        if let Some(current) = self.nav.current_url()
            && let Some(base) = Url::parse(current)
            && let Some(resolved) = base.resolve(href)
        {
            return resolved.to_string();
        }
        href.to_string()
    }

    // ---------------------------------------------------------------
    // Frame tick / accessors
    // ---------------------------------------------------------------

    /// Advance animations by `dt_ms` milliseconds.
    pub fn tick(&mut self, dt_ms: u32) {
        self.panel.tick(dt_ms);
    }

    /// Title of the current page.
    pub fn title(&self) -> Option<&str> {
        self.nav.current_title()
    }

    /// Url of the current page.
    pub fn current_url(&self) -> Option<&str> {
        self.nav.current_url()
    }

    /// The blocking error message, if one is up.
    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    /// The metadata panel for the current page.
    pub fn panel(&self) -> &ExifPanel {
        &self.panel
    }

    /// Anchor references for the current page.
    pub fn refs(&self) -> &PageRefs {
        &self.refs
    }

    /// Parsed document of the current page.
    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    /// Navigation history.
    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    /// Whether a quit was requested.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
