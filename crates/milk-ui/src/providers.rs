//! Collaborators that feed widgets with data.
//!
//! Metric gathering, HTTP and notification delivery live outside this crate.
//! Hosts plug real implementations into [`Services`]; the defaults are null
//! providers that report zeros and drop requests.

use std::rc::Rc;

use chrono::NaiveDateTime;

// ── snapshots ─────────────────────────────────────────────────────────────

/// One synchronous reading of the host machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SystemSnapshot {
    pub cpu: f64,
    pub memory: f64,
    pub disk: f64,
    /// Degrees Celsius.
    pub temperature: f64,
    pub uptime: String,
    pub processes: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NetworkSnapshot {
    /// Bytes per second.
    pub download_rate: f64,
    pub upload_rate: f64,
    pub total_downloaded: u64,
    pub total_uploaded: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherReport {
    pub condition: String,
    pub description: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub wind_direction: String,
    pub icon: String,
    pub city: String,
    pub updated: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaState {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub art_url: String,
    /// Seconds.
    pub duration: u32,
    pub position: u32,
    pub playing: bool,
    pub volume: f32,
}

// ── traits ────────────────────────────────────────────────────────────────

pub trait SystemInfoProvider {
    fn snapshot(&self) -> SystemSnapshot;

    /// Usage of one core. Providers without per-core data report the
    /// aggregate figure.
    fn cpu_core(&self, _core: usize) -> f64 {
        self.snapshot().cpu
    }
}

pub trait NetworkInfoProvider {
    fn snapshot(&self) -> NetworkSnapshot;
}

/// Completion of a weather fetch. Runs on the UI thread.
pub type WeatherCallback = Box<dyn FnOnce(Result<WeatherReport, String>)>;

pub trait WeatherProvider {
    /// Starts a fetch for `city`. The callback may run later, from a
    /// subsequent tick; it is never run concurrently with widget code.
    fn fetch(&self, city: &str, done: WeatherCallback);
}

pub trait MediaProvider {
    fn state(&self) -> MediaState;
    fn play(&self) {}
    fn pause(&self) {}
    fn next(&self) {}
    fn previous(&self) {}
}

pub trait NotificationSink {
    fn send(&self, title: &str, body: &str, icon: Option<&str>, timeout_ms: u32);
}

// ── null implementations ──────────────────────────────────────────────────

/// Reports zeros, drops requests, never completes fetches.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProvider;

impl SystemInfoProvider for NullProvider {
    fn snapshot(&self) -> SystemSnapshot {
        SystemSnapshot::default()
    }
}

impl NetworkInfoProvider for NullProvider {
    fn snapshot(&self) -> NetworkSnapshot {
        NetworkSnapshot::default()
    }
}

impl WeatherProvider for NullProvider {
    fn fetch(&self, city: &str, _done: WeatherCallback) {
        log::debug!("weather fetch for {city:?} dropped: no provider");
    }
}

impl MediaProvider for NullProvider {
    fn state(&self) -> MediaState {
        MediaState::default()
    }
}

impl NotificationSink for NullProvider {
    fn send(&self, title: &str, _body: &str, _icon: Option<&str>, _timeout_ms: u32) {
        log::debug!("notification {title:?} dropped: no sink");
    }
}

// ── Services ──────────────────────────────────────────────────────────────

/// Shared collaborator handles passed to every update callback.
#[derive(Clone)]
pub struct Services {
    pub system: Rc<dyn SystemInfoProvider>,
    pub network: Rc<dyn NetworkInfoProvider>,
    pub weather: Rc<dyn WeatherProvider>,
    pub media: Rc<dyn MediaProvider>,
    pub notifications: Rc<dyn NotificationSink>,
}

impl Services {
    pub fn with_system(mut self, p: impl SystemInfoProvider + 'static) -> Self {
        self.system = Rc::new(p);
        self
    }

    pub fn with_network(mut self, p: impl NetworkInfoProvider + 'static) -> Self {
        self.network = Rc::new(p);
        self
    }

    pub fn with_weather(mut self, p: impl WeatherProvider + 'static) -> Self {
        self.weather = Rc::new(p);
        self
    }

    pub fn with_media(mut self, p: impl MediaProvider + 'static) -> Self {
        self.media = Rc::new(p);
        self
    }

    pub fn with_notifications(mut self, p: impl NotificationSink + 'static) -> Self {
        self.notifications = Rc::new(p);
        self
    }
}

impl Default for Services {
    fn default() -> Self {
        Self {
            system: Rc::new(NullProvider),
            network: Rc::new(NullProvider),
            weather: Rc::new(NullProvider),
            media: Rc::new(NullProvider),
            notifications: Rc::new(NullProvider),
        }
    }
}

impl std::fmt::Debug for Services {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Services").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedCpu(f64);

    impl SystemInfoProvider for FixedCpu {
        fn snapshot(&self) -> SystemSnapshot {
            SystemSnapshot { cpu: self.0, ..SystemSnapshot::default() }
        }
    }

    #[test]
    fn null_defaults_report_zero() {
        let s = Services::default();
        assert_eq!(s.system.snapshot(), SystemSnapshot::default());
        assert_eq!(s.network.snapshot().download_rate, 0.0);
        assert!(!s.media.state().playing);
    }

    #[test]
    fn cpu_core_falls_back_to_aggregate() {
        let s = Services::default().with_system(FixedCpu(42.5));
        assert_eq!(s.system.cpu_core(3), 42.5);
        assert_eq!(s.system.snapshot().cpu, 42.5);
    }
}
