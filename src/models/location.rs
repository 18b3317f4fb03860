//! Location and time window types.

use serde::{Deserialize, Serialize};

/// Default end of a location's time window: one day in seconds.
pub const DEFAULT_TIME_WINDOW_END: i64 = 86_400;

/// A time window constraint for service at a location.
///
/// Service may start no later than `end` and no earlier than `start`
/// (waiting is allowed if the vehicle arrives early).
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::TimeWindow;
///
/// let tw = TimeWindow::new(100, 200).unwrap();
/// assert_eq!((tw.start(), tw.end()), (100, 200));
/// assert!(TimeWindow::new(200, 100).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: i64,
    end: i64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `start > end`.
    pub fn new(start: i64, end: i64) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Earliest allowable service start.
    pub fn start(&self) -> i64 {
        self.start
    }

    /// Latest allowable service start.
    pub fn end(&self) -> i64 {
        self.end
    }
}

fn default_window_end() -> i64 {
    DEFAULT_TIME_WINDOW_END
}

/// A stop (or the depot) in a dispatch problem.
///
/// Field names follow the request body of the dispatch service, so a
/// location deserializes directly from JSON.
///
/// # Examples
///
/// ```
/// use fleet_dispatch::models::Location;
///
/// let depot = Location::new(0);
/// assert_eq!(depot.demand(), 0);
///
/// let stop = Location::new(7)
///     .with_name("Harbor St.")
///     .with_demand(10)
///     .with_service_time(300)
///     .with_time_window(3_600, 7_200);
/// assert_eq!(stop.id(), 7);
/// assert_eq!(stop.time_window().start(), 3_600);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    demand: i64,
    #[serde(default)]
    service_time: i64,
    #[serde(default)]
    time_window_start: i64,
    #[serde(default = "default_window_end")]
    time_window_end: i64,
}

impl Location {
    /// Creates a location with zero demand, zero service time, and the
    /// default full-day window.
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: None,
            demand: 0,
            service_time: 0,
            time_window_start: 0,
            time_window_end: DEFAULT_TIME_WINDOW_END,
        }
    }

    /// Sets a display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the delivery quantity.
    pub fn with_demand(mut self, demand: i64) -> Self {
        self.demand = demand;
        self
    }

    /// Sets the service duration.
    pub fn with_service_time(mut self, service_time: i64) -> Self {
        self.service_time = service_time;
        self
    }

    /// Sets the time window.
    pub fn with_time_window(mut self, start: i64, end: i64) -> Self {
        self.time_window_start = start;
        self.time_window_end = end;
        self
    }

    /// Caller-supplied identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Optional display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Quantity delivered at this location (0 for the depot).
    pub fn demand(&self) -> i64 {
        self.demand
    }

    /// Service duration at this location.
    pub fn service_time(&self) -> i64 {
        self.service_time
    }

    /// Raw window bounds `(start, end)`, not yet validated.
    pub fn window_bounds(&self) -> (i64, i64) {
        (self.time_window_start, self.time_window_end)
    }

    /// The location's time window.
    ///
    /// An inverted window collapses to its end point; validation rejects
    /// such locations before they reach the engine.
    pub fn time_window(&self) -> TimeWindow {
        TimeWindow::new(self.time_window_start, self.time_window_end).unwrap_or(TimeWindow {
            start: self.time_window_end,
            end: self.time_window_end,
        })
    }
}
