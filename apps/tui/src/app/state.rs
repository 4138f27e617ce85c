use std::time::{Duration, Instant};

use crate::config::{
    CANVAS_HEIGHT, CANVAS_WIDTH, ENTER_DURATION_MS, RADIUS_RANGE, UPDATE_DURATION_MS, ZOOM_BOUNDS,
};
use crate::data::loader::LoadedStations;
use crate::data::models::Station;
use crate::data::topology::Outline;
use crate::domain::{Filter, Metric};
use crate::geo::projection::AlbersUsa;
use crate::geo::scale::{extent, LinearScale};

use super::markers::Marker;

/// Pan/zoom over the logical canvas; zoom clamped to the configured bounds.
#[derive(Debug, Clone, Copy)]
pub struct ViewTransform {
    pub zoom: f64,
    origin: (f64, f64),
}

impl ViewTransform {
    pub const fn new() -> Self {
        Self {
            zoom: ZOOM_BOUNDS[0],
            origin: (0.0, 0.0),
        }
    }

    /// Visible window in canvas coordinates: (x, y, width, height).
    pub fn window(&self) -> (f64, f64, f64, f64) {
        (
            self.origin.0,
            self.origin.1,
            CANVAS_WIDTH / self.zoom,
            CANVAS_HEIGHT / self.zoom,
        )
    }

    /// Zooms about the window center.
    pub fn zoom_by(&mut self, factor: f64) {
        let next = (self.zoom * factor).clamp(ZOOM_BOUNDS[0], ZOOM_BOUNDS[1]);
        let before_w = CANVAS_WIDTH / self.zoom;
        let before_h = CANVAS_HEIGHT / self.zoom;
        let after_w = CANVAS_WIDTH / next;
        let after_h = CANVAS_HEIGHT / next;
        self.origin.0 += (before_w - after_w) / 2.0;
        self.origin.1 += (before_h - after_h) / 2.0;
        self.zoom = next;
        self.clamp_origin();
    }

    /// Pans by a screen-space step; finer at higher zoom.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.origin.0 += dx / self.zoom;
        self.origin.1 += dy / self.zoom;
        self.clamp_origin();
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn clamp_origin(&mut self) {
        let width = CANVAS_WIDTH / self.zoom;
        let height = CANVAS_HEIGHT / self.zoom;
        self.origin.0 = self.origin.0.clamp(0.0, CANVAS_WIDTH - width);
        self.origin.1 = self.origin.1.clamp(0.0, CANVAS_HEIGHT - height);
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Tooltip anchored at the pointer cell; a `None` position means the hover
/// came from the keyboard and the popup anchors at the marker itself.
#[derive(Debug, Clone, Copy)]
pub struct TooltipState {
    pub station: usize,
    pub position: Option<(u16, u16)>,
}

/// Mutable application state: the loaded data, the projection, the view
/// transform, and the marker set bound 1:1 to the dataset.
pub struct App {
    pub running: bool,
    pub projection: AlbersUsa,
    pub stations: Option<Vec<Station>>,
    /// Projected state outlines, appended once and never updated afterwards.
    pub outlines: Option<Vec<Vec<(f64, f64)>>>,
    pub markers: Vec<Marker>,
    pub metric: Metric,
    pub active_filter: Filter,
    pub scale: Option<LinearScale>,
    pub view: ViewTransform,
    pub hovered: Option<usize>,
    pub tooltip: Option<TooltipState>,
    pub status_message: String,
    pub skipped_rows: usize,
    pub loading_stations: bool,
    pub loading_map: bool,
    pub show_help: bool,
    pub throbber: throbber_widgets_tui::ThrobberState,
    last_frame: Instant,
}

impl App {
    pub fn new(projection: AlbersUsa) -> Self {
        Self {
            running: true,
            projection,
            stations: None,
            outlines: None,
            markers: Vec::new(),
            metric: Metric::Tsr,
            active_filter: Filter::All,
            scale: None,
            view: ViewTransform::new(),
            hovered: None,
            tooltip: None,
            status_message: String::new(),
            skipped_rows: 0,
            loading_stations: true,
            loading_map: true,
            show_help: false,
            throbber: throbber_widgets_tui::ThrobberState::default(),
            last_frame: Instant::now(),
        }
    }

    /// Per-frame update: advances marker transitions and the load spinner.
    pub fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame);
        self.last_frame = now;
        self.advance(dt);
    }

    /// Deterministic variant of `update` for a known time step.
    pub fn advance(&mut self, dt: Duration) {
        for marker in &mut self.markers {
            marker.tick(dt);
        }
        if self.loading_stations || self.loading_map {
            self.throbber.calc_next();
        }
    }

    /// Stores the dataset and triggers the first render with the current
    /// (default) metric. Called once; the dataset never reloads.
    pub fn set_stations(&mut self, loaded: LoadedStations) {
        self.skipped_rows = loaded.skipped;
        self.stations = Some(loaded.stations);
        self.loading_stations = false;
        let metric = self.metric;
        self.render(metric);
    }

    /// Projects and stores the base-map outlines; drawn from then on.
    pub fn set_outlines(&mut self, outlines: &[Outline]) {
        let projected = outlines
            .iter()
            .map(|outline| self.projection.project_outline(outline))
            .filter(|ring| ring.len() >= 2)
            .collect();
        self.outlines = Some(projected);
        self.loading_map = false;
    }

    /// Entry point for (re)drawing the markers: rebuilds the metric scale
    /// over the full dataset and either binds fresh markers (first render)
    /// or retargets the existing ones in place.
    pub fn render(&mut self, metric: Metric) {
        self.metric = metric;
        let Some(stations) = self.stations.as_ref() else {
            return;
        };

        let domain =
            extent(stations.iter().map(|s| s.metric_value(metric))).unwrap_or([0.0, 0.0]);
        let scale = LinearScale::new(domain, RADIUS_RANGE);

        if self.markers.is_empty() {
            let mut markers = Vec::with_capacity(stations.len());
            for station in stations {
                let center = self.projection.project(station.longitude, station.latitude);
                markers.push(Marker::entering(
                    center,
                    scale.scale(station.metric_value(metric)),
                    Duration::from_millis(ENTER_DURATION_MS),
                ));
            }
            self.markers = markers;
        } else {
            for (index, (marker, station)) in
                self.markers.iter_mut().zip(stations.iter()).enumerate()
            {
                marker.retarget(
                    scale.scale(station.metric_value(metric)),
                    Duration::from_millis(index as u64),
                    Duration::from_millis(UPDATE_DURATION_MS),
                );
            }
        }

        self.scale = Some(scale);
    }

    /// Resets every hidden marker to visible, then applies the new category
    /// test. `Filter::All` only resets.
    pub fn switch_filter(&mut self, filter: Filter) {
        for marker in &mut self.markers {
            marker.hidden = false;
        }
        self.active_filter = filter;
        if filter.category_label().is_some() {
            self.apply_filter(filter);
        }
    }

    /// Hides markers whose station flag for this category is zero. Never
    /// un-hides; the reset belongs to `switch_filter`.
    pub fn apply_filter(&mut self, filter: Filter) {
        let Some(stations) = self.stations.as_ref() else {
            return;
        };
        for (marker, station) in self.markers.iter_mut().zip(stations.iter()) {
            if !station.is_member(filter) {
                marker.hidden = true;
            }
        }
    }

    /// Hit-tests the visible markers at a canvas point, topmost-drawn first.
    pub fn marker_at(&self, point: (f64, f64)) -> Option<usize> {
        let tolerance = 8.0 / self.view.zoom;
        self.markers
            .iter()
            .enumerate()
            .rev()
            .find_map(|(index, marker)| {
                let (cx, cy) = marker.drawable()?;
                let reach = marker.radius.max(tolerance);
                let dx = point.0 - cx;
                let dy = point.1 - cy;
                (dx.mul_add(dx, dy * dy) <= reach * reach).then_some(index)
            })
    }

    /// Pointer moved: update the active marker and the tooltip. Entering a
    /// marker marks it active and shows the tooltip at the pointer; leaving
    /// clears both.
    pub fn hover_at(&mut self, point: Option<(f64, f64)>, cell: (u16, u16)) {
        let hit = point.and_then(|p| self.marker_at(p));
        if hit != self.hovered {
            self.set_hovered(hit);
        }
        self.tooltip = self.hovered.map(|station| TooltipState {
            station,
            position: Some(cell),
        });
    }

    /// Keyboard stand-in for hover: cycles the highlight through the
    /// currently visible stations.
    pub fn cycle_hover(&mut self, step: isize) {
        let visible: Vec<usize> = self
            .markers
            .iter()
            .enumerate()
            .filter(|(_, marker)| marker.drawable().is_some())
            .map(|(index, _)| index)
            .collect();
        if visible.is_empty() {
            return;
        }

        let next = match self
            .hovered
            .and_then(|current| visible.iter().position(|&index| index == current))
        {
            Some(position) => {
                #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
                let wrapped =
                    (position as isize + step).rem_euclid(visible.len() as isize) as usize;
                visible[wrapped]
            }
            None if step >= 0 => visible[0],
            None => visible[visible.len() - 1],
        };

        self.set_hovered(Some(next));
        self.tooltip = Some(TooltipState {
            station: next,
            position: None,
        });
    }

    pub fn clear_hover(&mut self) {
        self.set_hovered(None);
        self.tooltip = None;
    }

    fn set_hovered(&mut self, next: Option<usize>) {
        if let Some(previous) = self.hovered {
            if let Some(marker) = self.markers.get_mut(previous) {
                marker.active = false;
            }
        }
        self.hovered = next;
        if let Some(index) = next {
            if let Some(marker) = self.markers.get_mut(index) {
                marker.active = true;
            }
        }
    }

    pub fn station_count(&self) -> usize {
        self.stations.as_ref().map_or(0, Vec::len)
    }

    pub fn visible_count(&self) -> usize {
        self.markers.iter().filter(|m| !m.hidden).count()
    }
}
