//! Visible-window management for a scrolling calendar host.
//!
//! # Responsibility
//! - Map a scroll offset to the currently visible month for the configured
//!   axis and granularity mode.
//! - Decide which months are live (materialized by the host) versus clean
//!   (torn down), keeping at most the visible month and its two neighbors
//!   live.
//!
//! # Invariants
//! - Geometry is one-dimensional: every month occupies a span along the
//!   scroll axis; cross-axis extents never participate in any decision.
//! - A clean-to-live transition always means a from-scratch rebuild on the
//!   host side; no torn-down layout is cached here.
//! - Construction with unset extents is a programmer error and fails
//!   loudly.

use chrono::NaiveDate;
use log::debug;

use crate::calendar::CalendarModel;

/// Scroll axis of the embedding container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    /// Paged, one page per month (or per week in week mode).
    Horizontal,
    /// Continuous vertical scrolling.
    Vertical,
}

/// Granularity of a horizontal page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Month,
    Week,
}

/// Host-measured geometry the controller works with. All extents are along
/// the scroll axis, in whatever unit the host scrolls in.
#[derive(Debug, Clone)]
pub struct ViewportConfig {
    pub axis: ScrollAxis,
    pub mode: ViewMode,
    /// Visible length of the scroll container along the axis.
    pub viewport_extent: f32,
    /// Height of one week row (vertical axis only).
    pub week_extent: f32,
    /// Height of the per-month title header (vertical axis only).
    pub month_header_extent: f32,
    /// Gap between consecutive months (vertical axis only).
    pub month_inset: f32,
    /// Whether the host renders lead/trail out-of-month days.
    pub show_days_out: bool,
}

/// One month's interval along the scroll axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub origin: f32,
    pub extent: f32,
}

impl Span {
    pub fn end(&self) -> f32 {
        self.origin + self.extent
    }

    pub fn midpoint(&self) -> f32 {
        self.origin + self.extent / 2.0
    }

    fn intersects(&self, start: f32, extent: f32) -> bool {
        self.origin < start + extent && self.end() > start
    }
}

/// Per-month inputs pulled from the model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthMetrics {
    pub anchor: NaiveDate,
    pub week_count: usize,
}

/// Materialization command for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MonthTransition {
    /// Build week/day visuals for this month from scratch and re-subscribe
    /// its day interaction.
    Materialize { index: usize, anchor: NaiveDate },
    /// Tear this month's visuals down and drop their state.
    Clean { index: usize, anchor: NaiveDate },
}

/// Result of re-evaluating the viewport after a scroll-position change.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportUpdate {
    /// Anchor of the month currently considered visible, if any.
    pub current_month: Option<NaiveDate>,
    /// Whether `current_month` differs from the previous evaluation.
    pub month_changed: bool,
    /// Live-window transitions the host must apply, cleans and
    /// materializations interleaved in index order.
    pub transitions: Vec<MonthTransition>,
}

/// Maps scroll offsets to visible months and maintains the live window.
#[derive(Debug, Clone)]
pub struct ViewportController {
    config: ViewportConfig,
    metrics: Vec<MonthMetrics>,
    spans: Vec<Span>,
    live: Vec<bool>,
    current: Option<usize>,
    offset: f32,
}

impl ViewportController {
    /// Builds the controller over the model's current month sequence.
    ///
    /// # Panics
    /// Panics when `viewport_extent` (or, on the vertical axis,
    /// `week_extent`) is not positive: materializing against an
    /// unconfigured viewport is a setup-ordering bug, not a runtime data
    /// issue.
    pub fn new(config: ViewportConfig, model: &CalendarModel) -> Self {
        assert!(
            config.viewport_extent > 0.0,
            "viewport_extent must be set before the viewport is used"
        );
        assert!(
            config.axis == ScrollAxis::Horizontal || config.week_extent > 0.0,
            "week_extent must be set before a vertical viewport is used"
        );

        let metrics: Vec<MonthMetrics> = model
            .months()
            .iter()
            .map(|month| MonthMetrics {
                anchor: month.anchor(),
                week_count: month.week_count(),
            })
            .collect();
        let spans = compute_spans(&config, &metrics);
        let live = vec![false; metrics.len()];
        debug!(
            "event=viewport_setup module=viewport status=ok months={} axis={:?} mode={:?}",
            metrics.len(),
            config.axis,
            config.mode
        );
        Self {
            config,
            metrics,
            spans,
            live,
            current: None,
            offset: 0.0,
        }
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    pub fn metrics(&self) -> &[MonthMetrics] {
        &self.metrics
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Total scrollable length along the axis.
    pub fn content_extent(&self) -> f32 {
        self.spans.last().map_or(0.0, Span::end)
    }

    pub fn span(&self, index: usize) -> Option<Span> {
        self.spans.get(index).copied()
    }

    pub fn is_live(&self, index: usize) -> bool {
        self.live.get(index).copied().unwrap_or(false)
    }

    pub fn live_indices(&self) -> Vec<usize> {
        self.live
            .iter()
            .enumerate()
            .filter_map(|(index, live)| live.then_some(index))
            .collect()
    }

    /// Anchor of the month the last evaluation considered visible.
    pub fn current_anchor(&self) -> Option<NaiveDate> {
        self.current.map(|index| self.metrics[index].anchor)
    }

    /// Index of the month visible at `offset` under the configured axis and
    /// mode.
    pub fn month_index_at(&self, offset: f32) -> Option<usize> {
        match (self.config.axis, self.config.mode) {
            (ScrollAxis::Horizontal, ViewMode::Month) | (ScrollAxis::Vertical, _) => self
                .spans
                .iter()
                .position(|span| span.midpoint() >= offset),
            (ScrollAxis::Horizontal, ViewMode::Week) => self
                .spans
                .iter()
                .position(|span| span.intersects(offset, self.config.viewport_extent)),
        }
    }

    /// Re-evaluates visibility for a new scroll offset.
    ///
    /// Keeps at most the visible month and its immediate neighbors live;
    /// everything else is cleaned. When no month is visible (offset beyond
    /// content) the live window is left as it was.
    pub fn scroll_changed(&mut self, offset: f32) -> ViewportUpdate {
        self.offset = offset;
        let Some(current) = self.month_index_at(offset) else {
            return ViewportUpdate {
                current_month: None,
                month_changed: false,
                transitions: Vec::new(),
            };
        };

        let mut transitions = Vec::new();
        for index in 0..self.metrics.len() {
            let keep_live = index + 1 >= current && index <= current + 1;
            if keep_live && !self.live[index] {
                self.live[index] = true;
                transitions.push(MonthTransition::Materialize {
                    index,
                    anchor: self.metrics[index].anchor,
                });
            } else if !keep_live && self.live[index] {
                self.live[index] = false;
                transitions.push(MonthTransition::Clean {
                    index,
                    anchor: self.metrics[index].anchor,
                });
            }
        }

        let month_changed = self.current != Some(current);
        self.current = Some(current);
        ViewportUpdate {
            current_month: Some(self.metrics[current].anchor),
            month_changed,
            transitions,
        }
    }

    /// Pages one viewport forward (horizontal axis only), clamped to the
    /// content end.
    pub fn next_page(&mut self) -> Option<ViewportUpdate> {
        if self.config.axis != ScrollAxis::Horizontal {
            return None;
        }
        let next = self.offset + self.config.viewport_extent;
        if next >= self.content_extent() {
            return None;
        }
        Some(self.scroll_changed(next))
    }

    /// Pages one viewport backward (horizontal axis only), clamped to zero.
    pub fn previous_page(&mut self) -> Option<ViewportUpdate> {
        if self.config.axis != ScrollAxis::Horizontal {
            return None;
        }
        let previous = self.offset - self.config.viewport_extent;
        if previous < 0.0 {
            return None;
        }
        Some(self.scroll_changed(previous))
    }

    /// Offset that brings `date`'s month (and, in week mode, its week) to
    /// the start of the viewport.
    pub fn offset_for_date(&self, model: &CalendarModel, date: NaiveDate) -> Option<f32> {
        let index = model
            .months()
            .iter()
            .position(|month| month.contains_date(date))?;
        let mut offset = self.spans.get(index)?.origin;
        if self.config.axis == ScrollAxis::Horizontal && self.config.mode == ViewMode::Week {
            let week_index = model.months()[index]
                .weeks()
                .iter()
                .position(|week| week.contains_date(date))?;
            offset += week_index as f32 * self.config.viewport_extent;
        }
        Some(offset)
    }

    /// Switches between month and week pages (horizontal axis only).
    ///
    /// Recomputes every span and tears down all live months; the host
    /// re-materializes by scrolling, typically via [`Self::offset_for_date`].
    pub fn set_mode(&mut self, mode: ViewMode) -> Vec<MonthTransition> {
        if self.config.axis != ScrollAxis::Horizontal {
            return Vec::new();
        }
        self.config.mode = mode;
        self.spans = compute_spans(&self.config, &self.metrics);
        debug!(
            "event=viewport_mode module=viewport status=ok mode={:?}",
            mode
        );
        self.teardown_all()
    }

    /// Re-pulls month metrics from the model (after the model was rebuilt)
    /// and tears down all live months.
    pub fn refresh_metrics(&mut self, model: &CalendarModel) -> Vec<MonthTransition> {
        let transitions = self.teardown_all();
        self.metrics = model
            .months()
            .iter()
            .map(|month| MonthMetrics {
                anchor: month.anchor(),
                week_count: month.week_count(),
            })
            .collect();
        self.spans = compute_spans(&self.config, &self.metrics);
        self.live = vec![false; self.metrics.len()];
        transitions
    }

    fn teardown_all(&mut self) -> Vec<MonthTransition> {
        self.current = None;
        let mut transitions = Vec::new();
        for (index, live) in self.live.iter_mut().enumerate() {
            if *live {
                *live = false;
                transitions.push(MonthTransition::Clean {
                    index,
                    anchor: self.metrics[index].anchor,
                });
            }
        }
        transitions
    }
}

fn compute_spans(config: &ViewportConfig, metrics: &[MonthMetrics]) -> Vec<Span> {
    let mut spans = Vec::with_capacity(metrics.len());
    let mut origin = 0.0;
    for entry in metrics {
        let extent = match (config.axis, config.mode) {
            (ScrollAxis::Horizontal, ViewMode::Month) => config.viewport_extent,
            (ScrollAxis::Horizontal, ViewMode::Week) => {
                entry.week_count as f32 * config.viewport_extent
            }
            (ScrollAxis::Vertical, _) => {
                entry.week_count as f32 * config.week_extent + config.month_header_extent
            }
        };
        spans.push(Span { origin, extent });
        origin += extent;
        // The inset sits between months; content ends at the last span.
        if config.axis == ScrollAxis::Vertical {
            origin += config.month_inset;
        }
    }
    spans
}
