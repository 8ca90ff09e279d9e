//! src/engine/chart.rs

use std::time::Instant;

use chrono::NaiveDateTime;
use log::{debug, info};

use super::config::EngineConfig;
use super::error::ConfigError;
use super::outlier::{OutlierFilter, Verdict};
use super::range::{AutoRange, RangeState};
use super::render::RenderPipeline;
use super::store::{CHANNELS, Sample, SampleStore};
use super::viewport::{InputEvent, ViewportController};

/// Owner of all mutable chart state. Every mutation goes through `&mut self`,
/// so one event loop serialises ingest, input and redraw.
#[derive(Debug)]
pub struct StripChart {
    config: EngineConfig,
    store: SampleStore,
    filter: OutlierFilter,
    range: AutoRange,
    viewport: ViewportController,
    start_time: Option<NaiveDateTime>,
}

impl StripChart {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            store: SampleStore::new(config.max_index),
            filter: OutlierFilter::new(&config.filter),
            range: AutoRange::new(config.value_axis.clone()),
            viewport: ViewportController::new(config.viewport.clone()),
            start_time: None,
            config,
        })
    }

    /// Wall-clock time of index 0, enables clock labels on the time axis.
    pub fn with_start_time(mut self, start: NaiveDateTime) -> Self {
        self.start_time = Some(start);
        self
    }

    /// Append a batch. Returns how many samples were new.
    pub fn ingest<I>(&mut self, batch: I) -> usize
    where
        I: IntoIterator<Item = Sample>,
    {
        let mut stored = 0;
        for sample in batch {
            if self.store.append(sample) {
                stored += 1;
                self.validate_around(sample.index);
            }
        }
        if stored > 0 {
            self.viewport.on_data(self.store.highest_index());
        }
        stored
    }

    pub fn handle_input(&mut self, event: InputEvent, now: Instant) -> bool {
        self.viewport.handle(event, now)
    }

    /// Advance timers. Returns `true` when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.viewport.tick(now)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize(width, height);
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.viewport.set_scale(scale);
    }

    pub fn follow_latest(&mut self) {
        self.viewport.follow_latest();
    }

    pub fn render(&self) -> RenderPipeline<'_> {
        let mapper = self.viewport.mapper(&self.range.state());
        RenderPipeline::new(
            &self.store,
            &self.filter,
            &self.config.grid,
            self.config.channel_offsets_px,
            self.start_time,
            mapper,
        )
    }

    pub fn latest(&self) -> Option<&Sample> {
        self.store.latest()
    }

    /// Drop the session and return to auto-follow with the initial range.
    pub fn reset(&mut self) {
        let (width, height) = self.viewport.size();
        self.store.clear();
        self.range.reset();
        self.viewport = ViewportController::new(self.config.viewport.clone());
        self.viewport.resize(width, height);
        info!("session reset");
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &SampleStore {
        &self.store
    }

    pub fn range(&self) -> RangeState {
        self.range.state()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn start_time(&self) -> Option<NaiveDateTime> {
        self.start_time
    }

    /// Check both pairs touching a newly inserted index.
    fn validate_around(&mut self, index: i64) {
        let mut widened = false;
        let pairs = [Some((index - 1, index)), index.checked_add(1).map(|next| (index, next))];
        for (prev, cur) in pairs.into_iter().flatten() {
            let (Some(p), Some(c)) = (self.store.get(prev), self.store.get(cur)) else {
                continue;
            };
            let (p, c) = (*p, *c);
            for ch in 0..CHANNELS {
                let (a, b) = (c.value(ch), p.value(ch));
                match (self.filter.check(a, b), a, b) {
                    (Verdict::Accepted, Some(a), Some(b)) => {
                        widened |= self.range.offer(a);
                        widened |= self.range.offer(b);
                    }
                    (Verdict::Accepted | Verdict::Missing, ..) => {}
                    (verdict, ..) => debug!("pair {prev}->{cur} ch{ch} rejected: {verdict:?}"),
                }
            }
        }
        if widened {
            let r = self.range.state();
            debug!("value range now {:.0}..{:.0}", r.display_min, r.display_max);
        }
    }
}
