//! Sweep animator.
//!
//! A sweep walks an angle from `start_angle_rad` down to
//! [`SweepConfig::bound_rad`], one `step_rad` per frame. Progress is
//! `angle / bound`, and marker `i` of `n` counts as visited once
//! `i <= progress * n`. The state is a plain value; [`SweepState::step`]
//! returns the next state together with what happened on that frame.

use crate::config::SweepConfig;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SweepPhase {
    Idle,
    Sweeping,
    /// The angle reached the bound; the next step finishes the sweep.
    Done,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SweepEvent {
    Started,
    /// New status line (rotating ellipsis).
    Status(String),
    /// Markers `from..to` became visited this frame.
    Visited { from: usize, to: usize },
    Finished {
        summary: String,
        visited: usize,
        total: usize,
        frames: u64,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SweepState {
    pub active: bool,
    pub angle: f64,
    /// Steps taken in the current (or last) sweep.
    pub frame_count: u64,
    /// Length of the visited prefix of the marker list.
    pub visited: usize,
}

impl SweepState {
    pub fn idle(config: &SweepConfig) -> Self {
        Self {
            active: false,
            angle: config.start_angle_rad,
            frame_count: 0,
            visited: 0,
        }
    }

    pub fn phase(&self, config: &SweepConfig) -> SweepPhase {
        if !self.active {
            SweepPhase::Idle
        } else if self.angle <= config.bound_rad() {
            SweepPhase::Done
        } else {
            SweepPhase::Sweeping
        }
    }

    /// Progress in `[0, 1]` for a normal sweep.
    pub fn fraction(&self, config: &SweepConfig) -> f64 {
        self.angle / config.bound_rad()
    }

    /// Starts a sweep from the configured start angle.
    ///
    /// Returns the state unchanged and no events if a sweep is already active.
    pub fn start(self, config: &SweepConfig) -> (Self, Vec<SweepEvent>) {
        if self.active {
            return (self, Vec::new());
        }
        let next = Self {
            active: true,
            ..Self::idle(config)
        };
        let events = vec![
            SweepEvent::Started,
            SweepEvent::Status(status_message(&config.status_label, 0)),
        ];
        (next, events)
    }

    /// Advances one frame. Inactive states are returned unchanged.
    pub fn step(self, config: &SweepConfig, marker_count: usize) -> (Self, Vec<SweepEvent>) {
        if !self.active {
            return (self, Vec::new());
        }

        let bound = config.bound_rad();
        if self.angle <= bound {
            let summary = render_summary(
                &config.summary_template,
                self.visited,
                marker_count,
                self.frame_count,
            );
            let next = Self {
                active: false,
                angle: config.start_angle_rad,
                frame_count: self.frame_count,
                visited: self.visited,
            };
            let event = SweepEvent::Finished {
                summary,
                visited: self.visited,
                total: marker_count,
                frames: self.frame_count,
            };
            return (next, vec![event]);
        }

        let frame_count = self.frame_count + 1;
        // Derived from the frame count rather than accumulated, so the bound
        // is hit on the same frame regardless of rounding drift.
        let angle = (config.start_angle_rad - config.step_rad * frame_count as f64).max(bound);
        let fraction = angle / bound;
        let visited = visited_prefix(fraction, marker_count).max(self.visited);

        let mut events = Vec::new();
        if visited > self.visited {
            events.push(SweepEvent::Visited {
                from: self.visited,
                to: visited,
            });
        }
        if frame_count % config.status_every_frames == 0 {
            let phase = frame_count / config.status_every_frames;
            events.push(SweepEvent::Status(status_message(&config.status_label, phase)));
        }

        let next = Self {
            active: true,
            angle,
            frame_count,
            visited,
        };
        (next, events)
    }
}

/// Number of leading markers with `i <= fraction * count`.
pub fn visited_prefix(fraction: f64, count: usize) -> usize {
    if count == 0 || !(fraction >= 0.0) {
        return 0;
    }
    let reach = (fraction * count as f64).floor();
    if reach >= count as f64 {
        count
    } else {
        reach as usize + 1
    }
}

pub fn is_visited(index: usize, count: usize, fraction: f64) -> bool {
    index < visited_prefix(fraction, count)
}

/// `label` followed by one to three dots, cycling with `phase`.
pub fn status_message(label: &str, phase: u64) -> String {
    let dots = (phase % 3) as usize + 1;
    format!("{label}{}", ".".repeat(dots))
}

pub fn render_summary(template: &str, visited: usize, total: usize, frames: u64) -> String {
    template
        .replace("{visited}", &visited.to_string())
        .replace("{total}", &total.to_string())
        .replace("{frames}", &frames.to_string())
}
