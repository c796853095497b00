use foundation::math::{LatLon, project, project_surface};
use formats::{MarkerDocument, MarkerDocumentError, MarkerEntry, MarkerEntryError, ObjModel};
use runtime::{Event, EventBus, Frame, LoadState, kinds};
use scene::World;
use scene::components::Tint;
use scene::entity::EntityId;
use scene::prefabs::{GlobeEntities, spawn_globe, spawn_marker, spawn_satellite};
use tracing::{debug, info, warn};

use crate::config::{ConfigError, SimConfig};
use crate::input::ArrowKey;
use crate::marker::{GeoMarker, MarkerLoadReport, MarkerRejection};
use crate::sweep::{SweepEvent, SweepPhase, SweepState};

/// What a single [`SimulationContext::tick`] changed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickReport {
    pub frame_index: u64,
    pub status_changed: bool,
    pub newly_visited: usize,
    pub finished: Option<String>,
}

/// Everything the per-frame callback mutates: the scene, the markers, the
/// satellite load result and the sweep.
#[derive(Debug)]
pub struct SimulationContext {
    config: SimConfig,
    world: World,
    globe: GlobeEntities,
    reference_radius: f64,
    markers: Vec<GeoMarker>,
    rejected: usize,
    satellite: LoadState<EntityId>,
    sweep: SweepState,
    frame: Frame,
    bus: EventBus,
    status: String,
}

impl SimulationContext {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = World::new();
        let globe = spawn_globe(&mut world, &config.globe.spec());
        let reference_radius = world
            .bounding_sphere(globe.earth)
            .map(|s| s.radius)
            .unwrap_or(config.globe.earth_radius);
        debug!(reference_radius, "globe built");

        let sweep = SweepState::idle(&config.sweep);
        Ok(Self {
            config,
            world,
            globe,
            reference_radius,
            markers: Vec::new(),
            rejected: 0,
            satellite: LoadState::Pending,
            sweep,
            frame: Frame::first(),
            bus: EventBus::new(),
            status: String::new(),
        })
    }

    /// Validates and places each `(lat, lon)` pair, in order.
    ///
    /// Invalid pairs are skipped; the accepted ones keep their relative order
    /// and are appended after any markers already present.
    pub fn add_markers(
        &mut self,
        coords: impl IntoIterator<Item = (f64, f64)>,
    ) -> MarkerLoadReport {
        self.place_markers(
            coords
                .into_iter()
                .map(|(lat, lon)| MarkerEntry { lat, lon }.to_lat_lon().map_err(MarkerEntryError::from)),
        )
    }

    /// Parses a marker list and places its entries.
    ///
    /// Only an unreadable document is an error; a malformed or out-of-range
    /// entry is rejected on its own like in [`Self::add_markers`].
    pub fn load_marker_document(
        &mut self,
        payload: &str,
    ) -> Result<MarkerLoadReport, MarkerDocumentError> {
        let doc = MarkerDocument::from_json_str(payload)?;
        Ok(self.place_markers(doc.entries()))
    }

    fn place_markers(
        &mut self,
        entries: impl IntoIterator<Item = Result<LatLon, MarkerEntryError>>,
    ) -> MarkerLoadReport {
        let mut report = MarkerLoadReport::default();
        let tint = Tint::from_rgb_hex(self.config.markers.unvisited_rgb);

        for (source_index, entry) in entries.into_iter().enumerate() {
            let coord = match entry {
                Ok(coord) => coord,
                Err(error) => {
                    warn!(source_index, %error, "marker rejected");
                    self.bus.emit(
                        self.frame,
                        kinds::MARKER_REJECTED,
                        format!("#{source_index}: {error}"),
                    );
                    report.rejected.push(MarkerRejection {
                        source_index,
                        error,
                    });
                    continue;
                }
            };

            let position = project_surface(self.reference_radius, coord);
            let entity = spawn_marker(&mut self.world, self.globe.earth, position, tint);
            self.markers.push(GeoMarker {
                index: self.markers.len(),
                coord,
                entity,
                visited: false,
            });
            report.accepted += 1;
        }

        self.rejected += report.rejected.len();
        info!(
            accepted = report.accepted,
            rejected = report.rejected.len(),
            total = self.markers.len(),
            "markers added"
        );
        report
    }

    /// Records the outcome of the satellite model load.
    ///
    /// The first settled result wins: `Loaded` spawns the model, `Failed`
    /// leaves the satellite absent for the rest of the session. Anything after
    /// that is ignored.
    pub fn set_satellite(&mut self, state: LoadState<ObjModel>) {
        if !self.satellite.is_pending() {
            debug!(
                loaded = self.satellite.is_loaded(),
                "satellite load already settled; ignoring new result"
            );
            return;
        }
        match state {
            LoadState::Pending => {}
            LoadState::Loaded(model) => {
                let cfg = &self.config.satellite;
                // Validated with the rest of the config.
                let coord = LatLon::new(cfg.lat_deg, cfg.lon_deg).unwrap_or_default();
                let position = project(self.reference_radius, coord, cfg.altitude);
                let triangles = model.indices.len() / 3;
                let entity = spawn_satellite(
                    &mut self.world,
                    self.globe.earth,
                    model.into_mesh(),
                    position,
                    cfg.scale,
                );
                info!(triangles, "satellite loaded");
                self.bus
                    .emit(self.frame, kinds::ASSET_LOADED, format!("satellite ({triangles} triangles)"));
                self.satellite = LoadState::Loaded(entity);
            }
            LoadState::Failed(reason) => {
                warn!(%reason, "satellite failed to load");
                self.bus
                    .emit(self.frame, kinds::ASSET_FAILED, format!("satellite: {reason}"));
                self.satellite = LoadState::Failed(reason);
            }
        }
    }

    /// The "run" command. Returns `false` if a sweep is already running.
    pub fn run(&mut self) -> bool {
        let (next, events) = self.sweep.start(&self.config.sweep);
        if events.is_empty() {
            debug!("run ignored; sweep in progress");
            return false;
        }

        let tint = Tint::from_rgb_hex(self.config.markers.unvisited_rgb);
        for marker in &mut self.markers {
            marker.visited = false;
            self.world.set_tint(marker.entity, tint);
        }

        self.sweep = next;
        let mut report = TickReport::default();
        self.apply(events, &mut report);
        true
    }

    /// Applies one arrow key press to the earth and cloud shells.
    pub fn rotate(&mut self, key: ArrowKey) {
        let delta = key.rotation_delta(self.config.controls.rotate_step_rad);
        for entity in [self.globe.earth, self.globe.clouds] {
            if let Some(t) = self.world.transform_mut(entity) {
                t.rotation.x += delta.x;
                t.rotation.y += delta.y;
                t.rotation.z += delta.z;
            }
        }
    }

    /// [`Self::rotate`] from a DOM key name; unknown keys are ignored.
    pub fn on_key(&mut self, key: &str) -> bool {
        match ArrowKey::from_dom_key(key) {
            Some(k) => {
                self.rotate(k);
                true
            }
            None => false,
        }
    }

    /// Shows or hides the cloud shell. Returns the new state.
    pub fn toggle_clouds(&mut self) -> bool {
        let clouds = self.globe.clouds;
        let next = self.world.visibility(clouds).toggled();
        self.world.set_visibility(clouds, next);
        debug!(visible = next.visible, "clouds toggled");
        next.visible
    }

    /// Advances one rendered frame.
    pub fn tick(&mut self) -> TickReport {
        self.frame = self.frame.next();
        let mut report = TickReport {
            frame_index: self.frame.index,
            ..TickReport::default()
        };

        let spin = &self.config.spin;
        for (entity, rate) in [
            (self.globe.stars, spin.stars),
            (self.globe.earth, spin.earth),
            (self.globe.clouds, spin.clouds),
        ] {
            if let Some(t) = self.world.transform_mut(entity) {
                t.rotation.y += rate;
            }
        }

        if let Some(&satellite) = self.satellite.loaded() {
            let rate = self.config.satellite.spin_rad_per_frame;
            if let Some(t) = self.world.transform_mut(satellite) {
                t.rotation.z += rate;
            }
        }

        let (next, events) = self.sweep.step(&self.config.sweep, self.markers.len());
        self.sweep = next;
        self.apply(events, &mut report);
        report
    }

    fn apply(&mut self, events: Vec<SweepEvent>, report: &mut TickReport) {
        for event in events {
            match event {
                SweepEvent::Started => {
                    info!(markers = self.markers.len(), "sweep started");
                    self.bus.emit(
                        self.frame,
                        kinds::SWEEP_STARTED,
                        format!("{} markers", self.markers.len()),
                    );
                }
                SweepEvent::Status(text) => {
                    debug!(status = %text, frame = self.sweep.frame_count, "sweep status");
                    self.bus.emit(self.frame, kinds::SWEEP_STATUS, text.clone());
                    self.status = text;
                    report.status_changed = true;
                }
                SweepEvent::Visited { from, to } => {
                    let tint = Tint::from_rgb_hex(self.config.markers.visited_rgb);
                    let end = to.min(self.markers.len());
                    for marker in &mut self.markers[from.min(end)..end] {
                        marker.visited = true;
                        self.world.set_tint(marker.entity, tint);
                        self.bus.emit(
                            self.frame,
                            kinds::MARKER_VISITED,
                            format!(
                                "#{} ({:.4}, {:.4})",
                                marker.index,
                                marker.coord.lat_deg(),
                                marker.coord.lon_deg()
                            ),
                        );
                    }
                    report.newly_visited += end.saturating_sub(from);
                }
                SweepEvent::Finished {
                    summary,
                    visited,
                    total,
                    frames,
                } => {
                    info!(visited, total, frames, "sweep finished");
                    self.bus.emit(self.frame, kinds::SWEEP_FINISHED, summary.clone());
                    self.status = summary.clone();
                    report.status_changed = true;
                    report.finished = Some(summary);
                }
            }
        }
    }

    /// Replaces the tunables. Returns `Ok(false)` while a sweep is running.
    ///
    /// The globe is built once, so a different `globe` section is an error,
    /// as is moving the satellite after it has been placed.
    pub fn set_config(&mut self, config: SimConfig) -> Result<bool, ConfigError> {
        config.validate()?;
        if config.globe != self.config.globe {
            return Err(ConfigError::Invalid {
                field: "globe",
                reason: "fixed once the scene is built".to_string(),
            });
        }
        if self.satellite.is_loaded() && !config.satellite.same_placement(&self.config.satellite) {
            return Err(ConfigError::Invalid {
                field: "satellite",
                reason: "placement is fixed once the model is loaded".to_string(),
            });
        }
        if self.sweep.active {
            return Ok(false);
        }
        self.sweep = SweepState::idle(&config.sweep);
        self.config = config;
        Ok(true)
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn markers(&self) -> &[GeoMarker] {
        &self.markers
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    pub fn sweep(&self) -> &SweepState {
        &self.sweep
    }

    pub fn phase(&self) -> SweepPhase {
        self.sweep.phase(&self.config.sweep)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn globe(&self) -> GlobeEntities {
        self.globe
    }

    pub fn reference_radius(&self) -> f64 {
        self.reference_radius
    }

    pub fn satellite(&self) -> &LoadState<EntityId> {
        &self.satellite
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }
}
