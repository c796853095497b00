use console_error_panic_hook::set_once;
use gloo_net::http::Request;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

use formats::ObjModel;
use gpu::{Globals, OrbitCamera, Renderer, SceneBatch};
use runtime::LoadState;
use sim::{SimConfig, SimulationContext};

mod wgpu;
use wgpu::{WgpuContext, init_wgpu_from_canvas_id, render_batch, resize_wgpu};

#[derive(Debug)]
pub struct ViewerState {
    pub sim: SimulationContext,
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub wgpu: Option<WgpuContext>,
    pub camera: OrbitCamera,
}

impl ViewerState {
    fn new(config: SimConfig) -> Result<Self, JsValue> {
        let sim = SimulationContext::new(config).map_err(to_js)?;
        Ok(Self {
            sim,
            canvas_width: 1280.0,
            canvas_height: 720.0,
            wgpu: None,
            camera: OrbitCamera::default(),
        })
    }
}

thread_local! {
    static STATE: RefCell<Option<ViewerState>> = const { RefCell::new(None) };
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(msg));
}

fn with_state<R>(f: impl FnOnce(&mut ViewerState) -> R) -> Result<R, JsValue> {
    STATE.with(|state| {
        let mut guard = state.borrow_mut();
        let s = guard
            .as_mut()
            .ok_or_else(|| JsValue::from_str("viewer not started"))?;
        Ok(f(s))
    })
}

fn render_scene() -> Result<(), JsValue> {
    with_state(|s| {
        let Some(ctx) = &s.wgpu else {
            return Ok(());
        };
        let world = s.sim.world();
        let batch = SceneBatch::build(world, &Renderer::collect_3d(world));
        let view_proj = s.camera.view_proj(s.canvas_width, s.canvas_height);
        render_batch(ctx, &batch, Globals::new(view_proj))
    })?
}

/// Forwards simulation events to the console.
fn flush_events(s: &mut ViewerState) {
    for event in s.sim.drain_events() {
        if event.kind == runtime::kinds::ASSET_FAILED || event.kind == runtime::kinds::MARKER_REJECTED {
            warn(&format!("[{}] {}: {}", event.frame_index, event.kind, event.message));
        } else if event.kind != runtime::kinds::SWEEP_STATUS {
            log(&format!("[{}] {}: {}", event.frame_index, event.kind, event.message));
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    let state = ViewerState::new(SimConfig::default())?;
    STATE.with(|s| *s.borrow_mut() = Some(state));
    Ok(())
}

#[wasm_bindgen]
pub fn init_wgpu(canvas_id: String) {
    spawn_local(async move {
        if let Err(err) = init_wgpu_inner(&canvas_id).await {
            warn(&format!("wgpu init error: {err:?}"));
        }
    });
}

#[wasm_bindgen]
pub fn set_canvas_sizes(width: f64, height: f64) -> Result<(), JsValue> {
    with_state(|s| {
        s.canvas_width = width;
        s.canvas_height = height;
        if let Some(ctx) = &mut s.wgpu {
            resize_wgpu(ctx, width as u32, height as u32);
        }
    })
}

/// Replaces the simulation tunables from a JSON document.
///
/// Returns `false` (and changes nothing) while a sweep is running.
#[wasm_bindgen]
pub fn set_sim_config(json: &str) -> Result<bool, JsValue> {
    let config = SimConfig::from_json_str(json).map_err(to_js)?;
    with_state(|s| s.sim.set_config(config))?.map_err(to_js)
}

/// Sets one numeric tunable, e.g. `("sweep.step_rad", 0.02)`.
#[wasm_bindgen]
pub fn set_sim_value(key: &str, value: f64) -> Result<bool, JsValue> {
    let mut config = with_state(|s| s.sim.config().clone())?;
    config.set_by_key(key, value).map_err(to_js)?;
    with_state(|s| s.sim.set_config(config))?.map_err(to_js)
}

#[wasm_bindgen]
pub fn camera_reset() -> Result<(), JsValue> {
    with_state(|s| s.camera = OrbitCamera::default())?;
    render_scene()
}

/// Orbit around the globe.
///
/// Intended usage: call with pointer delta in pixels.
#[wasm_bindgen]
pub fn camera_orbit(delta_x_px: f64, delta_y_px: f64) -> Result<(), JsValue> {
    with_state(|s| s.camera.orbit(delta_x_px, delta_y_px))?;
    render_scene()
}

/// Pan the camera target.
#[wasm_bindgen]
pub fn camera_pan(delta_x_px: f64, delta_y_px: f64) -> Result<(), JsValue> {
    with_state(|s| s.camera.pan(delta_x_px, delta_y_px))?;
    render_scene()
}

/// Zoom (dolly) in/out.
///
/// Intended usage: call with wheel deltaY.
#[wasm_bindgen]
pub fn camera_zoom(wheel_delta_y: f64) -> Result<(), JsValue> {
    with_state(|s| s.camera.zoom(wheel_delta_y))?;
    render_scene()
}

/// Keyboard handler; pass `KeyboardEvent.key`. Returns whether the key was used.
#[wasm_bindgen]
pub fn on_key_down(key: &str) -> Result<bool, JsValue> {
    let used = with_state(|s| s.sim.on_key(key))?;
    if used {
        render_scene()?;
    }
    Ok(used)
}

/// The "run" command. Returns `false` if a sweep is already running.
#[wasm_bindgen]
pub fn run_simulation() -> Result<bool, JsValue> {
    with_state(|s| {
        let started = s.sim.run();
        flush_events(s);
        started
    })
}

/// Shows or hides the cloud shell. Returns whether it is now visible.
#[wasm_bindgen]
pub fn toggle_clouds() -> Result<bool, JsValue> {
    let visible = with_state(|s| s.sim.toggle_clouds())?;
    render_scene()?;
    Ok(visible)
}

/// `"pending"`, `"loaded"`, or `"failed: <reason>"`.
#[wasm_bindgen]
pub fn satellite_state() -> Result<String, JsValue> {
    with_state(|s| match s.sim.satellite() {
        LoadState::Pending => "pending".to_string(),
        LoadState::Loaded(_) => "loaded".to_string(),
        LoadState::Failed(reason) => format!("failed: {reason}"),
    })
}

#[wasm_bindgen]
pub fn status_text() -> Result<String, JsValue> {
    with_state(|s| s.sim.status().to_string())
}

#[wasm_bindgen]
pub fn marker_count() -> Result<u32, JsValue> {
    with_state(|s| s.sim.markers().len() as u32)
}

#[wasm_bindgen]
pub fn load_markers(url: String) {
    spawn_local(async move {
        let text = match fetch_text(&url).await {
            Ok(text) => text,
            Err(err) => {
                warn(&format!("Failed to fetch markers: {err:?}"));
                return;
            }
        };

        let result = with_state(|s| {
            let report = s.sim.load_marker_document(&text);
            flush_events(s);
            report
        });
        match result {
            Ok(Ok(report)) => log(&format!(
                "markers: {} placed, {} rejected",
                report.accepted,
                report.rejected.len()
            )),
            Ok(Err(err)) => warn(&format!("Failed to parse markers: {err}")),
            Err(err) => warn(&format!("{err:?}")),
        }

        if let Err(err) = render_scene() {
            warn(&format!("render error: {err:?}"));
        }
    });
}

#[wasm_bindgen]
pub fn load_satellite(url: String) {
    spawn_local(async move {
        let state = match fetch_text(&url).await {
            Ok(text) => LoadState::from_result(ObjModel::parse(&text)),
            Err(err) => LoadState::Failed(err.as_string().unwrap_or_else(|| format!("{err:?}"))),
        };
        let applied = with_state(|s| {
            s.sim.set_satellite(state);
            flush_events(s);
        });
        if let Err(err) = applied.and_then(|()| render_scene()) {
            warn(&format!("satellite load: {err:?}"));
        }
    });
}

/// Advances one display frame and returns the status text.
///
/// Call from `requestAnimationFrame`; animation is per frame, not per second.
#[wasm_bindgen]
pub fn advance_frame() -> Result<String, JsValue> {
    let status = with_state(|s| {
        s.sim.tick();
        flush_events(s);
        s.sim.status().to_string()
    })?;
    render_scene()?;
    Ok(status)
}

async fn init_wgpu_inner(canvas_id: &str) -> Result<(), JsValue> {
    let ctx = init_wgpu_from_canvas_id(canvas_id).await?;
    with_state(|s| s.wgpu = Some(ctx))?;
    render_scene()
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url).send().await.map_err(to_js)?;
    if !resp.ok() {
        return Err(JsValue::from_str(&format!(
            "{url}: HTTP {} {}",
            resp.status(),
            resp.status_text()
        )));
    }
    resp.text().await.map_err(to_js)
}
