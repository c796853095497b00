//! Headless sweep runner behind the `globe-sweep` binary.

use foundation::math::{LatLon, Vec3, project};
use serde::Serialize;
use sim::{SimConfig, SimulationContext};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepReport {
    pub markers_placed: usize,
    pub markers_rejected: usize,
    pub visited: usize,
    pub frames: u64,
    /// Every status line shown during the sweep, in order.
    pub statuses: Vec<String>,
    pub summary: Option<String>,
}

/// Loads `markers_json`, runs one sweep, and collects what a viewer would show.
///
/// Stops after `max_frames` ticks even if the sweep has not finished; the
/// report then has no summary.
pub fn run_sweep(
    config: SimConfig,
    markers_json: &str,
    max_frames: u64,
) -> Result<SweepReport, String> {
    let mut ctx = SimulationContext::new(config).map_err(|e| e.to_string())?;
    let loaded = ctx
        .load_marker_document(markers_json)
        .map_err(|e| e.to_string())?;

    ctx.run();
    let mut statuses = vec![ctx.status().to_string()];
    let mut summary = None;

    for _ in 0..max_frames {
        let report = ctx.tick();
        if report.status_changed {
            statuses.push(ctx.status().to_string());
        }
        if let Some(done) = report.finished {
            summary = Some(done);
            break;
        }
    }

    if summary.is_none() {
        info!(max_frames, "frame limit reached before the sweep finished");
    }

    Ok(SweepReport {
        markers_placed: loaded.accepted,
        markers_rejected: loaded.rejected.len(),
        visited: ctx.sweep().visited,
        frames: ctx.sweep().frame_count,
        statuses,
        summary,
    })
}

/// Where `(lat, lon)` lands at `alt` above a sphere of `radius`.
///
/// The projected distance is `radius + alt`, which must be positive.
pub fn project_point(lat: f64, lon: f64, radius: f64, alt: f64) -> Result<Vec3, String> {
    let coord = LatLon::new(lat, lon).map_err(|e| e.to_string())?;
    let r = radius + alt;
    if !(r > 0.0 && r.is_finite()) {
        return Err(format!("radius + alt must be positive, got {r}"));
    }
    Ok(project(radius, coord, alt))
}

#[cfg(test)]
mod tests {
    use super::{project_point, run_sweep};
    use pretty_assertions::assert_eq;
    use sim::SimConfig;

    const MARKERS: &str = r#"{ "values": [
        { "lat": 0, "lon": 0 },
        { "lat": 48.85, "lon": 2.35 },
        { "lat": 123, "lon": 0 },
        { "lat": -33.9, "lon": 151.2 }
    ] }"#;

    #[test]
    fn full_run_reports_summary_and_statuses() {
        let report = run_sweep(SimConfig::default(), MARKERS, 10_000).unwrap();
        assert_eq!(report.markers_placed, 3);
        assert_eq!(report.markers_rejected, 1);
        assert_eq!(report.visited, 3);
        assert_eq!(report.frames, 629);
        assert_eq!(
            report.summary.as_deref(),
            Some("Simulation complete: satellite passed over 3 of 3 markers in 629 frames.")
        );
        assert_eq!(&report.statuses[..4], &["Calculating.", "Calculating..", "Calculating...", "Calculating."]);
        assert_eq!(report.statuses.last(), report.summary.as_ref());
    }

    #[test]
    fn frame_limit_cuts_the_run_short() {
        let report = run_sweep(SimConfig::default(), MARKERS, 50).unwrap();
        assert_eq!(report.summary, None);
        assert_eq!(report.frames, 50);
        assert_eq!(report.statuses.len(), 3);
    }

    #[test]
    fn custom_template_and_step() {
        let config = SimConfig::from_json_str(
            r#"{ "sweep": { "step_rad": 0.1, "summary_template": "{visited}/{total} after {frames}" } }"#,
        )
        .unwrap();
        let report = run_sweep(config, MARKERS, 10_000).unwrap();
        assert_eq!(report.summary.as_deref(), Some("3/3 after 63"));
    }

    #[test]
    fn bad_marker_json_is_an_error() {
        let err = run_sweep(SimConfig::default(), "[1, 2]", 10).unwrap_err();
        assert!(err.starts_with("marker list parse error"));
    }

    #[test]
    fn project_point_rejects_non_positive_distance() {
        let p = project_point(0.0, 0.0, 1.0, 0.0).unwrap();
        assert!((p.x - 1.0).abs() < 1e-12 && p.y.abs() < 1e-12 && p.z.abs() < 1e-12);
        assert!(project_point(0.0, 0.0, 0.0, 0.0).is_err());
        assert!(project_point(0.0, 0.0, -1.0, 0.0).is_err());
        assert!(project_point(0.0, 0.0, 0.6, -0.6).is_err());
        assert!(project_point(0.0, 0.0, 0.6, -0.5).is_ok());
        assert!(project_point(91.0, 0.0, 0.6, 0.0).unwrap_err().starts_with("latitude"));
    }
}
