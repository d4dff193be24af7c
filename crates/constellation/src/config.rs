use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::graph::GraphStyle;
use crate::layout::LayoutPolicy;
use crate::overlay::OverlayConfig;
use crate::rotation::RotationConfig;

/// The projection plane must sit at least this many times the scene's
/// maximum extent away from the origin.
pub const PROJECTION_MARGIN: f64 = 1.5;

/// Edge selection is an all-pairs scan per frame; past this many nodes it
/// needs a spatial index, which this renderer deliberately does not have.
pub const MAX_NODE_COUNT: usize = 2_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
    pub node_count: usize,
    pub sphere_radius: f64,
    pub projection_distance: f64,
    pub rotation: RotationConfig,
    pub graph: GraphStyle,
    pub overlay: OverlayConfig,
    pub layout: LayoutPolicy,
}

impl Default for ConstellationConfig {
    fn default() -> Self {
        Self {
            node_count: 100,
            sphere_radius: 280.0,
            projection_distance: 2000.0,
            rotation: RotationConfig::default(),
            graph: GraphStyle::default(),
            overlay: OverlayConfig::default(),
            layout: LayoutPolicy::default(),
        }
    }
}

fn finite(field: &'static str, v: f64) -> Result<f64, ConfigError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::invalid(field, format!("{v} is not finite")))
    }
}

fn non_negative(field: &'static str, v: f64) -> Result<f64, ConfigError> {
    if finite(field, v)? < 0.0 {
        return Err(ConfigError::invalid(field, format!("{v} is negative")));
    }
    Ok(v)
}

fn unit_interval(field: &'static str, v: f64) -> Result<f64, ConfigError> {
    if !(0.0..=1.0).contains(&finite(field, v)?) {
        return Err(ConfigError::invalid(field, format!("{v} is outside [0, 1]")));
    }
    Ok(v)
}

impl ConstellationConfig {
    /// Parses a (possibly partial) JSON document and validates it.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Largest `|z|` any rotated node or overlay base point can reach.
    pub fn max_extent(&self) -> f64 {
        let overlay = self.sphere_radius + self.overlay.radius_offset;
        self.sphere_radius.max(overlay.abs())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.node_count > MAX_NODE_COUNT {
            return Err(ConfigError::invalid(
                "node_count",
                format!("{} exceeds {MAX_NODE_COUNT}", self.node_count),
            ));
        }

        if finite("sphere_radius", self.sphere_radius)? <= 0.0 {
            return Err(ConfigError::invalid("sphere_radius", "must be positive"));
        }
        finite("overlay.radius_offset", self.overlay.radius_offset)?;

        let distance = finite("projection_distance", self.projection_distance)?;
        let max_extent = self.max_extent();
        if distance <= max_extent * PROJECTION_MARGIN {
            return Err(ConfigError::ProjectionTooClose {
                distance,
                max_extent,
            });
        }

        let rx = finite("rotation.rate_x", self.rotation.rate_x)?;
        let ry = finite("rotation.rate_y", self.rotation.rate_y)?;
        if rx == ry && rx != 0.0 {
            return Err(ConfigError::invalid(
                "rotation",
                "rate_x and rate_y must differ so the axis precesses",
            ));
        }

        non_negative("graph.connection_threshold_px", self.graph.connection_threshold_px)?;
        finite("graph.min_visibility", self.graph.min_visibility)?;
        non_negative("graph.node_radius_px", self.graph.node_radius_px)?;
        non_negative("graph.edge_width_px", self.graph.edge_width_px)?;
        unit_interval("graph.edge_alpha", self.graph.edge_alpha)?;

        finite("overlay.vertical_flatten", self.overlay.vertical_flatten)?;
        unit_interval("overlay.min_opacity", self.overlay.min_opacity)?;
        finite("overlay.depth_bias", self.overlay.depth_bias)?;

        non_negative("layout.narrow_breakpoint_px", self.layout.narrow_breakpoint_px)?;
        for v in self.layout.wide_center.iter().chain(&self.layout.narrow_center) {
            finite("layout.center", *v)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConstellationConfig, MAX_NODE_COUNT};
    use crate::error::ConfigError;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_stable_and_valid() {
        let cfg = ConstellationConfig::default();
        assert_eq!(cfg.node_count, 100);
        assert_eq!(cfg.sphere_radius, 280.0);
        assert_eq!(cfg.projection_distance, 2000.0);
        assert_eq!(cfg.rotation.rate_x, 0.001);
        assert_eq!(cfg.rotation.rate_y, 0.002);
        assert_eq!(cfg.graph.connection_threshold_px, 100.0);
        assert_eq!(cfg.graph.min_visibility, 0.1);
        assert_eq!(cfg.graph.node_radius_px, 2.0);
        assert_eq!(cfg.overlay.radius_offset, 40.0);
        assert_eq!(cfg.overlay.vertical_flatten, 0.6);
        assert_eq!(cfg.overlay.min_opacity, 0.2);
        assert_eq!(cfg.max_extent(), 320.0);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let cfg = ConstellationConfig::from_json(
            r#"{ "node_count": 60, "graph": { "connection_threshold_px": 80 } }"#,
        )
        .unwrap();
        assert_eq!(cfg.node_count, 60);
        assert_eq!(cfg.graph.connection_threshold_px, 80.0);
        assert_eq!(cfg.graph.min_visibility, 0.1);
        assert_eq!(cfg.sphere_radius, 280.0);
    }

    #[test]
    fn json_round_trips() {
        let cfg = ConstellationConfig::default();
        let text = cfg.to_json_pretty().unwrap();
        assert_eq!(ConstellationConfig::from_json(&text).unwrap(), cfg);
    }

    #[test]
    fn rejects_projection_plane_inside_the_scene() {
        let cfg = ConstellationConfig {
            projection_distance: 300.0,
            ..ConstellationConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ProjectionTooClose {
                distance: 300.0,
                max_extent: 320.0,
            })
        );
    }

    #[test]
    fn rejects_equal_rotation_rates() {
        let mut cfg = ConstellationConfig::default();
        cfg.rotation.rate_x = 0.002;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidValue { field: "rotation", .. })
        ));

        // A paused sphere is fine.
        cfg.rotation.rate_x = 0.0;
        cfg.rotation.rate_y = 0.0;
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn rejects_oversized_node_counts() {
        let cfg = ConstellationConfig {
            node_count: MAX_NODE_COUNT + 1,
            ..ConstellationConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_and_out_of_range_values() {
        let mut cfg = ConstellationConfig::default();
        cfg.sphere_radius = f64::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = ConstellationConfig::default();
        cfg.overlay.min_opacity = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = ConstellationConfig::default();
        cfg.graph.connection_threshold_px = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            ConstellationConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
