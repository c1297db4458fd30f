//! Controller configuration.

use serde::{Deserialize, Serialize};

/// Knobs shared by every node of a controller.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Variable sampled as the lateral (x) blend coordinate.
    pub blend_x_variable: String,
    /// Variable sampled as the forward/back (z) blend coordinate.
    pub blend_z_variable: String,
    /// Maximum clip events republished per tick; the rest are dropped with a warning.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            blend_x_variable: "moveX".to_string(),
            blend_z_variable: "moveZ".to_string(),
            max_events_per_tick: 256,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let cfg: Config = serde_json::from_str(r#"{ "blend_x_variable": "strafe" }"#).unwrap();
        assert_eq!(cfg.blend_x_variable, "strafe");
        assert_eq!(cfg.blend_z_variable, "moveZ");
        assert_eq!(cfg.max_events_per_tick, 256);
    }
}
