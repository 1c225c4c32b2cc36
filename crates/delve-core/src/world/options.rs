//! Generation options
//!
//! Tunable parameters for the generation pipeline. Defaults come from
//! [`crate::consts`]; a level only needs options when it wants to deviate.
//!
//! Two on-disk forms are understood: the `OPTIONS=key:value,...` text form
//! (one or more lines, `#` comments) and, with `std`, a JSON object.

#[cfg(not(feature = "std"))]
use crate::compat::*;

use serde::{Deserialize, Serialize};
#[cfg(feature = "std")]
use std::path::Path;

use super::errors::OptionsError;
use crate::consts::{
    CORRIDOR_ABORT_PERCENT, DOOR_LIGHT_COST, HORIZONTAL_SPLIT_PERCENT, LIGHT_RADIUS,
    MAX_ASPECT_RATIO, MIN_LEAF_SIZE, MIN_ROOM_SIZE, SIGHT_RANGE,
};

/// Parameters of the generation pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationOptions {
    // Partitioning
    pub min_leaf_size: i32,
    pub horizontal_split_percent: u32,

    // Rooms
    pub min_room_size: i32,
    pub max_aspect_ratio: i32,

    // Corridors
    pub corridor_abort_percent: u32,

    // Lighting
    pub light_radius: u32,
    pub door_light_cost: u32,

    // Vision
    pub sight_range: i32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            min_leaf_size: MIN_LEAF_SIZE,
            horizontal_split_percent: HORIZONTAL_SPLIT_PERCENT,

            min_room_size: MIN_ROOM_SIZE,
            max_aspect_ratio: MAX_ASPECT_RATIO,

            corridor_abort_percent: CORRIDOR_ABORT_PERCENT,

            light_radius: LIGHT_RADIUS,
            door_light_cost: DOOR_LIGHT_COST,

            sight_range: SIGHT_RANGE,
        }
    }
}

impl GenerationOptions {
    #[cfg(feature = "std")]
    /// Load options from a file; `.json` files are parsed as JSON
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| OptionsError::Io(e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&contents)
        } else {
            Self::parse_config(&contents)
        }
    }

    #[cfg(feature = "std")]
    /// Parse options from a JSON object; missing fields keep their defaults
    pub fn from_json(contents: &str) -> Result<Self, OptionsError> {
        let options: Self =
            serde_json::from_str(contents).map_err(|e| OptionsError::Json(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    /// Parse options from `OPTIONS=key:value,...` lines
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                    options.parse_option(opt)?;
                }
            }
        }

        options.validate()?;
        Ok(options)
    }

    /// Parse a single `key:value` or `key=value` option
    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        let (name, value) = opt
            .split_once(':')
            .or_else(|| opt.split_once('='))
            .ok_or_else(|| OptionsError::MissingValue(opt.to_string()))?;
        self.set_option(name.trim(), value.trim())
    }

    /// Set a numeric option by name
    fn set_option(&mut self, name: &str, value: &str) -> Result<(), OptionsError> {
        let invalid = || OptionsError::InvalidValue {
            name: name.to_string(),
            value: value.to_string(),
        };

        match name {
            "min_leaf_size" => self.min_leaf_size = value.parse().map_err(|_| invalid())?,
            "horizontal_split_percent" => {
                self.horizontal_split_percent = value.parse().map_err(|_| invalid())?
            }
            "min_room_size" => self.min_room_size = value.parse().map_err(|_| invalid())?,
            "max_aspect_ratio" => self.max_aspect_ratio = value.parse().map_err(|_| invalid())?,
            "corridor_abort_percent" => {
                self.corridor_abort_percent = value.parse().map_err(|_| invalid())?
            }
            "light_radius" => self.light_radius = value.parse().map_err(|_| invalid())?,
            "door_light_cost" => self.door_light_cost = value.parse().map_err(|_| invalid())?,
            "sight_range" => self.sight_range = value.parse().map_err(|_| invalid())?,
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Reject values the pipeline cannot honour
    pub fn validate(&self) -> Result<(), OptionsError> {
        let invalid = |name: &str, value: String| {
            Err(OptionsError::InvalidValue {
                name: name.to_string(),
                value,
            })
        };

        // A room needs a wall border around at least one floor cell
        if self.min_room_size < 3 {
            return invalid("min_room_size", self.min_room_size.to_string());
        }
        if self.min_leaf_size < self.min_room_size {
            return invalid("min_leaf_size", self.min_leaf_size.to_string());
        }
        if self.max_aspect_ratio < 1 {
            return invalid("max_aspect_ratio", self.max_aspect_ratio.to_string());
        }
        if self.horizontal_split_percent > 100 {
            return invalid(
                "horizontal_split_percent",
                self.horizontal_split_percent.to_string(),
            );
        }
        if self.corridor_abort_percent > 100 {
            return invalid(
                "corridor_abort_percent",
                self.corridor_abort_percent.to_string(),
            );
        }
        if self.door_light_cost == 0 {
            return invalid("door_light_cost", self.door_light_cost.to_string());
        }
        if self.sight_range < 0 {
            return invalid("sight_range", self.sight_range.to_string());
        }
        Ok(())
    }
}
