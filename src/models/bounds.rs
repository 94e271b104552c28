// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Bounding box around a set of workout positions.

use geo::{BoundingRect, MultiPoint};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::workout::Coordinates;

/// Smallest box containing every given position, as `[lat, lng]` corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WorkoutBounds {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl WorkoutBounds {
    /// Returns `None` when there are no positions.
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let points: MultiPoint<f64> = coordinates.into_iter().map(Coordinates::to_point).collect();
        let rect = points.bounding_rect()?;

        Some(Self {
            south_west: [rect.min().y, rect.min().x],
            north_east: [rect.max().y, rect.max().x],
        })
    }
}
