//! Frame payloads and the live surface buffers.
//!
//! `FrameStore` is the single writer of the position/color pair the
//! renderer draws from. Buffers are allocated once at startup and mutated
//! in place on every accepted frame; dirty flags tell the renderer when a
//! re-upload is due.

use serde::Deserialize;

use crate::colormap::{self, HEIGHT_MIN};
use crate::mesh;

/// Wire format of one surface frame:
/// `{ "surface_id": ..., "vertices": [[f32; n]; n] }`.
///
/// The server answers invalid ids with a body that simply lacks the id or
/// the samples, so both fields are optional/defaulted and validity is
/// decided by [`SurfacePayload::grid`].
#[derive(Debug, Clone, Deserialize)]
pub struct SurfacePayload {
    #[serde(default)]
    pub surface_id: Option<u64>,
    #[serde(default)]
    pub vertices: Vec<Vec<f32>>,
}

impl SurfacePayload {
    /// The height matrix, if this payload is a well-formed n×n frame.
    pub fn grid(&self, n: usize) -> Option<&[Vec<f32>]> {
        if self.surface_id.is_none() {
            return None;
        }
        if self.vertices.len() != n || self.vertices.iter().any(|row| row.len() != n) {
            return None;
        }
        Some(&self.vertices)
    }
}

pub struct FrameStore {
    n: usize,
    positions: Vec<f32>,
    colors: Vec<f32>,
    positions_dirty: bool,
    colors_dirty: bool,
}

impl FrameStore {
    /// Allocate the buffer pair for an n×n grid. Positions start on the
    /// flat topology (z = 0), colors black, both flagged for the initial
    /// upload.
    pub fn new(n: usize) -> Self {
        FrameStore {
            n,
            positions: mesh::grid_positions(n),
            colors: vec![0.0; n * n * 3],
            positions_dirty: true,
            colors_dirty: true,
        }
    }

    /// Apply one fetched frame in place.
    ///
    /// Malformed payloads (missing id, empty or ragged rows) leave both
    /// buffers untouched and return false; the previous frame stays on
    /// screen. Well-formed payloads rewrite every vertex's z and color and
    /// mark both buffers dirty.
    pub fn apply(&mut self, payload: &SurfacePayload) -> bool {
        let Some(rows) = payload.grid(self.n) else {
            return false;
        };
        for (i, row) in rows.iter().enumerate() {
            for (j, &height) in row.iter().enumerate() {
                let idx = i * self.n + j;
                self.positions[idx * 3 + 2] = height - HEIGHT_MIN;
                let rgb = colormap::height_to_rgb(height);
                self.colors[idx * 3] = colormap::srgb_to_linear(rgb[0]);
                self.colors[idx * 3 + 1] = colormap::srgb_to_linear(rgb[1]);
                self.colors[idx * 3 + 2] = colormap::srgb_to_linear(rgb[2]);
            }
        }
        self.positions_dirty = true;
        self.colors_dirty = true;
        true
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// True once per mutation; clears the flag.
    pub fn take_positions_dirty(&mut self) -> bool {
        std::mem::take(&mut self.positions_dirty)
    }

    pub fn take_colors_dirty(&mut self) -> bool {
        std::mem::take(&mut self.colors_dirty)
    }
}
