//! Height-to-color mapping for the surface mesh.
//!
//! One scalar height sample maps to one RGB triple over the fixed domain
//! [HEIGHT_MIN, HEIGHT_MAX]. The ratio is deliberately left unclamped:
//! out-of-domain samples produce components outside [0,1], matching the
//! upstream data's behavior.

/// Lower edge of the color domain, also the vertical baseline of the mesh.
pub const HEIGHT_MIN: f32 = 61.0;
/// Upper edge of the color domain.
pub const HEIGHT_MAX: f32 = 72.0;

const R_OFFSET: f32 = 0.01;
const G_OFFSET: f32 = 0.01;
const B_OFFSET: f32 = 0.15;

/// Map a height sample to an RGB triple.
///
/// Low heights come out dark blue, high heights yellow. Values are in the
/// mapper's own space; callers feeding an sRGB pipeline run the components
/// through [`srgb_to_linear`] before storage.
pub fn height_to_rgb(height: f32) -> [f32; 3] {
    let ratio = (height - HEIGHT_MIN) / (HEIGHT_MAX - HEIGHT_MIN);
    [
        ratio * (1.0 - R_OFFSET) + R_OFFSET,
        ratio * (1.0 - G_OFFSET) + G_OFFSET,
        B_OFFSET - ratio * B_OFFSET,
    ]
}

/// Standard sRGB transfer function, component form.
///
/// The mapped triples are sRGB values; the swapchain encodes on scan-out,
/// so the buffer stores the linearized form to land back on the mapped
/// value on screen.
#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
