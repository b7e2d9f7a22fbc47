use serde::{Deserialize, Serialize};
use tracklens_3d::{ObjectInstance, BOX_EDGES, FRONT_FACE_EDGES};
use tracklens_image::{Image, ImageSize};
use tracklens_imgproc::{draw, hull};

/// Colors and marker value used to render instances.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// RGB color of the 12 box edges.
    pub box_color: [u8; 3],
    /// RGB color of the front face edges, drawn on top of the box.
    pub front_color: [u8; 3],
    /// Line thickness in pixels.
    pub thickness: usize,
    /// Value written in the mask for covered pixels.
    pub mask_value: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            box_color: [255, 0, 0],
            front_color: [0, 0, 255],
            thickness: 1,
            mask_value: 1.0,
        }
    }
}

/// Draw the wireframe of an instance onto an RGB image.
///
/// The 12 box edges are drawn first, then the 4 front face edges again in the
/// emphasis color so they stay on top.
///
/// Instances that are not fully visible in the image are skipped and `false` is
/// returned: their projected corners may be far off the canvas or meaningless.
pub fn draw_wireframe(image: &mut Image<u8, 3>, instance: &ObjectInstance, style: &RenderStyle) -> bool {
    if !drawable(instance, image.size()) {
        return false;
    }

    let corners = instance.pixel_corners();

    for (a, b) in BOX_EDGES {
        draw::draw_line(image, corners[a], corners[b], style.box_color, style.thickness);
    }

    for (a, b) in FRONT_FACE_EDGES {
        draw::draw_line(image, corners[a], corners[b], style.front_color, style.thickness);
    }

    true
}

/// Fill the convex hull of an instance's projected corners on a mask.
///
/// Pixels already set by earlier instances are overwritten. Like
/// [`draw_wireframe`], instances not fully visible in the mask are skipped.
pub fn fill_silhouette(mask: &mut Image<f32, 1>, instance: &ObjectInstance, value: f32) -> bool {
    if !drawable(instance, mask.size()) {
        return false;
    }

    let silhouette = hull::convex_hull(&instance.pixel_corners());
    draw::fill_convex_poly(mask, &silhouette, [value]);

    true
}

fn drawable(instance: &ObjectInstance, size: ImageSize) -> bool {
    let visible = instance.is_visible(size);
    if !visible {
        log::debug!("skipping track #{}: not fully visible", instance.track_id());
    }
    visible
}
