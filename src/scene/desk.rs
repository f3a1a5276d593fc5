//! The desk scene
//!
//! Asset lists and the per-frame composition of the desk: a backdrop, a
//! wooden desk, a phone holder, a water bottle, a book, two monitors, a
//! mouse and a keyboard with a 5 x 12 key grid.

use super::draw_list::{CylinderParts, MeshKind};
use super::manager::FrameComposer;
use crate::gfx::resources::material::{presets, MaterialRegistry};

/// Image files (relative to the texture directory) and the tags they are
/// registered under, in slot order
pub const SCENE_TEXTURES: [(&str, &str); 13] = [
    ("silverBase.jpg", "silverBase"),
    ("metallicSilver.jpg", "metallicSilver"),
    ("rubber.jpg", "rubber"),
    ("grayHolders.jpg", "grayHolder"),
    ("rusticwood.jpg", "wood"),
    ("knife_handle.jpg", "knife"),
    ("stainedglass.jpg", "stained"),
    ("backdrop.jpg", "backdrop"),
    ("keyboardBase.jpg", "keyboard"),
    ("mouse.jpg", "mouse"),
    ("waterBottle.jpg", "waterBottle"),
    ("book.jpg", "book"),
    ("drywall.jpg", "body"),
];

/// Meshes the scene needs loaded before its first frame
pub const SCENE_MESHES: [MeshKind; 8] = [
    MeshKind::Plane,
    MeshKind::Cylinder,
    MeshKind::Box,
    MeshKind::Sphere,
    MeshKind::Pyramid4,
    MeshKind::Cone,
    MeshKind::TaperedCylinder,
    MeshKind::HalfSphere,
];

pub const KEY_ROWS: usize = 5;
pub const KEY_COLUMNS: usize = 12;

const KEY_SIZE: [f32; 3] = [0.8, 0.2, 0.8];
const KEY_SPACING: f32 = 0.05;

/// Centre of the key at `row`, `col`
pub fn key_position(row: usize, col: usize) -> [f32; 3] {
    let start_x = -5.0 + KEY_SIZE[0] / 2.0;
    let start_y = 0.2 + 0.25 + KEY_SIZE[1] / 2.0;
    let start_z = 8.0 - KEY_SIZE[2] / 2.0;

    [
        start_x + col as f32 * (KEY_SIZE[0] + KEY_SPACING),
        start_y,
        start_z - row as f32 * (KEY_SIZE[2] + KEY_SPACING),
    ]
}

/// Registers the scene's materials
///
/// The rubber preset is built but left out of the registry.
pub fn define_object_materials(materials: &mut MaterialRegistry) {
    materials.define(presets::metal());
    materials.define(presets::wooden());
    materials.define(presets::glass());
    materials.define(presets::plate());
    materials.define(presets::book());

    let rubber = presets::rubber();
    log::debug!("Material '{}' prepared but not registered", rubber.tag);
}

/// Records one frame of the desk scene
pub fn compose<H>(frame: &mut FrameComposer<'_, H>) {
    render_water_bottle(frame);
    render_backdrop(frame);
    render_phone_holder(frame);
    render_desk(frame);
    render_book(frame);
    render_monitors(frame);
    render_mouse(frame);
    render_keyboard(frame);
}

fn render_backdrop<H>(frame: &mut FrameComposer<'_, H>) {
    frame.set_transformations([50.0, 50.0, 50.0], 90.0, 0.0, 0.0, [0.0, 0.0, -10.0]);
    frame.set_shader_texture("backdrop");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.draw_plane_mesh();
}

fn render_desk<H>(frame: &mut FrameComposer<'_, H>) {
    // Top
    frame.set_transformations([40.0, 1.0, 20.0], 0.0, 0.0, 0.0, [0.0, -0.5, 0.0]);
    frame.set_shader_color(1.0, 1.0, 1.0, 1.0);
    frame.set_shader_texture("knife");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("wooden");
    frame.draw_box_mesh();

    // Legs
    for x in [-15.0, 15.0] {
        frame.set_transformations([8.0, 12.0, 10.0], 0.0, 0.0, 0.0, [x, -6.5, 0.0]);
        frame.set_shader_color(1.0, 1.0, 1.0, 1.0);
        frame.set_shader_texture("wood");
        frame.set_texture_uv_scale(1.0, 1.0);
        frame.set_shader_material("wooden");
        frame.draw_box_mesh();
    }
}

fn render_phone_holder<H>(frame: &mut FrameComposer<'_, H>) {
    // Base plate
    frame.set_transformations([2.0, 0.2, 2.0], 0.0, -45.0, 0.0, [1.0, 0.0, 1.0]);
    frame.set_shader_texture("silverBase");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.draw_box_mesh();

    // Upright post
    frame.set_transformations([0.15, 3.0, 0.1], 0.0, -45.0, 0.0, [1.5, 0.0, 0.5]);
    frame.set_shader_texture("metallicSilver");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_cylinder_mesh(CylinderParts::ALL);

    // Joint
    frame.set_transformations([0.2, 0.2, 0.2], 0.0, -45.0, 0.0, [1.4, 2.8, 0.6]);
    frame.set_shader_texture("silverBase");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_box_mesh();

    // Arm
    frame.set_transformations([0.1, 1.5, 0.1], 90.0, 45.0, 0.0, [0.78, 2.8, 0.1]);
    frame.set_shader_texture("body");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_cylinder_mesh(CylinderParts::ALL);

    // Cradle; "drywall" is the file name, not a registered tag
    frame.set_transformations([1.5, 0.05, 2.0], 60.0, -45.0, 0.0, [0.95, 2.0, 0.99065]);
    frame.set_shader_texture("drywall");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_box_mesh();

    // Holder tabs
    let tabs = [
        (-20.0, [0.12, 1.23, 1.0]),
        (-20.0, [0.95, 1.23, 1.8]),
        (-125.0, [0.12, 1.35, 1.0]),
        (-125.0, [0.93, 1.35, 1.8]),
    ];
    for (x_rotation, position) in tabs {
        frame.set_transformations([0.2, 0.05, 0.2], x_rotation, -45.0, 0.0, position);
        frame.set_shader_texture("grayHolder");
        frame.set_texture_uv_scale(1.0, 1.0);
        frame.set_shader_material("plate");
        frame.draw_box_mesh();
    }
}

fn render_book<H>(frame: &mut FrameComposer<'_, H>) {
    frame.set_transformations([3.0, 0.5, 2.0], 0.0, 45.0, 0.0, [-7.0, 0.25, 1.8]);
    frame.set_shader_texture("book");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("book");
    frame.draw_box_mesh();
}

fn render_water_bottle<H>(frame: &mut FrameComposer<'_, H>) {
    // Body
    frame.set_transformations([1.0, 2.5, 1.0], 0.0, 0.0, 0.0, [-2.5, 0.0, 1.8]);
    frame.set_shader_texture("waterBottle");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_cylinder_mesh(CylinderParts::ALL);

    // Shoulder
    frame.set_transformations([1.0, 1.4, 1.0], 0.0, 0.0, 0.0, [-2.5, 2.5, 1.8]);
    frame.set_shader_texture("waterBottle");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_cone_mesh();

    // Cap
    frame.set_transformations([0.3, 0.5, 0.3], 0.0, 0.0, 0.0, [-2.5, 3.393, 1.8]);
    frame.set_shader_texture("waterBottle");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("glass");
    frame.draw_cylinder_mesh(CylinderParts::ALL);
}

fn render_monitors<H>(frame: &mut FrameComposer<'_, H>) {
    let screen = [27.9 * 0.4, 15.7 * 0.4, 2.0 * 0.4];

    for (x, y_rotation) in [(-8.0, 15.0), (8.0, -15.0)] {
        let parts = [
            (screen, [x, 6.0, -4.0]),
            ([4.0, 0.2, 4.0], [x, 0.2, -4.5]),
            ([1.0, 4.0, 1.0], [x, 2.0, -4.8]),
        ];
        for (scale, position) in parts {
            frame.set_transformations(scale, 0.0, y_rotation, 0.0, position);
            frame.set_shader_texture("keyboard");
            frame.set_texture_uv_scale(1.0, 1.0);
            frame.set_shader_material("plate");
            frame.draw_box_mesh();
        }
    }

    // Display panels, plain white
    for (x, y_rotation) in [(7.9, -15.0), (-7.9, 15.0)] {
        frame.set_transformations([10.0, 5.0, 0.1], 0.0, y_rotation, 0.0, [x, 6.0, -3.66]);
        frame.set_shader_color(1.0, 1.0, 1.0, 1.0);
        frame.draw_box_mesh();
    }
}

fn render_keyboard<H>(frame: &mut FrameComposer<'_, H>) {
    frame.set_transformations([10.2, 0.5, 4.0], 0.0, 0.0, 0.0, [0.1, 0.25, 6.0]);
    frame.set_shader_texture("keyboard");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("plate");
    frame.draw_box_mesh();

    for row in 0..KEY_ROWS {
        for col in 0..KEY_COLUMNS {
            frame.set_transformations(KEY_SIZE, 0.0, 0.0, 0.0, key_position(row, col));
            frame.set_shader_texture("body");
            frame.set_texture_uv_scale(1.0, 1.0);
            frame.set_shader_material("plate");
            frame.draw_box_mesh();
        }
    }
}

fn render_mouse<H>(frame: &mut FrameComposer<'_, H>) {
    // Body, open at the top where the shell sits
    frame.set_transformations([1.5, 0.5, 1.0], 0.0, -45.0, 0.0, [7.0, 0.25, 6.0]);
    frame.set_shader_texture("mouse");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("plate");
    frame.draw_cylinder_mesh(CylinderParts::new(false, true, true));

    // Shell
    frame.set_transformations([1.5, 0.5, 1.0], 0.0, -45.0, 0.0, [7.0, 0.75, 6.0]);
    frame.set_shader_texture("mouse");
    frame.set_texture_uv_scale(1.0, 1.0);
    frame.set_shader_material("plate");
    frame.draw_half_sphere_mesh();
}
