//! Scene inspector panel
//!
//! Shows what the last frame drew, the loaded textures and materials, and
//! lets the lights and the camera projection be switched at runtime.

use crate::gfx::camera::orbit_camera::{OrbitCamera, ProjectionMode};
use crate::gfx::resources::lighting::LightingSetup;
use crate::scene::draw_list::{DrawList, MeshKind};
use crate::scene::manager::SceneManager;

/// Per-frame numbers shown at the top of the inspector
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSummary {
    pub draw_count: usize,
    pub textured_draws: usize,
    /// (mesh, number of draws) for every kind drawn at least once
    pub per_mesh: Vec<(MeshKind, usize)>,
}

impl FrameSummary {
    pub fn from_draw_list(list: &DrawList) -> Self {
        let per_mesh = MeshKind::ALL
            .iter()
            .map(|&kind| (kind, list.count_of(kind)))
            .filter(|&(_, count)| count > 0)
            .collect();

        Self {
            draw_count: list.len(),
            textured_draws: list.iter().filter(|command| command.is_textured()).count(),
            per_mesh,
        }
    }
}

/// Inspector window for the desk scene
///
/// # Arguments
/// * `ui` - ImGui UI context
/// * `scene` - Scene whose registries are listed and whose lights are edited
/// * `camera` - Camera whose projection mode is edited
/// * `summary` - Numbers from the last recorded frame
pub fn inspector_panel<H>(
    ui: &imgui::Ui,
    scene: &mut SceneManager<H>,
    camera: &mut OrbitCamera,
    summary: &FrameSummary,
) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window("Desk Scene")
        .size([340.0, (display_size[1] * 0.8).max(300.0)], imgui::Condition::FirstUseEver)
        .position([16.0, 16.0], imgui::Condition::FirstUseEver)
        .resizable(true)
        .collapsible(true)
        .build(|| {
            ui.text(format!("{:.1} fps", ui.io().framerate));
            ui.text(format!(
                "{} draws ({} textured)",
                summary.draw_count, summary.textured_draws
            ));
            for (kind, count) in &summary.per_mesh {
                ui.text_disabled(format!("  {:<16} {}", kind.name(), count));
            }
            ui.separator();

            render_camera_controls(ui, camera);
            render_lighting_controls(ui, scene.lighting_mut());
            render_texture_list(ui, scene);
            render_material_list(ui, scene);
        });
}

fn render_camera_controls(ui: &imgui::Ui, camera: &mut OrbitCamera) {
    if !ui.collapsing_header("Camera", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }

    let mut projection = camera.projection;
    let mut changed = ui.radio_button("Perspective", &mut projection, ProjectionMode::Perspective);
    ui.same_line();
    changed |= ui.radio_button("Orthographic", &mut projection, ProjectionMode::Orthographic);
    if changed {
        camera.set_projection(projection);
    }

    ui.text(format!(
        "Target ({:.1}, {:.1}, {:.1})  distance {:.1}",
        camera.target.x, camera.target.y, camera.target.z, camera.distance
    ));
    if ui.button("Reset camera") {
        camera.reset_to_default();
    }
}

fn render_lighting_controls(ui: &imgui::Ui, lighting: &mut LightingSetup) {
    if !ui.collapsing_header("Lighting", imgui::TreeNodeFlags::DEFAULT_OPEN) {
        return;
    }

    ui.checkbox("Use lighting", &mut lighting.use_lighting);
    ui.checkbox("Directional", &mut lighting.directional.active);
    for (i, light) in lighting.point_lights.iter_mut().enumerate() {
        let [x, y, z] = light.position;
        ui.checkbox(
            format!("Point {} ({:.1}, {:.1}, {:.1})", i, x, y, z),
            &mut light.active,
        );
    }
    ui.checkbox("Spot", &mut lighting.spot.active);
}

fn render_texture_list<H>(ui: &imgui::Ui, scene: &SceneManager<H>) {
    let textures = scene.textures();
    let header = format!("Textures ({})###textures", textures.len());
    if !ui.collapsing_header(header, imgui::TreeNodeFlags::empty()) {
        return;
    }

    for (slot, entry) in textures.iter().enumerate() {
        ui.text(format!("{:>2}  {}", slot, entry.tag));
    }

    let missed: Vec<&str> = scene.shader_state().missed_tags().collect();
    if !missed.is_empty() {
        ui.separator();
        ui.text_colored([1.0, 0.7, 0.2, 1.0], "Unresolved tags:");
        for tag in missed {
            ui.text_disabled(format!("  {}", tag));
        }
    }
}

fn render_material_list<H>(ui: &imgui::Ui, scene: &SceneManager<H>) {
    let materials = scene.materials();
    let header = format!("Materials ({})###materials", materials.len());
    if !ui.collapsing_header(header, imgui::TreeNodeFlags::empty()) {
        return;
    }

    for material in materials.iter() {
        let [dr, dg, db] = material.diffuse_color;
        let [sr, sg, sb] = material.specular_color;
        ui.text(&material.tag);
        ui.text_disabled(format!(
            "  diffuse ({:.2}, {:.2}, {:.2}) specular ({:.2}, {:.2}, {:.2}) shininess {:.1}",
            dr, dg, db, sr, sg, sb, material.shininess
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::shader_state::ShaderState;

    #[test]
    fn test_summary_counts() {
        let mut state = ShaderState::new();
        let mut list = DrawList::new();
        list.draw_box_mesh(&state);
        list.draw_box_mesh(&state);
        state.set_shader_texture("wood", Some(0));
        list.draw_plane_mesh(&state);

        let summary = FrameSummary::from_draw_list(&list);
        assert_eq!(summary.draw_count, 3);
        assert_eq!(summary.textured_draws, 1);
        assert_eq!(
            summary.per_mesh,
            vec![(MeshKind::Plane, 1), (MeshKind::Box, 2)]
        );
    }
}
