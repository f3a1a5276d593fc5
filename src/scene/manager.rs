//! Scene preparation and per-frame composition
//!
//! [`SceneManager`] owns everything the scene is built from: the texture and
//! material registries, the lights and the sticky shader state. Preparing
//! loads assets once; rendering replays the desk composition into a fresh
//! [`DrawList`] every frame.

use std::path::{Path, PathBuf};

use super::desk;
use super::draw_list::{CylinderParts, DrawList, MeshKind};
use super::shader_state::ShaderState;
use crate::error::{Result, SceneError};
use crate::gfx::resources::{
    lighting::LightingSetup,
    material::MaterialRegistry,
    texture_registry::{TextureRegistry, MAX_TEXTURE_SLOTS},
};

/// Turns an image file into whatever the renderer binds as a texture
pub trait TextureLoader {
    type Handle;

    fn load(&mut self, path: &Path, tag: &str) -> Result<Self::Handle>;
}

/// Borrowed view of a scene used while recording one frame
///
/// Tag lookups go through the scene's registries; draws snapshot the shader
/// state into the frame's [`DrawList`].
pub struct FrameComposer<'a, H> {
    state: &'a mut ShaderState,
    textures: &'a TextureRegistry<H>,
    materials: &'a MaterialRegistry,
    list: DrawList,
}

impl<'a, H> FrameComposer<'a, H> {
    pub fn new(
        state: &'a mut ShaderState,
        textures: &'a TextureRegistry<H>,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            state,
            textures,
            materials,
            list: DrawList::new(),
        }
    }

    pub fn set_transformations(
        &mut self,
        scale: [f32; 3],
        x_rotation_degrees: f32,
        y_rotation_degrees: f32,
        z_rotation_degrees: f32,
        position: [f32; 3],
    ) {
        self.state.set_transformations(
            scale,
            x_rotation_degrees,
            y_rotation_degrees,
            z_rotation_degrees,
            position,
        );
    }

    pub fn set_shader_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.state.set_shader_color(r, g, b, a);
    }

    pub fn set_shader_texture(&mut self, tag: &str) {
        let slot = self.textures.find_slot(tag);
        self.state.set_shader_texture(tag, slot);
    }

    pub fn set_texture_uv_scale(&mut self, u: f32, v: f32) {
        self.state.set_texture_uv_scale(u, v);
    }

    pub fn set_shader_material(&mut self, tag: &str) {
        let material = self.materials.find(tag);
        self.state.set_shader_material(tag, material);
    }

    pub fn set_use_lighting(&mut self, use_lighting: bool) {
        self.state.set_use_lighting(use_lighting);
    }

    pub fn draw_plane_mesh(&mut self) {
        self.list.draw_plane_mesh(self.state);
    }

    pub fn draw_box_mesh(&mut self) {
        self.list.draw_box_mesh(self.state);
    }

    pub fn draw_cylinder_mesh(&mut self, parts: CylinderParts) {
        self.list.draw_cylinder_mesh(self.state, parts);
    }

    pub fn draw_sphere_mesh(&mut self) {
        self.list.draw_sphere_mesh(self.state);
    }

    pub fn draw_half_sphere_mesh(&mut self) {
        self.list.draw_half_sphere_mesh(self.state);
    }

    pub fn draw_cone_mesh(&mut self) {
        self.list.draw_cone_mesh(self.state);
    }

    pub fn draw_tapered_cylinder_mesh(&mut self) {
        self.list.draw_tapered_cylinder_mesh(self.state);
    }

    pub fn draw_pyramid4_mesh(&mut self) {
        self.list.draw_pyramid4_mesh(self.state);
    }

    pub fn finish(self) -> DrawList {
        self.list
    }
}

/// Composes the desk scene
pub struct SceneManager<H> {
    texture_dir: PathBuf,
    textures: TextureRegistry<H>,
    materials: MaterialRegistry,
    lighting: LightingSetup,
    state: ShaderState,
    required_meshes: Vec<MeshKind>,
    prepared: bool,
}

impl<H> SceneManager<H> {
    /// Creates an empty scene whose textures are read from `texture_dir`
    pub fn new(texture_dir: impl AsRef<Path>) -> Self {
        Self {
            texture_dir: texture_dir.as_ref().to_path_buf(),
            textures: TextureRegistry::new(),
            materials: MaterialRegistry::new(),
            lighting: LightingSetup::default(),
            state: ShaderState::new(),
            required_meshes: Vec::new(),
            prepared: false,
        }
    }

    /// Loads `file` from the texture directory and registers it under `tag`
    ///
    /// Returns the texture's slot. Nothing is loaded once every slot is taken.
    pub fn load_texture<L>(&mut self, loader: &mut L, file: &str, tag: &str) -> Result<usize>
    where
        L: TextureLoader<Handle = H>,
    {
        if self.textures.is_full() {
            return Err(SceneError::RegistryFull {
                tag: tag.to_string(),
                capacity: MAX_TEXTURE_SLOTS,
            });
        }

        let path = self.texture_dir.join(file);
        let handle = loader.load(&path, tag)?;
        self.textures.register(tag, handle)
    }

    /// Loads textures, defines materials, sets up lights and records the
    /// meshes the scene draws
    ///
    /// A texture that fails to load is logged and skipped; later draws using
    /// its tag fall back to the object colour.
    pub fn prepare_scene<L>(&mut self, loader: &mut L)
    where
        L: TextureLoader<Handle = H>,
    {
        if self.prepared {
            log::warn!("Scene already prepared, skipping");
            return;
        }

        for (file, tag) in desk::SCENE_TEXTURES {
            if let Err(err) = self.load_texture(loader, file, tag) {
                log::error!("Texture '{}' unavailable: {}", tag, err);
            }
        }
        log::info!(
            "Loaded {} of {} scene textures from {:?}",
            self.textures.len(),
            desk::SCENE_TEXTURES.len(),
            self.texture_dir
        );

        desk::define_object_materials(&mut self.materials);
        self.lighting = LightingSetup::desk_scene();
        self.required_meshes = desk::SCENE_MESHES.to_vec();
        self.prepared = true;

        log::info!(
            "Scene prepared: {} materials, {} active point lights",
            self.materials.len(),
            self.lighting.active_point_lights()
        );
    }

    /// Records this frame's draw commands
    ///
    /// The shader state starts from its initial values each frame, so every
    /// frame yields the same list for the same lighting settings.
    pub fn render_scene(&mut self) -> DrawList {
        self.state.reset();

        let mut frame = FrameComposer::new(&mut self.state, &self.textures, &self.materials);
        frame.set_use_lighting(self.lighting.use_lighting);
        desk::compose(&mut frame);
        frame.finish()
    }

    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    pub fn texture_dir(&self) -> &Path {
        &self.texture_dir
    }

    pub fn textures(&self) -> &TextureRegistry<H> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }

    pub fn lighting(&self) -> &LightingSetup {
        &self.lighting
    }

    pub fn lighting_mut(&mut self) -> &mut LightingSetup {
        &mut self.lighting
    }

    /// Mesh kinds that must be loaded before drawing
    pub fn required_meshes(&self) -> &[MeshKind] {
        &self.required_meshes
    }

    pub fn shader_state(&self) -> &ShaderState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::desk::{key_position, KEY_COLUMNS, KEY_ROWS};

    /// Hands out file names instead of GPU textures
    #[derive(Default)]
    struct StubLoader {
        missing: Vec<&'static str>,
        requested: Vec<PathBuf>,
    }

    impl TextureLoader for StubLoader {
        type Handle = String;

        fn load(&mut self, path: &Path, _tag: &str) -> Result<String> {
            self.requested.push(path.to_path_buf());
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            if self.missing.contains(&name.as_str()) {
                return Err(SceneError::UnsupportedChannels {
                    path: path.to_path_buf(),
                    channels: 1,
                });
            }
            Ok(name)
        }
    }

    fn prepared_scene() -> SceneManager<String> {
        let mut scene = SceneManager::new("textures");
        scene.prepare_scene(&mut StubLoader::default());
        scene
    }

    fn slot_of(scene: &SceneManager<String>, tag: &str) -> Option<usize> {
        scene.textures().find_slot(tag)
    }

    #[test]
    fn test_prepare_loads_textures_in_order() {
        let mut loader = StubLoader::default();
        let mut scene = SceneManager::new("assets/tex");
        scene.prepare_scene(&mut loader);

        assert!(scene.is_prepared());
        assert_eq!(scene.textures().len(), 13);
        assert_eq!(loader.requested[0], Path::new("assets/tex/silverBase.jpg"));
        assert_eq!(scene.textures().find("body").map(String::as_str), Some("drywall.jpg"));
        assert_eq!(slot_of(&scene, "knife"), Some(5));
        assert_eq!(slot_of(&scene, "drywall"), None);
    }

    #[test]
    fn test_prepare_defines_materials_and_lights() {
        let scene = prepared_scene();
        let tags: Vec<_> = scene.materials().iter().map(|m| m.tag.as_str()).collect();
        assert_eq!(tags, ["metal", "wooden", "glass", "plate", "book"]);
        assert!(scene.materials().find("rubber").is_none());
        assert!(scene.lighting().use_lighting);
        assert_eq!(scene.lighting().active_point_lights(), 4);
        assert!(scene.required_meshes().contains(&MeshKind::HalfSphere));
    }

    #[test]
    fn test_failed_texture_is_skipped() {
        let mut loader = StubLoader {
            missing: vec!["book.jpg"],
            ..Default::default()
        };
        let mut scene = SceneManager::new("textures");
        scene.prepare_scene(&mut loader);

        assert_eq!(scene.textures().len(), 12);
        assert!(slot_of(&scene, "book").is_none());
        // The slot after the failure moves up
        assert_eq!(slot_of(&scene, "body"), Some(11));

        let list = scene.render_scene();
        let book = &list.commands()[16];
        assert_eq!(book.position(), [-7.0, 0.25, 1.8]);
        assert!(!book.is_textured());
    }

    #[test]
    fn test_registry_full_skips_load() {
        let mut loader = StubLoader::default();
        let mut scene = SceneManager::new("textures");
        for i in 0..MAX_TEXTURE_SLOTS {
            scene.load_texture(&mut loader, "a.png", &format!("t{i}")).unwrap();
        }
        let err = scene.load_texture(&mut loader, "b.png", "extra").unwrap_err();
        assert!(matches!(err, SceneError::RegistryFull { .. }));
        assert_eq!(loader.requested.len(), MAX_TEXTURE_SLOTS);
    }

    #[test]
    fn test_draw_count_and_order() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();

        assert_eq!(list.len(), 28 + KEY_ROWS * KEY_COLUMNS);
        assert_eq!(list.len(), 88);

        let kinds: Vec<_> = list.iter().take(5).map(|c| c.mesh).collect();
        assert_eq!(
            kinds,
            [
                MeshKind::Cylinder,
                MeshKind::Cone,
                MeshKind::Cylinder,
                MeshKind::Plane,
                MeshKind::Box
            ]
        );
        assert_eq!(list.count_of(MeshKind::Plane), 1);
        assert_eq!(list.count_of(MeshKind::Cone), 1);
        assert_eq!(list.count_of(MeshKind::HalfSphere), 1);
        assert_eq!(list.count_of(MeshKind::Cylinder), 5);
        assert_eq!(list.count_of(MeshKind::Box), 80);
    }

    #[test]
    fn test_frames_are_identical() {
        let mut scene = prepared_scene();
        let first = scene.render_scene();
        let second = scene.render_scene();
        assert_eq!(first.commands(), second.commands());
    }

    #[test]
    fn test_backdrop_keeps_previous_material() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();
        let backdrop = &list.commands()[3];

        assert_eq!(backdrop.mesh, MeshKind::Plane);
        assert_eq!(backdrop.texture_slot, slot_of(&scene, "backdrop"));
        // No material of its own; the water bottle's glass carries over
        assert_eq!(backdrop.material.shininess, 95.0);
    }

    #[test]
    fn test_phone_holder_cradle_texture_miss() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();
        let cradle = &list.commands()[8];

        assert_eq!(cradle.position(), [0.95, 2.0, 0.99065]);
        assert!(!cradle.is_textured());
        assert_eq!(cradle.color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(cradle.material.specular_color, [1.0, 1.0, 1.0]);
        assert!(scene.shader_state().missed_tags().any(|t| t == "drywall"));
    }

    #[test]
    fn test_desk_uses_wood() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();
        let top = &list.commands()[13];
        let legs = &list.commands()[14..16];

        assert_eq!(top.position(), [0.0, -0.5, 0.0]);
        assert_eq!(top.texture_slot, slot_of(&scene, "knife"));
        assert_eq!(top.material.diffuse_color, [0.4, 0.2, 0.1]);
        assert!(legs.iter().all(|l| l.texture_slot == slot_of(&scene, "wood")));
        assert_eq!(legs[1].position(), [15.0, -6.5, 0.0]);
    }

    #[test]
    fn test_monitor_panels_are_white_and_untextured() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();
        let panels = &list.commands()[23..25];

        for panel in panels {
            assert!(!panel.is_textured());
            assert_eq!(panel.color, [1.0, 1.0, 1.0, 1.0]);
            // Sticky plate material from the monitor stands
            assert_eq!(panel.material.shininess, 30.0);
        }
        assert_eq!(panels[0].position(), [7.9, 6.0, -3.66]);
        assert_eq!(panels[1].position(), [-7.9, 6.0, -3.66]);
    }

    #[test]
    fn test_mouse_body_has_no_top_cap() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();
        let body = &list.commands()[25];
        let shell = &list.commands()[26];

        assert_eq!(body.mesh, MeshKind::Cylinder);
        assert_eq!(body.parts, CylinderParts::new(false, true, true));
        assert_eq!(shell.mesh, MeshKind::HalfSphere);
        assert_eq!(shell.texture_slot, slot_of(&scene, "mouse"));
    }

    #[test]
    fn test_key_grid() {
        let mut scene = prepared_scene();
        let list = scene.render_scene();
        let keys = &list.commands()[28..];

        assert_eq!(keys.len(), 60);
        let first = keys[0].position();
        assert!((first[0] + 4.6).abs() < 1e-5);
        assert!((first[1] - 0.55).abs() < 1e-5);
        assert!((first[2] - 7.6).abs() < 1e-5);

        let last = keys[59].position();
        let expected = key_position(4, 11);
        assert_eq!(last, expected);
        assert!((expected[0] - (-4.6 + 11.0 * 0.85)).abs() < 1e-4);
        assert!((expected[2] - (7.6 - 4.0 * 0.85)).abs() < 1e-4);

        let body = slot_of(&scene, "body");
        assert!(keys.iter().all(|k| k.texture_slot == body && k.mesh == MeshKind::Box));
    }

    #[test]
    fn test_lighting_switch_reaches_draws() {
        let mut scene = prepared_scene();
        assert!(scene.render_scene().iter().all(|c| c.use_lighting));

        scene.lighting_mut().use_lighting = false;
        assert!(scene.render_scene().iter().all(|c| !c.use_lighting));
    }

    #[test]
    fn test_unprepared_scene_draws_untextured() {
        let mut scene: SceneManager<String> = SceneManager::new("textures");
        let list = scene.render_scene();
        assert_eq!(list.len(), 88);
        assert!(list.iter().all(|c| !c.is_textured()));
        assert!(list.iter().all(|c| !c.use_lighting));
    }
}
