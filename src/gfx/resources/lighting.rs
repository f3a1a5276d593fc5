//! Static scene lighting
//!
//! One directional light, [`MAX_POINT_LIGHTS`] point light slots and one spot
//! light. Each light carries its own `active` flag; inactive lights are still
//! uploaded and skipped by the shader.

/// Number of point light slots the shader evaluates
pub const MAX_POINT_LIGHTS: usize = 5;

fn gray(v: f32) -> [f32; 3] {
    [v, v, v]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub active: bool,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            direction: [0.0, -1.0, 0.0],
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            active: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointLight {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub active: bool,
}

impl PointLight {
    /// Active point light with grey ambient, diffuse and specular terms
    pub fn new(position: [f32; 3], ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            position,
            ambient: gray(ambient),
            diffuse: gray(diffuse),
            specular: gray(specular),
            active: true,
        }
    }
}

/// Spot light with distance attenuation and a soft edge
///
/// `cut_off` and `outer_cut_off` are cosines of the inner and outer cone
/// half-angles, so `cut_off >= outer_cut_off`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: [f32; 3],
    pub direction: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
    pub cut_off: f32,
    pub outer_cut_off: f32,
    pub active: bool,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            direction: [0.0, -1.0, 0.0],
            ambient: [0.0; 3],
            diffuse: [0.0; 3],
            specular: [0.0; 3],
            constant: 1.0,
            linear: 0.0,
            quadratic: 0.0,
            cut_off: 1.0,
            outer_cut_off: 1.0,
            active: false,
        }
    }
}

impl SpotLight {
    /// Sets the cone from inner and outer half-angles in degrees
    pub fn with_cone_degrees(mut self, inner: f32, outer: f32) -> Self {
        self.cut_off = inner.to_radians().cos();
        self.outer_cut_off = outer.to_radians().cos();
        self
    }

    /// Distance attenuation factor at `distance`
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

/// Every light in the scene plus the global lighting switch
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LightingSetup {
    pub use_lighting: bool,
    pub directional: DirectionalLight,
    pub point_lights: [PointLight; MAX_POINT_LIGHTS],
    pub spot: SpotLight,
}

impl LightingSetup {
    /// The desk scene's lights: dim sunlight, four overhead fills and a
    /// wide spot straight down over the desk
    pub fn desk_scene() -> Self {
        let directional = DirectionalLight {
            direction: [-0.05, -0.3, -0.1],
            ambient: gray(0.05),
            diffuse: gray(0.6),
            specular: gray(0.0),
            active: true,
        };

        let point_lights = [
            PointLight::new([-4.0, 8.0, 0.0], 0.05, 0.3, 0.1),
            PointLight::new([4.0, 8.0, 0.0], 0.05, 0.3, 0.1),
            PointLight::new([3.8, 5.5, 4.0], 0.05, 0.2, 0.8),
            PointLight::default(),
            PointLight::new([-3.2, 6.0, -4.0], 0.05, 0.9, 0.1),
        ];

        let spot = SpotLight {
            position: [0.0, 10.0, 0.0],
            direction: [0.0, -1.0, 0.0],
            ambient: gray(0.8),
            diffuse: gray(1.0),
            specular: gray(0.7),
            constant: 1.0,
            linear: 0.09,
            quadratic: 0.032,
            active: true,
            ..Default::default()
        }
        .with_cone_degrees(45.0, 50.0);

        Self {
            use_lighting: true,
            directional,
            point_lights,
            spot,
        }
    }

    pub fn active_point_lights(&self) -> usize {
        self.point_lights.iter().filter(|light| light.active).count()
    }

    pub fn to_uniform(&self) -> LightingUniform {
        LightingUniform::from(self)
    }
}

/// GPU layout of [`DirectionalLight`], 64 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DirectionalLightUniform {
    pub direction: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _pad0: f32,
    pub diffuse: [f32; 3],
    _pad1: f32,
    pub specular: [f32; 3],
    _pad2: f32,
}

/// GPU layout of [`PointLight`], 64 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightUniform {
    pub position: [f32; 3],
    pub active: u32,
    pub ambient: [f32; 3],
    _pad0: f32,
    pub diffuse: [f32; 3],
    _pad1: f32,
    pub specular: [f32; 3],
    _pad2: f32,
}

/// GPU layout of [`SpotLight`], 96 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpotLightUniform {
    pub position: [f32; 3],
    pub active: u32,
    pub direction: [f32; 3],
    pub cut_off: f32,
    pub ambient: [f32; 3],
    pub outer_cut_off: f32,
    pub diffuse: [f32; 3],
    pub constant: f32,
    pub specular: [f32; 3],
    pub linear: f32,
    pub quadratic: f32,
    _pad: [f32; 3],
}

/// All lights as laid out in the shader's `Lighting` struct
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    pub directional: DirectionalLightUniform,
    pub point_lights: [PointLightUniform; MAX_POINT_LIGHTS],
    pub spot: SpotLightUniform,
}

impl From<&LightingSetup> for LightingUniform {
    fn from(setup: &LightingSetup) -> Self {
        let d = &setup.directional;
        let directional = DirectionalLightUniform {
            direction: d.direction,
            active: d.active as u32,
            ambient: d.ambient,
            diffuse: d.diffuse,
            specular: d.specular,
            ..Default::default()
        };

        let point_lights = setup.point_lights.map(|p| PointLightUniform {
            position: p.position,
            active: p.active as u32,
            ambient: p.ambient,
            diffuse: p.diffuse,
            specular: p.specular,
            ..Default::default()
        });

        let s = &setup.spot;
        let spot = SpotLightUniform {
            position: s.position,
            active: s.active as u32,
            direction: s.direction,
            cut_off: s.cut_off,
            ambient: s.ambient,
            outer_cut_off: s.outer_cut_off,
            diffuse: s.diffuse,
            constant: s.constant,
            specular: s.specular,
            linear: s.linear,
            quadratic: s.quadratic,
            ..Default::default()
        };

        Self {
            directional,
            point_lights,
            spot,
        }
    }
}
