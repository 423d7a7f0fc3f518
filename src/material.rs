use crate::color::Color;
use crate::texture::Texture;
use crate::util::approx_eq;

/// Phong surface properties plus the texture that supplies the base color.
#[derive(Debug, Clone)]
pub struct Material {
    pub texture: Texture,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflectivity: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Material {
    pub fn with_color(color: Color) -> Material {
        Material {
            texture: Texture::solid(color),
            ..Material::default()
        }
    }

    /// Clear glass: fully transparent with the refractive index of glass.
    pub fn glass() -> Material {
        Material {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Material::default()
        }
    }
}

impl Default for Material {
    fn default() -> Material {
        Material {
            texture: Texture::solid(Color::white()),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflectivity: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}

impl PartialEq for Material {
    fn eq(&self, other: &Self) -> bool {
        self.texture == other.texture
            && approx_eq(self.ambient, other.ambient)
            && approx_eq(self.diffuse, other.diffuse)
            && approx_eq(self.specular, other.specular)
            && approx_eq(self.shininess, other.shininess)
            && approx_eq(self.reflectivity, other.reflectivity)
            && approx_eq(self.transparency, other.transparency)
            && approx_eq(self.refractive_index, other.refractive_index)
    }
}
