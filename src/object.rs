use crate::color::Color;
use crate::direction::Direction;
use crate::intersection::Intersection;
use crate::material::Material;
use crate::matrix::Matrix44f;
use crate::point::Point;
use crate::ray::Ray;
use crate::shapes::{BoundingBox, Shape};
use crate::texture::{projection_map, TextureMap};

/// A surface leaf of the scene tree: a shape in object space plus the
/// transform, material and texture parametrization that place it in the
/// scene.
///
/// Ancestor state is compiled in when the leaf is added to a `Composite`:
/// `world_transform_inverse` accumulates the full inverse transform chain
/// and `inherited_material` records the nearest ancestor override. Trees are
/// therefore assembled bottom-up and treated as immutable once built.
#[derive(Debug, Clone)]
pub struct Surface {
    shape: Shape,
    transform: Matrix44f,
    transform_inverse: Matrix44f,
    world_transform_inverse: Matrix44f,
    normal_transform: Matrix44f,
    material: Material,
    inherited_material: Option<Material>,
    texture_map: TextureMap,
}

impl Surface {
    pub fn new(shape: Shape, transform: Matrix44f, material: Material) -> Surface {
        Surface::with_texture_map(shape, transform, material, projection_map)
    }

    pub fn with_texture_map(
        shape: Shape,
        transform: Matrix44f,
        material: Material,
        texture_map: TextureMap,
    ) -> Surface {
        let transform_inverse = transform.inverse();
        Surface {
            shape,
            transform,
            transform_inverse,
            world_transform_inverse: transform_inverse,
            normal_transform: transform_inverse.transposed(),
            material,
            inherited_material: None,
            texture_map,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn transform(&self) -> &Matrix44f {
        &self.transform
    }

    /// The nearest ancestor override material, or this surface's own.
    pub fn material(&self) -> &Material {
        self.inherited_material.as_ref().unwrap_or(&self.material)
    }

    pub fn intersect<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>> {
        let local_ray = ray.transform(self.transform_inverse);
        self.shape
            .local_intersect(&local_ray)
            .into_iter()
            .map(|t| Intersection::new(t, self))
            .collect()
    }

    pub fn world_normal_at(&self, world_point: Point) -> Direction {
        let object_point = self.world_transform_inverse * world_point;
        let local_normal = self.shape.local_normal_at(object_point);
        (self.normal_transform * local_normal).normalize()
    }

    pub fn color_at(&self, world_point: Point) -> Color {
        let object_point = self.world_transform_inverse * world_point;
        self.material()
            .texture
            .color_at(object_point, self.texture_map)
    }

    pub fn bounds(&self) -> BoundingBox {
        self.shape.bounds()
    }

    fn adopt(&mut self, ancestor_inverse: &Matrix44f, ancestor_material: Option<&Material>) {
        self.world_transform_inverse = self.world_transform_inverse * *ancestor_inverse;
        self.normal_transform = self.world_transform_inverse.transposed();
        if self.inherited_material.is_none() {
            self.inherited_material = ancestor_material.cloned();
        }
    }
}

impl PartialEq for Surface {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self.transform == other.transform
            && self.material == other.material
    }
}

/// An interior node grouping children under a shared transform and an
/// optional material that overrides every descendant surface's own.
#[derive(Debug, Clone)]
pub struct Composite {
    transform: Matrix44f,
    transform_inverse: Matrix44f,
    children: Vec<Object>,
    material: Option<Material>,
    bounds: BoundingBox,
}

impl Composite {
    pub fn new(transform: Matrix44f) -> Composite {
        Composite {
            transform,
            transform_inverse: transform.inverse(),
            children: Vec::new(),
            material: None,
            bounds: BoundingBox::empty(),
        }
    }

    pub fn with_material(transform: Matrix44f, material: Material) -> Composite {
        Composite {
            material: Some(material),
            ..Composite::new(transform)
        }
    }

    /// Adds a fully assembled subtree, folding this node's transform and
    /// material into its surfaces.
    pub fn add_child(&mut self, mut child: Object) {
        child.adopt(&self.transform_inverse, self.material.as_ref());
        self.bounds = self.bounds.union(&child.local_space_bounds());
        self.children.push(child);
    }

    pub fn children(&self) -> &[Object] {
        &self.children
    }

    pub fn transform(&self) -> &Matrix44f {
        &self.transform
    }

    /// Union of the children's local-space bounds, cached as children are
    /// added.
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    pub fn intersect<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>> {
        let local_ray = ray.transform(self.transform_inverse);
        if !self.bounds.intersected_by(&local_ray) {
            return Vec::new();
        }

        let mut intersections: Vec<Intersection> = self
            .children
            .iter()
            .flat_map(|child| child.intersect(&local_ray))
            .collect();
        // stable sort keeps child insertion order for equal distances
        intersections.sort_by(|a, b| a.t.total_cmp(&b.t));
        intersections
    }

    fn adopt(&mut self, ancestor_inverse: &Matrix44f, ancestor_material: Option<&Material>) {
        for child in &mut self.children {
            child.adopt(ancestor_inverse, ancestor_material);
        }
    }
}

impl PartialEq for Composite {
    fn eq(&self, other: &Self) -> bool {
        self.transform == other.transform
            && self.material == other.material
            && self.children == other.children
    }
}

/// A node of the scene tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Surface(Surface),
    Composite(Composite),
}

impl Object {
    /// All intersections with this node and its descendants, ascending by
    /// distance.
    pub fn intersect<'a>(&'a self, ray: &Ray) -> Vec<Intersection<'a>> {
        match self {
            Object::Surface(s) => s.intersect(ray),
            Object::Composite(c) => c.intersect(ray),
        }
    }

    /// Object-space bounds, without this node's transform.
    pub fn bounds(&self) -> BoundingBox {
        match self {
            Object::Surface(s) => s.bounds(),
            Object::Composite(c) => c.bounds(),
        }
    }

    /// Bounds as seen from the parent: object-space bounds mapped through
    /// this node's transform.
    pub fn local_space_bounds(&self) -> BoundingBox {
        match self {
            Object::Surface(s) => s.bounds().transform(s.transform),
            Object::Composite(c) => c.bounds().transform(c.transform),
        }
    }

    pub fn as_surface(&self) -> Option<&Surface> {
        match self {
            Object::Surface(s) => Some(s),
            Object::Composite(_) => None,
        }
    }

    fn adopt(&mut self, ancestor_inverse: &Matrix44f, ancestor_material: Option<&Material>) {
        match self {
            Object::Surface(s) => s.adopt(ancestor_inverse, ancestor_material),
            Object::Composite(c) => c.adopt(ancestor_inverse, ancestor_material),
        }
    }
}
