use bytemuck::{Pod, Zeroable};
use glam::Vec3;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Sphere {
    pub origin: Vec3,
    pub radius: f32,
    pub material_id: u32,
    pub _padding: [u32; 3],
}

impl Sphere {
    pub fn new(origin: Vec3, radius: f32, material_id: u32) -> Self {
        Self {
            origin,
            radius,
            material_id,
            _padding: Default::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use glam::vec3;

    use super::*;

    #[test]
    fn layout() {
        assert_eq!(32, mem::size_of::<Sphere>());

        let words: [u32; 8] =
            bytemuck::cast(Sphere::new(vec3(1.0, 2.0, 3.0), 0.5, 42));

        assert_eq!(1.0, f32::from_bits(words[0]));
        assert_eq!(0.5, f32::from_bits(words[3]));
        assert_eq!(42, words[4]);
    }
}
