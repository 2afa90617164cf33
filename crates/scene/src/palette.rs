//! Shared material and geometry constants.
//!
//! Every shape references one entry from each table; nothing here changes at
//! runtime.

use backdrop_common::{GeometryKind, MaterialKind};
use serde::{Deserialize, Serialize};

/// Surface parameters for one of the shared materials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialParams {
    /// sRGB hex colour as authored.
    pub hex: u32,
    /// Linear RGB, ready for shading.
    pub base_color: [f32; 3],
    pub metalness: f32,
    pub roughness: f32,
}

/// Construction parameters for one of the shared geometries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GeometrySpec {
    Icosahedron {
        radius: f32,
    },
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

const PRIMARY_HEX: u32 = 0x5F_BD_B5;
const ACCENT_HEX: u32 = 0xFF_6B_6B;

pub fn material_params(kind: MaterialKind) -> MaterialParams {
    match kind {
        MaterialKind::Primary => MaterialParams {
            hex: PRIMARY_HEX,
            base_color: hex_to_linear(PRIMARY_HEX),
            metalness: 0.3,
            roughness: 0.6,
        },
        MaterialKind::Accent => MaterialParams {
            hex: ACCENT_HEX,
            base_color: hex_to_linear(ACCENT_HEX),
            metalness: 0.2,
            roughness: 0.8,
        },
    }
}

pub fn geometry_spec(kind: GeometryKind) -> GeometrySpec {
    match kind {
        GeometryKind::Icosahedron => GeometrySpec::Icosahedron { radius: 2.0 },
        GeometryKind::Torus => GeometrySpec::Torus {
            radius: 2.0,
            tube: 0.5,
            radial_segments: 16,
            tubular_segments: 100,
        },
        GeometryKind::Sphere => GeometrySpec::Sphere {
            radius: 1.5,
            width_segments: 32,
            height_segments: 16,
        },
    }
}

/// Convert a `0xRRGGBB` sRGB colour to linear RGB.
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_linear_extremes() {
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);
        let white = hex_to_linear(0xffffff);
        for c in white {
            assert!((c - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn accent_is_red_dominant() {
        let p = material_params(MaterialKind::Accent);
        assert_eq!(p.hex, 0xFF6B6B);
        assert!(p.base_color[0] > p.base_color[1]);
        assert_eq!(p.base_color[1], p.base_color[2]);
    }

    #[test]
    fn primary_material_constants() {
        let p = material_params(MaterialKind::Primary);
        assert_eq!(p.hex, 0x5FBDB5);
        assert_eq!(p.metalness, 0.3);
        assert_eq!(p.roughness, 0.6);
    }

    #[test]
    fn torus_spec_matches_segments() {
        match geometry_spec(GeometryKind::Torus) {
            GeometrySpec::Torus {
                radial_segments,
                tubular_segments,
                ..
            } => {
                assert_eq!(radial_segments, 16);
                assert_eq!(tubular_segments, 100);
            }
            other => panic!("unexpected spec {other:?}"),
        }
    }
}
