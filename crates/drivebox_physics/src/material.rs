//! Physical material properties for collision response

/// Physical material properties for collision response
///
/// Materials define how bodies interact during collisions: friction
/// (resistance to sliding) and restitution (bounciness).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsMaterial {
    /// Friction coefficient (0.0 = ice, 1.0 = rubber)
    pub friction: f32,
    /// Restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub restitution: f32,
}

impl Default for PhysicsMaterial {
    fn default() -> Self {
        Self {
            friction: 0.5,
            restitution: 0.0,
        }
    }
}

impl PhysicsMaterial {
    /// Asphalt-like ground material: high friction, almost no bounce
    pub const ASPHALT: Self = Self {
        friction: 0.7,
        restitution: 0.05,
    };

    /// Metal-like material: moderate friction and bounce (car bodywork)
    pub const METAL: Self = Self {
        friction: 0.3,
        restitution: 0.3,
    };

    /// Rubber-like material: high friction, very bouncy
    pub const RUBBER: Self = Self {
        friction: 0.9,
        restitution: 0.8,
    };

    /// Ice-like material: very low friction, slight bounce
    pub const ICE: Self = Self {
        friction: 0.05,
        restitution: 0.1,
    };

    /// Create a new physics material with custom friction and restitution
    ///
    /// Values are clamped to the range [0.0, 1.0].
    pub fn new(friction: f32, restitution: f32) -> Self {
        Self {
            friction: friction.clamp(0.0, 1.0),
            restitution: restitution.clamp(0.0, 1.0),
        }
    }

    /// Combine two materials for collision response
    ///
    /// Uses geometric mean for friction and maximum for restitution
    /// (most bouncy surface wins).
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            friction: (self.friction * other.friction).sqrt(),
            restitution: self.restitution.max(other.restitution),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_material() {
        let material = PhysicsMaterial::default();
        assert_eq!(material.friction, 0.5);
        assert_eq!(material.restitution, 0.0);
    }

    #[test]
    fn test_new_clamps_values() {
        let material = PhysicsMaterial::new(1.5, -0.5);
        assert_eq!(material.friction, 1.0);
        assert_eq!(material.restitution, 0.0);
    }

    #[test]
    fn test_combine_geometric_mean_friction() {
        let ice = PhysicsMaterial::ICE;
        let rubber = PhysicsMaterial::RUBBER;
        let combined = ice.combine(&rubber);

        let expected = (0.05_f32 * 0.9_f32).sqrt();
        assert!((combined.friction - expected).abs() < 0.0001);
    }

    #[test]
    fn test_combine_max_restitution() {
        let metal = PhysicsMaterial::METAL;
        let rubber = PhysicsMaterial::RUBBER;
        assert_eq!(metal.combine(&rubber).restitution, 0.8);
    }

    #[test]
    fn test_combine_is_commutative() {
        let a = PhysicsMaterial::new(0.3, 0.5);
        let b = PhysicsMaterial::new(0.7, 0.2);
        let ab = a.combine(&b);
        let ba = b.combine(&a);
        assert!((ab.friction - ba.friction).abs() < 0.0001);
        assert_eq!(ab.restitution, ba.restitution);
    }
}
