use glam::{Affine3A, EulerRot, Quat, Vec3};

/// Transform component
///
/// Local TRS of the object the rig animates (usually the weapon root or the
/// camera holder). The transform is owned by the host; the rig only writes
/// `position` and `rotation` relative to a cached [`RestPose`](super::RestPose).
///
/// The rig never reads the local matrix. It is cached for hosts that need the
/// composed TRS after a tick (to upload to a renderer or parent a camera):
/// call [`update_local_matrix`](Self::update_local_matrix) once per frame and
/// it is rebuilt only when a rig write actually moved the transform.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    local_matrix: Affine3A,

    // Shadow state for dirty checking
    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self::from_position_rotation(Vec3::ZERO, Quat::IDENTITY)
    }

    #[must_use]
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
            local_matrix: Affine3A::IDENTITY,
            last_position: position,
            last_rotation: rotation,
            last_scale: Vec3::ONE,
            force_update: true,
        }
    }

    /// Recomputes the local matrix if any TRS component changed since the
    /// last call. Returns whether it did.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale
            || self.force_update;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    /// Sets the rotation from Euler angles in degrees (rig convention).
    pub fn set_rotation_euler_degrees(&mut self, euler: Vec3) {
        self.rotation = euler_degrees_to_quat(euler);
    }

    /// Current rotation as Euler angles in degrees (rig convention).
    #[must_use]
    pub fn rotation_euler_degrees(&self) -> Vec3 {
        let (y, x, z) = self.rotation.to_euler(EulerRot::YXZ);
        Vec3::new(x.to_degrees(), y.to_degrees(), z.to_degrees())
    }

    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts an Euler rotation offset in degrees into a quaternion.
///
/// Rotations are applied around Z first, then X, then Y, so the resulting
/// quaternion is `Ry * Rx * Rz`. Pitch kicks (X) therefore stay aligned with
/// the weapon's own right axis after a yaw kick.
#[inline]
#[must_use]
pub fn euler_degrees_to_quat(euler: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        euler.y.to_radians(),
        euler.x.to_radians(),
        euler.z.to_radians(),
    )
}
