use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scene::Transform;

/// Three numeric form fields
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Axes {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Axes {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub const fn splat(v: f32) -> Self {
        Self::new(v, v, v)
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn set(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
            Axis::Z => self.z = value,
        }
    }
}

impl From<Vec3> for Axes {
    fn from(v: Vec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<Axes> for Vec3 {
    fn from(a: Axes) -> Self {
        Vec3::new(a.x, a.y, a.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformField {
    Position,
    Rotation,
    Scale,
}

impl TransformField {
    pub const ALL: [TransformField; 3] = [
        TransformField::Position,
        TransformField::Rotation,
        TransformField::Scale,
    ];
}

/// Plain-data copy of a transform as shown in the side panel
///
/// Rotation is in degrees here and radians on the object.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformSnapshot {
    pub position: Axes,
    pub rotation: Axes,
    pub scale: Axes,
}

impl Default for TransformSnapshot {
    fn default() -> Self {
        Self {
            position: Axes::splat(0.0),
            rotation: Axes::splat(0.0),
            scale: Axes::splat(1.0),
        }
    }
}

impl TransformSnapshot {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.position.into(),
            rotation: Vec3::new(
                transform.rotation.x.to_degrees(),
                transform.rotation.y.to_degrees(),
                transform.rotation.z.to_degrees(),
            )
            .into(),
            scale: transform.scale.into(),
        }
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            position: self.position.into(),
            rotation: Vec3::new(
                self.rotation.x.to_radians(),
                self.rotation.y.to_radians(),
                self.rotation.z.to_radians(),
            ),
            scale: self.scale.into(),
        }
    }

    pub fn axes(&self, field: TransformField) -> &Axes {
        match field {
            TransformField::Position => &self.position,
            TransformField::Rotation => &self.rotation,
            TransformField::Scale => &self.scale,
        }
    }

    pub fn axes_mut(&mut self, field: TransformField) -> &mut Axes {
        match field {
            TransformField::Position => &mut self.position,
            TransformField::Rotation => &mut self.rotation,
            TransformField::Scale => &mut self.scale,
        }
    }

    pub fn field(&self, field: TransformField, axis: Axis) -> f32 {
        self.axes(field).get(axis)
    }

    pub fn with_field(mut self, field: TransformField, axis: Axis, value: f32) -> Self {
        self.axes_mut(field).set(axis, value);
        self
    }

    /// Component-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &TransformSnapshot, epsilon: f32) -> bool {
        TransformField::ALL.iter().all(|&field| {
            Axis::ALL
                .iter()
                .all(|&axis| (self.field(field, axis) - other.field(field, axis)).abs() <= epsilon)
        })
    }
}

/// Numeric text from a form field; anything unparsable or non-finite is 0
pub fn parse_field(text: &str) -> f32 {
    text.trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_has_unit_scale() {
        let snapshot = TransformSnapshot::default();
        assert_eq!(snapshot.position, Axes::splat(0.0));
        assert_eq!(snapshot.rotation, Axes::splat(0.0));
        assert_eq!(snapshot.scale, Axes::splat(1.0));
    }

    #[test]
    fn rotation_is_converted_to_degrees() {
        let transform = Transform {
            rotation: Vec3::new(std::f32::consts::FRAC_PI_2, 0.0, -std::f32::consts::PI),
            ..Transform::IDENTITY
        };
        let snapshot = TransformSnapshot::from_transform(&transform);
        assert!((snapshot.rotation.x - 90.0).abs() < 1e-4);
        assert!((snapshot.rotation.z + 180.0).abs() < 1e-4);
    }

    #[test]
    fn round_trip_within_tolerance() {
        let snapshot = TransformSnapshot {
            position: Axes::new(1.5, -2.0, 3.25),
            rotation: Axes::new(45.0, -30.0, 170.0),
            scale: Axes::new(2.0, 0.5, 1.0),
        };
        let back = TransformSnapshot::from_transform(&snapshot.to_transform());
        assert!(back.approx_eq(&snapshot, 1e-3));
    }

    #[test]
    fn with_field_changes_one_component() {
        let snapshot =
            TransformSnapshot::default().with_field(TransformField::Position, Axis::X, 5.0);
        assert_eq!(snapshot.position, Axes::new(5.0, 0.0, 0.0));
        assert_eq!(snapshot.field(TransformField::Scale, Axis::Y), 1.0);
    }

    #[test]
    fn parse_field_coerces_invalid_input() {
        assert_eq!(parse_field("5"), 5.0);
        assert_eq!(parse_field(" -2.5 "), -2.5);
        assert_eq!(parse_field(""), 0.0);
        assert_eq!(parse_field("abc"), 0.0);
        assert_eq!(parse_field("NaN"), 0.0);
        assert_eq!(parse_field("inf"), 0.0);
    }

    #[test]
    fn snapshot_serializes_as_plain_fields() {
        let json = serde_json::to_value(TransformSnapshot::default()).unwrap();
        assert_eq!(json["scale"]["y"], 1.0);
        assert_eq!(json["rotation"]["x"], 0.0);
    }
}
