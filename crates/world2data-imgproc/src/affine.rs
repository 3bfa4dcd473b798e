//! Composition of a layer's two display transforms into a single resampling
//! matrix.
//!
//! A layer carries the same display transform in two independent
//! parameterizations: a stored homogeneous affine matrix and a decomposed
//! rotate/scale/shear/translate set. Both map data space to world space and
//! must be composed, not chosen between. The composite is inverted so the
//! resampler can map output coordinates back into the source data.
//!
//! All matrices use row/column (axis-0/axis-1) coordinate order with the
//! translation in the last column. Translations are normalized by the pixel
//! extent per axis before composition, since the interpolation primitive
//! works on a normalized [0, 1) grid.

use glam::{DMat2, DMat3, DMat4, DVec2, DVec3, DVec4};

use crate::error::TransformError;

const SINGULAR_EPS: f64 = 1e-12;

/// Spatial dispatch case of a layer buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpatialCase {
    /// 2D image, two spatial axes.
    Plane,
    /// 3D grayscale volume, three spatial axes.
    Volume,
    /// 2D rgb image with a trailing channel axis of size 3; the channel axis
    /// is not spatial.
    RgbPlane,
}

impl SpatialCase {
    /// Classify a buffer shape, honoring the rgb flag.
    ///
    /// # Errors
    ///
    /// Anything but a 2D shape or a 3D shape (rgb or grayscale) is
    /// unsupported. An rgb-flagged 3D buffer must end in a channel axis of
    /// size 3.
    pub fn from_shape(shape: &[usize], rgb: bool) -> Result<Self, TransformError> {
        match shape.len() {
            2 => Ok(SpatialCase::Plane),
            3 if rgb => {
                if shape[2] == 3 {
                    Ok(SpatialCase::RgbPlane)
                } else {
                    Err(TransformError::InvalidChannelAxis(shape[2]))
                }
            }
            3 => Ok(SpatialCase::Volume),
            n => Err(TransformError::UnsupportedDimensionality(n)),
        }
    }

    /// Number of spatial axes (2 for planes, 3 for volumes).
    pub fn ndim(&self) -> usize {
        match self {
            SpatialCase::Plane | SpatialCase::RgbPlane => 2,
            SpatialCase::Volume => 3,
        }
    }
}

/// A homogeneous affine matrix sized for the layer's spatial dimensionality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffineMatrix {
    /// 3x3 homogeneous matrix for two spatial axes.
    Plane(DMat3),
    /// 4x4 homogeneous matrix for three spatial axes.
    Volume(DMat4),
}

impl AffineMatrix {
    /// Identity transform for two spatial axes.
    pub fn identity_plane() -> Self {
        AffineMatrix::Plane(DMat3::IDENTITY)
    }

    /// Identity transform for three spatial axes.
    pub fn identity_volume() -> Self {
        AffineMatrix::Volume(DMat4::IDENTITY)
    }

    /// Build from row-major rows, 2D case.
    pub fn from_rows_plane(rows: [[f64; 3]; 3]) -> Self {
        AffineMatrix::Plane(DMat3::from_cols_array_2d(&rows).transpose())
    }

    /// Build from row-major rows, 3D case.
    pub fn from_rows_volume(rows: [[f64; 4]; 4]) -> Self {
        AffineMatrix::Volume(DMat4::from_cols_array_2d(&rows).transpose())
    }

    /// Spatial dimensionality this matrix applies to.
    pub fn ndim(&self) -> usize {
        match self {
            AffineMatrix::Plane(_) => 2,
            AffineMatrix::Volume(_) => 3,
        }
    }
}

/// Rotate/scale/shear/translate parameters, the second parameterization of a
/// layer's display transform.
///
/// Angles are in degrees. The matrix convention follows the viewer: linear
/// part = rotation · shear · scale, with the shear coefficients filling the
/// upper triangle of a unit matrix, and the translation in the last column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecomposedTransform {
    /// Parameters for two spatial axes.
    Plane {
        /// Rotation angle in degrees.
        rotate: f64,
        /// Per-axis scale factors.
        scale: [f64; 2],
        /// Single upper-triangular shear coefficient.
        shear: f64,
        /// Per-axis translation, in pixel units.
        translate: [f64; 2],
    },
    /// Parameters for three spatial axes.
    Volume {
        /// Per-axis rotation angles in degrees, composed in axis order.
        rotate: [f64; 3],
        /// Per-axis scale factors.
        scale: [f64; 3],
        /// Upper-triangular shear coefficients (s01, s02, s12).
        shear: [f64; 3],
        /// Per-axis translation, in pixel units.
        translate: [f64; 3],
    },
}

impl DecomposedTransform {
    /// Identity parameters for two spatial axes.
    pub fn identity_plane() -> Self {
        DecomposedTransform::Plane {
            rotate: 0.0,
            scale: [1.0, 1.0],
            shear: 0.0,
            translate: [0.0, 0.0],
        }
    }

    /// Identity parameters for three spatial axes.
    pub fn identity_volume() -> Self {
        DecomposedTransform::Volume {
            rotate: [0.0; 3],
            scale: [1.0; 3],
            shear: [0.0; 3],
            translate: [0.0; 3],
        }
    }

    /// Spatial dimensionality of the parameters.
    pub fn ndim(&self) -> usize {
        match self {
            DecomposedTransform::Plane { .. } => 2,
            DecomposedTransform::Volume { .. } => 3,
        }
    }

    /// Reconstruct the homogeneous matrix for these parameters.
    pub fn to_matrix(&self) -> AffineMatrix {
        match *self {
            DecomposedTransform::Plane {
                rotate,
                scale,
                shear,
                translate,
            } => {
                let r = DMat2::from_angle(rotate.to_radians());
                let sh = DMat2::from_cols(DVec2::new(1.0, 0.0), DVec2::new(shear, 1.0));
                let s = DMat2::from_diagonal(DVec2::new(scale[0], scale[1]));
                let lin = r * sh * s;
                AffineMatrix::Plane(DMat3::from_cols(
                    lin.col(0).extend(0.0),
                    lin.col(1).extend(0.0),
                    DVec3::new(translate[0], translate[1], 1.0),
                ))
            }
            DecomposedTransform::Volume {
                rotate,
                scale,
                shear,
                translate,
            } => {
                let r = DMat3::from_rotation_x(rotate[0].to_radians())
                    * DMat3::from_rotation_y(rotate[1].to_radians())
                    * DMat3::from_rotation_z(rotate[2].to_radians());
                let sh = DMat3::from_cols(
                    DVec3::new(1.0, 0.0, 0.0),
                    DVec3::new(shear[0], 1.0, 0.0),
                    DVec3::new(shear[1], shear[2], 1.0),
                );
                let s = DMat3::from_diagonal(DVec3::new(scale[0], scale[1], scale[2]));
                let lin = r * sh * s;
                AffineMatrix::Volume(DMat4::from_cols(
                    lin.col(0).extend(0.0),
                    lin.col(1).extend(0.0),
                    lin.col(2).extend(0.0),
                    DVec4::new(translate[0], translate[1], translate[2], 1.0),
                ))
            }
        }
    }
}

/// The inverted composite matrix handed to the resampler, with the
/// homogeneous row dropped. Row-major d x (d+1), acting on normalized
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum ResampleMatrix {
    /// 2x3 matrix for a single plane.
    Plane([f64; 6]),
    /// 2x3 matrix applied independently to each channel plane.
    RgbPlane([f64; 6]),
    /// 3x4 matrix for a volume.
    Volume([f64; 12]),
}

fn normalize_translation_plane(m: &DMat3, extent: [f64; 2]) -> DMat3 {
    let mut rows = m.transpose().to_cols_array_2d();
    rows[0][2] /= extent[0];
    rows[1][2] /= extent[1];
    DMat3::from_cols_array_2d(&rows).transpose()
}

fn normalize_translation_volume(m: &DMat4, extent: [f64; 3]) -> DMat4 {
    let mut rows = m.transpose().to_cols_array_2d();
    rows[0][3] /= extent[0];
    rows[1][3] /= extent[1];
    rows[2][3] /= extent[2];
    DMat4::from_cols_array_2d(&rows).transpose()
}

/// Build the resampling matrix for one layer.
///
/// Both the stored affine and the matrix reconstructed from the decomposed
/// parameters get their translation entries divided by the pixel extent of
/// the matching axis, then the stored affine is applied after the
/// reconstructed one. The composite is inverted (mapping world back to data)
/// and its homogeneous row dropped.
///
/// # Errors
///
/// * [`TransformError::UnsupportedDimensionality`] / [`TransformError::InvalidChannelAxis`]
///   for shapes outside the 2D/3D set.
/// * [`TransformError::DimensionMismatch`] when the affine parameters do not
///   fit the spatial case.
/// * [`TransformError::SingularTransform`] when the composite cannot be
///   inverted.
pub fn compose_resample_matrix(
    shape: &[usize],
    rgb: bool,
    affine: &AffineMatrix,
    decomposed: &DecomposedTransform,
) -> Result<ResampleMatrix, TransformError> {
    let case = SpatialCase::from_shape(shape, rgb)?;
    if affine.ndim() != case.ndim() {
        return Err(TransformError::DimensionMismatch {
            affine: affine.ndim(),
            data: case.ndim(),
        });
    }
    if decomposed.ndim() != case.ndim() {
        return Err(TransformError::DimensionMismatch {
            affine: decomposed.ndim(),
            data: case.ndim(),
        });
    }

    match (case, affine, decomposed.to_matrix()) {
        (_, AffineMatrix::Plane(a), AffineMatrix::Plane(b)) => {
            let extent = [shape[0] as f64, shape[1] as f64];
            let a = normalize_translation_plane(a, extent);
            let b = normalize_translation_plane(&b, extent);
            let m = a * b;
            if m.determinant().abs() < SINGULAR_EPS {
                return Err(TransformError::SingularTransform);
            }
            let rows = m.inverse().transpose().to_cols_array_2d();
            let coeffs = [
                rows[0][0], rows[0][1], rows[0][2], //
                rows[1][0], rows[1][1], rows[1][2],
            ];
            Ok(match case {
                SpatialCase::RgbPlane => ResampleMatrix::RgbPlane(coeffs),
                _ => ResampleMatrix::Plane(coeffs),
            })
        }
        (SpatialCase::Volume, AffineMatrix::Volume(a), AffineMatrix::Volume(b)) => {
            let extent = [shape[0] as f64, shape[1] as f64, shape[2] as f64];
            let a = normalize_translation_volume(a, extent);
            let b = normalize_translation_volume(&b, extent);
            let m = a * b;
            if m.determinant().abs() < SINGULAR_EPS {
                return Err(TransformError::SingularTransform);
            }
            let rows = m.inverse().transpose().to_cols_array_2d();
            let coeffs = [
                rows[0][0], rows[0][1], rows[0][2], rows[0][3], //
                rows[1][0], rows[1][1], rows[1][2], rows[1][3], //
                rows[2][0], rows[2][1], rows[2][2], rows[2][3],
            ];
            Ok(ResampleMatrix::Volume(coeffs))
        }
        _ => Err(TransformError::DimensionMismatch {
            affine: affine.ndim(),
            data: case.ndim(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn spatial_case_detection() -> Result<(), TransformError> {
        assert_eq!(SpatialCase::from_shape(&[4, 5], false)?, SpatialCase::Plane);
        assert_eq!(
            SpatialCase::from_shape(&[4, 5, 6], false)?,
            SpatialCase::Volume
        );
        assert_eq!(
            SpatialCase::from_shape(&[4, 5, 3], true)?,
            SpatialCase::RgbPlane
        );
        Ok(())
    }

    #[test]
    fn spatial_case_rejects_4d() {
        let err = SpatialCase::from_shape(&[2, 3, 4, 5], false).unwrap_err();
        assert!(matches!(err, TransformError::UnsupportedDimensionality(4)));
    }

    #[test]
    fn spatial_case_rejects_bad_channel_axis() {
        let err = SpatialCase::from_shape(&[4, 5, 4], true).unwrap_err();
        assert!(matches!(err, TransformError::InvalidChannelAxis(4)));
    }

    #[test]
    fn identity_composes_to_identity() -> Result<(), TransformError> {
        let m = compose_resample_matrix(
            &[8, 8],
            false,
            &AffineMatrix::identity_plane(),
            &DecomposedTransform::identity_plane(),
        )?;
        let ResampleMatrix::Plane(rows) = m else {
            panic!("expected plane matrix");
        };
        let expected = [1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        for (a, b) in rows.iter().zip(expected.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn translation_normalized_by_axis_extent() -> Result<(), TransformError> {
        // pure translation of (6, 10) pixels on a (12, 20) layer must become
        // (0.5, 0.5) in normalized units; inverted it shows up negated
        let affine = AffineMatrix::from_rows_plane([
            [1.0, 0.0, 6.0],
            [0.0, 1.0, 10.0],
            [0.0, 0.0, 1.0],
        ]);
        let m = compose_resample_matrix(
            &[12, 20],
            false,
            &affine,
            &DecomposedTransform::identity_plane(),
        )?;
        let ResampleMatrix::Plane(rows) = m else {
            panic!("expected plane matrix");
        };
        assert_relative_eq!(rows[2], -0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[5], -0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn volume_translation_uses_own_axis_extent() -> Result<(), TransformError> {
        let affine = AffineMatrix::from_rows_volume([
            [1.0, 0.0, 0.0, 2.0],
            [0.0, 1.0, 0.0, 4.0],
            [0.0, 0.0, 1.0, 8.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let m = compose_resample_matrix(
            &[4, 8, 16],
            false,
            &affine,
            &DecomposedTransform::identity_volume(),
        )?;
        let ResampleMatrix::Volume(rows) = m else {
            panic!("expected volume matrix");
        };
        // each axis divided by its own extent: 2/4, 4/8, 8/16
        assert_relative_eq!(rows[3], -0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[7], -0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[11], -0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn both_matrices_are_composed() -> Result<(), TransformError> {
        // scale 2 in the stored affine, translation in the decomposed set:
        // both must show up in the composite
        let affine = AffineMatrix::from_rows_plane([
            [2.0, 0.0, 0.0],
            [0.0, 2.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let decomposed = DecomposedTransform::Plane {
            rotate: 0.0,
            scale: [1.0, 1.0],
            shear: 0.0,
            translate: [5.0, 0.0],
        };
        let m = compose_resample_matrix(&[10, 10], false, &affine, &decomposed)?;
        let ResampleMatrix::Plane(rows) = m else {
            panic!("expected plane matrix");
        };
        // inverse of scale(2) . translate(0.5 normalized)
        assert_relative_eq!(rows[0], 0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[4], 0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[2], -0.5, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn rotation_matrix_convention() {
        let m = DecomposedTransform::Plane {
            rotate: 90.0,
            scale: [1.0, 1.0],
            shear: 0.0,
            translate: [0.0, 0.0],
        }
        .to_matrix();
        let AffineMatrix::Plane(m) = m else {
            panic!("expected plane matrix");
        };
        let rows = m.transpose().to_cols_array_2d();
        assert_relative_eq!(rows[0][0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(rows[0][1], -1.0, epsilon = 1e-12);
        assert_relative_eq!(rows[1][0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(rows[1][1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn shear_fills_upper_triangle() {
        let m = DecomposedTransform::Plane {
            rotate: 0.0,
            scale: [1.0, 1.0],
            shear: 0.5,
            translate: [0.0, 0.0],
        }
        .to_matrix();
        let AffineMatrix::Plane(m) = m else {
            panic!("expected plane matrix");
        };
        let rows = m.transpose().to_cols_array_2d();
        assert_relative_eq!(rows[0][1], 0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[1][0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn singular_composite_is_reported() {
        let affine = AffineMatrix::from_rows_plane([
            [1.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 1.0],
        ]);
        let err = compose_resample_matrix(
            &[8, 8],
            false,
            &affine,
            &DecomposedTransform::identity_plane(),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::SingularTransform));
    }

    #[test]
    fn zero_scale_is_singular() {
        let decomposed = DecomposedTransform::Plane {
            rotate: 30.0,
            scale: [0.0, 1.0],
            shear: 0.0,
            translate: [0.0, 0.0],
        };
        let err = compose_resample_matrix(
            &[8, 8],
            false,
            &AffineMatrix::identity_plane(),
            &decomposed,
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::SingularTransform));
    }

    #[test]
    fn dimension_mismatch_is_reported() {
        let err = compose_resample_matrix(
            &[4, 5, 6],
            false,
            &AffineMatrix::identity_plane(),
            &DecomposedTransform::identity_plane(),
        )
        .unwrap_err();
        assert!(matches!(err, TransformError::DimensionMismatch { .. }));
    }

    #[test]
    fn rgb_plane_uses_two_axis_extent() -> Result<(), TransformError> {
        let affine = AffineMatrix::from_rows_plane([
            [1.0, 0.0, 3.0],
            [0.0, 1.0, 5.0],
            [0.0, 0.0, 1.0],
        ]);
        let m = compose_resample_matrix(
            &[6, 10, 3],
            true,
            &affine,
            &DecomposedTransform::identity_plane(),
        )?;
        let ResampleMatrix::RgbPlane(rows) = m else {
            panic!("expected rgb plane matrix");
        };
        assert_relative_eq!(rows[2], -0.5, epsilon = 1e-12);
        assert_relative_eq!(rows[5], -0.5, epsilon = 1e-12);
        Ok(())
    }
}
