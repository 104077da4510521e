extern crate nalgebra as na;

use na::{DMatrix,Matrix4,Matrix3};
use crate::Float;

pub const ORTHONORMAL_TOLERANCE: Float = 1e-3;

pub fn rotation(mat: &Matrix4<Float>) -> Matrix3<Float> {
    mat.fixed_view::<3,3>(0,0).into_owned()
}

/**
 * Copies a dynamically sized matrix into a homogeneous transform.
 * None if the shape is not 4x4.
 */
pub fn homogeneous_from_dynamic(mat: &DMatrix<Float>) -> Option<Matrix4<Float>> {
    match mat.shape() {
        (4,4) => Some(mat.fixed_view::<4,4>(0,0).into_owned()),
        _ => None
    }
}

/**
 * Largest deviation of R^T*R from the identity
 */
pub fn orthonormality_error(rotation: &Matrix3<Float>) -> Float {
    (rotation.transpose()*rotation - Matrix3::<Float>::identity()).amax()
}

/**
 * Checks that the transform is a proper rigid motion: orthonormal rotation block with det +1
 * and a homogeneous bottom row of [0,0,0,1].
 */
pub fn is_rigid(mat: &Matrix4<Float>, tolerance: Float) -> bool {
    let rot = rotation(mat);
    let bottom_row_ok = (mat[(3,0)].abs() <= tolerance) && (mat[(3,1)].abs() <= tolerance) && (mat[(3,2)].abs() <= tolerance) && ((mat[(3,3)] - 1.0).abs() <= tolerance);
    let finite = mat.iter().all(|v| v.is_finite());

    finite && bottom_row_ok && orthonormality_error(&rot) <= tolerance && (rot.determinant() - 1.0).abs() <= tolerance
}
