//! MediaPipe Face Mesh region index tables.
//!
//! Index positions refer to the 468-point Face Mesh topology. The tables are
//! ordered: contour tables trace their region as a closed polygon, cluster
//! tables are unordered point sets used for centroid/extent measurement.

/// Number of points in the Face Mesh topology this engine assumes.
pub const LANDMARK_COUNT: usize = 468;

/// Face oval, traced clockwise from the forehead.
pub const FACE_OVAL: &[usize] = &[
    10, 338, 297, 332, 284, 251, 389, 356, 454, 323, 361, 288, 397, 365, 379,
    378, 400, 377, 152, 148, 176, 149, 150, 136, 172, 58, 132, 93, 234, 127,
    162, 21, 54, 103, 67, 109,
];

/// Outer lip contour, traced from the left mouth corner.
pub const LIP_OUTER: &[usize] = &[
    61, 146, 91, 181, 84, 17, 314, 405, 321, 375, 291, 409, 270, 269, 267, 0,
    37, 39, 40, 185,
];

/// Inner lip contour, traced from the left mouth corner.
pub const LIP_INNER: &[usize] = &[
    78, 95, 88, 178, 87, 14, 317, 402, 318, 324, 308, 415, 310, 311, 312, 13,
    82, 81, 80, 191,
];

/// Left cheek-center cluster (apple of the cheek).
pub const LEFT_CHEEK: &[usize] = &[50, 101, 118, 117, 123, 147];

/// Right cheek-center cluster.
pub const RIGHT_CHEEK: &[usize] = &[280, 330, 347, 346, 352, 376];

/// Left upper-eyelid arc, outer corner to inner corner.
pub const LEFT_EYE_UPPER: &[usize] = &[33, 246, 161, 160, 159, 158, 157, 173, 133];

/// Right upper-eyelid arc, inner corner to outer corner.
pub const RIGHT_EYE_UPPER: &[usize] = &[362, 398, 384, 385, 386, 387, 388, 466, 263];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_indices_within_topology() {
        for table in [
            FACE_OVAL,
            LIP_OUTER,
            LIP_INNER,
            LEFT_CHEEK,
            RIGHT_CHEEK,
            LEFT_EYE_UPPER,
            RIGHT_EYE_UPPER,
        ] {
            for &idx in table {
                assert!(idx < LANDMARK_COUNT, "index {idx} out of topology");
            }
        }
    }

    #[test]
    fn lip_contours_have_matching_lengths() {
        assert_eq!(LIP_OUTER.len(), LIP_INNER.len());
    }

    #[test]
    fn cheek_clusters_are_symmetric_in_size() {
        assert_eq!(LEFT_CHEEK.len(), RIGHT_CHEEK.len());
        assert_eq!(LEFT_EYE_UPPER.len(), RIGHT_EYE_UPPER.len());
    }
}
