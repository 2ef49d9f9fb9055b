use glam::{DMat3, DVec3};

/// Sum of the diagonal entries.
#[inline]
pub fn trace(m: &DMat3) -> f64 {
    m.x_axis.x + m.y_axis.y + m.z_axis.z
}

/// The diagonal entries as a vector.
#[inline]
pub fn diagonal(m: &DMat3) -> DVec3 {
    DVec3::new(m.x_axis.x, m.y_axis.y, m.z_axis.z)
}

/// Frobenius (entry-wise L2) norm.
#[inline]
pub fn frobenius_norm(m: &DMat3) -> f64 {
    (m.x_axis.length_squared() + m.y_axis.length_squared() + m.z_axis.length_squared()).sqrt()
}

/// Index of the smallest component. Ties resolve to the lowest index.
#[inline]
pub fn argmin3(v: DVec3) -> usize {
    let mut imin = 0;
    for i in 1..3 {
        if v[i] < v[imin] {
            imin = i;
        }
    }
    imin
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trace_and_diagonal() {
        let m = DMat3::from_cols_array(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(trace(&m), 15.0);
        assert_eq!(diagonal(&m), DVec3::new(1.0, 5.0, 9.0));
    }

    #[test]
    fn test_frobenius_norm() {
        let m = DMat3::from_cols_array(&[1.0, -2.0, 0.0, 0.0, 2.0, 0.0, 4.0, 0.0, 0.0]);
        assert_relative_eq!(frobenius_norm(&m), 5.0);
        assert_eq!(frobenius_norm(&DMat3::ZERO), 0.0);
    }

    #[test]
    fn test_argmin3() {
        assert_eq!(argmin3(DVec3::new(3.0, 1.0, 2.0)), 1);
        assert_eq!(argmin3(DVec3::new(3.0, 2.0, -1.0)), 2);
        assert_eq!(argmin3(DVec3::new(1.0, 1.0, 1.0)), 0);
        assert_eq!(argmin3(DVec3::new(2.0, 0.5, 0.5)), 1);
    }
}
