//! Geographic projection for the station map.
//!
//! Composite Albers equal-area projection of the United States: the lower 48
//! on standard parallels 29.5°/45.5°, with Alaska and Hawaii rescaled and
//! tucked under the south-west corner, the arrangement used by the usual US
//! choropleth layout. Spherical forms are plenty at canvas resolution.

/// Spherical Albers equal-area conic, pre-scaled and pre-translated into
/// canvas pixels.
#[derive(Debug, Clone, Copy)]
struct Albers {
    n: f64,
    c: f64,
    rho0: f64,
    reference_lon: f64,
    scale: f64,
    translate: (f64, f64),
}

impl Albers {
    fn new(parallels: [f64; 2], center: (f64, f64), scale: f64, translate: (f64, f64)) -> Self {
        let phi1 = parallels[0].to_radians();
        let phi2 = parallels[1].to_radians();
        let phi0 = center.1.to_radians();
        let n = (phi1.sin() + phi2.sin()) / 2.0;
        let c = 2.0f64.mul_add(n * phi1.sin(), phi1.cos().powi(2));
        let rho0 = (c - 2.0 * n * phi0.sin()).sqrt() / n;
        Self {
            n,
            c,
            rho0,
            reference_lon: center.0,
            scale,
            translate,
        }
    }

    fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let theta = self.n * (lon - self.reference_lon).to_radians();
        let rho = (self.c - 2.0 * self.n * lat.to_radians().sin()).sqrt() / self.n;
        let x = rho * theta.sin();
        let y = self.rho0 - rho * theta.cos();
        (
            self.scale.mul_add(x, self.translate.0),
            self.scale.mul_add(-y, self.translate.1),
        )
    }
}

/// Composite projection: lon/lat in, canvas pixels out. Constructed once at
/// startup and read-only afterwards.
#[derive(Debug, Clone, Copy)]
pub struct AlbersUsa {
    lower48: Albers,
    alaska: Albers,
    hawaii: Albers,
}

impl AlbersUsa {
    /// `scale` and `translate` follow the conventional projection surface:
    /// the reference point of the lower 48 lands exactly on `translate`.
    pub fn new(scale: f64, translate: (f64, f64)) -> Self {
        let (tx, ty) = translate;
        Self {
            lower48: Albers::new([29.5, 45.5], (-96.6, 38.7), scale, translate),
            alaska: Albers::new(
                [55.0, 65.0],
                (-156.0, 58.5),
                scale * 0.35,
                (0.307f64.mul_add(-scale, tx), 0.201f64.mul_add(scale, ty)),
            ),
            hawaii: Albers::new(
                [8.0, 18.0],
                (-160.0, 19.9),
                scale,
                (0.205f64.mul_add(-scale, tx), 0.212f64.mul_add(scale, ty)),
            ),
        }
    }

    /// Projects geographic coordinates to canvas pixels. Points outside the
    /// three covered regions are unplaceable and yield `None`.
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !lat.is_finite() {
            return None;
        }
        if (51.0..=72.0).contains(&lat) && (-170.0..=-129.0).contains(&lon) {
            Some(self.alaska.project(lon, lat))
        } else if (18.0..=23.5).contains(&lat) && (-161.0..=-154.0).contains(&lon) {
            Some(self.hawaii.project(lon, lat))
        } else if (24.0..=50.0).contains(&lat) && (-125.0..=-66.0).contains(&lon) {
            Some(self.lower48.project(lon, lat))
        } else {
            None
        }
    }

    /// Path-generator equivalent: maps a geographic ring into a canvas
    /// polyline, dropping unplaceable vertices.
    pub fn project_outline(&self, outline: &[(f64, f64)]) -> Vec<(f64, f64)> {
        outline
            .iter()
            .filter_map(|&(lon, lat)| self.project(lon, lat))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn projection() -> AlbersUsa {
        AlbersUsa::new(1500.0, (600.0, 375.0))
    }

    #[test]
    fn reference_point_lands_exactly_on_translate() {
        let (x, y) = projection().project(-96.6, 38.7).unwrap();
        assert!((x - 600.0).abs() < 1e-9);
        assert!((y - 375.0).abs() < 1e-9);
    }

    #[test]
    fn continental_geography_keeps_its_bearings() {
        let p = projection();
        let seattle = p.project(-122.33, 47.61).unwrap();
        let miami = p.project(-80.19, 25.76).unwrap();
        let denver = p.project(-104.99, 39.74).unwrap();
        let new_york = p.project(-74.01, 40.71).unwrap();

        // west of / north of
        assert!(seattle.0 < miami.0);
        assert!(seattle.1 < miami.1);
        assert!(denver.0 < new_york.0);
    }

    #[test]
    fn insets_land_in_the_lower_left_of_the_canvas() {
        let p = projection();
        let anchorage = p.project(-149.90, 61.22).unwrap();
        let honolulu = p.project(-157.86, 21.31).unwrap();

        assert!(anchorage.0 < 450.0 && anchorage.1 > 500.0);
        assert!(honolulu.0 < 500.0 && honolulu.1 > 500.0);
        for (x, y) in [anchorage, honolulu] {
            assert!((0.0..1200.0).contains(&x));
            assert!((0.0..900.0).contains(&y));
        }
    }

    #[test]
    fn points_outside_the_composite_are_unplaceable() {
        let p = projection();
        assert!(p.project(0.1, 51.5).is_none()); // London
        assert!(p.project(0.0, 0.0).is_none());
        assert!(p.project(-66.1, 18.47).is_none()); // San Juan
        assert!(p.project(f64::NAN, 40.0).is_none());
    }

    #[test]
    fn outline_projection_matches_point_projection() {
        let p = projection();
        let ring = [(-100.0, 40.0), (-99.0, 40.0), (-99.0, 41.0)];
        let projected = p.project_outline(&ring);
        assert_eq!(projected.len(), 3);
        assert_eq!(projected[0], p.project(-100.0, 40.0).unwrap());
    }
}
