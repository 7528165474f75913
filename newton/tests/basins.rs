use newton::{
    Domain, FnPair, Fractal, FractalConfig, FractalSettings, Polynomial, SolverSettings,
};
use num::complex::Complex64;

#[test]
fn closures_and_polynomial_agree() {
    let settings = FractalSettings::new(16, Domain::new(-1.5, 1.5, -1.5, 1.5));

    let pair = FnPair::new(|z: Complex64| z * z - 1.0, |z: Complex64| 2.0 * z);
    let from_closures = Fractal::compute(&pair, settings.clone()).unwrap();
    let from_polynomial = Fractal::compute(&Polynomial::roots_of_unity(2), settings).unwrap();

    assert_eq!(from_closures.grid, from_polynomial.grid);
    assert_eq!(from_closures.roots.len(), 2);
}

#[test]
fn cube_roots_of_unity_are_found_once_each() {
    let settings = FractalSettings::new(32, Domain::new(-2.0, 2.0, -2.0, 2.0));
    let fractal = Fractal::compute(&Polynomial::roots_of_unity(3), settings).unwrap();

    assert_eq!(fractal.roots.len(), 3);
    for root in fractal.roots.roots() {
        assert!((root.norm() - 1.0).abs() < 1e-6);
        assert!((root.powu(3) - 1.0).norm() < 1e-5);
    }
    assert_eq!(fractal.grid.distinct_indices(), vec![0, 1, 2]);
}

#[test]
fn first_visited_point_owns_index_zero() {
    // The traversal starts in the bottom-left corner, (x_min, y_min)
    let p = Polynomial::roots_of_unity(3);
    let fractal = Fractal::compute(&p, FractalSettings::new(21, Domain::default())).unwrap();

    let corner = SolverSettings::default()
        .solve(&p, Complex64::new(-1.0, -1.0))
        .unwrap();
    assert_eq!(fractal.grid[(0, 0)], Some(0));
    assert_eq!(fractal.roots.find(corner), Some(0));
}

#[test]
fn reference_quintic_from_config() {
    let config = FractalConfig::decode(
        r#"(
            name: "quintic",
            polynomial: (coefficients: [(1.0, 0.0), (0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (-1.0, 0.0), (1.0, 0.0)]),
            settings: (resolution: 40),
        )"#,
    )
    .unwrap();

    let fractal = Fractal::compute(&config.polynomial, config.settings.clone()).unwrap();
    assert_eq!(fractal.grid.len(), 40 * 40);
    assert!(fractal.roots.len() <= config.polynomial.degree());
    for &root in fractal.roots.roots() {
        let (p, _) = config.polynomial.eval(root);
        assert!(p.norm() < 1e-6);
    }
}
