mod common;

use common::synthetic_image::{circle_edge_map, polygon_contour};
use shape_detector::{
    decode, encode, evolve, Contour, ContourError, EnergyField, SnakeParams, Termination,
};

fn ring_field() -> EnergyField {
    EnergyField::from_edge_map(&circle_edge_map(100, 100, 50.0, 50.0, 20.0))
}

fn settling_params() -> SnakeParams {
    SnakeParams {
        alpha: 1.0,
        beta: 1.0,
        gamma: 3.0,
        search_radius: 2,
        max_iterations: 300,
        moved_threshold: 0,
        ..Default::default()
    }
}

#[test]
fn contour_settles_onto_circle_boundary() {
    let field = ring_field();
    let contour = Contour::new(polygon_contour(50.0, 50.0, 28.0, 24)).expect("24-point seed");
    let result = evolve(contour, &field, &settling_params()).expect("valid params");

    assert_eq!(result.termination, Termination::Converged);
    assert!(result.moved_last_pass == 0);
    for p in result.contour.points() {
        let r = ((p[0] - 50.0).powi(2) + (p[1] - 50.0).powi(2)).sqrt();
        assert!((17.0..=23.0).contains(&r), "point {p:?} at radius {r}");
    }
}

#[test]
fn evolving_a_converged_contour_is_idempotent() {
    let field = ring_field();
    let contour = Contour::new(polygon_contour(50.0, 50.0, 28.0, 24)).expect("24-point seed");
    let first = evolve(contour, &field, &settling_params()).expect("valid params");
    assert_eq!(first.termination, Termination::Converged);

    let second = evolve(first.contour.clone(), &field, &settling_params()).expect("valid params");
    assert_eq!(second.termination, Termination::Converged);
    assert_eq!(second.iterations, 1);
    assert_eq!(second.moved_last_pass, 0);
    assert_eq!(second.contour.points(), first.contour.points());
}

#[test]
fn iteration_cap_is_a_tagged_outcome() {
    let field = ring_field();
    let contour = Contour::new(polygon_contour(50.0, 50.0, 40.0, 24)).expect("24-point seed");
    let params = SnakeParams {
        max_iterations: 1,
        ..settling_params()
    };
    let result = evolve(contour, &field, &params).expect("valid params");
    assert_eq!(result.termination, Termination::IterationLimit);
    assert_eq!(result.iterations, 1);
    assert_eq!(result.contour.len(), 24);
}

#[test]
fn resampling_keeps_spacing_within_configured_bounds() {
    // Uneven seed: three tight clusters spread around a circle.
    let mut points = Vec::new();
    for cluster in 0..3 {
        let base = cluster as f32 / 3.0 * std::f32::consts::TAU;
        for k in 0..4 {
            let phi = base + k as f32 * 0.05;
            points.push([50.0 + 20.0 * phi.cos(), 50.0 + 20.0 * phi.sin()]);
        }
    }
    let mut contour = Contour::new(points).expect("12-point seed");
    contour.resample(0.25, 2.0);

    let mean = contour.mean_spacing();
    let pts = contour.points();
    let n = pts.len();
    assert!(n >= 3);
    for i in 0..n {
        let a = pts[i];
        let b = pts[(i + 1) % n];
        let d = ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)).sqrt();
        assert!(
            d >= 0.25 * mean - 1e-4 && d <= 2.0 * mean + 1e-4,
            "edge {i} spacing {d} outside [{}, {}]",
            0.25 * mean,
            2.0 * mean
        );
    }
}

#[test]
fn converged_contour_round_trips_through_chain_code() {
    let field = ring_field();
    let contour = Contour::new(polygon_contour(50.0, 50.0, 28.0, 24)).expect("24-point seed");
    let result = evolve(contour, &field, &settling_params()).expect("valid params");

    let encoding = encode(&result.contour).expect("closed chain");
    let pixels = decode(&encoding.chain);
    assert_eq!(pixels.first(), pixels.last(), "chain must close");
    assert_eq!(pixels.len(), encoding.chain.codes.len() + 1);

    // Roughly a radius-20 circle: perimeter near 2π·20, area near π·20²,
    // negative because increasing-angle traversal in image coordinates is
    // clockwise under the y-up convention.
    assert!(
        (100.0..=170.0).contains(&encoding.perimeter),
        "perimeter={}",
        encoding.perimeter
    );
    assert!(encoding.area < 0.0, "area={}", encoding.area);
    let magnitude = encoding.area.abs();
    assert!(
        (900.0..=1700.0).contains(&magnitude),
        "area magnitude={magnitude}"
    );
}

#[test]
fn degenerate_initial_contour_is_rejected() {
    let err = Contour::new(vec![[10.0, 10.0], [12.0, 10.0]]).unwrap_err();
    assert_eq!(err, ContourError::TooFewPoints { found: 2 });
}
