use shape_detector::config::{load_config, RuntimeConfig};
use shape_detector::prelude::*;
use std::path::Path;

/// Boundary samples of a circle with outward radial gradients.
fn circle_edges(w: usize, h: usize, cx: f32, cy: f32, r: f32) -> EdgeMap {
    let steps = (r * 16.0) as usize;
    let mut seen = std::collections::HashSet::new();
    let mut pixels = Vec::new();
    for i in 0..steps {
        let phi = i as f32 / steps as f32 * std::f32::consts::TAU;
        let x = (cx + r * phi.cos()).round();
        let y = (cy + r * phi.sin()).round();
        if x < 0.0 || y < 0.0 || x >= w as f32 || y >= h as f32 {
            continue;
        }
        if !seen.insert((x as u32, y as u32)) {
            continue;
        }
        pixels.push(EdgePixel {
            x: x as u32,
            y: y as u32,
            magnitude: 4.0,
            orientation: (y - cy).atan2(x - cx),
        });
    }
    EdgeMap::new(w, h, pixels).expect("synthetic edges are in bounds")
}

fn main() {
    // Demo stub: synthesizes a circle edge map, then runs both pipelines.
    let config = match std::env::args().nth(1) {
        Some(path) => match load_config(Path::new(&path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => RuntimeConfig::default(),
    };

    let edges = circle_edges(100, 100, 50.0, 50.0, 20.0);

    let hough = shape_detector::HoughParams {
        kind: ShapeKind::Circle,
        ..config.hough
    };
    let detection = detect_shapes(&edges, &hough).expect("valid voting params");
    println!(
        "voting: shapes={} max_vote={} latency_ms={:.3}",
        detection.shapes.len(),
        detection.max_vote,
        detection.latency_ms
    );

    let field = EnergyField::from_edge_map(&edges);
    let initial: Vec<[f32; 2]> = (0..24)
        .map(|i| {
            let phi = i as f32 / 24.0 * std::f32::consts::TAU;
            [50.0 + 30.0 * phi.cos(), 50.0 + 30.0 * phi.sin()]
        })
        .collect();
    let contour = Contour::new(initial).expect("initial contour has 24 points");
    let result = evolve(contour, &field, &config.snake).expect("valid snake params");
    println!(
        "snake: {:?} after {} passes, latency_ms={:.3}",
        result.termination, result.iterations, result.latency_ms
    );

    match encode(&result.contour) {
        Ok(encoding) => println!(
            "chain: steps={} perimeter={:.2} area={:.2}",
            encoding.chain.codes.len(),
            encoding.perimeter,
            encoding.area
        ),
        Err(err) => eprintln!("chain: {err}"),
    }
}
