use shape_detector::{EdgeMap, EdgePixel};

/// Edge map of a single straight line in normal form
/// `x·cos θ + y·sin θ = ρ`, with gradients normal to the line.
pub fn line_edge_map(width: usize, height: usize, rho: f32, theta: f32) -> EdgeMap {
    assert!(width > 0 && height > 0, "image dimensions must be positive");

    let (sin_t, cos_t) = theta.sin_cos();
    let diag = ((width * width + height * height) as f32).sqrt();
    let mut seen = std::collections::HashSet::new();
    let mut pixels = Vec::new();
    // March along the line direction (-sin θ, cos θ) through the foot point.
    let steps = (2.0 * diag) as i32;
    for i in -steps..=steps {
        let t = i as f32 * 0.5;
        let x = (rho * cos_t - t * sin_t).round();
        let y = (rho * sin_t + t * cos_t).round();
        if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
            continue;
        }
        if !seen.insert((x as u32, y as u32)) {
            continue;
        }
        pixels.push(EdgePixel {
            x: x as u32,
            y: y as u32,
            magnitude: 4.0,
            orientation: theta,
        });
    }
    EdgeMap::new(width, height, pixels).expect("line samples are in bounds")
}

/// Edge map of a single circle boundary with outward radial gradients,
/// standing in for a Canny-style mask of a clean filled circle.
pub fn circle_edge_map(width: usize, height: usize, cx: f32, cy: f32, radius: f32) -> EdgeMap {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(radius > 0.0, "radius must be positive");

    let steps = (radius * 16.0).max(32.0) as usize;
    let mut seen = std::collections::HashSet::new();
    let mut pixels = Vec::new();
    for i in 0..steps {
        let phi = i as f32 / steps as f32 * std::f32::consts::TAU;
        let x = (cx + radius * phi.cos()).round();
        let y = (cy + radius * phi.sin()).round();
        if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
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
    EdgeMap::new(width, height, pixels).expect("circle samples are in bounds")
}

/// Edge map of a rotated ellipse boundary with analytically exact outward
/// normals.
pub fn ellipse_edge_map(
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    semi_major: f32,
    semi_minor: f32,
    rotation: f32,
) -> EdgeMap {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(
        semi_major >= semi_minor && semi_minor > 0.0,
        "axes must satisfy a ≥ b > 0"
    );

    let steps = 360;
    let (sin_p, cos_p) = rotation.sin_cos();
    let mut seen = std::collections::HashSet::new();
    let mut pixels = Vec::new();
    for i in 0..steps {
        let t = i as f32 / steps as f32 * std::f32::consts::TAU;
        let (u, v) = (semi_major * t.cos(), semi_minor * t.sin());
        let x = (cx + u * cos_p - v * sin_p).round();
        let y = (cy + u * sin_p + v * cos_p).round();
        if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
            continue;
        }
        if !seen.insert((x as u32, y as u32)) {
            continue;
        }
        let (nu, nv) = (t.cos() / semi_major, t.sin() / semi_minor);
        let nx = nu * cos_p - nv * sin_p;
        let ny = nu * sin_p + nv * cos_p;
        pixels.push(EdgePixel {
            x: x as u32,
            y: y as u32,
            magnitude: 4.0,
            orientation: ny.atan2(nx),
        });
    }
    EdgeMap::new(width, height, pixels).expect("ellipse samples are in bounds")
}

/// Regular polygon contour around a center, usable as a snake seed.
pub fn polygon_contour(cx: f32, cy: f32, radius: f32, points: usize) -> Vec<[f32; 2]> {
    assert!(points >= 3, "a contour needs at least 3 points");
    (0..points)
        .map(|i| {
            let phi = i as f32 / points as f32 * std::f32::consts::TAU;
            [cx + radius * phi.cos(), cy + radius * phi.sin()]
        })
        .collect()
}
