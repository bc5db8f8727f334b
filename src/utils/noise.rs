//! 2D gradient noise in `[0, 1]`.
//!
//! Used for the irregular horizontal drift of the breathing driver. Lattice
//! gradients come from an integer hash instead of a permutation table, so
//! the noise is stateless and identical across runs.

#[inline]
fn hash(x: i32, y: i32) -> u32 {
    let mut h = (x as u32).wrapping_mul(0x8da6_b343) ^ (y as u32).wrapping_mul(0xd816_3841);
    h ^= h >> 13;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 16;
    h
}

#[inline]
fn gradient(h: u32, dx: f32, dy: f32) -> f32 {
    match h & 7 {
        0 => dx + dy,
        1 => -dx + dy,
        2 => dx - dy,
        3 => -dx - dy,
        4 => dx,
        5 => -dx,
        6 => dy,
        _ => -dy,
    }
}

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Perlin-style noise sampled at `(x, y)`, remapped to `[0, 1]`.
///
/// Integer lattice points sample exactly `0.5`.
#[must_use]
pub fn perlin(x: f32, y: f32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let (xi, yi) = (x0 as i32, y0 as i32);
    let (fx, fy) = (x - x0, y - y0);

    let n00 = gradient(hash(xi, yi), fx, fy);
    let n10 = gradient(hash(xi + 1, yi), fx - 1.0, fy);
    let n01 = gradient(hash(xi, yi + 1), fx, fy - 1.0);
    let n11 = gradient(hash(xi + 1, yi + 1), fx - 1.0, fy - 1.0);

    let u = fade(fx);
    let v = fade(fy);
    let n = lerp(lerp(n00, n10, u), lerp(n01, n11, u), v);

    // Diagonal gradients can overshoot [-1, 1] slightly.
    (n * 0.5 + 0.5).clamp(0.0, 1.0)
}
