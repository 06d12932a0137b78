//! Table-driven 2D gradient noise.
//!
//! Both generators read the same fixed 256-entry permutation, duplicated to
//! 512 entries so that `P[i + 1]` and `P[a + 1]` never wrap. They carry no
//! state and no seed: callers shift the input coordinates to vary the output.
//! Both implement [`noise::NoiseFn`] so they can be used anywhere the `noise`
//! crate's generators are accepted.

use noise::NoiseFn;

/// Ken Perlin's reference permutation.
pub const PERMUTATION: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

const fn doubled() -> [u8; 512] {
    let mut table = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        table[i] = PERMUTATION[i & 255];
        i += 1;
    }
    table
}

static P: [u8; 512] = doubled();

#[inline]
fn perm(i: usize) -> usize {
    P[i] as usize
}

/// Lattice cell of `v`, wrapped into the permutation range.
#[inline]
fn cell(v: f64) -> usize {
    ((v.floor() as i64) & 255) as usize
}

// ---------------------------------------------------------------------------
// Classic gradient noise
// ---------------------------------------------------------------------------

/// Classic (improved) Perlin noise over the unit square lattice.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClassicPerlin;

impl ClassicPerlin {
    /// Evaluate at `(x, y)`. The result lies in roughly `[-1, 1]`.
    pub fn sample(x: f64, y: f64) -> f64 {
        let xi = cell(x);
        let yi = cell(y);
        let x = x - x.floor();
        let y = y - y.floor();
        let u = fade(x);
        let v = fade(y);

        let a = perm(xi) + yi;
        let b = perm(xi + 1) + yi;

        lerp(
            v,
            lerp(u, grad(perm(a), x, y), grad(perm(b), x - 1.0, y)),
            lerp(
                u,
                grad(perm(a + 1), x, y - 1.0),
                grad(perm(b + 1), x - 1.0, y - 1.0),
            ),
        )
    }
}

impl NoiseFn<f64, 2> for ClassicPerlin {
    fn get(&self, point: [f64; 2]) -> f64 {
        Self::sample(point[0], point[1])
    }
}

/// Quintic fade `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient selected by the low four bits of `hash`.
#[inline]
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

// ---------------------------------------------------------------------------
// Simplex noise
// ---------------------------------------------------------------------------

const GRAD3: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// 2D simplex noise over the permutation table.
#[derive(Clone, Copy, Debug, Default)]
pub struct TableSimplex;

impl TableSimplex {
    /// Evaluate at `(x, y)`. The result lies in roughly `[-1, 1]`.
    pub fn sample(x: f64, y: f64) -> f64 {
        let sqrt3 = 3.0_f64.sqrt();
        let f2 = 0.5 * (sqrt3 - 1.0);
        let g2 = (3.0 - sqrt3) / 6.0;

        let s = (x + y) * f2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        let t = (i + j) * g2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + g2;
        let y1 = y0 - j1 as f64 + g2;
        let x2 = x0 - 1.0 + 2.0 * g2;
        let y2 = y0 - 1.0 + 2.0 * g2;

        let ii = cell(i);
        let jj = cell(j);
        let gi0 = perm(ii + perm(jj)) % 12;
        let gi1 = perm(ii + i1 + perm(jj + j1)) % 12;
        let gi2 = perm(ii + 1 + perm(jj + 1)) % 12;

        70.0 * (corner(gi0, x0, y0) + corner(gi1, x1, y1) + corner(gi2, x2, y2))
    }
}

impl NoiseFn<f64, 2> for TableSimplex {
    fn get(&self, point: [f64; 2]) -> f64 {
        Self::sample(point[0], point[1])
    }
}

/// Contribution of one simplex corner: `max(0, 0.5 - d^2)^4 * dot(g, d)`.
#[inline]
fn corner(gi: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let g = GRAD3[gi];
    t.powi(4) * (g[0] * x + g[1] * y)
}
