/// Single coordinate axis used for positions.
///
/// Signed so that negative input from a front end is rejected as out of range instead of wrapping.
pub type Coord = i32;

/// Board width or height.
pub type Dim = u16;

/// Two-dimensional coordinates `(x, y)`, `x` being the column and `y` the row.
pub type Coord2 = (Coord, Coord);

/// Board size `(width, height)`.
pub type Size2 = (Dim, Dim);

pub const fn area(width: Dim, height: Dim) -> usize {
    (width as usize) * (height as usize)
}

/// Whether `a` and `b` are orthogonal neighbours.
pub const fn is_adjacent(a: Coord2, b: Coord2) -> bool {
    let dx = a.0.abs_diff(b.0) as u64;
    let dy = a.1.abs_diff(b.1) as u64;
    dx + dy == 1
}
