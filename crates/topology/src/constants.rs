/// Minimum loop length for a face to take part in the orientation check.
pub const MIN_FACE_VERTICES: usize = 3;

/// A visible vertex with fewer incident edges than this is loose.
pub const MIN_VERTEX_EDGES: usize = 2;

/// Squared length below which a face normal counts as degenerate.
pub const DEGENERATE_NORMAL_EPSILON: f32 = 1e-12;

/// Indent of a defect line under its object's status line.
pub const DEFECT_INDENT: &str = "    ";

/// Indent of a remediation hint under its defect line.
pub const HINT_INDENT: &str = "        ";
