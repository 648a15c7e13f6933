use crate::models::Scalar;

/// Coerce a rating cell to the non-negative integer domain. Anything that is
/// not a usable number becomes the "no rating" sentinel 0.
pub fn normalize_rating(value: &Scalar) -> u32 {
    match value {
        Scalar::Int(i) => (*i).clamp(0, u32::MAX as i64) as u32,
        Scalar::Float(f) => float_to_rating(*f),
        Scalar::Text(s) => s.trim().parse::<f64>().map(float_to_rating).unwrap_or(0),
        Scalar::Bool(b) => u32::from(*b),
        Scalar::Empty => 0,
    }
}

fn float_to_rating(f: f64) -> u32 {
    if !f.is_finite() || f < 0.0 {
        return 0;
    }
    // `as` truncates toward zero and saturates at u32::MAX
    f.trunc() as u32
}

/// Render an account identifier cell as the join key.
pub fn normalize_account_id(value: &Scalar) -> String {
    match value {
        Scalar::Text(s) => s.trim().to_string(),
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        Scalar::Float(f) => f.to_string(),
        Scalar::Bool(b) => b.to_string(),
        Scalar::Empty => String::new(),
    }
}
