use crate::models::Scalar;

/// Format an amount as rupiah with thousands separators and no decimals: Rp 1,234,567
pub fn rupiah(val: f64) -> String {
    let negative = val < 0.0;
    let whole = format!("{:.0}", val.abs());

    let mut with_commas = String::new();
    for (i, c) in whole.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative && with_commas != "0" {
        format!("Rp -{with_commas}")
    } else {
        format!("Rp {with_commas}")
    }
}

/// Outcome of best-effort currency formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum Formatted {
    Currency(String),
    /// The value was not a number and is kept as read.
    Passthrough(Scalar),
}

impl Formatted {
    pub fn into_scalar(self) -> Scalar {
        match self {
            Self::Currency(s) => Scalar::Text(s),
            Self::Passthrough(v) => v,
        }
    }
}

pub fn format_currency(value: &Scalar) -> Formatted {
    match value {
        Scalar::Int(i) => Formatted::Currency(rupiah(*i as f64)),
        Scalar::Float(f) if f.is_finite() => Formatted::Currency(rupiah(*f)),
        other => Formatted::Passthrough(other.clone()),
    }
}
