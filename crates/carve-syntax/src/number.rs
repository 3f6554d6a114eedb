/// Parsed value of a numeric literal.
///
/// Integers are 32-bit unless they overflow, fractional literals are single
/// precision unless they overflow.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
}

impl Number {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(value.into()),
            Self::Long(value) => Some(value),
            Self::Float(_) | Self::Double(_) => None,
        }
    }
}
