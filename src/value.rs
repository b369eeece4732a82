//! Runtime values.
//!
//! Four host-managed kinds, compared structurally. `Display` is the
//! user-facing `print` rendering: integer-valued numbers drop the
//! fractional part (`3`, not `3.0`), strings print verbatim without
//! quotes.

/// A runtime value produced by evaluating an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => {
                // `i64` covers every integral f64 the scanner can produce;
                // the range guard keeps division results like 1/0 on the
                // plain float path (`inf`, `NaN`).
                if n.fract() == 0.0 && n.abs() < 9.0e18 {
                    let mut buf: itoa::Buffer = itoa::Buffer::new();
                    f.write_str(buf.format(*n as i64))
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => f.write_str(s),
        }
    }
}
