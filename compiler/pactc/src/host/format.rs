//! `Sprintf` formatting.
//!
//! Verbs: `%s` and `%v` print a value, `%d` an integer, `%f` and `%.Nf` a
//! fixed-point number, `%q` a quoted string, `%T` the value's type name and
//! `%%` a percent sign. `%[n]v` takes argument `n` (1-based) and the
//! following verbs continue after it. Precision is capped at 1000 digits.

use std::fmt::Write as _;

use pact_value::{RuntimeError, RuntimeErrorKind, RuntimeResult, Value};

const DEFAULT_PRECISION: usize = 6;
const MAX_PRECISION: usize = 1000;

/// Format `args` according to `format`.
pub fn sprintf(format: &str, args: &[Value]) -> RuntimeResult<String> {
    let mut out = String::with_capacity(format.len());
    let mut next = 0;
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        if chars.peek() == Some(&'%') {
            chars.next();
            out.push('%');
            continue;
        }

        if chars.peek() == Some(&'[') {
            chars.next();
            let digits: String = chars.by_ref().take_while(|c| *c != ']').collect();
            let index = digits
                .parse::<usize>()
                .ok()
                .filter(|index| *index > 0)
                .ok_or_else(|| failed(format!("bad argument index %[{digits}]")))?;
            next = index - 1;
        }

        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut digits = String::new();
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            let n = if digits.is_empty() {
                0
            } else {
                digits
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n <= MAX_PRECISION)
                    .ok_or_else(|| failed(format!("precision {digits} out of range")))?
            };
            precision = Some(n);
        }

        let verb = chars
            .next()
            .ok_or_else(|| failed("format ends with %".to_string()))?;
        let arg = args
            .get(next)
            .ok_or_else(|| failed(format!("missing argument for %{verb}")))?;
        next += 1;
        write_verb(&mut out, verb, precision, arg)?;
    }
    Ok(out)
}

fn write_verb(out: &mut String, verb: char, precision: Option<usize>, arg: &Value) -> RuntimeResult<()> {
    // String writes cannot fail
    let _ = match verb {
        's' | 'v' => write!(out, "{arg}"),
        'd' => write!(out, "{}", arg.to_int()?),
        'f' => {
            let precision = precision.unwrap_or(DEFAULT_PRECISION);
            match arg {
                Value::Money(m) => {
                    let digits = u32::try_from(precision).unwrap_or(u32::MAX);
                    write!(out, "{:.precision$}", m.round_dp(digits))
                }
                other => write!(out, "{:.precision$}", other.to_float()?),
            }
        }
        'q' => write!(out, "{:?}", arg.to_key()),
        'T' => out.write_str(arg.type_name()),
        other => return Err(failed(format!("unknown verb %{other}"))),
    };
    Ok(())
}

#[cold]
fn failed(message: String) -> RuntimeError {
    RuntimeError::new(RuntimeErrorKind::HostFailed {
        name: "Sprintf".to_string(),
        message,
    })
}
