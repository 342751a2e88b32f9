//! Runtime values for the Pact VM.
//!
//! [`Value`] is a closed tagged union; every operator and conversion
//! matches on it exhaustively. Arrays and maps have value semantics: an
//! assignment copies, and writes through an index path modify only the
//! variable that was written.
//!
//! - Numbers: `int` (checked 64-bit), `float`, and `money` (exact decimal)
//! - `nil` is the value of anything never assigned
//! - Strings used in numeric context are parsed as numbers

mod access;
mod convert;
mod errors;
mod json;
mod number;
mod value;

pub use access::MAX_ARRAY_LEN;
pub use errors::{
    conversion_error, division_by_zero, integer_overflow, invalid_index, invalid_operands,
    modulo_by_zero, RuntimeError, RuntimeErrorKind, RuntimeResult, MAX_ERROR_LEN,
};
pub use number::{parse_number, Number, NumberPair};
pub use rust_decimal::Decimal;
pub use value::{Value, ValueMap};
