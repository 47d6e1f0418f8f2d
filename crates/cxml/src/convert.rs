//! Text to value conversions shared by the typed accessors.

use std::str::FromStr;

/// Child content accepted as `true`.
pub const CHILD_TRUE_VALUES: [&str; 3] = ["1", "yes", "True"];

/// Attribute values accepted as `true`. Narrower than [`CHILD_TRUE_VALUES`].
pub const ATTRIBUTE_TRUE_VALUES: [&str; 2] = ["1", "yes"];

pub(crate) fn child_bool(text: &str) -> bool {
    CHILD_TRUE_VALUES.contains(&text)
}

pub(crate) fn attribute_bool(text: &str) -> bool {
    ATTRIBUTE_TRUE_VALUES.contains(&text)
}

/// Convert `text` to a number with `.` as the decimal point, after removing
/// every space.
///
/// Text that does not parse gives `T::default()` rather than an error.
///
/// ```rust
/// use cxml::parse_number;
///
/// assert_eq!(parse_number::<i64>("1 000 000"), 1_000_000);
/// assert_eq!(parse_number::<f64>(" 42.5"), 42.5);
/// assert_eq!(parse_number::<i32>("fred"), 0);
/// ```
pub fn parse_number<T>(text: &str) -> T
where
    T: FromStr + Default,
{
    let parsed: Result<T, _> = if text.contains(' ') {
        text.replace(' ', "").parse()
    } else {
        text.parse()
    };

    match parsed {
        Ok(value) => value,
        Err(_) => {
            tracing::debug!(text, "Non-numeric text, using default value");
            T::default()
        }
    }
}
