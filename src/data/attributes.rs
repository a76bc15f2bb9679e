//! Attribute value conversion.

use netcdf::AttributeValue;
use std::collections::HashMap;
use std::fmt;

/// Render an attribute value as display text.
///
/// Lists are bracketed; string lists are joined with commas.
pub fn attr_value_to_string(attr: &netcdf::Attribute<'_>) -> String {
    let Ok(value) = attr.value() else {
        return format!("{:?}", attr);
    };
    render_value(value)
}

macro_rules! render_arms {
    ($value:expr; scalars: $($scalar:ident),*; lists: $($list:ident),*) => {
        match $value {
            $(AttributeValue::$scalar(v) => v.to_string(),)*
            $(AttributeValue::$list(v) => render_list(&v),)*
            AttributeValue::Str(s) => s,
            AttributeValue::Strs(v) => v.join(", "),
        }
    };
}

fn render_value(value: AttributeValue) -> String {
    render_arms!(value;
        scalars: Uchar, Schar, Ushort, Short, Uint, Int, Ulonglong, Longlong, Float, Double;
        lists: Uchars, Schars, Ushorts, Shorts, Uints, Ints, Ulonglongs, Longlongs, Floats, Doubles)
}

fn render_list<T: fmt::Display>(values: &[T]) -> String {
    let items: Vec<String> = values.iter().map(T::to_string).collect();
    format!("[{}]", items.join(", "))
}

/// Read a scalar numeric attribute as f64.
///
/// Single-element arrays count as scalars; anything else yields `None`.
pub fn attr_value_to_f64(attr: &netcdf::Attribute<'_>) -> Option<f64> {
    let value = attr.value().ok()?;
    let scalar = match value {
        AttributeValue::Uchar(v) => v as f64,
        AttributeValue::Schar(v) => v as f64,
        AttributeValue::Ushort(v) => v as f64,
        AttributeValue::Short(v) => v as f64,
        AttributeValue::Uint(v) => v as f64,
        AttributeValue::Int(v) => v as f64,
        AttributeValue::Ulonglong(v) => v as f64,
        AttributeValue::Longlong(v) => v as f64,
        AttributeValue::Float(v) => v as f64,
        AttributeValue::Double(v) => v,
        AttributeValue::Shorts(v) if v.len() == 1 => v[0] as f64,
        AttributeValue::Ints(v) if v.len() == 1 => v[0] as f64,
        AttributeValue::Floats(v) if v.len() == 1 => v[0] as f64,
        AttributeValue::Doubles(v) if v.len() == 1 => v[0],
        _ => return None,
    };
    Some(scalar)
}

/// Collect all attributes of an attribute iterator into a map of display strings.
pub(crate) fn collect_attributes<'a>(
    attrs: impl Iterator<Item = netcdf::Attribute<'a>>,
) -> HashMap<String, String> {
    attrs
        .map(|attr| (attr.name().to_string(), attr_value_to_string(&attr)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_scalars_lists_and_strings() {
        assert_eq!(render_value(AttributeValue::Short(-32768)), "-32768");
        assert_eq!(render_value(AttributeValue::Float(0.01)), "0.01");
        assert_eq!(render_value(AttributeValue::Ints(vec![1, 2, 3])), "[1, 2, 3]");
        assert_eq!(render_value(AttributeValue::Str("kelvin".into())), "kelvin");
        assert_eq!(
            render_value(AttributeValue::Strs(vec!["a".into(), "b".into()])),
            "a, b"
        );
    }
}
