//! Display-template interpreter for record rendering.
//!
//! A display template is ordinary text with `%`-introduced placeholders,
//! each an optional width/precision/justification specifier followed by a
//! single character from the record type's placeholder table
//! (`%I`, `%-10N`, `%.2P`, ...). [`compile_template`] rewrites such a
//! template into one that uses only the three native conversions (`%d`,
//! `%f`, `%s`), resolving each placeholder against one record instance;
//! [`render_template`] is the native formatter that produces the final
//! string.
//!
//! The interpreter validates only its own placeholder characters. A `%`
//! followed by anything outside the table stops the scan and the remainder
//! is copied through verbatim, leaving the native formatter to reject
//! whatever conversions are left in it. Templates are recompiled on every
//! call; a record's template is typically rendered once.

use crate::core::errors::FormatError;

/// A value resolved from a placeholder, in one of the three primitive
/// kinds the native formatter understands.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatValue {
    Int(i64),
    Float(f64),
    Str(String),
}

impl FormatValue {
    /// The native conversion character for this value's kind
    fn conversion(&self) -> char {
        match self {
            FormatValue::Int(_) => 'd',
            FormatValue::Float(_) => 'f',
            FormatValue::Str(_) => 's',
        }
    }
}

/// A template rewritten into native form, with the resolved values in
/// placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    pub template: String,
    pub values: Vec<FormatValue>,
}

/// Compile a display template against a placeholder table.
///
/// `lookup` is the per-record-type table: it resolves a placeholder
/// character to a value (and thereby to a native kind), or `None` when the
/// character is not a placeholder. Escaped `\n` sequences become real line
/// breaks in the compiled template, after substitution.
pub fn compile_template<F>(template: &str, lookup: F) -> CompiledTemplate
where
    F: Fn(char) -> Option<FormatValue>,
{
    let mut out = String::with_capacity(template.len());
    let mut values = Vec::new();
    let mut rest = template;

    loop {
        let Some(pos) = rest.find('%') else {
            out.push_str(rest);
            break;
        };

        match match_placeholder(&rest[pos + 1..], &lookup) {
            Some((spec, value, after)) => {
                out.push_str(&rest[..pos]);
                out.push('%');
                out.push_str(spec);
                out.push(value.conversion());
                values.push(value);
                rest = after;
            }
            None => {
                // The scan does not recover past an unmatched '%'; the
                // remainder is the native formatter's problem.
                out.push_str(rest);
                break;
            }
        }
    }

    CompiledTemplate {
        template: out.replace("\\n", "\n"),
        values,
    }
}

/// Try to match `[-]?digits*[.]?digits*` plus one table character at the
/// start of `s` (the text just after a `%`). Returns the forwarded width
/// spec, the resolved value, and the remainder after the placeholder.
fn match_placeholder<'a, F>(s: &'a str, lookup: &F) -> Option<(&'a str, FormatValue, &'a str)>
where
    F: Fn(char) -> Option<FormatValue>,
{
    let bytes = s.as_bytes();
    let mut i = 0;

    if bytes.get(i) == Some(&b'-') {
        i += 1;
    }
    while bytes.get(i).is_some_and(|b| b.is_ascii_digit()) {
        i += 1;
    }
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while bytes.get(i).is_some_and(|b| b.is_ascii_digit()) {
            i += 1;
        }
    }

    let tag = s[i..].chars().next()?;
    let value = lookup(tag)?;
    Some((&s[..i], value, &s[i + tag.len_utf8()..]))
}

/// Width/precision/justification parsed from a native conversion
#[derive(Debug, Clone, Copy, Default)]
struct Spec {
    left: bool,
    width: Option<usize>,
    precision: Option<usize>,
}

/// Render a compiled template with its values.
///
/// Supports exactly `%[-][width][.precision]` followed by `d`, `f`, or
/// `s`, plus `%%` for a literal percent. Anything else is a
/// [`FormatError`], as is running out of values.
pub fn render_template(compiled: &CompiledTemplate) -> Result<String, FormatError> {
    let mut out = String::with_capacity(compiled.template.len());
    let mut values = compiled.values.iter();
    let mut rest = compiled.template.as_str();

    loop {
        let Some(pos) = rest.find('%') else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..pos]);
        rest = &rest[pos + 1..];

        if let Some(after) = rest.strip_prefix('%') {
            out.push('%');
            rest = after;
            continue;
        }

        let (spec, after) = split_spec(rest);
        let conversion = after.chars().next().ok_or(FormatError::Truncated)?;
        rest = &after[conversion.len_utf8()..];

        match conversion {
            'd' | 'f' | 's' => {
                let value = values.next().ok_or(FormatError::MissingValue)?;
                out.push_str(&format_value(value, conversion, spec)?);
            }
            other => return Err(FormatError::UnknownConversion(other)),
        }
    }

    Ok(out)
}

/// Split the `[-][width][.precision]` prefix off a conversion body
fn split_spec(s: &str) -> (Spec, &str) {
    let bytes = s.as_bytes();
    let mut i = 0;
    let mut spec = Spec::default();

    if bytes.get(i) == Some(&b'-') {
        spec.left = true;
        i += 1;
    }

    let start = i;
    while bytes.get(i).is_some_and(|b| b.is_ascii_digit()) {
        i += 1;
    }
    if i > start {
        spec.width = s[start..i].parse().ok();
    }

    if bytes.get(i) == Some(&b'.') {
        i += 1;
        let start = i;
        while bytes.get(i).is_some_and(|b| b.is_ascii_digit()) {
            i += 1;
        }
        // A bare '.' means precision zero, like printf
        spec.precision = Some(s[start..i].parse().unwrap_or(0));
    }

    (spec, &s[i..])
}

fn format_value(value: &FormatValue, conversion: char, spec: Spec) -> Result<String, FormatError> {
    let body = match (conversion, value) {
        ('d', FormatValue::Int(v)) => format_int(*v, spec),
        ('f', FormatValue::Float(v)) => format!("{:.*}", spec.precision.unwrap_or(6), v),
        ('s', FormatValue::Str(v)) => match spec.precision {
            Some(p) => v.chars().take(p).collect(),
            None => v.clone(),
        },
        _ => return Err(FormatError::Mismatch { conversion }),
    };
    Ok(pad(body, spec))
}

/// Integer precision zero-pads the magnitude to that many digits
fn format_int(v: i64, spec: Spec) -> String {
    let magnitude = v.unsigned_abs().to_string();
    let magnitude = match spec.precision {
        Some(p) if magnitude.len() < p => format!("{}{}", "0".repeat(p - magnitude.len()), magnitude),
        _ => magnitude,
    };
    if v < 0 {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

fn pad(body: String, spec: Spec) -> String {
    let Some(width) = spec.width else {
        return body;
    };
    let len = body.chars().count();
    if len >= width {
        return body;
    }
    let padding = " ".repeat(width - len);
    if spec.left {
        format!("{body}{padding}")
    } else {
        format!("{padding}{body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(code: char) -> Option<FormatValue> {
        match code {
            'I' => Some(FormatValue::Int(10)),
            'P' => Some(FormatValue::Float(20.99)),
            'N' => Some(FormatValue::Str("Fontodi".to_string())),
            'T' => Some(FormatValue::Str("red".to_string())),
            _ => None,
        }
    }

    fn render(template: &str) -> Result<String, FormatError> {
        render_template(&compile_template(template, lookup))
    }

    #[test]
    fn test_literal_text_passes_through() {
        assert_eq!(render("no placeholders here").unwrap(), "no placeholders here");
    }

    #[test]
    fn test_simple_substitution() {
        assert_eq!(render("%I => %N").unwrap(), "10 => Fontodi");
    }

    #[test]
    fn test_integer_width_justification_and_precision() {
        assert_eq!(render("%4I:%-4I:%.4I").unwrap(), "  10:10  :0010");
    }

    #[test]
    fn test_float_width_and_precision() {
        assert_eq!(render("%4I:%-8.3P:%8.1P").unwrap(), "  10:20.990  :    21.0");
    }

    #[test]
    fn test_float_defaults_and_rounding() {
        assert_eq!(render("%P").unwrap(), "20.990000");
        assert_eq!(render("%.0P").unwrap(), "21");
    }

    #[test]
    fn test_string_precision_truncates() {
        assert_eq!(render("%.3N").unwrap(), "Fon");
        assert_eq!(render("%-9.3N|").unwrap(), "Fon      |");
    }

    #[test]
    fn test_escaped_newlines_become_line_breaks() {
        assert_eq!(render("%I\\n%N").unwrap(), "10\nFontodi");
    }

    #[test]
    fn test_unmatched_placeholder_stops_the_scan() {
        let compiled = compile_template("ok %X then %I", lookup);
        assert_eq!(compiled.template, "ok %X then %I");
        assert!(compiled.values.is_empty());
        assert_eq!(
            render_template(&compiled),
            Err(FormatError::UnknownConversion('X'))
        );
    }

    #[test]
    fn test_passed_through_native_conversion_has_no_value() {
        // 'd' is not in the table, so the remainder passes through and the
        // native formatter finds a %d with nothing left to consume.
        assert_eq!(render("xxx %d %T %T"), Err(FormatError::MissingValue));
    }

    #[test]
    fn test_double_percent_renders_one() {
        assert_eq!(render("100%% sure").unwrap(), "100% sure");
    }

    #[test]
    fn test_dangling_percent() {
        assert_eq!(render("oops %"), Err(FormatError::Truncated));
    }

    #[test]
    fn test_width_spec_is_forwarded_unchanged() {
        let compiled = compile_template("%-8.3P", lookup);
        assert_eq!(compiled.template, "%-8.3f");
        assert_eq!(compiled.values, vec![FormatValue::Float(20.99)]);
    }

    #[test]
    fn test_template_is_recompiled_not_mutated() {
        let template = "%I => %N";
        assert_eq!(render(template).unwrap(), "10 => Fontodi");
        assert_eq!(template, "%I => %N");
    }
}
