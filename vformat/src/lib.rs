#![forbid(unsafe_code)]

use std::io::{self, Write};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////

/// Argument for a `%`-conversion. Build a slice of these with [`args!`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Char(char),
    Str(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<char> for Value {
    fn from(v: char) -> Self {
        Self::Char(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

#[macro_export]
macro_rules! args {
    ($($arg:expr),* $(,)?) => {
        [$($crate::Value::from($arg)),*]
    };
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("`%{spec}` has no matching argument (argument {index} missing)")]
    MissingArgument { spec: char, index: usize },
    #[error("argument {index} cannot be formatted with `%{spec}`")]
    Mismatch { spec: char, index: usize },
    #[error("unknown conversion `%{0}`")]
    UnknownSpecifier(char),
    #[error("format string ends inside a conversion")]
    IncompleteSpecifier,
    #[error("{0} arguments left over after the format string was consumed")]
    ExtraArguments(usize),
}

/// Substitutes `%`-conversions in `format` with `args`, one argument per
/// conversion, left to right. Supported conversions: `%d`, `%x`, `%X`, `%c`,
/// `%s`, `%f` (optionally `%.Nf`) and the literal `%%`.
pub fn vformat(format: &str, args: &[Value]) -> Result<String, FormatError> {
    let mut out = String::with_capacity(format.len());
    let mut chars = format.chars().peekable();
    let mut next = 0;

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

        let mut precision = None;
        if chars.peek() == Some(&'.') {
            chars.next();
            let mut p = 0usize;
            while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
                p = p.saturating_mul(10).saturating_add(digit as usize);
                chars.next();
            }
            precision = Some(p);
        }

        let spec = chars.next().ok_or(FormatError::IncompleteSpecifier)?;
        if !matches!(spec, 'd' | 'x' | 'X' | 'c' | 's' | 'f') {
            return Err(FormatError::UnknownSpecifier(spec));
        }

        let value = args
            .get(next)
            .ok_or(FormatError::MissingArgument { spec, index: next })?;
        convert(&mut out, spec, precision, value, next)?;
        next += 1;
    }

    if next < args.len() {
        return Err(FormatError::ExtraArguments(args.len() - next));
    }
    Ok(out)
}

fn convert(
    out: &mut String,
    spec: char,
    precision: Option<usize>,
    value: &Value,
    index: usize,
) -> Result<(), FormatError> {
    match (spec, value) {
        ('d', Value::Int(v)) => out.push_str(&v.to_string()),
        ('x', Value::Int(v)) => out.push_str(&format!("{:x}", v)),
        ('X', Value::Int(v)) => out.push_str(&format!("{:X}", v)),
        ('c', Value::Char(c)) => out.push(*c),
        // `%c` accepts an integer through its scalar value, as printf does.
        ('c', Value::Int(v)) => {
            let c = u32::try_from(*v)
                .ok()
                .and_then(char::from_u32)
                .ok_or(FormatError::Mismatch { spec, index })?;
            out.push(c);
        }
        ('s', Value::Str(s)) => out.push_str(s),
        ('f', Value::Float(v)) => {
            out.push_str(&format!("{:.*}", precision.unwrap_or(6), v));
        }
        _ => return Err(FormatError::Mismatch { spec, index }),
    }
    Ok(())
}

/// Bounded variant: the result is cut to at most `n - 1` characters,
/// snprintf-style, with the last slot reserved for a terminator. `n == 0`
/// yields an empty string.
pub fn vnformat(format: &str, n: usize, args: &[Value]) -> Result<String, FormatError> {
    let mut out = vformat(format, args)?;
    if n == 0 {
        out.clear();
        return Ok(out);
    }
    if let Some((cut, _)) = out.char_indices().nth(n - 1) {
        out.truncate(cut);
    }
    Ok(out)
}

/// `Some` iff formatting succeeded and produced a non-empty string.
pub fn voformat(format: &str, args: &[Value]) -> Option<String> {
    vformat(format, args).ok().filter(|s| !s.is_empty())
}

pub fn vsformat(buf: &mut String, format: &str, args: &[Value]) -> Result<(), FormatError> {
    *buf = vformat(format, args)?;
    Ok(())
}

pub fn vsnformat(
    buf: &mut String,
    format: &str,
    n: usize,
    args: &[Value],
) -> Result<(), FormatError> {
    *buf = vnformat(format, n, args)?;
    Ok(())
}

////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum PrintError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub fn print(format: &str, args: &[Value]) -> Result<(), PrintError> {
    fprint(&mut io::stdout(), format, args)
}

pub fn println(format: &str, args: &[Value]) -> Result<(), PrintError> {
    fprintln(&mut io::stdout(), format, args)
}

/// Formats and writes to `w`. A zero-length result performs no write call.
pub fn fprint<W: Write>(w: &mut W, format: &str, args: &[Value]) -> Result<(), PrintError> {
    let formatted = vformat(format, args)?;
    if !formatted.is_empty() {
        w.write_all(formatted.as_bytes())?;
    }
    Ok(())
}

pub fn fprintln<W: Write>(w: &mut W, format: &str, args: &[Value]) -> Result<(), PrintError> {
    let mut formatted = vformat(format, args)?;
    formatted.push('\n');
    w.write_all(formatted.as_bytes())?;
    Ok(())
}
