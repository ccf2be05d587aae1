//! Color grammar, validated on top of the CSS tokenizer.
//!
//! Accepted forms:
//!
//! | Form | Example |
//! |------|---------|
//! | named | `red`, `RebeccaPurple`, `transparent` |
//! | hex | `#f00`, `#f00a`, `#ff0000`, `#ff0000aa` |
//! | legacy functional | `rgb(255, 0, 0)`, `hsla(240, 46%, 65%, 0.5)` |
//! | modern functional | `rgb(255 0 0 / 50%)`, `hsl(240deg 46% 65%)` |
//!
//! Each channel is range-checked on its own, so `rgb(256 0 0)` is rejected
//! even though it tokenizes fine.

use std::fmt;

use cssparser::{
    match_ignore_ascii_case, parse_color_keyword, parse_hash_color, BasicParseErrorKind,
    Color as CssColor, ParseError, ParseErrorKind, Parser, ParserInput, ToCss, Token,
};

use super::{ColorNotation, ColorValue};
use crate::error::EngineError;

/// Parses and validates a solid color.
///
/// Surrounding whitespace is ignored. The returned value holds the resolved
/// text (see [`ColorValue`]).
///
/// # Errors
///
/// Returns [`EngineError::InvalidColorSyntax`] with the offending text and a
/// reason when the text is not a recognized color.
///
/// # Example
///
/// ```rust
/// use footlights::parse_color;
///
/// let color = parse_color("HSL(240 46% 65%)").unwrap();
/// assert_eq!(color.as_str(), "hsl(240 46% 65%)");
///
/// assert!(parse_color("rgb(300, 0, 0)").is_err());
/// ```
pub fn parse_color(text: &str) -> Result<ColorValue, EngineError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidColorSyntax {
            text: text.to_string(),
            reason: "empty color".to_string(),
        });
    }

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);
    parser
        .parse_entirely(parse_component)
        .map(|(resolved, notation)| ColorValue::new(resolved, notation))
        .map_err(|err| EngineError::InvalidColorSyntax {
            text: text.to_string(),
            reason: describe(err),
        })
}

/// Reasons a tokenized color is rejected.
#[derive(Debug, Clone, PartialEq)]
enum Invalid {
    UnknownName(String),
    Hex(String),
    UnknownFunction(String),
    Arguments {
        function: &'static str,
    },
    Channel {
        function: &'static str,
        channel: &'static str,
        value: String,
        expected: &'static str,
    },
    AngleUnit(String),
}

impl fmt::Display for Invalid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invalid::UnknownName(name) => write!(f, "unknown color name '{}'", name),
            Invalid::Hex(value) => write!(
                f,
                "'#{}' is not a 3, 4, 6 or 8 digit hex color",
                value
            ),
            Invalid::UnknownFunction(name) => {
                write!(f, "unsupported color function '{}()'", name)
            }
            Invalid::Arguments { function } => write!(
                f,
                "{}() expects three channels and an optional alpha, \
                 separated either by commas or by spaces with '/' before alpha",
                function
            ),
            Invalid::Channel {
                function,
                channel,
                value,
                expected,
            } => write!(
                f,
                "{}() {} channel '{}' must be {}",
                function, channel, value, expected
            ),
            Invalid::AngleUnit(unit) => write!(f, "unknown angle unit '{}'", unit),
        }
    }
}

fn describe(err: ParseError<'_, Invalid>) -> String {
    match err.kind {
        ParseErrorKind::Custom(invalid) => invalid.to_string(),
        ParseErrorKind::Basic(BasicParseErrorKind::UnexpectedToken(token)) => {
            format!("unexpected '{}'", token.to_css_string())
        }
        ParseErrorKind::Basic(BasicParseErrorKind::EndOfInput) => {
            "unexpected end of input".to_string()
        }
        ParseErrorKind::Basic(_) => "invalid syntax".to_string(),
    }
}

fn invalid<'i>(input: &Parser<'i, '_>, reason: Invalid) -> ParseError<'i, Invalid> {
    input.new_custom_error(reason)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Rgb,
    Hsl,
}

#[derive(Debug, Clone, Copy)]
struct ColorFunction {
    name: &'static str,
    family: Family,
}

impl ColorFunction {
    fn from_name(name: &str) -> Option<Self> {
        let (name, family) = match_ignore_ascii_case! { name,
            "rgb" => ("rgb", Family::Rgb),
            "rgba" => ("rgba", Family::Rgb),
            "hsl" => ("hsl", Family::Hsl),
            "hsla" => ("hsla", Family::Hsl),
            _ => return None,
        };
        Some(Self { name, family })
    }

    fn notation(self) -> ColorNotation {
        match self.family {
            Family::Rgb => ColorNotation::Rgb,
            Family::Hsl => ColorNotation::Hsl,
        }
    }
}

fn parse_component<'i, 't>(
    input: &mut Parser<'i, 't>,
) -> Result<(String, ColorNotation), ParseError<'i, Invalid>> {
    let token = input.next()?.clone();
    match &token {
        Token::Hash(value) | Token::IDHash(value) => {
            if parse_hash_color::<CssColor>(value.as_bytes()).is_err() {
                return Err(invalid(input, Invalid::Hex(value.to_string())));
            }
            Ok((
                format!("#{}", value.to_ascii_lowercase()),
                ColorNotation::Hex,
            ))
        }
        Token::Ident(name) => {
            let lower = name.to_ascii_lowercase();
            // `currentcolor` depends on the rendering context, not a concrete value.
            if lower != "currentcolor" && parse_color_keyword::<CssColor>(&lower).is_ok() {
                Ok((lower, ColorNotation::Named))
            } else {
                Err(invalid(input, Invalid::UnknownName(name.to_string())))
            }
        }
        Token::Function(name) => {
            let function = match ColorFunction::from_name(name) {
                Some(function) => function,
                None => {
                    return Err(invalid(
                        input,
                        Invalid::UnknownFunction(name.to_ascii_lowercase()),
                    ))
                }
            };
            let body = input.parse_nested_block(|args| parse_arguments(function, args))?;
            Ok((format!("{}({})", function.name, body), function.notation()))
        }
        other => Err(input.new_unexpected_token_error(other.clone())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ArgKind {
    Number(f32),
    /// Percentage on the 0–100 scale.
    Percentage(f32),
    /// Angle converted to degrees.
    Angle(f32),
}

#[derive(Debug, Clone, PartialEq)]
struct Arg {
    kind: ArgKind,
    text: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Item {
    Value(Arg),
    Comma,
    Slash,
}

fn parse_arguments<'i, 't>(
    function: ColorFunction,
    args: &mut Parser<'i, 't>,
) -> Result<String, ParseError<'i, Invalid>> {
    let mut items = Vec::new();
    while !args.is_exhausted() {
        let token = args.next()?.clone();
        let item = match &token {
            Token::Number {
                value, int_value, ..
            } => Item::Value(Arg {
                kind: ArgKind::Number(*value),
                text: match int_value {
                    Some(int) => int.to_string(),
                    None => token.to_css_string(),
                },
            }),
            Token::Percentage {
                unit_value,
                int_value,
                ..
            } => Item::Value(Arg {
                kind: ArgKind::Percentage(unit_value * 100.0),
                text: match int_value {
                    Some(int) => format!("{}%", int),
                    None => token.to_css_string(),
                },
            }),
            Token::Dimension { value, unit, .. } => match angle_to_degrees(*value, unit) {
                Some(degrees) => Item::Value(Arg {
                    kind: ArgKind::Angle(degrees),
                    text: token.to_css_string().to_ascii_lowercase(),
                }),
                None => return Err(invalid(args, Invalid::AngleUnit(unit.to_string()))),
            },
            Token::Comma => Item::Comma,
            Token::Delim('/') => Item::Slash,
            other => return Err(args.new_unexpected_token_error(other.clone())),
        };
        items.push(item);
    }

    let Some((channels, alpha, legacy)) = split_items(&items) else {
        return Err(invalid(
            args,
            Invalid::Arguments {
                function: function.name,
            },
        ));
    };

    if let Err(reason) = validate_channels(function, &channels, alpha) {
        return Err(invalid(args, reason));
    }

    let mut body = channels
        .iter()
        .map(|arg| arg.text.as_str())
        .collect::<Vec<_>>()
        .join(if legacy { ", " } else { " " });
    if let Some(alpha) = alpha {
        body.push_str(if legacy { ", " } else { " / " });
        body.push_str(&alpha.text);
    }
    Ok(body)
}

/// Splits arguments into three channels, an optional alpha, and whether the
/// legacy comma syntax was used. Mixed separators are rejected.
fn split_items(items: &[Item]) -> Option<([&Arg; 3], Option<&Arg>, bool)> {
    use Item::{Comma, Slash, Value};

    match items {
        [Value(a), Comma, Value(b), Comma, Value(c)] => Some(([a, b, c], None, true)),
        [Value(a), Comma, Value(b), Comma, Value(c), Comma, Value(d)] => {
            Some(([a, b, c], Some(d), true))
        }
        [Value(a), Value(b), Value(c)] => Some(([a, b, c], None, false)),
        [Value(a), Value(b), Value(c), Slash, Value(d)] => Some(([a, b, c], Some(d), false)),
        _ => None,
    }
}

fn validate_channels(
    function: ColorFunction,
    channels: &[&Arg; 3],
    alpha: Option<&Arg>,
) -> Result<(), Invalid> {
    let reject = |channel: &'static str, arg: &Arg, expected: &'static str| Invalid::Channel {
        function: function.name,
        channel,
        value: arg.text.clone(),
        expected,
    };

    match function.family {
        Family::Rgb => {
            const EXPECTED: &str = "a number 0-255 or a percentage 0-100%";
            for (channel, arg) in ["red", "green", "blue"].into_iter().zip(channels) {
                let ok = match arg.kind {
                    ArgKind::Number(v) => (0.0..=255.0).contains(&v),
                    ArgKind::Percentage(v) => (0.0..=100.0).contains(&v),
                    ArgKind::Angle(_) => false,
                };
                if !ok {
                    return Err(reject(channel, *arg, EXPECTED));
                }
            }
        }
        Family::Hsl => {
            let hue = channels[0];
            let hue_ok = match hue.kind {
                ArgKind::Number(v) | ArgKind::Angle(v) => v.is_finite(),
                ArgKind::Percentage(_) => false,
            };
            if !hue_ok {
                return Err(reject("hue", hue, "a finite number or angle"));
            }
            for (channel, arg) in ["saturation", "lightness"].into_iter().zip(&channels[1..]) {
                let ok = match arg.kind {
                    ArgKind::Number(v) | ArgKind::Percentage(v) => (0.0..=100.0).contains(&v),
                    ArgKind::Angle(_) => false,
                };
                if !ok {
                    return Err(reject(channel, *arg, "a percentage 0-100%"));
                }
            }
        }
    }

    if let Some(alpha) = alpha {
        let ok = match alpha.kind {
            ArgKind::Number(v) => (0.0..=1.0).contains(&v),
            ArgKind::Percentage(v) => (0.0..=100.0).contains(&v),
            ArgKind::Angle(_) => false,
        };
        if !ok {
            return Err(reject("alpha", alpha, "a number 0-1 or a percentage 0-100%"));
        }
    }

    Ok(())
}

fn angle_to_degrees(value: f32, unit: &str) -> Option<f32> {
    let degrees = match_ignore_ascii_case! { unit,
        "deg" => value,
        "grad" => value * 0.9,
        "rad" => value.to_degrees(),
        "turn" => value * 360.0,
        _ => return None,
    };
    Some(degrees)
}
