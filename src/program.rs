//! Program file model and its line-oriented text codec.
//!
//! A program is a list of effect lines followed by three fixed trailer
//! lines. The firmware reads the file verbatim, so serialization must be the
//! exact inverse of parsing for every value parsing can produce.
use crate::names::NameMapping;
use std::fmt;

const FINISH_KEY: &str = "Finish";
const REPEAT_AFTER_FINISH_KEY: &str = "Repeat after finish";
const LOCK_BUTTONS_KEY: &str = "Lock buttons";
const TRAILER_LINES: usize = 3;
const YES: &str = "yes";
const NO: &str = "no";

/// Malformed program text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    #[error("program needs at least 4 lines, got {0}")]
    TooFewLines(usize),
    #[error("expected exactly one '-' separator in line {line:?}")]
    Separator { line: String },
    #[error("missing duration in line {line:?}")]
    MissingDuration { line: String },
    #[error("can't parse line {line:?}, expected key {expected:?}")]
    UnexpectedKey { line: String, expected: &'static str },
    #[error("can't parse line {line:?}, expected 'yes' or 'no', got {value:?}")]
    InvalidBool { line: String, value: String },
    #[error("can't parse effect in line {line:?}")]
    Effect {
        line: String,
        #[source]
        source: Box<FormatError>,
    },
}

/// An image reference the name mapping does not cover.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no normalized name for image {image:?}")]
pub struct MappingError {
    pub image: String,
}

/// One scheduled display entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Effect {
    pub image: String,
    pub duration: String,
    pub others: Vec<String>,
}

impl Effect {
    pub fn parse(line: &str) -> Result<Self, FormatError> {
        let (image, value) = parse_key_value(line)?;
        let mut tokens = value.split_whitespace().map(str::to_string);
        let duration = tokens.next().ok_or_else(|| FormatError::MissingDuration {
            line: line.to_string(),
        })?;
        Ok(Self {
            image: image.to_string(),
            duration,
            others: tokens.collect(),
        })
    }

    fn with_image(&self, image: String) -> Self {
        Self {
            image,
            ..self.clone()
        }
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.image, self.duration)?;
        for token in &self.others {
            write!(f, " {token}")?;
        }
        Ok(())
    }
}

/// The full display schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub effects: Vec<Effect>,
    pub finish_time: String,
    pub repeat_after_finish: bool,
    pub lock_buttons: bool,
}

impl Program {
    pub fn new(effects: Vec<Effect>, finish_time: impl Into<String>) -> Self {
        Self {
            effects,
            finish_time: finish_time.into(),
            repeat_after_finish: false,
            lock_buttons: true,
        }
    }

    /// Image identifiers in playback order, duplicates included.
    pub fn images(&self) -> Vec<String> {
        self.effects.iter().map(|effect| effect.image.clone()).collect()
    }

    /// Parse the full text of a program file.
    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let lines: Vec<&str> = text.lines().collect();
        Self::parse_lines(&lines)
    }

    pub fn parse_lines<S: AsRef<str>>(lines: &[S]) -> Result<Self, FormatError> {
        if lines.len() <= TRAILER_LINES {
            return Err(FormatError::TooFewLines(lines.len()));
        }
        let (effect_lines, trailer) = lines.split_at(lines.len() - TRAILER_LINES);

        let effects = effect_lines
            .iter()
            .map(|line| {
                let line = line.as_ref();
                Effect::parse(line).map_err(|err| FormatError::Effect {
                    line: line.to_string(),
                    source: Box::new(err),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let finish_time = expect_value(trailer[0].as_ref(), FINISH_KEY)?;
        let repeat_after_finish = expect_yes_no(trailer[1].as_ref(), REPEAT_AFTER_FINISH_KEY)?;
        let lock_buttons = expect_yes_no(trailer[2].as_ref(), LOCK_BUTTONS_KEY)?;

        Ok(Self {
            effects,
            finish_time,
            repeat_after_finish,
            lock_buttons,
        })
    }

    /// Return a copy with every effect image replaced through `mapping`.
    pub fn with_mapped_images(&self, mapping: &NameMapping) -> Result<Self, MappingError> {
        let effects = self
            .effects
            .iter()
            .map(|effect| {
                mapping
                    .get(&effect.image)
                    .map(|image| effect.with_image(image.to_string()))
                    .ok_or_else(|| MappingError {
                        image: effect.image.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            effects,
            ..self.clone()
        })
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for effect in &self.effects {
            writeln!(f, "{effect}")?;
        }
        writeln!(f, "{FINISH_KEY} - {}", self.finish_time)?;
        writeln!(
            f,
            "{REPEAT_AFTER_FINISH_KEY} - {}",
            to_yes_no(self.repeat_after_finish)
        )?;
        write!(f, "{LOCK_BUTTONS_KEY} - {}", to_yes_no(self.lock_buttons))
    }
}

fn parse_key_value(line: &str) -> Result<(&str, &str), FormatError> {
    let mut parts = line.split('-');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key.trim(), value.trim())),
        _ => Err(FormatError::Separator {
            line: line.to_string(),
        }),
    }
}

fn expect_value(line: &str, expected: &'static str) -> Result<String, FormatError> {
    let (key, value) = parse_key_value(line)?;
    if key != expected {
        return Err(FormatError::UnexpectedKey {
            line: line.to_string(),
            expected,
        });
    }
    Ok(value.to_string())
}

fn expect_yes_no(line: &str, expected: &'static str) -> Result<bool, FormatError> {
    match expect_value(line, expected)?.as_str() {
        YES => Ok(true),
        NO => Ok(false),
        other => Err(FormatError::InvalidBool {
            line: line.to_string(),
            value: other.to_string(),
        }),
    }
}

fn to_yes_no(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

#[cfg(test)]
#[path = "program_tests.rs"]
mod tests;
