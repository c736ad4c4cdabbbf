use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{AppError, AppResult};
use crate::models::entry::DATE_FORMAT;

/// Line-oriented terminal I/O. Every read re-asks until the answer parses
/// and is in range; end of input surfaces as `AppError::InputClosed`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, text: impl Display) -> AppResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `prompt` and returns the trimmed answer.
    pub fn line(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    pub fn number<T>(&mut self, prompt: &str, min: Option<T>, max: Option<T>) -> AppResult<T>
    where
        T: FromStr + PartialOrd + Display + Copy,
    {
        loop {
            let raw = self.line(prompt)?;
            let Ok(value) = raw.parse::<T>() else {
                self.say("❌ Invalid input. Please enter the correct data type.")?;
                continue;
            };
            if let Some(min) = min {
                if value < min {
                    self.say(format!("❌ Value must be at least {min}."))?;
                    continue;
                }
            }
            if let Some(max) = max {
                if value > max {
                    self.say(format!("❌ Value must be at most {max}."))?;
                    continue;
                }
            }
            return Ok(value);
        }
    }

    /// Sleep hours: a finite, non-negative number.
    pub fn hours(&mut self, prompt: &str) -> AppResult<f64> {
        loop {
            let value = self.number::<f64>(prompt, Some(0.0), None)?;
            if value.is_finite() {
                return Ok(value);
            }
            self.say("❌ Invalid input. Please enter the correct data type.")?;
        }
    }

    /// A `YYYY-MM-DD` date; a blank answer means `default`.
    pub fn date(&mut self, prompt: &str, default: NaiveDate) -> AppResult<NaiveDate> {
        loop {
            let raw = self.line(prompt)?;
            if raw.is_empty() {
                return Ok(default);
            }
            match NaiveDate::parse_from_str(&raw, DATE_FORMAT) {
                Ok(date) => return Ok(date),
                Err(_) => self.say("❌ Please enter a date as YYYY-MM-DD.")?,
            }
        }
    }
}
