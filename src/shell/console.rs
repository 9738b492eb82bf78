use std::{
    fmt::Display,
    io::{BufRead, Write},
};

use thiserror::Error;

use crate::{error::BillingError, prelude::*};

/// The input ended while a prompt was waiting for an answer.
#[derive(Copy, Clone, Debug, Error)]
#[error("end of input")]
pub struct EndOfInput;

/// Line-oriented prompts over arbitrary input and output.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> Result {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Print the prompt and read the trimmed answer.
    pub fn ask(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is not empty.
    pub fn ask_text(&mut self, prompt: &str) -> Result<String> {
        loop {
            let answer = self.ask(prompt)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.say("The value cannot be empty. Please try again.")?;
        }
    }

    /// Ask until the answer is a non-negative number.
    pub fn ask_number<Q: From<f64>>(&mut self, prompt: &str) -> Result<Q> {
        loop {
            match parse_non_negative(&self.ask(prompt)?) {
                Ok(value) => return Ok(Q::from(value)),
                Err(error) => {
                    debug!("{error}");
                    self.say(format_args!("{error}. Please enter a non-negative number."))?;
                }
            }
        }
    }

    pub fn ask_yes(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.ask(prompt)?.eq_ignore_ascii_case("y"))
    }

    /// Show the numbered options and ask until one of them is picked.
    pub fn ask_choice<T: Copy + Display>(&mut self, title: &str, options: &[T]) -> Result<T> {
        loop {
            self.say(format_args!("\n--- {title} ---"))?;
            for (number, option) in (1..).zip(options) {
                self.say(format_args!("{number}. {option}"))?;
            }
            let answer = self.ask("Enter your choice: ")?;
            if let Some(option) =
                answer.parse::<usize>().ok().and_then(|number| options.get(number.wrapping_sub(1)))
            {
                return Ok(*option);
            }
            self.say("Invalid choice. Please try again.")?;
        }
    }
}

fn parse_non_negative(text: &str) -> Result<f64, BillingError> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(value),
        _ => Err(BillingError::InvalidNumericInput(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::quantity::energy::KilowattHours;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_parse_non_negative() {
        assert_eq!(parse_non_negative("1.5"), Ok(1.5));
        assert_eq!(parse_non_negative("0"), Ok(0.0));
        assert!(parse_non_negative("-1").is_err());
        assert!(parse_non_negative("NaN").is_err());
        assert!(parse_non_negative("inf").is_err());
        assert!(parse_non_negative("").is_err());
    }

    #[test]
    fn test_ask_number_reprompts() -> Result {
        let mut console = console("ten\n-3\n\n2.5\n");
        assert_eq!(console.ask_number::<KilowattHours>("kWh: ")?, KilowattHours(2.5));
        let output = String::from_utf8(console.output)?;
        assert_eq!(output.matches("kWh: ").count(), 4);
        assert!(output.contains("invalid numeric input: `ten`"));
        Ok(())
    }

    #[test]
    fn test_ask_text_reprompts() -> Result {
        let mut console = console("\n   \nJane Doe\n");
        assert_eq!(console.ask_text("Name: ")?, "Jane Doe");
        Ok(())
    }

    #[test]
    fn test_ask_choice() -> Result {
        let mut console = console("0\n4\nthree\n2\n");
        assert_eq!(console.ask_choice("Pick", &["a", "b", "c"])?, "b");
        let output = String::from_utf8(console.output)?;
        assert_eq!(output.matches("Invalid choice").count(), 3);
        Ok(())
    }

    #[test]
    fn test_end_of_input() {
        let error = console("").ask_text("Name: ").unwrap_err();
        assert!(error.is::<EndOfInput>());
    }
}
