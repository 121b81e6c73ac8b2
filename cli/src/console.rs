use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Line-oriented text front end.
pub trait Console {
    /// Reads one line, `None` once input is exhausted.
    fn read_line(&mut self) -> Option<String>;

    /// Displays one line, failures are logged and otherwise ignored.
    fn write_line(&mut self, line: &str);
}

/// Console over any buffered reader and writer.
#[derive(Debug)]
pub struct TextConsole<R, W> {
    input: R,
    output: W,
}

impl TextConsole<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TextConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Console for TextConsole<R, W> {
    fn read_line(&mut self) -> Option<String> {
        let prompt = write!(self.output, "> ").and_then(|()| self.output.flush());
        if let Err(err) = prompt {
            log::warn!("Could not write prompt: {}", err);
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => Some(line),
            Err(err) => {
                log::warn!("Could not read input: {}", err);
                None
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        if let Err(err) = writeln!(self.output, "{line}") {
            log::warn!("Could not write output: {}", err);
        }
    }
}
