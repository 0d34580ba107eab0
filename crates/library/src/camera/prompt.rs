use picport_naming::Camera;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

/// Asks the operator which camera took a file.
///
/// Returns the raw answer; validation is the [`CameraResolver`](super::CameraResolver)'s job.
pub trait Prompt {
    fn ask(&mut self, filename: &str) -> io::Result<String>;
}
impl<P: Prompt + ?Sized> Prompt for &mut P {
    fn ask(&mut self, filename: &str) -> io::Result<String> {
        (**self).ask(filename)
    }
}

/// Line-based prompt over any reader/writer pair, usually stdin/stdout.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}
impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}
impl Terminal<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}
impl<R: BufRead, W: Write> Prompt for Terminal<R, W> {
    /// Lists the known cameras and reads one line. Surrounding whitespace is
    /// trimmed; end of input is an [`UnexpectedEof`](io::ErrorKind::UnexpectedEof) error.
    fn ask(&mut self, filename: &str) -> io::Result<String> {
        writeln!(self.output, "Cannot tell which camera took {filename}.")?;
        writeln!(self.output, "Known cameras:")?;
        for camera in Camera::ALL {
            writeln!(self.output, " {camera} = {}", camera.description())?;
        }
        writeln!(self.output, "Only these camera identifiers are valid.")?;
        write!(self.output, "Please enter camera identifier: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no more operator input"));
        }
        Ok(line.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_one_trimmed_line_per_question() {
        let mut output = Vec::new();
        let mut terminal = Terminal::new(Cursor::new("  f0 \nd0\n"), &mut output);
        assert_eq!(terminal.ask("DSC_0001.JPG").unwrap(), "f0");
        assert_eq!(terminal.ask("DSC_0002.JPG").unwrap(), "d0");
        let err = terminal.ask("DSC_0003.JPG").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);

        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("Cannot tell which camera took DSC_0001.JPG."));
        assert!(shown.contains(" d0 = Nikon D90\n"));
        assert!(shown.contains(" u0 = unknown\n"));
        assert!(shown.ends_with("Please enter camera identifier: "));
    }
}
