use super::{LineSource, SerialError};
use std::collections::VecDeque;
use std::io;

/// Line source driven by a script, for exercising the poll loop without a board.
#[derive(Default)]
pub struct FakeLineSource {
    script: VecDeque<Result<String, SerialError>>,
    reads: usize,
}

impl FakeLineSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: lines.into_iter().map(|line| Ok(line.into())).collect(),
            reads: 0,
        }
    }

    /// Queue a read failure, as if the device went away.
    pub fn push_failure(&mut self, message: &str) {
        self.script.push_back(Err(SerialError::Io(io::Error::new(
            io::ErrorKind::BrokenPipe,
            message.to_string(),
        ))));
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    pub fn reads(&self) -> usize {
        self.reads
    }
}

impl LineSource for FakeLineSource {
    fn line_available(&mut self) -> Result<bool, SerialError> {
        Ok(!self.script.is_empty())
    }

    fn read_line(&mut self) -> Result<Option<String>, SerialError> {
        self.reads += 1;
        match self.script.pop_front() {
            Some(Ok(line)) => Ok(Some(line.trim().to_string())),
            Some(Err(err)) => Err(err),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fake_source_plays_script_in_order() {
        let mut fake = FakeLineSource::new(["first\n", "  second  "]);
        fake.push_failure("boom");

        assert!(fake.line_available().unwrap());
        assert_eq!(fake.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(fake.read_line().unwrap().as_deref(), Some("second"));
        assert!(fake.read_line().is_err());
        assert!(!fake.line_available().unwrap());
        assert_eq!(fake.read_line().unwrap(), None);
        assert_eq!(fake.reads(), 4);
    }
}
