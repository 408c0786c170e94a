use std::collections::VecDeque;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// One opened input.
pub enum Input {
    File(fs::File),
    Stdin(io::StdinLock<'static>),
}

impl Read for Input {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match *self {
            Input::File(ref mut file) => file.read(buf),
            Input::Stdin(ref mut stdin) => stdin.read(buf),
        }
    }
}

impl Input {
    /// Opens the named input; `-` means standard input.
    pub fn open(path: &Path) -> io::Result<Input> {
        if path.as_os_str() == "-" {
            Ok(Input::Stdin(io::stdin().lock()))
        } else {
            Ok(Input::File(fs::File::open(path)?))
        }
    }
}

/// Reads a list of named inputs back to back, as one byte stream.
///
/// A source that cannot be opened or read is reported on stderr and
/// skipped; the dump continues with the next source, and the failure is
/// remembered so the process can exit with a failing status once the run
/// completes. The list is walked iteratively, so any number of consecutive
/// failures is fine.
pub struct SourceQueue {
    pending: VecDeque<PathBuf>,
    current: Option<(PathBuf, Input)>,
    errored: bool,
}

impl SourceQueue {
    /// Builds a queue over the given paths. An empty list reads stdin.
    pub fn new(paths: Vec<PathBuf>) -> SourceQueue {
        let mut pending: VecDeque<PathBuf> = paths.into();
        if pending.is_empty() {
            pending.push_back(PathBuf::from("-"));
        }
        SourceQueue {
            pending,
            current: None,
            errored: false,
        }
    }

    /// True if any source failed to open or read.
    pub fn had_errors(&self) -> bool {
        self.errored
    }

    fn report(&mut self, path: &Path, err: &io::Error) {
        let name = if path.as_os_str() == "-" {
            "stdin".into()
        } else {
            path.display().to_string()
        };
        eprintln!("{name}: {err}");
        self.errored = true;
    }
}

impl Read for SourceQueue {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.current.is_none() {
                let Some(path) = self.pending.pop_front() else {
                    return Ok(0);
                };
                match Input::open(&path) {
                    Ok(input) => self.current = Some((path, input)),
                    Err(err) => self.report(&path, &err),
                }
                continue;
            }
            let Some((path, input)) = self.current.as_mut() else {
                continue;
            };
            match input.read(buf) {
                Ok(0) => {
                    self.current = None;
                }
                Ok(n) => return Ok(n),
                Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                Err(err) => {
                    let path = path.clone();
                    self.current = None;
                    self.report(&path, &err);
                }
            }
        }
    }
}
