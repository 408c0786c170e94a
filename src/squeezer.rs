//! Zero-run compression for hex output.
//!
//! Lines consisting entirely of zero bytes are not printed immediately.
//! They are held until a non-zero line (or the end of input) ends the run,
//! at which point the run is flushed: three or more held lines collapse to
//! a single zero line followed by a `*` marker, while one or two are
//! printed individually. A run cut off by the end of input keeps its final
//! line out of the collapse so the true last line of the dump, with its
//! offset and byte count, is always shown explicitly.

#[derive(Debug, PartialEq)]
enum SqueezeState {
    /// Squeezing was not requested; every line passes through.
    Disabled,
    /// No zero lines held.
    Idle,
    /// A run of all-zero lines is being deferred. All held lines are full
    /// except possibly the most recent one, which can only be partial if it
    /// is the final line of the input.
    Holding {
        count: u64,
        first_pos: u64,
        last_len: usize,
    },
}

/// A deferred run of all-zero lines, ready to be flushed.
#[derive(Debug, PartialEq)]
pub struct ZeroRun {
    /// Number of full zero lines in the run. A count above two is rendered
    /// as one zero line plus the `*` marker; otherwise each line is
    /// rendered at its own offset.
    pub count: u64,
    /// Offset of the first line of the run.
    pub first_pos: u64,
}

/// What the driver should do with the line it just read.
#[derive(Debug, PartialEq)]
pub enum SqueezeAction {
    /// Render the line as usual.
    Pass,
    /// The line was all zero and has been deferred.
    Hold,
    /// Flush the given zero run, then render the line.
    FlushThenPass(ZeroRun),
}

/// What remains to be rendered once input is exhausted.
#[derive(Debug, PartialEq)]
pub enum SqueezeFinish {
    /// Nothing held back.
    Done,
    /// Flush the run, then render a zero line of `last_len` bytes at
    /// `last_pos`. The run excludes that final line, so it is never
    /// swallowed by the marker.
    Flush {
        run: ZeroRun,
        last_pos: u64,
        last_len: usize,
    },
}

pub struct Squeezer {
    state: SqueezeState,
    line_size: usize,
}

impl Squeezer {
    pub fn new(enabled: bool, line_size: usize) -> Squeezer {
        Squeezer {
            state: if enabled {
                SqueezeState::Idle
            } else {
                SqueezeState::Disabled
            },
            line_size,
        }
    }

    /// Feeds one line record: whether it was all zero, its starting offset,
    /// and its length in bytes.
    pub fn process(&mut self, is_zero: bool, pos: u64, len: usize) -> SqueezeAction {
        match &mut self.state {
            SqueezeState::Disabled => SqueezeAction::Pass,
            SqueezeState::Idle => {
                if is_zero {
                    self.state = SqueezeState::Holding {
                        count: 1,
                        first_pos: pos,
                        last_len: len,
                    };
                    SqueezeAction::Hold
                } else {
                    SqueezeAction::Pass
                }
            }
            SqueezeState::Holding {
                count,
                first_pos,
                last_len,
            } => {
                if is_zero {
                    *count += 1;
                    *last_len = len;
                    SqueezeAction::Hold
                } else {
                    let run = ZeroRun {
                        count: *count,
                        first_pos: *first_pos,
                    };
                    self.state = SqueezeState::Idle;
                    SqueezeAction::FlushThenPass(run)
                }
            }
        }
    }

    /// Signals the end of input. If a run was still being held, all but its
    /// last line become the flushed run; the last line is reported
    /// separately at its true offset.
    pub fn finish(&mut self) -> SqueezeFinish {
        let state = std::mem::replace(&mut self.state, SqueezeState::Idle);
        match state {
            SqueezeState::Holding {
                count,
                first_pos,
                last_len,
            } => SqueezeFinish::Flush {
                run: ZeroRun {
                    count: count - 1,
                    first_pos,
                },
                last_pos: first_pos + (count - 1) * self.line_size as u64,
                last_len,
            },
            other => {
                self.state = other;
                SqueezeFinish::Done
            }
        }
    }
}
