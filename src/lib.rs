pub mod colors;
pub mod glyphs;
pub(crate) mod input;
pub mod palette;
pub mod squeezer;

pub use input::*;

use std::io::{self, BufReader, Read, Write};

use thiserror::Error;

use crate::colors::ColorScheme;
use crate::glyphs::glyph;
use crate::palette::Palette;
use crate::squeezer::{SqueezeAction, SqueezeFinish, Squeezer, ZeroRun};

pub const DEFAULT_LINE_SIZE: usize = 16;
pub const DEFAULT_GROUP_SIZE: usize = 2;
pub const MAX_LINE_SIZE: usize = 255;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot use raw output without color")]
    RawWithoutColor,
    #[error("bytes per line must be between 1 and {MAX_LINE_SIZE}")]
    LineSizeOutOfRange,
}

/// The three output formats. Picked once at build time from the
/// hex-field/color switches; each implements one line layout.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Rendering {
    /// No offsets, no hex field: the byte stream itself, with graphic
    /// bytes wrapped in their assigned color.
    RawColorized,
    /// Offset, hex field, glyph column, no escape sequences.
    UncoloredHex,
    /// Same layout as [`Rendering::UncoloredHex`] with each byte's hex
    /// pair and glyph painted in its assigned color.
    ColoredHex,
}

/// Scheme used when color output is disabled. Nothing in the uncolored
/// path ever asks for a sequence, so both are empty.
struct NoColor;

impl ColorScheme for NoColor {
    fn foreground(&self, _color: u8) -> &[u8] {
        b""
    }

    fn reset(&self) -> &[u8] {
        b""
    }
}

pub struct PrinterBuilder<'a, Writer: Write> {
    writer: &'a mut Writer,
    scheme: Option<Box<dyn ColorScheme>>,
    show_hex: bool,
    ascii_only: bool,
    use_autoskip: bool,
    line_size: usize,
    group_size: usize,
    skip: u64,
    limit: Option<u64>,
}

impl<'a, Writer: Write> PrinterBuilder<'a, Writer> {
    pub fn new(writer: &'a mut Writer) -> Self {
        PrinterBuilder {
            writer,
            scheme: None,
            show_hex: true,
            ascii_only: false,
            use_autoskip: false,
            line_size: DEFAULT_LINE_SIZE,
            group_size: DEFAULT_GROUP_SIZE,
            skip: 0,
            limit: None,
        }
    }

    /// Enables color output through the given sequence provider; `None`
    /// disables color.
    pub fn color_scheme(mut self, scheme: Option<Box<dyn ColorScheme>>) -> Self {
        self.scheme = scheme;
        self
    }

    /// Disabling the hex field switches to raw colorized output.
    pub fn show_hex(mut self, show_hex: bool) -> Self {
        self.show_hex = show_hex;
        self
    }

    pub fn ascii_only(mut self, ascii_only: bool) -> Self {
        self.ascii_only = ascii_only;
        self
    }

    pub fn enable_autoskip(mut self, enable: bool) -> Self {
        self.use_autoskip = enable;
        self
    }

    /// Bytes per line, between 1 and [`MAX_LINE_SIZE`].
    pub fn line_size(mut self, line_size: usize) -> Self {
        self.line_size = line_size;
        self
    }

    /// Bytes per group in the hex field; 0 means no grouping.
    pub fn group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Number of input bytes to discard before dumping.
    pub fn skip(mut self, skip: u64) -> Self {
        self.skip = skip;
        self
    }

    /// Stop after this many input bytes.
    pub fn limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    pub fn build(self) -> Result<Printer<'a, Writer>, ConfigError> {
        if self.line_size == 0 || self.line_size > MAX_LINE_SIZE {
            return Err(ConfigError::LineSizeOutOfRange);
        }
        let rendering = match (self.show_hex, self.scheme.is_some()) {
            (true, true) => Rendering::ColoredHex,
            (true, false) => Rendering::UncoloredHex,
            (false, true) => Rendering::RawColorized,
            (false, false) => return Err(ConfigError::RawWithoutColor),
        };
        let group_size = if self.group_size == 0 {
            self.line_size
        } else {
            self.group_size
        };
        // One leading space per group widens the field beyond the digits.
        let hex_width = 2 * self.line_size + (self.line_size + group_size - 1) / group_size;
        let autoskip = self.use_autoskip && self.show_hex;
        Ok(Printer {
            writer: self.writer,
            rendering,
            scheme: self.scheme.unwrap_or_else(|| Box::new(NoColor)),
            palette: Palette::new(),
            squeezer: Squeezer::new(autoskip, self.line_size),
            ascii_only: self.ascii_only,
            line_size: self.line_size,
            group_size,
            hex_width,
            skip: self.skip,
            limit: self.limit,
        })
    }
}

pub struct Printer<'a, Writer: Write> {
    writer: &'a mut Writer,
    rendering: Rendering,
    scheme: Box<dyn ColorScheme>,
    palette: Palette,
    squeezer: Squeezer,
    ascii_only: bool,
    line_size: usize,
    group_size: usize,
    hex_width: usize,
    skip: u64,
    limit: Option<u64>,
}

impl<'a, Writer: Write> Printer<'a, Writer> {
    /// Dumps the whole byte stream: discards the start offset, reads
    /// line-sized records under the length limit, and routes them through
    /// the squeezer when autoskip is on.
    pub fn print_all<Reader: Read>(&mut self, reader: Reader) -> io::Result<()> {
        let mut reader = BufReader::new(reader);
        let mut pos: u64 = 0;

        // Input that ends before the start offset produces no output.
        let mut scratch = [0u8; 8192];
        while pos < self.skip {
            let want = (self.skip - pos).min(scratch.len() as u64) as usize;
            let n = reader.read(&mut scratch[..want])?;
            if n == 0 {
                return self.writer.flush();
            }
            pos += n as u64;
        }

        let mut remaining = self.limit.unwrap_or(u64::MAX);
        let mut line = vec![0u8; self.line_size];
        let mut eof = false;
        while !eof && remaining > 0 {
            let want = remaining.min(self.line_size as u64) as usize;
            let mut len = 0;
            while len < want {
                let n = reader.read(&mut line[len..want])?;
                if n == 0 {
                    eof = true;
                    break;
                }
                len += n;
            }
            if len == 0 {
                break;
            }
            remaining -= len as u64;
            let is_zero = line[..len].iter().all(|&b| b == 0);
            match self.squeezer.process(is_zero, pos, len) {
                SqueezeAction::Pass => self.print_line(&line[..len], pos)?,
                SqueezeAction::Hold => {}
                SqueezeAction::FlushThenPass(run) => {
                    self.print_zero_run(&run)?;
                    self.print_line(&line[..len], pos)?;
                }
            }
            pos += len as u64;
        }

        if let SqueezeFinish::Flush {
            run,
            last_pos,
            last_len,
        } = self.squeezer.finish()
        {
            self.print_zero_run(&run)?;
            let zeros = vec![0u8; last_len];
            self.print_line(&zeros, last_pos)?;
        }

        self.writer.flush()
    }

    /// Renders a flushed run of all-zero lines: one line plus the `*`
    /// marker when the run is longer than two lines, each line in place
    /// otherwise.
    fn print_zero_run(&mut self, run: &ZeroRun) -> io::Result<()> {
        if run.count == 0 {
            return Ok(());
        }
        let zeros = vec![0u8; self.line_size];
        if run.count > 2 {
            self.print_line(&zeros, run.first_pos)?;
            self.writer.write_all(b"*\n")
        } else {
            for i in 0..run.count {
                self.print_line(&zeros, run.first_pos + i * self.line_size as u64)?;
            }
            Ok(())
        }
    }

    /// Renders one line record. A call with no bytes is a no-op.
    fn print_line(&mut self, buf: &[u8], pos: u64) -> io::Result<()> {
        if buf.is_empty() {
            return Ok(());
        }
        match self.rendering {
            Rendering::RawColorized => self.print_raw_colorized(buf),
            Rendering::UncoloredHex => self.print_hex_uncolored(buf, pos),
            Rendering::ColoredHex => self.print_hex_colored(buf, pos),
        }
    }

    /// Reconstructs the byte stream, painting each graphic byte in its
    /// assigned color. Non-graphic bytes (controls and space) pass through
    /// unmodified and unwrapped.
    fn print_raw_colorized(&mut self, buf: &[u8]) -> io::Result<()> {
        for &b in buf {
            if !b.is_ascii_graphic() {
                self.writer.write_all(&[b])?;
                continue;
            }
            let color = self.palette.color_for(b);
            self.writer.write_all(self.scheme.foreground(color))?;
            self.write_glyph(b)?;
        }
        self.writer.write_all(self.scheme.reset())
    }

    fn print_hex_uncolored(&mut self, buf: &[u8], pos: u64) -> io::Result<()> {
        write!(self.writer, "{pos:08X}:")?;
        let mut pad = self.hex_width - 2 * buf.len();
        for (i, &b) in buf.iter().enumerate() {
            if i % self.group_size == 0 {
                self.writer.write_all(b" ")?;
                pad -= 1;
            }
            write!(self.writer, "{b:02X}")?;
        }
        write!(self.writer, "{:pad$}", "")?;
        self.writer.write_all(b"  ")?;
        for &b in buf {
            self.write_glyph(b)?;
        }
        self.writer.write_all(b"\n")
    }

    fn print_hex_colored(&mut self, buf: &[u8], pos: u64) -> io::Result<()> {
        self.writer.write_all(self.scheme.reset())?;
        write!(self.writer, "{pos:08X}:")?;
        let mut pad = self.hex_width - 2 * buf.len();
        for (i, &b) in buf.iter().enumerate() {
            if i % self.group_size == 0 {
                self.writer.write_all(b" ")?;
                pad -= 1;
            }
            let color = self.palette.color_for(b);
            self.writer.write_all(self.scheme.foreground(color))?;
            write!(self.writer, "{b:02X}")?;
        }
        self.writer.write_all(self.scheme.reset())?;
        write!(self.writer, "{:pad$}", "")?;
        self.writer.write_all(b"  ")?;
        for &b in buf {
            let color = self.palette.color_for(b);
            self.writer.write_all(self.scheme.foreground(color))?;
            self.write_glyph(b)?;
        }
        self.writer.write_all(self.scheme.reset())?;
        self.writer.write_all(b"\n")
    }

    fn write_glyph(&mut self, b: u8) -> io::Result<()> {
        let mut utf8 = [0u8; 4];
        let g = glyph(b, self.ascii_only);
        self.writer.write_all(g.encode_utf8(&mut utf8).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::colors::AnsiScheme;
    use crate::palette::COLORSET;

    fn render_with<F>(input: &[u8], configure: F) -> String
    where
        F: for<'b> FnOnce(PrinterBuilder<'b, Vec<u8>>) -> PrinterBuilder<'b, Vec<u8>>,
    {
        let mut output = vec![];
        let mut printer = configure(PrinterBuilder::new(&mut output))
            .build()
            .unwrap();
        printer.print_all(io::Cursor::new(input)).unwrap();
        drop(printer);
        String::from_utf8(output).unwrap()
    }

    fn fg(color: u8) -> String {
        format!("\u{1b}[38;5;{color}m")
    }

    const RESET: &str = "\u{1b}[39m";

    fn zero_line(pos: u64) -> String {
        format!(
            "{pos:08X}:{}  {}",
            " 0000".repeat(8),
            "\u{2400}".repeat(16)
        )
    }

    #[test]
    fn uncolored_line_with_default_layout() {
        let out = render_with(b"AAAA", |b| b);
        assert_eq!(out, format!("00000000: 4141 4141{}  AAAA\n", " ".repeat(30)));
    }

    #[test]
    fn glyph_column_is_aligned_for_partial_lines() {
        let out = render_with(b"ABCDEFG", |b| b.line_size(4).group_size(3).ascii_only(true));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "00000000: 414243 44  ABCD");
        assert_eq!(lines[1], "00000004: 454647     EFG");
    }

    #[test]
    fn group_size_zero_means_one_group() {
        let out = render_with(b"AB", |b| b.line_size(4).group_size(0).ascii_only(true));
        assert_eq!(out, "00000000: 4142      AB\n");
    }

    #[test]
    fn hex_width_matches_line_and_group_sizes() {
        for (line_size, group_size) in [(16, 2), (16, 16), (4, 3), (1, 1), (255, 7)] {
            let input = vec![b'x'; line_size];
            let out = render_with(&input, |b| {
                b.line_size(line_size).group_size(group_size).ascii_only(true)
            });
            let hex_width = 2 * line_size + (line_size + group_size - 1) / group_size;
            // offset field + hex field + separator + one glyph per byte
            assert_eq!(out.len(), 9 + hex_width + 2 + line_size + 1);
        }
    }

    #[test]
    fn empty_input_produces_no_output() {
        let out = render_with(b"", |b| b.enable_autoskip(true));
        assert_eq!(out, "");
    }

    #[test]
    fn zero_run_truncated_by_end_of_input_keeps_last_line() {
        // Five full zero lines; all but the first and last are elided.
        let out = render_with(&[0u8; 80], |b| b.enable_autoskip(true));
        assert_eq!(
            out,
            format!("{}\n*\n{}\n", zero_line(0), zero_line(0x40))
        );
    }

    #[test]
    fn two_zero_lines_are_not_collapsed() {
        let out = render_with(&[0u8; 32], |b| b.enable_autoskip(true));
        assert_eq!(out, format!("{}\n{}\n", zero_line(0), zero_line(0x10)));
    }

    #[test]
    fn mid_stream_zero_run_collapses_above_two_lines() {
        let mut input = vec![0u8; 48];
        input.extend_from_slice(&[b'Z'; 16]);
        let out = render_with(&input, |b| b.enable_autoskip(true));
        let data_line = format!("00000030:{}  {}", " 5A5A".repeat(8), "Z".repeat(16));
        assert_eq!(out, format!("{}\n*\n{}\n", zero_line(0), data_line));
    }

    #[test]
    fn mid_stream_run_of_two_is_printed_in_full() {
        let mut input = vec![0u8; 32];
        input.extend_from_slice(&[b'Z'; 16]);
        let out = render_with(&input, |b| b.enable_autoskip(true));
        let data_line = format!("00000020:{}  {}", " 5A5A".repeat(8), "Z".repeat(16));
        assert_eq!(
            out,
            format!("{}\n{}\n{}\n", zero_line(0), zero_line(0x10), data_line)
        );
    }

    #[test]
    fn partial_final_zero_line_is_shown_explicitly() {
        let out = render_with(&[0u8; 88], |b| b.enable_autoskip(true).ascii_only(true));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "*");
        assert_eq!(
            lines[2],
            format!("00000050: 0000 0000 0000 0000{}  ........", " ".repeat(20))
        );
    }

    #[test]
    fn skip_discards_leading_bytes_but_keeps_offsets() {
        let out = render_with(b"0123456789", |b| b.skip(4).ascii_only(true));
        assert_eq!(
            out,
            format!("00000004: 3435 3637 3839{}  456789\n", " ".repeat(25))
        );
    }

    #[test]
    fn skip_past_end_of_input_produces_no_output() {
        let out = render_with(b"0123", |b| b.skip(100));
        assert_eq!(out, "");
    }

    #[test]
    fn limit_stops_the_dump_early() {
        let out = render_with(b"ABCDEF", |b| b.limit(Some(2)));
        assert_eq!(out, format!("00000000: 4142{}  AB\n", " ".repeat(35)));
    }

    #[test]
    fn colored_line_paints_hex_and_glyph_alike() {
        let out = render_with(&[0x00, 0x41], |b| {
            b.line_size(4)
                .group_size(2)
                .ascii_only(true)
                .color_scheme(Some(Box::new(AnsiScheme::new())))
        });
        // 0x00 is pre-assigned the first table color; 0x41 takes the next.
        let c0 = fg(COLORSET[0]);
        let c1 = fg(COLORSET[1]);
        assert_eq!(
            out,
            format!("{RESET}00000000: {c0}00{c1}41{RESET}       {c0}.{c1}A{RESET}\n")
        );
    }

    #[test]
    fn raw_output_passes_nongraphic_bytes_through() {
        let out = render_with(b"A\nB", |b| {
            b.show_hex(false)
                .color_scheme(Some(Box::new(AnsiScheme::new())))
        });
        let c1 = fg(COLORSET[1]);
        let c2 = fg(COLORSET[2]);
        assert_eq!(out, format!("{c1}A\n{c2}B{RESET}"));
    }

    #[test]
    fn colors_stay_stable_across_lines() {
        let out = render_with(b"ABAB\nABAB\n", |b| {
            b.line_size(5)
                .show_hex(false)
                .color_scheme(Some(Box::new(AnsiScheme::new())))
        });
        let c1 = fg(COLORSET[1]);
        let c2 = fg(COLORSET[2]);
        // One reset per line record, and the same colors throughout.
        let record = format!("{c1}A{c2}B{c1}A{c2}B\n{RESET}");
        assert_eq!(out, record.repeat(2));
    }

    #[test]
    fn raw_without_color_is_rejected() {
        let mut output = vec![];
        let result = PrinterBuilder::new(&mut output).show_hex(false).build();
        assert!(matches!(result, Err(ConfigError::RawWithoutColor)));
    }

    #[test]
    fn out_of_range_line_sizes_are_rejected() {
        for line_size in [0, 256, 1000] {
            let mut output = vec![];
            let result = PrinterBuilder::new(&mut output).line_size(line_size).build();
            assert!(matches!(result, Err(ConfigError::LineSizeOutOfRange)));
        }
    }
}
