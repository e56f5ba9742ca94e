use std::io::{self, BufRead, Write};

use arbor_vfs::FileSystem;

use crate::commands::{self, Reply};
use crate::error::ShellError;
use crate::parser::tokenize;

/// Whether the read loop should keep going after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	Continue,
	Exit,
}

/// Line-oriented session over one in-memory [`FileSystem`].
pub struct Shell {
	fs: FileSystem,
	prompt: bool,
	failures: usize,
}

impl Default for Shell {
	fn default() -> Self {
		Self::new(false)
	}
}

impl Shell {
	pub fn new(prompt: bool) -> Self {
		Self {
			fs: FileSystem::new(),
			prompt,
			failures: 0,
		}
	}

	/// Number of lines that ended in an error so far.
	pub fn failures(&self) -> usize {
		self.failures
	}

	/// `[<cwd name>] $ `; the root has an empty name.
	pub fn prompt(&self) -> String {
		format!("[{}] $ ", self.fs.cwd_name())
	}

	pub fn execute_line(&mut self, line: &str) -> Result<Reply, ShellError> {
		commands::execute(&mut self.fs, &tokenize(line))
	}

	/// Execute one line and write its output. Command failures are reported
	/// and swallowed; only a failure to write `out`/`err` is returned.
	pub fn run_line<W: Write, E: Write>(
		&mut self,
		line: &str,
		out: &mut W,
		err: &mut E,
	) -> io::Result<Flow> {
		match self.execute_line(line) {
			Ok(Reply::Silent) => {}
			Ok(Reply::Lines(lines)) => {
				for l in lines {
					writeln!(out, "{}", l)?;
				}
			}
			Ok(Reply::Exit) => return Ok(Flow::Exit),
			Err(e) => {
				self.failures += 1;
				if e.is_rejection() {
					tracing::debug!(code = e.code(), line = line.trim_end(), "{}", e);
				} else {
					tracing::error!(code = e.code(), line = line.trim_end(), "{}", e);
				}
				if e.is_usage() {
					writeln!(out, "{}", e)?;
				} else {
					writeln!(err, "Error: {}", e)?;
				}
			}
		}
		Ok(Flow::Continue)
	}

	/// Read lines from `input` until EOF or `exit`.
	pub fn run<R: BufRead, W: Write, E: Write>(
		&mut self,
		mut input: R,
		out: &mut W,
		err: &mut E,
	) -> io::Result<()> {
		let mut line = String::new();
		loop {
			if self.prompt {
				write!(out, "{}", self.prompt())?;
				out.flush()?;
			}

			line.clear();
			if input.read_line(&mut line)? == 0 {
				break;
			}
			if self.run_line(&line, out, err)? == Flow::Exit {
				break;
			}
			out.flush()?;
		}
		Ok(())
	}
}
