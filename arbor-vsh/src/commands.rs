// ---------------------------------------------------------------------------
// Command table and handlers
// ---------------------------------------------------------------------------
//
// A command line is looked up by name, its argument count checked, and then
// handed to one handler that talks to the FileSystem. Handlers never print;
// they return a Reply for the shell to write.
// ---------------------------------------------------------------------------

use std::path::Path;

use arbor_vfs::{FileSystem, FsError};

use crate::error::ShellError;

const RECURSIVE_FLAG: &str = "-r";
const REDIRECT: &str = ">";
const REDIRECT_APPEND: &str = ">>";
const NOT_FOUND: &str = "Pattern not found";

/// What a successful command asks the shell to do next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
	Silent,
	Lines(Vec<String>),
	Exit,
}

impl Reply {
	fn line(text: impl Into<String>) -> Self {
		Self::Lines(vec![text.into()])
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
	Pwd,
	Cd,
	Ls,
	Mkdir,
	Rmdir,
	Rm,
	Touch,
	Echo,
	Cat,
	Cp,
	Mv,
	Grep,
	ToJson,
	Help,
	Exit,
}

impl Command {
	pub const ALL: [Command; 15] = [
		Self::Pwd,
		Self::Cd,
		Self::Ls,
		Self::Mkdir,
		Self::Rmdir,
		Self::Rm,
		Self::Touch,
		Self::Echo,
		Self::Cat,
		Self::Cp,
		Self::Mv,
		Self::Grep,
		Self::ToJson,
		Self::Help,
		Self::Exit,
	];

	pub fn lookup(name: &str) -> Option<Self> {
		let cmd = match name {
			"pwd" => Self::Pwd,
			"cd" => Self::Cd,
			"ls" => Self::Ls,
			"mkdir" => Self::Mkdir,
			"rmdir" => Self::Rmdir,
			"rm" => Self::Rm,
			"touch" => Self::Touch,
			"echo" => Self::Echo,
			"cat" => Self::Cat,
			"cp" => Self::Cp,
			"mv" => Self::Mv,
			"grep" => Self::Grep,
			"toJson" => Self::ToJson,
			"help" => Self::Help,
			"exit" | "quit" => Self::Exit,
			_ => return None,
		};
		Some(cmd)
	}

	pub fn usage(self) -> &'static str {
		match self {
			Self::Pwd => "pwd",
			Self::Cd => "cd <path>",
			Self::Ls => "ls [path]",
			Self::Mkdir => "mkdir <name>",
			Self::Rmdir => "rmdir [-r] <name>",
			Self::Rm => "rm <name>",
			Self::Touch => "touch <name>...",
			Self::Echo => "echo <text>... [> | >> <file>]",
			Self::Cat => "cat <name>",
			Self::Cp => "cp [-r] <src> <dst>",
			Self::Mv => "mv [-r] <src> <dst>",
			Self::Grep => "grep [-r] <path> <pattern>",
			Self::ToJson => "toJson <path> > <host-file>",
			Self::Help => "help",
			Self::Exit => "exit | quit",
		}
	}

	/// Argument count (and shape, for `toJson`) check run before execution.
	pub fn accepts(self, args: &[String]) -> bool {
		let n = args.len();
		match self {
			Self::Pwd | Self::Help | Self::Exit => n == 0,
			Self::Cd | Self::Mkdir | Self::Rm | Self::Cat => n == 1,
			Self::Ls => n <= 1,
			Self::Rmdir => (1..=2).contains(&n),
			Self::Touch | Self::Echo => n >= 1,
			Self::Cp | Self::Mv | Self::Grep => n == 2 || n == 3,
			Self::ToJson => n == 3 && args[1] == REDIRECT,
		}
	}
}

// ── Dispatch ──────────────────────────────────────────────────────────────

/// Run one tokenized command line. The first token names the command.
pub fn execute(fs: &mut FileSystem, tokens: &[String]) -> Result<Reply, ShellError> {
	let Some((name, args)) = tokens.split_first() else {
		return Ok(Reply::Silent);
	};
	let command =
		Command::lookup(name).ok_or_else(|| ShellError::UnknownCommand(name.clone()))?;
	if !command.accepts(args) {
		return Err(ShellError::InvalidArguments(name.clone()));
	}
	tracing::debug!(command = name.as_str(), args = args.len(), "dispatch");

	match command {
		// -- Navigation ------------------------------------------------
		Command::Pwd => Ok(Reply::line(fs.pwd()?)),
		Command::Cd => handle_cd(fs, args),
		Command::Ls => handle_ls(fs, args),

		// -- Entries in the working directory --------------------------
		Command::Mkdir => handle_mkdir(fs, args),
		Command::Rmdir => handle_rmdir(fs, args),
		Command::Rm => handle_rm(fs, args),
		Command::Touch => handle_touch(fs, args),
		Command::Echo => handle_echo(fs, args),
		Command::Cat => handle_cat(fs, args),

		// -- Copy / move / search --------------------------------------
		Command::Cp => handle_cp(fs, args),
		Command::Mv => handle_mv(fs, args),
		Command::Grep => handle_grep(fs, args),

		// -- Export ----------------------------------------------------
		Command::ToJson => handle_to_json(fs, args),

		// -- Session ---------------------------------------------------
		Command::Help => Ok(help()),
		Command::Exit => Ok(Reply::Exit),
	}
}

// ── Handlers ──────────────────────────────────────────────────────────────

fn handle_cd(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	fs.cd(&args[0])?;
	Ok(Reply::Silent)
}

fn handle_ls(fs: &FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let path = args.first().map(String::as_str).unwrap_or("");
	let mut names = fs.ls(path)?;
	names.sort();
	Ok(Reply::line(names.join(" ")))
}

fn handle_mkdir(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	fs.mkdir(&args[0])?;
	Ok(Reply::Silent)
}

/// `rmdir name`, `rmdir name -r` or `rmdir -r name`.
fn handle_rmdir(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let (name, recursive) = match args {
		[name] => (name, false),
		[name, flag] if flag == RECURSIVE_FLAG => (name, true),
		[flag, name] if flag == RECURSIVE_FLAG => (name, true),
		[_, option] => return Err(FsError::InvalidOption(option.clone()).into()),
		_ => return Err(ShellError::InvalidArguments("rmdir".to_string())),
	};
	fs.rmdir(name, recursive)?;
	Ok(Reply::Silent)
}

fn handle_rm(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	fs.rm(&args[0])?;
	Ok(Reply::Silent)
}

/// Names are touched in order; the first failure stops the rest.
fn handle_touch(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	for name in args {
		fs.touch(name)?;
	}
	Ok(Reply::Silent)
}

fn handle_echo(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let redirect = args
		.iter()
		.position(|a| a == REDIRECT || a == REDIRECT_APPEND);

	let Some(at) = redirect else {
		return Ok(Reply::line(args.join(" ")));
	};

	let message = args[..at].join(" ");
	let append = args[at] == REDIRECT_APPEND;
	let file = args.get(at + 1).ok_or_else(|| {
		FsError::InvalidOperation("No file specified for redirection".to_string())
	})?;
	fs.write_file(file, &message, append)?;
	Ok(Reply::Silent)
}

fn handle_cat(fs: &FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let content = fs.read_file(&args[0])?;
	Ok(Reply::Lines(content.lines().map(str::to_string).collect()))
}

/// Split `[-r] a b` / `a b -r` / `a b`. Three arguments with no flag at
/// either end are rejected with `misuse`.
fn split_recursive<'a>(
	args: &'a [String],
	misuse: &str,
) -> Result<(&'a str, &'a str, bool), ShellError> {
	match args {
		[a, b] => Ok((a.as_str(), b.as_str(), false)),
		[flag, a, b] if flag == RECURSIVE_FLAG => Ok((a.as_str(), b.as_str(), true)),
		[a, b, flag] if flag == RECURSIVE_FLAG => Ok((a.as_str(), b.as_str(), true)),
		_ => Err(FsError::InvalidOperation(misuse.to_string()).into()),
	}
}

fn handle_cp(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let (src, dst, recursive) = split_recursive(args, "Invalid command for copy operation")?;
	fs.cp(src, dst, recursive)?;
	Ok(Reply::Silent)
}

fn handle_mv(fs: &mut FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let (src, dst, recursive) = split_recursive(args, "Invalid command for move operation")?;
	fs.mv(src, dst, recursive)?;
	Ok(Reply::Silent)
}

fn handle_grep(fs: &FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let (path, pattern, recursive) =
		split_recursive(args, "Invalid operation for grep command")?;
	match fs.grep(path, pattern, recursive)? {
		Some(matches) => Ok(Reply::Lines(matches)),
		None => Ok(Reply::line(NOT_FOUND)),
	}
}

/// `toJson <path> > <host-file>`: the only command that touches the host.
fn handle_to_json(fs: &FileSystem, args: &[String]) -> Result<Reply, ShellError> {
	let document = fs.export_json(&args[0])?;
	let target = Path::new(&args[2]);
	std::fs::write(target, document)?;
	tracing::info!(path = args[0].as_str(), target = %target.display(), "exported tree");
	Ok(Reply::Silent)
}

fn help() -> Reply {
	let width = Command::ALL
		.iter()
		.map(|c| c.usage().len())
		.max()
		.unwrap_or(0);
	let mut lines = vec!["Commands:".to_string()];
	lines.extend(
		Command::ALL
			.iter()
			.map(|c| format!("  {:<width$}  {}", c.usage(), describe(*c), width = width)),
	);
	Reply::Lines(lines)
}

fn describe(command: Command) -> &'static str {
	match command {
		Command::Pwd => "print the working directory",
		Command::Cd => "change the working directory",
		Command::Ls => "list a directory",
		Command::Mkdir => "create a directory here",
		Command::Rmdir => "remove a directory here",
		Command::Rm => "remove a file here",
		Command::Touch => "create empty files here",
		Command::Echo => "print text, or write/append it to a file",
		Command::Cat => "print a file",
		Command::Cp => "copy a file, or a directory with -r",
		Command::Mv => "move a file, or a directory with -r",
		Command::Grep => "list files containing a pattern",
		Command::ToJson => "export a directory as JSON to a host file",
		Command::Help => "show this list",
		Command::Exit => "leave the shell",
	}
}
