use std::fmt::Display;
use std::io::{self, BufRead, Write};

use colored::Colorize;
use tracing::{debug, info};

use crate::cli::command::Command;
use crate::cli::demo;
use crate::filesystem::{DirectoryEntry, FileSystemManager, FsError};

const HELP: &str = "\
File System Emulator - Help

MODE SWITCHING:
  mode <single|two-level|hierarchical>  Switch directory structure mode

FILE OPERATIONS:
  create <filename> [size]             Create a new file
  mkdir <dirname>                      Create a new directory
  delete <name> [--recursive]          Delete file or directory
  rm <name> [--recursive]              Alias for delete
  rename <old> <new>                   Rename a file or folder
  info <name>                          Show file/folder details

NAVIGATION (Two-Level & Hierarchical only):
  cd <path>                            Change directory
  pwd                                  Print working directory

VIEWING:
  ls / list                            List directory contents
  tree                                 Show ASCII tree structure
  search <query>                       Search for files/directories

SYSTEM:
  reset                                Reset file system
  logs                                 Show operation logs
  demo                                 Run demonstration script
  help / ?                             Show this help
  exit / quit                          Exit the emulator

EXAMPLES:
  mode hierarchical
  mkdir home
  cd home
  create file.txt
  tree
  search \"*.txt\"";

/// Whether the read loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Line-oriented front end translating typed commands into calls on a
/// [`FileSystemManager`] and printing what comes back.
pub struct Shell<W: Write> {
    fs: FileSystemManager,
    out: W,
    color: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(fs: FileSystemManager, out: W, color: bool) -> Self {
        Self { fs, out, color }
    }

    pub fn prompt(&self) -> String {
        let mode = self.fs.mode().to_string().to_uppercase();
        let path = self.fs.current_path();
        if self.color {
            format!("[{}] {}$ ", mode.cyan(), path.bold())
        } else {
            format!("[{mode}] {path}$ ")
        }
    }

    /// Reads commands from `input` until `exit` or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> io::Result<()> {
        writeln!(self.out, "{}", "=".repeat(60))?;
        writeln!(self.out, "  File System Emulator")?;
        writeln!(self.out, "  Demonstrating OS Directory Structures")?;
        writeln!(self.out, "{}", "=".repeat(60))?;
        writeln!(
            self.out,
            "\nType 'help' for commands or 'demo' to see a demonstration\n"
        )?;

        let mut line = String::new();
        loop {
            write!(self.out, "{}", self.prompt())?;
            self.out.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input reached");
                writeln!(self.out)?;
                break;
            }
            if self.execute(&line)? == Flow::Exit {
                break;
            }
        }

        writeln!(self.out, "\nGoodbye!")?;
        info!("Session ended");
        Ok(())
    }

    pub fn execute(&mut self, line: &str) -> io::Result<Flow> {
        let command = match Command::try_from(line) {
            Ok(command) => command,
            Err(e) => {
                self.error(e)?;
                return Ok(Flow::Continue);
            }
        };
        debug!("Executing {:?}", command);

        match command {
            Command::Empty => {}
            Command::Exit => return Ok(Flow::Exit),
            Command::Help => writeln!(self.out, "{HELP}")?,
            Command::Mode(mode) => {
                let result = self.fs.set_mode(&mode);
                self.report(result)?;
            }
            Command::Reset => {
                self.fs.reset();
                self.success("File system reset to initial state")?;
            }
            Command::Create { name, size } => {
                let result = self.fs.create_file(&name, size);
                self.report(result)?;
            }
            Command::Mkdir(name) => {
                let result = self.fs.create_directory(&name);
                self.report(result)?;
            }
            Command::Delete { name, recursive } => match self.fs.delete(&name, recursive) {
                Ok(message) => self.success(message)?,
                Err(e @ FsError::NotEmpty { .. }) => {
                    self.error(format!("{e}. Use 'delete {name} --recursive'"))?
                }
                Err(e) => self.error(e)?,
            },
            Command::Rename { from, to } => {
                let result = self.fs.rename(&from, &to);
                self.report(result)?;
            }
            Command::Info(name) => match self.fs.get_info(&name) {
                Ok(info) => {
                    for (label, value) in info.fields() {
                        writeln!(self.out, "{label:<12}: {value}")?;
                    }
                }
                Err(e) => self.error(e)?,
            },
            Command::Cd(path) => {
                if let Err(e) = self.fs.change_directory(&path) {
                    self.error(e)?;
                }
            }
            Command::Pwd => writeln!(self.out, "{}", self.fs.current_path())?,
            Command::List => self.list()?,
            Command::Tree => self.tree()?,
            Command::Search(query) => self.search(&query)?,
            Command::Logs => self.logs()?,
            Command::Demo => demo::run_demo(&mut self.out)?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> io::Result<()> {
        let contents = self.fs.list_contents();
        if contents.is_empty() {
            return writeln!(self.out, "(empty directory)");
        }
        let rows = contents
            .iter()
            .map(|entry: &DirectoryEntry| {
                vec![
                    entry.name.clone(),
                    entry.kind.to_string(),
                    entry.size.clone(),
                    entry.created.clone(),
                ]
            })
            .collect::<Vec<_>>();
        write_table(&mut self.out, &["Name", "Type", "Size", "Created"], &rows)
    }

    fn search(&mut self, query: &str) -> io::Result<()> {
        let results = self.fs.search(query);
        if results.is_empty() {
            return writeln!(self.out, "No results found for '{query}'");
        }
        writeln!(self.out, "Found {} result(s) for '{query}':", results.len())?;
        for found in results {
            writeln!(self.out, "  {} ({}, {})", found.path, found.kind, found.size)?;
        }
        Ok(())
    }

    /// The whole filesystem from the root, or the cursor's subtree headed by
    /// its path once the cursor has moved.
    fn tree(&mut self) -> io::Result<()> {
        if self.fs.at_root() {
            return writeln!(self.out, "{}", self.fs.get_full_tree());
        }
        writeln!(self.out, "{}/", self.fs.current_path())?;
        let body = self.fs.get_tree();
        if !body.is_empty() {
            writeln!(self.out, "{body}")?;
        }
        Ok(())
    }

    fn logs(&mut self) -> io::Result<()> {
        let entries = self.fs.get_logs();
        if entries.is_empty() {
            return writeln!(self.out, "No operations logged yet");
        }
        writeln!(self.out, "Operation Logs:")?;
        for entry in entries {
            writeln!(self.out, "  {entry}")?;
        }
        Ok(())
    }

    fn report(&mut self, result: Result<String, FsError>) -> io::Result<()> {
        match result {
            Ok(message) => self.success(message),
            Err(e) => self.error(e),
        }
    }

    fn success(&mut self, message: impl Display) -> io::Result<()> {
        if self.color {
            writeln!(self.out, "{}", message.to_string().green())
        } else {
            writeln!(self.out, "{message}")
        }
    }

    fn error(&mut self, message: impl Display) -> io::Result<()> {
        let line = format!("ERROR: {message}");
        if self.color {
            writeln!(self.out, "{}", line.red().bold())
        } else {
            writeln!(self.out, "{line}")
        }
    }
}

/// Left-aligned columns, each two characters wider than its longest cell.
fn write_table(out: &mut impl Write, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    let widths = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or_default()
                + 2
        })
        .collect::<Vec<_>>();

    let header = pad_cells(headers.iter().copied(), &widths);
    writeln!(out, "{}", header.trim_end())?;
    writeln!(out, "{}", "-".repeat(header.chars().count()))?;
    for row in rows {
        let line = pad_cells(row.iter().map(String::as_str), &widths);
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn pad_cells<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filesystem::Mode;

    fn shell(mode: Mode) -> Shell<Vec<u8>> {
        Shell::new(FileSystemManager::new(mode), Vec::new(), false)
    }

    /// Runs `lines` and returns everything printed.
    fn run(shell: &mut Shell<Vec<u8>>, lines: &[&str]) -> String {
        for line in lines {
            shell.execute(line).unwrap();
        }
        String::from_utf8(std::mem::take(&mut shell.out)).unwrap()
    }

    #[test]
    fn prompt_shows_mode_and_path() {
        let mut shell = shell(Mode::TwoLevel);
        assert_eq!(shell.prompt(), "[TWO-LEVEL] /$ ");
        run(&mut shell, &["mkdir UserA", "cd UserA"]);
        assert_eq!(shell.prompt(), "[TWO-LEVEL] /UserA$ ");
    }

    #[test]
    fn prints_success_and_error_messages() {
        let mut shell = shell(Mode::Single);
        let output = run(&mut shell, &["create a.txt 2048", "mkdir docs", "cd docs"]);
        assert_eq!(
            output,
            "Created file 'a.txt' (2.0 KB)\n\
             ERROR: Subdirectories not allowed in Single-Level structure\n\
             ERROR: Directory navigation not allowed in Single-Level structure\n"
        );
    }

    #[test]
    fn suggests_recursive_delete() {
        let mut shell = shell(Mode::Hierarchical);
        let output = run(
            &mut shell,
            &["mkdir docs", "cd docs", "create a.txt", "cd ..", "rm docs"],
        );
        assert!(output.ends_with(
            "ERROR: Directory 'docs' is not empty. Use 'delete docs --recursive'\n"
        ));
        let output = run(&mut shell, &["rm docs -r", "ls"]);
        assert_eq!(output, "Deleted 'docs'\n(empty directory)\n");
    }

    #[test]
    fn lists_contents_as_table() {
        let mut shell = shell(Mode::Hierarchical);
        run(&mut shell, &["create notes.txt 512", "mkdir docs"]);
        let output = run(&mut shell, &["ls"]);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Name"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert!(lines[2].starts_with("docs"));
        assert!(lines[2].contains("Dir"));
        assert!(lines[3].starts_with("notes.txt"));
        assert!(lines[3].contains("512 B"));
    }

    #[test]
    fn prints_info_fields() {
        let mut shell = shell(Mode::Hierarchical);
        run(&mut shell, &["create report.pdf 1048576"]);
        let output = run(&mut shell, &["info report.pdf"]);
        let lines = output.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "File Name   : report.pdf");
        assert_eq!(lines[1], "File Size   : 1.0 MB");
        assert_eq!(lines[2], "File Type   : PDF Document");
        assert_eq!(lines[3], "Access Mode : Read / Write");
        assert!(lines[4].starts_with("Created On  : "));
    }

    #[test]
    fn prints_search_results_and_logs() {
        let mut shell = shell(Mode::Hierarchical);
        run(&mut shell, &["logs"]);
        run(&mut shell, &["mkdir docs", "cd docs", "create a.txt 10", "cd /"]);

        let output = run(&mut shell, &["search \"*.TXT\""]);
        assert_eq!(
            output,
            "Found 1 result(s) for '*.TXT':\n  /docs/a.txt (File, 10 B)\n"
        );
        let output = run(&mut shell, &["search *.md"]);
        assert_eq!(output, "No results found for '*.md'\n");

        let output = run(&mut shell, &["logs"]);
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Operation Logs:");
        assert_eq!(lines.len(), 5);
        assert!(lines[4].contains("[SEARCH] [*.md] [NO_RESULTS]"));
    }

    #[test]
    fn mode_switch_clears_everything() {
        let mut shell = shell(Mode::Hierarchical);
        run(&mut shell, &["mkdir docs", "cd docs"]);
        let output = run(&mut shell, &["mode two-level", "pwd", "tree", "logs"]);
        assert_eq!(
            output,
            "Switched to TWO-LEVEL Directory - Root cleared\n/\nRoot/\nNo operations logged yet\n"
        );
        assert_eq!(shell.fs.mode(), Mode::TwoLevel);

        let output = run(&mut shell, &["mode flat"]);
        assert!(output.starts_with("ERROR: Invalid mode 'flat'"));
    }

    #[test]
    fn tree_follows_the_cursor() {
        let mut shell = shell(Mode::Hierarchical);
        run(
            &mut shell,
            &["mkdir docs", "cd docs", "mkdir empty", "create a.txt 10", "cd /"],
        );

        let output = run(&mut shell, &["tree"]);
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "Root/");
        assert_eq!(lines[1], "└── docs/");
        assert_eq!(lines[2], "    ├── empty/");
        assert!(lines[3].starts_with("    └── a.txt [10 B | "));

        let output = run(&mut shell, &["cd docs", "tree"]);
        let lines = output.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "/docs/");
        assert_eq!(lines[1], "├── empty/");
        assert!(lines[2].starts_with("└── a.txt [10 B | "));

        let output = run(&mut shell, &["cd empty", "tree"]);
        assert_eq!(output, "/docs/empty/\n");
    }

    #[test]
    fn reports_parse_errors() {
        let mut shell = shell(Mode::Hierarchical);
        let output = run(&mut shell, &["frobnicate", "rename a"]);
        assert_eq!(
            output,
            "ERROR: Unknown command: 'frobnicate'. Type 'help' for available commands\n\
             ERROR: Usage: rename <old_name> <new_name>\n"
        );
    }

    #[test]
    fn exit_stops_the_loop() {
        let mut shell = shell(Mode::Hierarchical);
        assert_eq!(shell.execute("help").unwrap(), Flow::Continue);
        assert_eq!(shell.execute("exit").unwrap(), Flow::Exit);
    }

    #[test]
    fn run_reads_until_exit_or_end_of_input() {
        let mut shell = shell(Mode::Hierarchical);
        shell
            .run("mkdir docs\nexit\nmkdir never\n".as_bytes())
            .unwrap();
        assert!(shell.fs.get_child("docs").is_some());
        assert!(shell.fs.get_child("never").is_none());

        let mut shell = self::shell(Mode::Hierarchical);
        shell.run("create a.txt".as_bytes()).unwrap();
        let output = String::from_utf8(shell.out).unwrap();
        assert!(output.contains("Created file 'a.txt'"));
        assert!(output.ends_with("Goodbye!\n"));
    }
}
