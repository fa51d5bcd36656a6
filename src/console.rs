//! Line-oriented front end for the directory.

use std::cell::RefCell;
use std::io::{self, BufRead, Lines, Write};
use std::str::FromStr;

use derive_more::Display;
use tracing::debug;

use crate::api::EmployeeApi;
use crate::directory::{Confirm, DeleteOutcome, EmployeeDirectory, SubmitOutcome};
use crate::model::{DraftField, EmployeeId};
use crate::view::{self, Locale};

pub const HELP: &str = "\
Commands:
  list                  reload every employee
  search <term>         search by name, department or position
  add                   open the form for a new employee
  edit <id>             open the form on an existing employee
  set <field> <value>   fill a form field (name, email, position, department,
                        phone, date_joined, salary)
  save                  submit the form
  cancel                close the form, discarding the draft
  delete <id>           delete an employee (asks for confirmation)
  help                  show this text
  quit                  leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Search(String),
    Add,
    Edit(EmployeeId),
    Set(DraftField, String),
    Save,
    Cancel,
    Delete(EmployeeId),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "unknown command {:?}; type `help`", _0)]
    Unknown(String),
    #[display(fmt = "`{}` needs {}", _0, _1)]
    MissingArgument(&'static str, &'static str),
    #[display(fmt = "unknown field {:?}", _0)]
    UnknownField(String),
}

impl std::error::Error for ParseError {}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let id = |name: &'static str| {
            if rest.is_empty() {
                Err(ParseError::MissingArgument(name, "an employee id"))
            } else {
                Ok(EmployeeId::from(rest))
            }
        };

        match word {
            "list" | "ls" => Ok(Command::List),
            "search" | "find" => Ok(Command::Search(rest.to_string())),
            "add" | "new" => Ok(Command::Add),
            "edit" => id("edit").map(Command::Edit),
            "delete" | "rm" => id("delete").map(Command::Delete),
            "set" => {
                let (field, value) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if field.is_empty() {
                    return Err(ParseError::MissingArgument("set", "a field name"));
                }
                let field = DraftField::from_str(field)
                    .map_err(|_| ParseError::UnknownField(field.to_string()))?;
                Ok(Command::Set(field, value.trim().to_string()))
            }
            "save" | "submit" => Ok(Command::Save),
            "cancel" | "close" => Ok(Command::Cancel),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(ParseError::Unknown(other.to_string())),
        }
    }
}

/// Reads commands from `input` and writes screens to `output`.
///
/// The delete confirmation reads its answer from the same input stream.
pub struct Console<R, W> {
    input: RefCell<Lines<R>>,
    output: RefCell<W>,
    locale: Locale,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input.lines()),
            output: RefCell::new(output),
            locale: Locale::default(),
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    fn next_line(&self) -> io::Result<Option<String>> {
        self.input.borrow_mut().next().transpose()
    }

    fn say(&self, text: impl std::fmt::Display) -> io::Result<()> {
        let mut out = self.output.borrow_mut();
        writeln!(out, "{text}")?;
        out.flush()
    }

    fn prompt(&self, text: &str) -> io::Result<()> {
        let mut out = self.output.borrow_mut();
        write!(out, "{text}")?;
        out.flush()
    }

    /// Run until `quit` or end of input.
    pub async fn run<A: EmployeeApi>(&self, directory: &EmployeeDirectory<A>) -> io::Result<()> {
        self.say(view::render(&*directory.load().await, self.locale))?;

        loop {
            self.prompt("> ")?;
            let Some(line) = self.next_line()? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            match line.parse::<Command>() {
                Ok(Command::Quit) => break,
                Ok(command) => {
                    debug!(?command, "Console command");
                    self.execute(directory, command).await?;
                }
                Err(e) => self.say(e)?,
            }
        }
        Ok(())
    }

    async fn execute<A: EmployeeApi>(
        &self,
        directory: &EmployeeDirectory<A>,
        command: Command,
    ) -> io::Result<()> {
        let state = match command {
            Command::List => directory.refresh().await,
            Command::Search(term) => directory.search(term).await,
            Command::Add => directory.open_create(),
            Command::Edit(id) => {
                if directory.state().find(&id).is_none() {
                    self.say(format!("no listed employee with id {id}"))?;
                }
                directory.open_edit(&id)
            }
            Command::Set(field, value) => directory.edit_draft(field, value),
            Command::Save => {
                match directory.submit().await {
                    SubmitOutcome::Created(e) => self.say(format!("Added {}.", e.name))?,
                    SubmitOutcome::Updated(e) => self.say(format!("Updated {}.", e.name))?,
                    SubmitOutcome::Saved => self.say("Saved.")?,
                    SubmitOutcome::Invalid(errors) => {
                        self.say(format!("{} field(s) need attention.", errors.len()))?
                    }
                    SubmitOutcome::Failed(kind) => self.say(format!("Save failed: {kind}."))?,
                    SubmitOutcome::NotOpen => self.say("Nothing to save; use `add` or `edit`.")?,
                }
                directory.state()
            }
            Command::Cancel => directory.cancel_form(),
            Command::Delete(id) => {
                if directory.state().find(&id).is_none() {
                    return self.say(format!("no listed employee with id {id}"));
                }
                if let DeleteOutcome::Failed(kind) = directory.delete(&id, self).await {
                    debug!(%id, %kind, "Delete failed");
                }
                directory.state()
            }
            Command::Help => {
                self.say(HELP)?;
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };
        self.say(view::render(&state, self.locale))
    }
}

impl<R: BufRead, W: Write> Confirm for Console<R, W> {
    fn confirm(&self, prompt: &str) -> bool {
        if self.prompt(&format!("{prompt} [y/N] ")).is_err() {
            return false;
        }
        match self.next_line() {
            Ok(Some(answer)) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}
