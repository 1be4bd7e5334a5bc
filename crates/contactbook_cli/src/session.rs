//! Interactive menu loop.
//!
//! # Responsibility
//! - Read one menu choice per iteration and dispatch to the contact store.
//! - Render outcomes; validation and lookup failures never end the loop.
//!
//! # Invariants
//! - User input is treated as opaque text, never interpreted.
//! - End of input behaves like the exit command.

use crate::render;
use contactbook_core::{ContactError, ContactRepository, ContactStore, NewContact};
use log::info;
use std::io::{self, BufRead, Write};

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Search,
    Delete,
    Statistics,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::List),
            "3" => Some(Self::Search),
            "4" => Some(Self::Delete),
            "5" => Some(Self::Statistics),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Returns whether a confirmation answer means yes (`y`/`yes`, any case).
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Console session bound to a store, an input reader and an output writer.
pub struct Session<R, W, P: ContactRepository> {
    store: ContactStore<P>,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write, P: ContactRepository> Session<R, W, P> {
    pub fn new(store: ContactStore<P>, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
        }
    }

    /// Runs until the exit command or end of input.
    ///
    /// # Errors
    /// Only console I/O failures end the loop with an error.
    pub fn run(&mut self) -> io::Result<()> {
        info!("event=session_start module=cli status=ok");
        writeln!(self.output, "🚀 Welcome to Contact Manager!")?;

        loop {
            render::menu(&mut self.output)?;
            let Some(choice) = self.prompt("Enter your choice (1-6): ")? else {
                break;
            };

            let flow = match MenuChoice::parse(&choice) {
                Some(MenuChoice::Add) => self.add_contact()?,
                Some(MenuChoice::List) => self.list_contacts()?,
                Some(MenuChoice::Search) => self.search_contacts()?,
                Some(MenuChoice::Delete) => self.delete_contact()?,
                Some(MenuChoice::Statistics) => self.show_statistics()?,
                Some(MenuChoice::Exit) => Flow::Exit,
                None => {
                    writeln!(self.output, "❌ Invalid choice. Please enter 1-6.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Exit {
                break;
            }
        }

        writeln!(self.output, "👋 Goodbye! Your contacts have been saved.")?;
        self.output.flush()?;
        info!(
            "event=session_end module=cli status=ok count={}",
            self.store.len()
        );
        Ok(())
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (ContactStore<P>, W) {
        (self.store, self.output)
    }

    fn add_contact(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n➕ Add New Contact")?;
        let Some(name) = self.prompt("Name: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(phone) = self.prompt("Phone: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(email) = self.prompt("Email: ")? else {
            return Ok(Flow::Exit);
        };
        let Some(notes) = self.prompt("Notes (optional): ")? else {
            return Ok(Flow::Exit);
        };

        let draft = NewContact::new(name, phone, email).with_notes(notes);
        let outcome = self.store.add(draft).map(|_| ());
        self.report_persist_error()?;
        match outcome {
            Ok(()) => writeln!(self.output, "✅ Contact added successfully")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn list_contacts(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n👥 All Contacts")?;
        render::contacts(&mut self.output, &self.store.all_sorted())?;
        Ok(Flow::Continue)
    }

    fn search_contacts(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n🔍 Search Contacts")?;
        let Some(query) = self.prompt("Enter search term: ")? else {
            return Ok(Flow::Exit);
        };
        if query.is_empty() {
            self.report(&ContactError::EmptyQuery)?;
            return Ok(Flow::Continue);
        }

        render::contacts(&mut self.output, &self.store.search(&query))?;
        Ok(Flow::Continue)
    }

    fn delete_contact(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n🗑️ Delete Contact")?;
        let Some(email) = self.prompt("Enter email of contact to delete: ")? else {
            return Ok(Flow::Exit);
        };
        if email.is_empty() {
            self.report(&ContactError::EmptyEmailInput)?;
            return Ok(Flow::Continue);
        }

        let Some(contact) = self.store.find_by_email(&email) else {
            writeln!(self.output, "❌ Contact not found.")?;
            return Ok(Flow::Continue);
        };
        writeln!(self.output, "\nContact to be deleted:")?;
        render::contacts(&mut self.output, &[contact])?;

        let Some(answer) = self.prompt("Are you sure you want to delete this contact? (y/n): ")?
        else {
            return Ok(Flow::Exit);
        };
        if !is_affirmative(&answer) {
            writeln!(self.output, "Deletion cancelled.")?;
            return Ok(Flow::Continue);
        }

        let outcome = self.store.delete(&email);
        self.report_persist_error()?;
        match outcome {
            Ok(name) => writeln!(self.output, "✅ Deleted contact: {name}")?,
            Err(err) => self.report(&err)?,
        }
        Ok(Flow::Continue)
    }

    fn show_statistics(&mut self) -> io::Result<Flow> {
        writeln!(self.output, "\n📊 Contact Statistics")?;
        match self.store.statistics() {
            Ok(stats) => render::statistics(&mut self.output, &stats)?,
            Err(err) => {
                writeln!(self.output, "Total contacts: {}", self.store.len())?;
                self.report(&err)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: &ContactError) -> io::Result<()> {
        writeln!(self.output, "❌ {err}")
    }

    fn report_persist_error(&mut self) -> io::Result<()> {
        match self.store.take_persist_error() {
            Some(err) => writeln!(self.output, "Error saving contacts: {err}"),
            None => Ok(()),
        }
    }

    /// Prints `label`, reads one line and trims it; `None` at end of input.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
