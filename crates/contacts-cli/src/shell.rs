use std::io::{self, BufRead, ErrorKind, Write};

use contacts_core::{storage::ContactStorage, Contact, ContactPatch, ContactStore};
use tracing::{debug, info};

const SEPARATOR: &str = "-------------------";

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user chose Exit; a save was attempted.
    Exited,
    /// Input ran out before Exit; nothing was saved.
    InputClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Add,
    Display,
    Search,
    Edit,
    Delete,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::Add),
            "2" => Some(Self::Display),
            "3" => Some(Self::Search),
            "4" => Some(Self::Edit),
            "5" => Some(Self::Delete),
            "6" => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Numbered-menu loop over any line-oriented input and output.
/// Changes stay in memory until the user picks Exit.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn run<S: ContactStorage + ?Sized>(
        mut self,
        store: &mut ContactStore,
        storage: &S,
    ) -> io::Result<SessionEnd> {
        loop {
            match self.step(store, storage) {
                Ok(Some(end)) => return Ok(end),
                Ok(None) => {}
                Err(err) if err.kind() == ErrorKind::UnexpectedEof => {
                    info!("input closed before exit, unsaved changes discarded");
                    return Ok(SessionEnd::InputClosed);
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn step<S: ContactStorage + ?Sized>(
        &mut self,
        store: &mut ContactStore,
        storage: &S,
    ) -> io::Result<Option<SessionEnd>> {
        self.print_menu()?;
        let raw = self.prompt("Enter your choice: ")?;
        let Some(choice) = MenuChoice::parse(&raw) else {
            writeln!(self.output, "Invalid choice, please try again.")?;
            return Ok(None);
        };
        debug!(?choice, "menu selection");

        match choice {
            MenuChoice::Add => self.add(store)?,
            MenuChoice::Display => write_contacts(&mut self.output, store)?,
            MenuChoice::Search => self.search(store)?,
            MenuChoice::Edit => self.edit(store)?,
            MenuChoice::Delete => self.delete(store)?,
            MenuChoice::Exit => {
                if let Err(err) = store.save(storage) {
                    writeln!(
                        self.output,
                        "Warning: could not save contacts to {}: {err}",
                        storage.describe()
                    )?;
                }
                writeln!(self.output, "Exiting and saving contacts...")?;
                return Ok(Some(SessionEnd::Exited));
            }
        }
        Ok(None)
    }

    fn print_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "Contact Management System")?;
        writeln!(self.output, "1. Add Contact")?;
        writeln!(self.output, "2. Display Contacts")?;
        writeln!(self.output, "3. Search Contact")?;
        writeln!(self.output, "4. Edit Contact")?;
        writeln!(self.output, "5. Delete Contact")?;
        writeln!(self.output, "6. Exit")
    }

    fn add(&mut self, store: &mut ContactStore) -> io::Result<()> {
        // All three answers are read before the store is touched.
        let name = self.prompt("Enter name: ")?;
        let phone_number = self.prompt("Enter phone number: ")?;
        let email = self.prompt("Enter email: ")?;
        store.add(Contact::new(name, phone_number, email));
        Ok(())
    }

    fn search(&mut self, store: &ContactStore) -> io::Result<()> {
        let name = self.prompt("Enter the name to search: ")?;
        match store.search(&name) {
            Some(contact) => {
                writeln!(self.output, "Contact found:")?;
                write_contact(&mut self.output, contact)
            }
            None => writeln!(self.output, "Contact not found."),
        }
    }

    fn edit(&mut self, store: &mut ContactStore) -> io::Result<()> {
        let name = self.prompt("Enter the name of the contact to edit: ")?;
        let Some(index) = store.find_index(&name) else {
            return writeln!(self.output, "Contact not found.");
        };
        writeln!(
            self.output,
            "Editing contact: {}",
            store.as_slice()[index].name
        )?;

        let phone_number = self.prompt("Enter new phone number (leave blank to keep current): ")?;
        let email = self.prompt("Enter new email (leave blank to keep current): ")?;
        match store.edit(&name, ContactPatch::from_input(phone_number, email)) {
            Ok(_) => writeln!(self.output, "Contact updated."),
            Err(err) => writeln!(self.output, "{err}"),
        }
    }

    fn delete(&mut self, store: &mut ContactStore) -> io::Result<()> {
        let name = self.prompt("Enter the name of the contact to delete: ")?;
        match store.delete(&name) {
            Ok(_) => writeln!(self.output, "Contact deleted."),
            Err(_) => writeln!(self.output, "Contact not found."),
        }
    }

    /// Print `label` and read one line without its terminator.
    /// End of input surfaces as `UnexpectedEof`.
    fn prompt(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "input closed"));
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(line)
    }
}

/// Print every contact as a numbered block.
pub fn write_contacts(out: &mut impl Write, store: &ContactStore) -> io::Result<()> {
    if store.is_empty() {
        return writeln!(out, "No contacts available.");
    }
    writeln!(out, "Contacts List:")?;
    for (index, contact) in store.iter().enumerate() {
        writeln!(out, "Contact {}:", index + 1)?;
        write_contact(out, contact)?;
        writeln!(out, "{SEPARATOR}")?;
    }
    Ok(())
}

pub fn write_contact(out: &mut impl Write, contact: &Contact) -> io::Result<()> {
    writeln!(out, "Name: {}", contact.name)?;
    writeln!(out, "Phone Number: {}", contact.phone_number)?;
    writeln!(out, "Email: {}", contact.email)
}
