//! Console rendering for menu, contact lists and statistics.

use contactbook_core::{Contact, ContactStatistics};
use std::io::{self, Write};

const MENU_RULE_WIDTH: usize = 50;
const LIST_RULE_WIDTH: usize = 70;

pub fn menu<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(MENU_RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "{rule}")?;
    writeln!(out, "📱 CONTACT MANAGER")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "1. Add Contact")?;
    writeln!(out, "2. View All Contacts")?;
    writeln!(out, "3. Search Contacts")?;
    writeln!(out, "4. Delete Contact")?;
    writeln!(out, "5. Contact Statistics")?;
    writeln!(out, "6. Exit")?;
    writeln!(out, "{rule}")
}

/// One-line summary: `📞 name | phone | email`.
pub fn contact_line(contact: &Contact) -> String {
    format!("📞 {} | {} | {}", contact.name, contact.phone, contact.email)
}

/// Numbered listing; notes only when present, creation time always.
pub fn contacts<W: Write>(out: &mut W, contacts: &[&Contact]) -> io::Result<()> {
    if contacts.is_empty() {
        return writeln!(out, "📭 No contacts found.");
    }

    let rule = "-".repeat(LIST_RULE_WIDTH);
    writeln!(out)?;
    writeln!(out, "📋 Found {} contact(s):", contacts.len())?;
    writeln!(out, "{rule}")?;
    for (index, contact) in contacts.iter().enumerate() {
        writeln!(out, "{:2}. {}", index + 1, contact_line(contact))?;
        if !contact.notes.is_empty() {
            writeln!(out, "    📝 Notes: {}", contact.notes)?;
        }
        writeln!(out, "    📅 Added: {}", contact.created_at)?;
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

pub fn statistics<W: Write>(out: &mut W, stats: &ContactStatistics) -> io::Result<()> {
    writeln!(out, "Total contacts: {}", stats.total)?;
    if stats.top_domains.is_empty() {
        return Ok(());
    }
    writeln!(out, "Top email domains:")?;
    for entry in &stats.top_domains {
        writeln!(out, "  {}: {}", entry.domain, entry.count)?;
    }
    Ok(())
}
