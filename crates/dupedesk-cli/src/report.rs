//! Duplicate-user report output
//!
//! Writes the grouped duplicates into the spreadsheet (and mirrors the
//! same layout on the console). Columns are fixed: user name, email,
//! role, last update. Within a group only the first member gets the name
//! cell; the repeated name is left blank on the following rows.

use dupedesk_client::User;
use dupedesk_xlsx::{XlsxDocument, XlsxResult};

use crate::dedupe::DuplicateGroup;

const COL_NAME: &str = "A";
const COL_EMAIL: &str = "B";
const COL_ROLE: &str = "C";
const COL_UPDATED: &str = "D";

const HEADER_NAME: &str = "User Name";
const HEADER_EMAIL: &str = "Email";
const HEADER_ROLE: &str = "Role";
const HEADER_UPDATED: &str = "Updated";

/// Write the header row and one row per duplicate member into `sheet_name`.
///
/// Every cell update goes through the document session, so each row is on
/// disk before the next is written.
pub fn write_duplicates(
    doc: &mut XlsxDocument,
    sheet_name: &str,
    groups: &[DuplicateGroup],
) -> XlsxResult<()> {
    let mut row_index: u32 = 1;

    doc.set_cell_value(sheet_name, &cell(COL_NAME, row_index), HEADER_NAME, 0, true)?;
    doc.set_cell_value(sheet_name, &cell(COL_EMAIL, row_index), HEADER_EMAIL, 0, true)?;
    doc.set_cell_value(sheet_name, &cell(COL_ROLE, row_index), HEADER_ROLE, 0, true)?;
    doc.set_cell_value(
        sheet_name,
        &cell(COL_UPDATED, row_index),
        HEADER_UPDATED,
        0,
        true,
    )?;

    for group in groups {
        let mut first_line = true;
        for member in &group.members {
            row_index += 1;
            if first_line {
                doc.set_cell_value(sheet_name, &cell(COL_NAME, row_index), &group.name, 0, true)?;
                first_line = false;
            }
            doc.set_cell_value(
                sheet_name,
                &cell(COL_EMAIL, row_index),
                member.email.as_deref().unwrap_or_default(),
                0,
                true,
            )?;
            doc.set_cell_value(
                sheet_name,
                &cell(COL_ROLE, row_index),
                member.role.as_deref().unwrap_or_default(),
                0,
                true,
            )?;
            doc.set_cell_value(
                sheet_name,
                &cell(COL_UPDATED, row_index),
                member.updated_at.as_deref().unwrap_or_default(),
                0,
                true,
            )?;
        }
    }

    Ok(())
}

/// Print the duplicate listing to stdout in the same column layout
pub fn print_duplicates(users: &[User], groups: &[DuplicateGroup]) {
    if groups.is_empty() {
        return;
    }

    println!(
        "Total # user records: {}, # duplicated users: {}",
        users.len(),
        crate::dedupe::member_count(groups)
    );
    println!();
    println!("User name\tEmail\tRole\tUpdated");

    for group in groups {
        let mut first_line = true;
        for member in &group.members {
            let name = if first_line { group.name.as_str() } else { "" };
            first_line = false;
            println!(
                "{}\t{}\t{}\t{}",
                name,
                member.email.as_deref().unwrap_or_default(),
                member.role.as_deref().unwrap_or_default(),
                member.updated_at.as_deref().unwrap_or_default()
            );
        }
    }
}

fn cell(column: &str, row: u32) -> String {
    format!("{}{}", column, row)
}
