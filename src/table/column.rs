//! Fixed column schema of the users table

use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::constants::DATE_DISPLAY_FORMAT;
use crate::models::{UserRecord, UserStatus};

/// Columns in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Column {
    Organization,
    FullName,
    Email,
    DateJoined,
    PhoneNumber,
    Status,
    Action,
}

/// How a column's values are typed, compared and drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Text,
    Date,
    Status,
    Action,
}

impl Column {
    pub const ALL: [Column; 7] = [
        Column::Organization,
        Column::FullName,
        Column::Email,
        Column::DateJoined,
        Column::PhoneNumber,
        Column::Status,
        Column::Action,
    ];

    /// Stable identifier, matches the API field name
    pub fn id(&self) -> &'static str {
        match self {
            Column::Organization => "organization",
            Column::FullName => "fullName",
            Column::Email => "email",
            Column::DateJoined => "dateJoined",
            Column::PhoneNumber => "phoneNumber",
            Column::Status => "status",
            Column::Action => "action",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Column::Organization => "Organization",
            Column::FullName => "Full Name",
            Column::Email => "Email",
            Column::DateJoined => "Date Joined",
            Column::PhoneNumber => "Phone Number",
            Column::Status => "Status",
            Column::Action => "",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Organization | Column::FullName | Column::Email | Column::PhoneNumber => {
                ColumnKind::Text
            }
            Column::DateJoined => ColumnKind::Date,
            Column::Status => ColumnKind::Status,
            Column::Action => ColumnKind::Action,
        }
    }

    pub fn is_sortable(&self) -> bool {
        self.kind() != ColumnKind::Action
    }

    pub fn cell(&self, user: &UserRecord) -> CellValue {
        match self {
            Column::Organization => CellValue::Text(user.organization.clone()),
            Column::FullName => CellValue::Text(user.full_name.clone()),
            Column::Email => CellValue::Text(user.email.clone()),
            Column::DateJoined => CellValue::Date(user.date_joined),
            Column::PhoneNumber => CellValue::Text(user.phone_number.clone()),
            Column::Status => CellValue::Status(user.status),
            Column::Action => CellValue::Action {
                user_id: user.id.clone(),
            },
        }
    }

    /// Ascending order of two users by this column
    ///
    /// Text compares case-insensitively, dates chronologically, statuses by
    /// label. The action column has no order.
    pub fn compare(&self, a: &UserRecord, b: &UserRecord) -> Ordering {
        match self {
            Column::Organization => compare_text(&a.organization, &b.organization),
            Column::FullName => compare_text(&a.full_name, &b.full_name),
            Column::Email => compare_text(&a.email, &b.email),
            Column::PhoneNumber => compare_text(&a.phone_number, &b.phone_number),
            Column::DateJoined => a.date_joined.cmp(&b.date_joined),
            Column::Status => a.status.as_str().cmp(b.status.as_str()),
            Column::Action => Ordering::Equal,
        }
    }
}

fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// One table cell, tagged by column kind
#[derive(Clone, Debug, PartialEq)]
pub enum CellValue {
    Text(String),
    Date(DateTime<Utc>),
    Status(UserStatus),
    Action { user_id: String },
}

impl CellValue {
    pub fn display(&self) -> String {
        match self {
            CellValue::Text(text) => text.clone(),
            CellValue::Date(date) => format_date(date),
            CellValue::Status(status) => status.as_str().to_string(),
            CellValue::Action { .. } => String::from("⋮"),
        }
    }
}

/// A visible row, ready for the rendering layer
#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub user_id: String,
    pub cells: Vec<(Column, CellValue)>,
}

impl TableRow {
    pub fn from_user(user: &UserRecord) -> Self {
        TableRow {
            user_id: user.id.clone(),
            cells: Column::ALL.iter().map(|c| (*c, c.cell(user))).collect(),
        }
    }

    pub fn cell(&self, column: Column) -> Option<&CellValue> {
        self.cells
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, value)| value)
    }
}

/// en-US display format, e.g. "May 15, 2020, 10:00 AM"
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}
