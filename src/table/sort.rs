//! Sort state and its per-column toggle cycle

use crate::table::column::Column;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort; `None` elsewhere means fetch order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(column: Column, direction: SortDirection) -> Self {
        SortState { column, direction }
    }
}

/// Next state after toggling `column`
///
/// Unsorted -> Ascending -> Descending -> Unsorted for the same column.
/// Toggling a different column starts it at Ascending.
pub fn toggle(current: Option<SortState>, column: Column) -> Option<SortState> {
    match current {
        Some(SortState {
            column: active,
            direction,
        }) if active == column => match direction {
            SortDirection::Ascending => Some(SortState::new(column, SortDirection::Descending)),
            SortDirection::Descending => None,
        },
        _ => Some(SortState::new(column, SortDirection::Ascending)),
    }
}

/// Direction shown in `column`'s header
pub fn direction_for(current: Option<SortState>, column: Column) -> Option<SortDirection> {
    current
        .filter(|sort| sort.column == column)
        .map(|sort| sort.direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_cycles_three_states() {
        let asc = toggle(None, Column::FullName);
        assert_eq!(asc, Some(SortState::new(Column::FullName, SortDirection::Ascending)));

        let desc = toggle(asc, Column::FullName);
        assert_eq!(desc, Some(SortState::new(Column::FullName, SortDirection::Descending)));

        assert_eq!(toggle(desc, Column::FullName), None);
    }

    #[test]
    fn test_toggle_other_column_starts_ascending() {
        let desc = Some(SortState::new(Column::FullName, SortDirection::Descending));
        let next = toggle(desc, Column::DateJoined);
        assert_eq!(next, Some(SortState::new(Column::DateJoined, SortDirection::Ascending)));
        assert_eq!(direction_for(next, Column::FullName), None);
    }
}
