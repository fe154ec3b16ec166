//! State transitions.
//!
//! Each function takes the current state plus its arguments and returns the
//! next state, leaving the input untouched. An `Err` means "no change":
//! the caller keeps the old state.

use chrono::{DateTime, Utc};

use crate::codec::tsv;
use crate::domain::{AppState, Dialog, Entry, Log};
use crate::error::{NumlogError, Result};
use crate::numeric;

/// Store the raw numeric input without validating it.
pub fn set_new_value_input(state: &AppState, text: &str) -> Result<AppState> {
    let mut next = state.clone();
    next.new_value = text.to_string();
    Ok(next)
}

/// Select an existing log. Any index at or past the end creates a new log.
pub fn select_log(state: &AppState, index: usize) -> Result<AppState> {
    if index >= state.logs.len() {
        return create_log(state);
    }
    let mut next = state.clone();
    next.current_log_index = index as isize;
    Ok(next)
}

/// Append an empty "unnamed" log and make it current.
pub fn create_log(state: &AppState) -> Result<AppState> {
    let mut next = state.clone();
    next.current_log_index = next.logs.len() as isize;
    next.logs.push(Log::unnamed());
    Ok(next)
}

/// Rename the current log. A blank name is a cancel, not an error.
pub fn rename_current_log(state: &AppState, new_name: &str) -> Result<AppState> {
    let trimmed = new_name.trim();
    let mut next = state.clone();
    let log = next.current_log_mut().ok_or(NumlogError::NoCurrentLog)?;
    if trimmed.is_empty() {
        return Ok(state.clone());
    }
    log.name = trimmed.to_string();
    Ok(next)
}

/// Remove the current log and select its successor, or the new last log.
///
/// Deleting the only log leaves `logs` empty and the index at -1.
pub fn delete_current_log(state: &AppState) -> Result<AppState> {
    let current = state.current_index().ok_or(NumlogError::NoCurrentLog)?;
    let mut next = state.clone();
    next.logs.remove(current);
    next.current_log_index = (current as isize).min(state.logs.len() as isize - 2);
    Ok(next)
}

/// Parse the pending input and append it to the current log at `now`.
pub fn append_entry(state: &AppState, now: DateTime<Utc>) -> Result<AppState> {
    let value = match numeric::parse_float(&state.new_value) {
        Some(v) if v.is_finite() => v,
        _ => {
            log::warn!("{:?} is not a number, not logging", state.new_value);
            return Err(NumlogError::InvalidInput(state.new_value.clone()));
        }
    };

    let mut next = state.clone();
    let log = next.current_log_mut().ok_or(NumlogError::NoCurrentLog)?;
    log.entries.push(Entry::new(now, value));
    next.new_value.clear();
    Ok(next)
}

/// Parse an imported file into a new log and make it current.
pub fn import_log(state: &AppState, filename: &str, text: &str) -> Result<AppState> {
    let mut next = state.clone();
    next.logs.push(tsv::import_log(filename, text));
    next.current_log_index = next.logs.len() as isize - 1;
    Ok(next)
}

pub fn open_dialog(state: &AppState, dialog: Dialog) -> Result<AppState> {
    log::debug!("Opening {} dialog", dialog.name());
    let mut next = state.clone();
    next.is_showing_modal.insert(dialog, true);
    Ok(next)
}

pub fn close_dialog(state: &AppState, dialog: Dialog) -> Result<AppState> {
    log::debug!("Closing {} dialog", dialog.name());
    let mut next = state.clone();
    next.is_showing_modal.insert(dialog, false);
    Ok(next)
}

pub fn set_new_log_name(state: &AppState, text: &str) -> Result<AppState> {
    let mut next = state.clone();
    next.new_log_name = text.to_string();
    Ok(next)
}

/// Open the rename dialog, seeded with the current log's name.
pub fn begin_rename(state: &AppState) -> Result<AppState> {
    let name = state.current_log().ok_or(NumlogError::NoCurrentLog)?.name.clone();
    let mut next = open_dialog(state, Dialog::Rename)?;
    next.new_log_name = name;
    Ok(next)
}

/// Apply the rename dialog's text and close it.
///
/// With no current log left to rename the dialog is closed as a cancel.
pub fn commit_rename(state: &AppState) -> Result<AppState> {
    let mut next = match rename_current_log(state, &state.new_log_name) {
        Ok(next) => next,
        Err(NumlogError::NoCurrentLog) => {
            log::debug!("Rename dialog closed with no current log");
            state.clone()
        }
        Err(e) => return Err(e),
    };
    next.new_log_name.clear();
    close_dialog(&next, Dialog::Rename)
}

/// Ask for confirmation before deleting the current log.
pub fn request_delete(state: &AppState) -> Result<AppState> {
    if state.current_log().is_none() {
        return Err(NumlogError::NoCurrentLog);
    }
    open_dialog(state, Dialog::ConfirmDelete)
}

/// Delete the current log and close the confirmation dialog. With no
/// current log left the dialog is closed as a cancel.
pub fn confirm_delete(state: &AppState) -> Result<AppState> {
    let next = close_dialog(state, Dialog::ConfirmDelete)?;
    if next.current_log().is_none() {
        log::debug!("Delete confirmed with no current log");
        return Ok(next);
    }
    delete_current_log(&next)
}

pub fn cancel_delete(state: &AppState) -> Result<AppState> {
    close_dialog(state, Dialog::ConfirmDelete)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn three_logs() -> AppState {
        let mut state = AppState::new();
        state.logs = vec![Log::new("A"), Log::new("B"), Log::new("C")];
        state
    }

    fn names(state: &AppState) -> Vec<&str> {
        state.logs.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_set_new_value_input_is_verbatim() {
        let next = set_new_value_input(&AppState::new(), " 12abc ").unwrap();
        assert_eq!(next.new_value, " 12abc ");
    }

    #[test]
    fn test_append_entry_valid() {
        let state = set_new_value_input(&AppState::new(), "3.5").unwrap();
        let next = append_entry(&state, now()).unwrap();
        assert_eq!(next.logs[0].entries, vec![Entry::new(now(), 3.5)]);
        assert_eq!(next.new_value, "");
    }

    #[test]
    fn test_append_entry_leading_number() {
        let state = set_new_value_input(&AppState::new(), "  42kg").unwrap();
        let next = append_entry(&state, now()).unwrap();
        assert_eq!(next.logs[0].entries[0].value, 42.0);
    }

    #[test]
    fn test_append_entry_invalid_input() {
        for text in ["", "abc", "NaN", "Infinity"] {
            let state = set_new_value_input(&AppState::new(), text).unwrap();
            let err = append_entry(&state, now()).unwrap_err();
            assert!(matches!(err, NumlogError::InvalidInput(_)), "{text}");
        }
    }

    #[test]
    fn test_append_entry_no_current_log() {
        let mut state = set_new_value_input(&AppState::new(), "1").unwrap();
        state.current_log_index = 5;
        assert!(matches!(append_entry(&state, now()), Err(NumlogError::NoCurrentLog)));
    }

    #[test]
    fn test_append_entry_leaves_input_state_untouched() {
        let state = set_new_value_input(&AppState::new(), "1").unwrap();
        let _ = append_entry(&state, now()).unwrap();
        assert!(state.logs[0].entries.is_empty());
        assert_eq!(state.new_value, "1");
    }

    #[test]
    fn test_create_log() {
        let state = three_logs();
        let next = create_log(&state).unwrap();
        assert_eq!(next.logs.len(), 4);
        assert_eq!(next.current_log_index, 3);
        assert_eq!(next.logs[3], Log::unnamed());
    }

    #[test]
    fn test_select_log_in_range() {
        let next = select_log(&three_logs(), 2).unwrap();
        assert_eq!(next.current_log_index, 2);
        assert_eq!(next.logs.len(), 3);
    }

    #[test]
    fn test_select_log_sentinel_creates() {
        let next = select_log(&three_logs(), 3).unwrap();
        assert_eq!(next.logs.len(), 4);
        assert_eq!(next.current_log_index, 3);
    }

    #[test]
    fn test_rename_current_log_trims() {
        let next = rename_current_log(&three_logs(), "  weight ").unwrap();
        assert_eq!(next.logs[0].name, "weight");
    }

    #[test]
    fn test_rename_blank_is_cancel() {
        let state = three_logs();
        let next = rename_current_log(&state, "   ").unwrap();
        assert_eq!(next, state);
    }

    #[test]
    fn test_rename_no_current_log() {
        let mut state = three_logs();
        state.current_log_index = -1;
        assert!(matches!(rename_current_log(&state, "x"), Err(NumlogError::NoCurrentLog)));
    }

    #[test]
    fn test_delete_middle_selects_successor() {
        let mut state = three_logs();
        state.current_log_index = 1;
        let next = delete_current_log(&state).unwrap();
        assert_eq!(names(&next), vec!["A", "C"]);
        assert_eq!(next.current_log_index, 1);
    }

    #[test]
    fn test_delete_last_selects_new_last() {
        let mut state = three_logs();
        state.current_log_index = 2;
        let next = delete_current_log(&state).unwrap();
        assert_eq!(names(&next), vec!["A", "B"]);
        assert_eq!(next.current_log_index, 1);
    }

    #[test]
    fn test_delete_only_log_leaves_sentinel() {
        let next = delete_current_log(&AppState::new()).unwrap();
        assert!(next.logs.is_empty());
        assert_eq!(next.current_log_index, -1);
        assert!(next.current_log().is_none());
    }

    #[test]
    fn test_delete_without_current_log() {
        let mut state = three_logs();
        state.current_log_index = 3;
        assert!(matches!(delete_current_log(&state), Err(NumlogError::NoCurrentLog)));
    }

    #[test]
    fn test_create_after_deleting_everything() {
        let empty = delete_current_log(&AppState::new()).unwrap();
        let next = create_log(&empty).unwrap();
        assert_eq!(next.logs.len(), 1);
        assert_eq!(next.current_log_index, 0);
    }

    #[test]
    fn test_import_log_appends_and_selects() {
        let next = import_log(&three_logs(), "weight-kg.tsv", "2020-01-01T00:00:00.000Z\t5").unwrap();
        assert_eq!(next.logs.len(), 4);
        assert_eq!(next.current_log_index, 3);
        assert_eq!(next.logs[3].name, "weight");
        assert_eq!(next.logs[3].units, "kg");
    }

    #[test]
    fn test_rename_dialog_flow() {
        let state = begin_rename(&three_logs()).unwrap();
        assert!(state.is_showing(Dialog::Rename));
        assert_eq!(state.new_log_name, "A");

        let state = set_new_log_name(&state, "Alpha").unwrap();
        let state = commit_rename(&state).unwrap();
        assert_eq!(state.logs[0].name, "Alpha");
        assert!(!state.is_showing(Dialog::Rename));
        assert_eq!(state.new_log_name, "");
    }

    #[test]
    fn test_commit_blank_rename_closes_dialog() {
        let state = begin_rename(&three_logs()).unwrap();
        let state = set_new_log_name(&state, "").unwrap();
        let state = commit_rename(&state).unwrap();
        assert_eq!(state.logs[0].name, "A");
        assert!(!state.is_showing(Dialog::Rename));
    }

    #[test]
    fn test_delete_dialog_flow() {
        let state = request_delete(&three_logs()).unwrap();
        assert!(state.is_showing(Dialog::ConfirmDelete));

        let cancelled = cancel_delete(&state).unwrap();
        assert_eq!(cancelled.logs.len(), 3);
        assert!(!cancelled.is_showing(Dialog::ConfirmDelete));

        let confirmed = confirm_delete(&state).unwrap();
        assert_eq!(names(&confirmed), vec!["B", "C"]);
        assert!(!confirmed.is_showing(Dialog::ConfirmDelete));
    }

    #[test]
    fn test_confirm_delete_without_current_log_closes_dialog() {
        let mut state = request_delete(&three_logs()).unwrap();
        state.current_log_index = 7;
        let next = confirm_delete(&state).unwrap();
        assert!(!next.is_showing(Dialog::ConfirmDelete));
        assert_eq!(names(&next), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_commit_rename_without_current_log_closes_dialog() {
        let state = begin_rename(&three_logs()).unwrap();
        let mut state = set_new_log_name(&state, "Alpha").unwrap();
        state.current_log_index = -1;
        let next = commit_rename(&state).unwrap();
        assert!(!next.is_showing(Dialog::Rename));
        assert_eq!(next.new_log_name, "");
        assert_eq!(names(&next), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_request_delete_without_current_log() {
        let mut state = three_logs();
        state.current_log_index = -1;
        assert!(matches!(request_delete(&state), Err(NumlogError::NoCurrentLog)));
    }

    #[test]
    fn test_open_close_dialog() {
        let state = open_dialog(&AppState::new(), Dialog::Import).unwrap();
        assert!(state.is_showing(Dialog::Import));
        let state = close_dialog(&state, Dialog::Import).unwrap();
        assert!(!state.is_showing(Dialog::Import));
    }
}
