use std::collections::HashMap;

use super::event::{ActionEvent, PLACEHOLDER_PARAMETER};

/// Collapse the ordered action log into the final effective choice per
/// attribute.
///
/// Single left-to-right pass. The accumulator threads the choice map together
/// with the last relevant (post-correction) event, so the placeholder rule
/// always sees the state as it was before the current entry:
///
/// - entries whose action type is not a customization selection are skipped;
/// - an entry logged under [`PLACEHOLDER_PARAMETER`] is attributed to the
///   previous relevant entry's attribute, rewriting the event's own
///   `parameter` field;
/// - later entries overwrite earlier ones for the same attribute.
///
/// A placeholder entry with no prior relevant event has no context to correct
/// from and is keyed verbatim under the placeholder name.
pub fn reduce_latest_choices<I>(events: I) -> HashMap<String, ActionEvent>
where
    I: IntoIterator<Item = ActionEvent>,
{
    let (latest, _last) = events
        .into_iter()
        .filter(ActionEvent::is_selection)
        .fold(
            (HashMap::new(), None::<ActionEvent>),
            |(mut latest, last), mut event| {
                if let Some(previous) = last.as_ref() {
                    if event.parameter == PLACEHOLDER_PARAMETER {
                        event.parameter = previous.parameter.clone();
                    }
                }
                latest.insert(event.parameter.clone(), event.clone());
                (latest, Some(event))
            },
        );
    latest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action_log::event::SELECT_ACTION;

    fn select(parameter: &str, value: &str) -> ActionEvent {
        ActionEvent {
            action_type: SELECT_ACTION.to_string(),
            parameter: parameter.to_string(),
            new_value: value.to_string(),
            extra: serde_json::Map::new(),
        }
    }

    fn other(action_type: &str) -> ActionEvent {
        ActionEvent {
            action_type: action_type.to_string(),
            parameter: String::new(),
            new_value: String::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn empty_log_reduces_to_empty_map() {
        let latest = reduce_latest_choices(Vec::new());
        assert!(latest.is_empty());
    }

    #[test]
    fn last_write_wins_per_attribute() {
        let latest = reduce_latest_choices(vec![
            select("Hair", "first"),
            select("Top", "shirt"),
            select("Hair", "second"),
        ]);

        assert_eq!(latest.len(), 2);
        assert_eq!(latest["Hair"].new_value, "second");
        assert_eq!(latest["Top"].new_value, "shirt");
    }

    #[test]
    fn non_selection_entries_are_ignored() {
        let latest = reduce_latest_choices(vec![
            other("page_view"),
            select("Hair", "x"),
            other("camera_rotate"),
        ]);

        assert_eq!(latest.len(), 1);
        assert_eq!(latest["Hair"].new_value, "x");
    }

    #[test]
    fn placeholder_is_attributed_to_previous_entry_and_overwrites_it() {
        let latest = reduce_latest_choices(vec![
            select("Hair", "X1"),
            select("Empty_Icon", "X2"),
        ]);

        assert_eq!(latest.len(), 1);
        let hair = &latest["Hair"];
        assert_eq!(hair.new_value, "X2");
        // The corrected copy carries the recovered attribute in its own field.
        assert_eq!(hair.parameter, "Hair");
    }

    #[test]
    fn placeholder_correction_ignores_non_selection_entries_in_between() {
        let latest = reduce_latest_choices(vec![
            select("Beard", "b1"),
            other("camera_rotate"),
            select("Empty_Icon", "b2"),
        ]);

        assert_eq!(latest.len(), 1);
        assert_eq!(latest["Beard"].new_value, "b2");
    }

    #[test]
    fn leading_placeholder_is_keyed_verbatim() {
        let latest = reduce_latest_choices(vec![
            select("Empty_Icon", "orphan"),
            select("Hair", "h"),
        ]);

        assert_eq!(latest.len(), 2);
        assert_eq!(latest["Empty_Icon"].new_value, "orphan");
        assert_eq!(latest["Hair"].new_value, "h");
    }

    #[test]
    fn placeholder_run_chains_through_the_corrected_predecessor() {
        // The second placeholder corrects from the first one, which has
        // already been rewritten to "Glasses".
        let latest = reduce_latest_choices(vec![
            select("Glasses", "g1"),
            select("Empty_Icon", "g2"),
            select("Empty_Icon", "g3"),
        ]);

        assert_eq!(latest.len(), 1);
        assert_eq!(latest["Glasses"].new_value, "g3");
    }
}
