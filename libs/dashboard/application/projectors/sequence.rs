//! Sequence projector

use crate::application::display::{DisplayPort, SequenceMarker};
use crate::domain::{SequenceTag, SequenceUpdate};

/// Rebuild the marker row in input order, emphasising `current`
pub fn sequence_markers(tags: &[String], current: Option<usize>) -> Vec<SequenceMarker> {
    tags.iter()
        .enumerate()
        .map(|(i, tag)| SequenceMarker {
            label: tag.clone(),
            tag: SequenceTag::parse(tag),
            active: current == Some(i),
        })
        .collect()
}

pub fn project_sequence(update: &SequenceUpdate, display: &mut dyn DisplayPort) {
    display.update_sequence(&sequence_markers(&update.sequence, update.current_trade_index));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_markers_follow_input_order() {
        let markers = sequence_markers(&tags(&["G", "R", "X", "R"]), Some(1));
        let kinds: Vec<_> = markers.iter().map(|m| m.tag).collect();
        assert_eq!(
            kinds,
            vec![SequenceTag::Win, SequenceTag::Loss, SequenceTag::Other, SequenceTag::Loss]
        );
        assert_eq!(markers[2].label, "X");
        assert!(markers[1].active);
        assert_eq!(markers.iter().filter(|m| m.active).count(), 1);
    }

    #[test]
    fn test_index_past_end_highlights_nothing() {
        let markers = sequence_markers(&tags(&["G", "R"]), Some(2));
        assert!(markers.iter().all(|m| !m.active));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let input = tags(&["R", "G", "G"]);
        assert_eq!(sequence_markers(&input, Some(0)), sequence_markers(&input, Some(0)));
    }
}
