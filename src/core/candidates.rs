//! Candidate selection
//!
//! Narrows the full chunk set to a window around the active section before
//! scoring. Scoring everything on every tick wastes the embedding budget
//! and invites false long-range jumps.

use super::chunks::Chunk;
use super::script::Section;

/// Sections of look-behind kept in the candidate window
const LOOK_BEHIND: i64 = 2;
/// Sections of look-ahead kept in the candidate window.
/// Wider than look-behind: speakers overrun more often than they backtrack.
const LOOK_AHEAD: i64 = 3;

/// Select the chunks plausibly matching speech near `current_section`.
///
/// Keeps chunks whose sections all fall in `[idx-2, idx+3]`, then drops
/// single-section chunks sitting exactly on either edge: content still two
/// or three slides away is too weak a signal to navigate on. Multi-section
/// chunks touching an edge bridge toward it and stay in.
///
/// An empty result is valid; the caller skips scoring that tick.
pub fn get_candidates<'a>(current_section: &Section, all_chunks: &'a [Chunk]) -> Vec<&'a Chunk> {
    let idx = current_section.index as i64;
    let lo = idx - LOOK_BEHIND;
    let hi = idx + LOOK_AHEAD;

    all_chunks
        .iter()
        .filter(|chunk| {
            let in_window = chunk
                .source_sections
                .iter()
                .all(|s| (lo..=hi).contains(&(s.index as i64)));
            if !in_window {
                return false;
            }
            if chunk.is_single_section() {
                let only = chunk.source_sections[0].index as i64;
                if only == lo || only == hi {
                    return false;
                }
            }
            true
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chunks::generate_chunks;

    fn deck(words_per_section: usize, sections: usize) -> Vec<Section> {
        (0..sections)
            .map(|i| {
                let content = (0..words_per_section)
                    .map(|w| format!("s{i}w{w}"))
                    .collect::<Vec<_>>()
                    .join(" ");
                Section::new(content, i)
            })
            .collect()
    }

    #[test]
    fn test_window_bounds_respected() {
        let sections = deck(6, 10);
        let chunks = generate_chunks(&sections, 4);
        let current = &sections[5];

        for chunk in get_candidates(current, &chunks) {
            for s in &chunk.source_sections {
                assert!((3..=8).contains(&s.index), "section {} out of window", s.index);
            }
        }
    }

    #[test]
    fn test_single_section_edge_chunks_dropped() {
        let sections = deck(6, 10);
        let chunks = generate_chunks(&sections, 4);
        let current = &sections[5];

        for chunk in get_candidates(current, &chunks) {
            if chunk.is_single_section() {
                let idx = chunk.source_sections[0].index;
                assert_ne!(idx, 3, "single-section chunk on the low edge");
                assert_ne!(idx, 8, "single-section chunk on the high edge");
            }
        }
    }

    #[test]
    fn test_multi_section_edge_chunks_kept() {
        let sections = deck(6, 10);
        let chunks = generate_chunks(&sections, 4);
        let current = &sections[5];

        let candidates = get_candidates(current, &chunks);
        let bridges_high_edge = candidates.iter().any(|c| {
            !c.is_single_section() && c.source_sections.iter().any(|s| s.index == 8)
        });
        assert!(bridges_high_edge, "expected a bridging chunk touching section 8");
    }

    #[test]
    fn test_start_of_deck() {
        let sections = deck(6, 10);
        let chunks = generate_chunks(&sections, 4);
        let current = &sections[0];

        // lo is negative; nothing can sit on it, and nothing below 0 exists
        let candidates = get_candidates(current, &chunks);
        assert!(!candidates.is_empty());
        for chunk in &candidates {
            assert!(chunk.source_sections.iter().all(|s| s.index <= 3));
        }
    }

    #[test]
    fn test_empty_chunk_set() {
        let current = Section::new("anything", 0);
        assert!(get_candidates(&current, &[]).is_empty());
    }
}
