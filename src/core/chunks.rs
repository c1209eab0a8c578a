//! Chunk production
//!
//! Decomposes the ordered section list into overlapping fixed-width word
//! windows. Chunks straddling a section boundary keep every section they
//! touch, which is what lets the matcher recognize transition speech.

use super::script::Section;
use super::text_normalizer::normalize;

/// Default sliding-window width in words
pub const DEFAULT_WINDOW_SIZE: usize = 12;

/// One fixed-width window of script words, in canonical form
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Normalized window text
    pub partial_content: String,
    /// Distinct sections the window touches, ascending by index, never empty
    pub source_sections: Vec<Section>,
}

impl Chunk {
    /// The section automatic navigation targets when this chunk wins.
    ///
    /// The last (highest-index) source section: a chunk spanning a boundary
    /// is read as evidence the speaker is moving forward.
    pub fn target_section(&self) -> usize {
        debug_assert!(!self.source_sections.is_empty());
        self.source_sections
            .last()
            .map(|s| s.index)
            .unwrap_or_default()
    }

    /// True when the window lies entirely inside one section
    pub fn is_single_section(&self) -> bool {
        self.source_sections.len() == 1
    }
}

/// Slide a window of `window_size` words across the flattened script.
///
/// Returns `total_words - window_size + 1` chunks, or none at all when the
/// script is shorter than one window.
pub fn generate_chunks(sections: &[Section], window_size: usize) -> Vec<Chunk> {
    if window_size == 0 {
        return Vec::new();
    }

    // Flatten to (word, owning section) preserving section and word order
    let mut words: Vec<(&str, &Section)> = Vec::new();
    for section in sections {
        for word in section.content.split_whitespace() {
            words.push((word, section));
        }
    }

    if words.len() < window_size {
        return Vec::new();
    }

    let mut chunks = Vec::with_capacity(words.len() - window_size + 1);
    for window in words.windows(window_size) {
        let text = window.iter().map(|(w, _)| *w).collect::<Vec<_>>().join(" ");

        let mut source_sections: Vec<Section> = Vec::new();
        for (_, section) in window {
            if source_sections.last().map(|s| s.index) != Some(section.index) {
                source_sections.push((*section).clone());
            }
        }
        debug_assert!(source_sections.windows(2).all(|p| p[0].index < p[1].index));

        chunks.push(Chunk {
            partial_content: normalize(&text),
            source_sections,
        });
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sections(texts: &[&str]) -> Vec<Section> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| Section::new(*t, i))
            .collect()
    }

    #[test]
    fn test_chunk_count() {
        // 10 words total, window of 4 -> 7 chunks
        let secs = sections(&["one two three four five", "six seven eight nine ten"]);
        let chunks = generate_chunks(&secs, 4);
        assert_eq!(chunks.len(), 7);
    }

    #[test]
    fn test_short_script_yields_no_chunks() {
        let secs = sections(&["only three words"]);
        assert!(generate_chunks(&secs, 4).is_empty());
        assert!(generate_chunks(&secs, 12).is_empty());
    }

    #[test]
    fn test_exact_length_yields_one_chunk() {
        let secs = sections(&["exactly four words here"]);
        let chunks = generate_chunks(&secs, 4);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].partial_content, "exactly four words here");
    }

    #[test]
    fn test_boundary_chunk_spans_sections() {
        // Window of 6 straddling the section boundary
        let secs = sections(&["the ability to say no", "have you ever struggled to say no"]);
        let chunks = generate_chunks(&secs, 6);

        assert_eq!(chunks[0].partial_content, "the ability to say no have");
        let indices: Vec<usize> = chunks[0].source_sections.iter().map(|s| s.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(chunks[0].target_section(), 1);
    }

    #[test]
    fn test_source_sections_sorted_and_deduped() {
        let secs = sections(&["a b c", "d e f", "g h i"]);
        for chunk in generate_chunks(&secs, 4) {
            let indices: Vec<usize> = chunk.source_sections.iter().map(|s| s.index).collect();
            let mut sorted = indices.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(indices, sorted);
            assert!(!indices.is_empty());
        }
    }

    #[test]
    fn test_chunk_content_is_normalized() {
        let secs = sections(&["Welcome, everyone! Today we cover slide 1 of the deck okay"]);
        let chunks = generate_chunks(&secs, 6);
        assert_eq!(chunks[0].partial_content, "welcome everyone today we cover slide");
    }
}
