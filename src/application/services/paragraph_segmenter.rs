use unicode_segmentation::UnicodeSegmentation;

/// Soft chunk limit for text without blank-line structure. A chunk may
/// exceed this by up to one sentence.
const CHUNK_TARGET_CHARS: usize = 500;

/// Splits extracted text into paragraphs.
///
/// Primary strategy: split on runs of one-or-more blank lines, trim each
/// piece, drop empties. When the text has no blank-line structure (at most
/// one paragraph results), fall back to sentence accumulation into
/// ~500-character chunks. Deterministic and pure.
pub fn segment_paragraphs(text: &str) -> Vec<String> {
    let paragraphs = split_on_blank_lines(text);

    if paragraphs.len() > 1 {
        return paragraphs;
    }

    let chunks = accumulate_sentences(text);
    if chunks.is_empty() {
        paragraphs
    } else {
        chunks
    }
}

fn split_on_blank_lines(text: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current = String::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.trim().is_empty() {
                paragraphs.push(current.trim().to_string());
            }
            current.clear();
        } else {
            if !current.is_empty() {
                current.push('\n');
            }
            current.push_str(line);
        }
    }

    if !current.trim().is_empty() {
        paragraphs.push(current.trim().to_string());
    }

    paragraphs
}

fn accumulate_sentences(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in text.split_sentence_bounds() {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(sentence);

        if current.chars().count() > CHUNK_TARGET_CHARS {
            chunks.push(std::mem::take(&mut current));
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}
