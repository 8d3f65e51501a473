use skagen::application::services::segment_paragraphs;

#[test]
fn given_blank_line_separated_text_when_segmenting_then_splits_on_blank_lines() {
    let text = "First paragraph.\n\nSecond paragraph.\n\n\n\nThird paragraph.";

    let paragraphs = segment_paragraphs(text);

    assert_eq!(
        paragraphs,
        vec![
            "First paragraph.".to_string(),
            "Second paragraph.".to_string(),
            "Third paragraph.".to_string(),
        ]
    );
}

#[test]
fn given_whitespace_only_blank_lines_when_segmenting_then_still_splits() {
    let text = "First paragraph.\n   \t\nSecond paragraph.";

    let paragraphs = segment_paragraphs(text);

    assert_eq!(paragraphs.len(), 2);
    assert_eq!(paragraphs[0], "First paragraph.");
    assert_eq!(paragraphs[1], "Second paragraph.");
}

#[test]
fn given_already_segmented_paragraphs_when_rejoined_and_resplit_then_reproduces_same_list() {
    let text = "Alpha one.\n\nBeta two.\n\nGamma three.";
    let first_pass = segment_paragraphs(text);

    let rejoined = first_pass.join("\n\n");
    let second_pass = segment_paragraphs(&rejoined);

    assert_eq!(first_pass, second_pass);
}

#[test]
fn given_text_without_blank_lines_when_segmenting_then_chunks_are_nonempty_and_ordered() {
    let sentence = "The quick brown fox jumps over the lazy dog near the river bank today. ";
    let text = sentence.repeat(20);

    let chunks = segment_paragraphs(&text);

    assert!(chunks.len() > 1, "long unstructured text must be chunked");

    let mut concatenated = String::new();
    for chunk in &chunks {
        assert!(!chunk.is_empty());
        concatenated.push_str(chunk);
        concatenated.push(' ');
    }

    // Every sentence survives, in order, with nothing lost.
    let mut cursor = 0;
    for _ in 0..20 {
        let found = concatenated[cursor..]
            .find(sentence.trim())
            .expect("sentence missing from chunk concatenation");
        cursor += found + 1;
    }
}

#[test]
fn given_text_without_blank_lines_when_segmenting_then_chunk_lengths_are_soft_bounded() {
    let sentence = "Short sentence number one here. ";
    let text = sentence.repeat(60);

    let chunks = segment_paragraphs(&text);

    // Soft limit: a chunk may exceed 500 chars by at most one sentence.
    for chunk in &chunks {
        assert!(
            chunk.chars().count() <= 500 + sentence.len(),
            "chunk too large: {} chars",
            chunk.chars().count()
        );
    }
}

#[test]
fn given_short_unstructured_text_when_segmenting_then_single_chunk() {
    let paragraphs = segment_paragraphs("Just one small sentence.");

    assert_eq!(paragraphs, vec!["Just one small sentence.".to_string()]);
}

#[test]
fn given_empty_text_when_segmenting_then_no_paragraphs() {
    assert!(segment_paragraphs("").is_empty());
    assert!(segment_paragraphs("   \n\n  \t ").is_empty());
}

#[test]
fn given_same_input_when_segmenting_twice_then_results_are_identical() {
    let text = "Some text. With sentences! And more? Yes.\n\nAnd a second block.";

    assert_eq!(segment_paragraphs(text), segment_paragraphs(text));
}
