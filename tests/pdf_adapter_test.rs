use skagen::application::ports::{ExtractionError, TextExtractor};
use skagen::domain::{ContentType, Document};
use skagen::infrastructure::text_processing::PdfTextAdapter;

fn pdf_document(name: &str, bytes: &[u8]) -> Document {
    Document::new(name.to_string(), ContentType::Pdf, bytes.len() as u64)
}

#[tokio::test]
async fn given_valid_pdf_when_extracting_then_returns_contained_text() {
    let adapter = PdfTextAdapter::new();
    let pdf_bytes = include_bytes!("fixtures/hello.pdf");
    let document = pdf_document("hello.pdf", pdf_bytes);

    let result = adapter.extract_text(pdf_bytes, &document).await;

    let text = result.expect("extraction should succeed");
    assert!(text.contains("Hello World"), "got: {text:?}");
}

#[tokio::test]
async fn given_multi_page_pdf_when_extracting_then_pages_joined_in_order() {
    let adapter = PdfTextAdapter::new();
    let pdf_bytes = include_bytes!("fixtures/two_pages.pdf");
    let document = pdf_document("two_pages.pdf", pdf_bytes);

    let text = adapter
        .extract_text(pdf_bytes, &document)
        .await
        .expect("extraction should succeed");

    let first = text.find("First page text").expect("first page missing");
    let second = text.find("Second page text").expect("second page missing");
    assert!(first < second, "page order not preserved: {text:?}");
    assert_eq!(text, text.trim(), "result must be trimmed");
}

#[tokio::test]
async fn given_pdf_with_empty_page_when_extracting_then_empty_page_skipped_order_kept() {
    let adapter = PdfTextAdapter::new();
    let pdf_bytes = include_bytes!("fixtures/empty_page.pdf");
    let document = pdf_document("empty_page.pdf", pdf_bytes);

    let text = adapter
        .extract_text(pdf_bytes, &document)
        .await
        .expect("extraction should succeed");

    let first = text.find("First page text").expect("first page missing");
    let third = text.find("Third page text").expect("third page missing");
    assert!(first < third);

    // The blank middle page must not contribute a line of its own.
    let non_empty_lines = text.lines().filter(|l| !l.trim().is_empty()).count();
    assert_eq!(non_empty_lines, 2, "got: {text:?}");
}

#[tokio::test]
async fn given_pdf_with_no_text_when_extracting_then_returns_empty_string() {
    let adapter = PdfTextAdapter::new();
    let pdf_bytes = include_bytes!("fixtures/blank.pdf");
    let document = pdf_document("blank.pdf", pdf_bytes);

    let text = adapter
        .extract_text(pdf_bytes, &document)
        .await
        .expect("a parseable but textless PDF is not an error");

    assert_eq!(text, "");
}

#[tokio::test]
async fn given_corrupt_bytes_when_extracting_then_returns_extraction_failed() {
    let adapter = PdfTextAdapter::new();
    let garbage = b"not a pdf at all";
    let document = pdf_document("corrupt.pdf", garbage);

    let result = adapter.extract_text(garbage, &document).await;

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_image_content_type_when_extracting_with_pdf_adapter_then_unsupported() {
    let adapter = PdfTextAdapter::new();
    let data = b"some data";
    let document = Document::new("photo.png".to_string(), ContentType::Image, data.len() as u64);

    let result = adapter.extract_text(data, &document).await;

    assert!(matches!(
        result,
        Err(ExtractionError::UnsupportedContentType(_))
    ));
}
