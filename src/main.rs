use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use skagen::application::ports::{Summarizer, TextExtractor};
use skagen::application::services::AnalysisService;
use skagen::domain::ContentType;
use skagen::infrastructure::ml::{
    BertAnswerExtractor, T5QuestionGenerator, T5Summarizer, TruncationSummarizer,
};
use skagen::infrastructure::observability::{init_tracing, TracingConfig};
use skagen::infrastructure::storage::LocalUploadStore;
use skagen::infrastructure::text_processing::{CompositeExtractor, OcrAdapter, PdfTextAdapter};
use skagen::presentation::{create_router, AppState, Settings, SummarizerProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env().context("failed to load settings")?;

    init_tracing(
        TracingConfig::new(settings.environment.as_str(), settings.logging.json_format),
        settings.server.port,
    );

    let extractor: Arc<dyn TextExtractor> = Arc::new(CompositeExtractor::new(vec![
        (ContentType::Pdf, Arc::new(PdfTextAdapter::new()) as _),
        (
            ContentType::Image,
            Arc::new(OcrAdapter::new(settings.models.ocr_language.clone())) as _,
        ),
    ]));

    // Model load failures are fatal here, at startup, never per-request.
    let summarizer: Arc<dyn Summarizer> = match settings.models.summarizer_provider {
        SummarizerProvider::T5 => Arc::new(
            T5Summarizer::load(&settings.models.summarizer_model)
                .context("failed to load summarization model")?,
        ),
        SummarizerProvider::Truncation => Arc::new(TruncationSummarizer::new()),
    };

    let question_generator = Arc::new(
        T5QuestionGenerator::load(&settings.models.question_model)
            .context("failed to load question generation model")?,
    );

    let answer_extractor = Arc::new(
        BertAnswerExtractor::load(&settings.models.answer_model)
            .context("failed to load answer extraction model")?,
    );

    let analysis_service = Arc::new(AnalysisService::new(
        extractor,
        summarizer,
        question_generator,
        answer_extractor,
        settings.analysis.max_questions,
    ));

    let upload_store = Arc::new(
        LocalUploadStore::new(settings.uploads.dir.clone())
            .context("failed to initialize upload store")?,
    );

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let state = AppState {
        analysis_service,
        upload_store,
        settings,
    };

    let router = create_router(state);

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
