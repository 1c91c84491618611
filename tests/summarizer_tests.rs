mod common;

use common::{FakeGenerator, shared};
use esa_summarizer::ai::summarizer::{
    GENERATION_ERROR_PREFIX, INTRODUCTION_TITLE, SECTIONED_BANNER, SECTIONED_FOOTER,
};
use esa_summarizer::ai::{LONG_DOCUMENT_THRESHOLD, MAX_SECTIONS, Summarizer};
use esa_summarizer::core::models::{SummaryLength, SummaryStyle};

#[tokio::test]
async fn summarize_returns_generator_text() {
    let generator = shared(FakeGenerator::echo());
    generator.queue_response("- point one");
    let summarizer = Summarizer::new(generator.clone());

    let text = summarizer
        .summarize("T", "B", "", SummaryLength::Long, SummaryStyle::Paragraph)
        .await;

    assert_eq!(text, "- point one");
    let prompt = generator.prompt(0);
    assert!(prompt.contains("20文以上で詳細に"));
    assert!(prompt.contains("段落形式"));
}

#[tokio::test]
async fn summarize_folds_errors_into_text() {
    let generator = shared(FakeGenerator::failing("503 unavailable"));
    let summarizer = Summarizer::new(generator);

    let text = summarizer
        .summarize("T", "B", "", SummaryLength::Medium, SummaryStyle::Bullet)
        .await;

    assert!(text.starts_with(GENERATION_ERROR_PREFIX));
    assert!(text.contains("503 unavailable"));
}

#[tokio::test]
async fn body_at_threshold_is_not_split() {
    let generator = shared(FakeGenerator::echo());
    let summarizer = Summarizer::new(generator.clone());
    let body = "x".repeat(LONG_DOCUMENT_THRESHOLD);

    let result = summarizer.summarize_long_document("T", &body, "").await;

    assert!(!result.sectioned);
    assert_eq!(generator.calls(), 1);
    assert!(generator.prompt(0).contains("10文程度で詳しく"));
}

#[tokio::test]
async fn body_over_threshold_is_split_and_forced_short() {
    let generator = shared(FakeGenerator::echo());
    let summarizer = Summarizer::new(generator.clone());
    let body = format!(
        "{}\n## Method\nhow\n## Result\nwhat",
        "x".repeat(LONG_DOCUMENT_THRESHOLD)
    );

    let result = summarizer.summarize_long_document("Paper", &body, "lab").await;

    assert!(result.sectioned);
    assert_eq!(generator.calls(), 3);
    for i in 0..3 {
        assert!(generator.prompt(i).contains("4. 長さ: 3-5文で簡潔に"));
    }
    assert!(generator.prompt(0).contains(&format!("Paper - {INTRODUCTION_TITLE}")));
    assert!(generator.prompt(1).contains("Paper - Method"));
    assert!(generator.prompt(2).contains("【カテゴリ】\nlab"));

    assert!(result.text.starts_with(&format!("{SECTIONED_BANNER}\n\n")));
    assert!(result.text.ends_with(&format!("\n\n{SECTIONED_FOOTER}")));
    assert!(result.text.contains(&format!("**{INTRODUCTION_TITLE}**\nECHO: ")));
    assert!(result.text.contains("\n\n**Method**\nECHO: "));
    assert!(result.text.contains("\n\n**Result**\nECHO: "));
}

#[tokio::test]
async fn at_most_five_sections_are_summarized() {
    let generator = shared(FakeGenerator::echo());
    let summarizer = Summarizer::new(generator.clone());
    let mut body = "y".repeat(LONG_DOCUMENT_THRESHOLD + 1);
    for i in 0..9 {
        body.push_str(&format!("\n## Heading {i}\ncontent {i}"));
    }

    let result = summarizer.summarize_long_document("T", &body, "").await;

    assert_eq!(generator.calls(), MAX_SECTIONS);
    assert!(result.text.contains("**Heading 3**"));
    assert!(!result.text.contains("**Heading 4**"));
}

#[tokio::test]
async fn oversized_section_is_truncated_before_summarizing() {
    let generator = shared(FakeGenerator::echo());
    let summarizer = Summarizer::new(generator.clone());
    let body = format!("{}TAIL", "z".repeat(LONG_DOCUMENT_THRESHOLD + 10));

    summarizer.summarize_long_document("T", &body, "").await;

    let prompt = generator.prompt(0);
    assert!(prompt.contains(&"z".repeat(LONG_DOCUMENT_THRESHOLD)));
    assert!(!prompt.contains(&"z".repeat(LONG_DOCUMENT_THRESHOLD + 1)));
    assert!(!prompt.contains("TAIL"));
}
