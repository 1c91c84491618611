//! Summary prompt construction

use crate::core::models::{SummaryLength, SummaryStyle};

/// Placeholder shown wherever a post has no category.
pub const NO_CATEGORY: &str = "なし";

/// Instruction phrase embedded in the prompt for each length option.
#[must_use]
pub fn length_instruction(length: SummaryLength) -> &'static str {
    match length {
        SummaryLength::Short => "3-5文で簡潔に",
        SummaryLength::Medium => "10文程度で詳しく",
        SummaryLength::Long => "20文以上で詳細に",
    }
}

#[must_use]
pub fn style_instruction(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Bullet => "箇条書き",
        SummaryStyle::Paragraph => "段落形式",
    }
}

/// Look up a length phrase by its option name; unknown names get the `medium` phrase.
#[must_use]
pub fn length_instruction_for(option: &str) -> &'static str {
    length_instruction(SummaryLength::parse_or_default(option))
}

/// Look up a style phrase by its option name; unknown names get the `bullet` phrase.
#[must_use]
pub fn style_instruction_for(option: &str) -> &'static str {
    style_instruction(SummaryStyle::parse_or_default(option))
}

/// Build the single instruction sent to the model for one summary.
#[must_use]
pub fn build_summary_prompt(
    title: &str,
    body: &str,
    category: &str,
    length: SummaryLength,
    style: SummaryStyle,
) -> String {
    let length_text = length_instruction(length);
    let style_text = style_instruction(style);
    let category_text = if category.is_empty() {
        NO_CATEGORY
    } else {
        category
    };

    format!(
        "
あなたは研究室の文書要約アシスタントです。
教授が書いた技術文書や研究資料を、研究室メンバーが理解しやすいように要約してください。

要約のポイント:
1. 重要な技術的詳細を省略しない
2. 専門用語はそのまま使用
3. 結論や行動項目を明確に
4. 長さ: {length_text}
5. 形式: {style_text}

【タイトル】
{title}

【カテゴリ】
{category_text}

【本文】
{body}

上記の内容を{style_text}で要約してください:
"
    )
}
