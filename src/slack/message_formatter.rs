//! Text of every message the bot posts.

use crate::ai::prompt_builder::NO_CATEGORY;
use crate::core::models::{Document, SummaryLength, SummaryStyle};

const UNKNOWN_DATE: &str = "不明";

pub const HELP_TEXT: &str = "
*esa Document Summarizer の使い方* 📚

**基本的な使い方:**
```
@esa-summarizer https://your-team.esa.io/posts/123
```

**オプション付き:**
```
@esa-summarizer https://your-team.esa.io/posts/123 --length short --style paragraph
```

**オプション一覧:**
- `--length short` : 短い要約（3-5文）
- `--length medium` : 標準の要約（10文程度）※デフォルト
- `--length long` : 詳細な要約（20文以上）

- `--style bullet` : 箇条書き形式 ※デフォルト
- `--style paragraph` : 段落形式

**例:**
```
@esa-summarizer https://your-team.esa.io/posts/456 --length long --style bullet
```
";

#[must_use]
pub fn help_message(user_id: &str) -> String {
    format!("<@{user_id}>\n{HELP_TEXT}")
}

#[must_use]
pub fn missing_url_message(user_id: &str) -> String {
    format!("<@{user_id}> ❌ エラー: esaのURLを指定してください\n\n{HELP_TEXT}")
}

#[must_use]
pub fn processing_message(user_id: &str, length: SummaryLength, style: SummaryStyle) -> String {
    format!("<@{user_id}> 📝 要約を生成中です... (長さ: {length}, 形式: {style})")
}

#[must_use]
pub fn fetch_failed_message(user_id: &str) -> String {
    format!("<@{user_id}> ❌ 記事の取得に失敗しました。URLを確認してください。")
}

#[must_use]
pub fn empty_body_message(user_id: &str) -> String {
    format!("<@{user_id}> ❌ 記事の本文が空です。")
}

#[must_use]
pub fn summarization_error_message(user_id: &str, detail: &str) -> String {
    format!("<@{user_id}> ❌ 要約生成中にエラーが発生しました: {detail}")
}

/// Group digits in thousands: `12345` → `12,345`.
#[must_use]
pub fn format_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `YYYY-MM-DD` prefix of an esa timestamp, or the unknown-date placeholder.
#[must_use]
pub fn format_updated_date(updated_at: &str) -> String {
    if updated_at.is_empty() {
        UNKNOWN_DATE.to_string()
    } else {
        updated_at.chars().take(10).collect()
    }
}

/// The final reply for a successful summary.
#[must_use]
pub fn format_summary_message(
    doc: &Document,
    summary: &str,
    url: &str,
    length: SummaryLength,
    style: SummaryStyle,
) -> String {
    let category = if doc.category.is_empty() {
        NO_CATEGORY
    } else {
        &doc.category
    };

    format!(
        "
📄 *{title}*
🔢 記事番号: #{number}
🏷 カテゴリ: {category}
📅 更新日: {updated}
📊 文字数: {chars}文字

📝 *要約* (長さ: {length}, 形式: {style})
{summary}

🔗 <{url}|元記事を見る>
",
        title = doc.title,
        number = doc.number,
        updated = format_updated_date(&doc.updated_at),
        chars = format_thousands(doc.body_chars()),
    )
}
