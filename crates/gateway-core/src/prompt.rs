//! Prompt contract and site content composition.
//!
//! The instruction text and the `Title/Description/Content` layout are an
//! external contract: every adapter sends exactly these strings and only
//! decides how to combine them for its vendor.

use serde::{Deserialize, Serialize};

/// System instruction sent to every vendor
pub const SYSTEM_PROMPT: &str = "You are a helpful website analyzer. Provide a detailed but concise summary of the website content in Korean. Include key features, content overview, and recent updates if available. Format your response with clear sections using markdown.";

/// Prefix of the user instruction; the composed content follows it
pub const USER_PROMPT_PREFIX: &str = "다음 웹사이트 정보를 분석하고 상세하게 요약해주세요:\n\n";

/// Output token budget shared by all vendors
pub const MAX_OUTPUT_TOKENS: u32 = 800;

/// Maximum number of characters kept from a page's main content
pub const MAX_EXCERPT_CHARS: usize = 500;

/// The fixed system/user instruction pair for one piece of content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptShape {
    /// System instruction
    pub system: &'static str,
    /// User instruction embedding the content
    pub user: String,
}

impl PromptShape {
    /// Build the instruction pair for the given content
    #[must_use]
    pub fn for_content(content: &str) -> Self {
        Self {
            system: SYSTEM_PROMPT,
            user: format!("{USER_PROMPT_PREFIX}{content}"),
        }
    }

    /// System and user instruction joined into a single turn, for vendors
    /// without a usable system role
    #[must_use]
    pub fn combined(&self) -> String {
        format!("{}\n\n{}", self.system, self.user)
    }
}

/// Metadata extracted from a website, as handed over by the extractor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteContent {
    /// Page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Meta or Open Graph description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Excerpt of the page's main text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_content: Option<String>,
}

impl SiteContent {
    /// Create site content from its three fields
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        main_content: impl Into<String>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            main_content: Some(main_content.into()),
        }
    }

    /// Compose the content string consumed by the adapters.
    ///
    /// The main content goes through [`clean_excerpt`] first.
    #[must_use]
    pub fn compose(&self) -> String {
        let excerpt = self.main_content.as_deref().map(clean_excerpt);
        compose_content(
            self.title.as_deref(),
            self.description.as_deref(),
            excerpt.as_deref(),
        )
    }
}

/// Compose `Title: ..\nDescription: ..\nContent: ..\n`, skipping empty fields
#[must_use]
pub fn compose_content(
    title: Option<&str>,
    description: Option<&str>,
    main_content: Option<&str>,
) -> String {
    let mut content = String::new();
    for (label, value) in [
        ("Title", title),
        ("Description", description),
        ("Content", main_content),
    ] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            content.push_str(label);
            content.push_str(": ");
            content.push_str(value);
            content.push('\n');
        }
    }
    content
}

/// Normalize raw page text into the excerpt sent for summarization.
///
/// Control characters are dropped, carets become spaces, whitespace runs
/// collapse to one space, a leading ten-word phrase repeated immediately
/// (typical of duplicated nav bars) is removed, and the result is cut to
/// [`MAX_EXCERPT_CHARS`] characters.
#[must_use]
pub fn clean_excerpt(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .filter(|c| !is_stripped_control(*c))
        .map(|c| if c == '^' { ' ' } else { c })
        .collect();

    let collapsed = collapse_whitespace_runs(&stripped);
    let mut content = collapsed.trim().to_string();

    let words: Vec<&str> = content.split(' ').collect();
    if words.len() > 20 && words[..10] == words[10..20] {
        content = words[10..].join(" ");
    }

    content.chars().take(MAX_EXCERPT_CHARS).collect()
}

fn is_stripped_control(c: char) -> bool {
    matches!(c, '\u{0000}'..='\u{001F}' | '\u{007F}'..='\u{009F}')
}

/// Replace every run of two or more whitespace characters with one space
fn collapse_whitespace_runs(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = String::new();

    for c in text.chars() {
        if c.is_whitespace() {
            run.push(c);
            continue;
        }
        flush_run(&mut out, &mut run);
        out.push(c);
    }
    flush_run(&mut out, &mut run);
    out
}

fn flush_run(out: &mut String, run: &mut String) {
    if run.chars().count() > 1 {
        out.push(' ');
    } else {
        out.push_str(run);
    }
    run.clear();
}
