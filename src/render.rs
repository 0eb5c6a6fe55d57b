//! Presentation of generation outcomes as terminal text or as the HTML page.

use crate::models::{Generation, GenerationReport, ImageResult};
use std::fmt::Write as _;

pub const TITLE: &str = "Imaginate: AI Story and Image Generator";
pub const PROMPT_LABEL: &str = "Enter your story prompt:";
pub const PROMPT_PLACEHOLDER: &str = "e.g., A time traveler visits ancient Egypt";
pub const IDLE_HINT: &str = "Enter a prompt and click 'Generate' to get started.";
pub const INVALID_PROMPT_WARNING: &str = "Please enter a valid prompt.";
pub const STORY_HEADING: &str = "Generated Story";
pub const IMAGE_HEADING: &str = "Generated Image";
pub const IMAGE_CAPTION: &str = "AI-generated image";
pub const IMAGE_MISSING_WARNING: &str = "Image could not be generated.";

/// Warnings shown in place of a missing image, in display order.
pub fn image_warnings(image: &ImageResult) -> Vec<String> {
    match image {
        ImageResult::Generated(_) => Vec::new(),
        ImageResult::Unavailable(err) => vec![
            format!("Image generation failed: {}", err),
            IMAGE_MISSING_WARNING.to_string(),
        ],
    }
}

pub fn terminal(generation: &Generation) -> String {
    match generation {
        Generation::Rejected => format!("warning: {}\n", INVALID_PROMPT_WARNING),
        Generation::Completed(report) => terminal_report(report),
    }
}

fn terminal_report(report: &GenerationReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} ==", STORY_HEADING);
    let _ = writeln!(out, "{}", report.story.display_text());
    let _ = writeln!(out);

    match &report.image {
        ImageResult::Generated(image) => {
            let _ = writeln!(out, "== {} ==", IMAGE_HEADING);
            let _ = writeln!(
                out,
                "{}: {}x{} {} ({} bytes)",
                IMAGE_CAPTION,
                image.width(),
                image.height(),
                image.mime_type(),
                image.bytes().len()
            );
        }
        unavailable => {
            for warning in image_warnings(unavailable) {
                let _ = writeln!(out, "warning: {}", warning);
            }
        }
    }

    out
}

/// Escape text for inclusion in HTML element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const STYLE: &str = r#"
    body { font-family: sans-serif; max-width: 46rem; margin: 2rem auto; padding: 0 1rem; }
    input[type=text] { font-size: 16px; width: 100%; padding: 0.5rem; box-sizing: border-box; }
    button { background-color: #4CAF50; color: white; font-size: 16px; border: none; padding: 0.5rem 1.2rem; margin-top: 0.5rem; cursor: pointer; }
    .info { background: #e8f0fe; padding: 0.75rem; border-radius: 4px; }
    .warning { background: #fff4e5; padding: 0.75rem; border-radius: 4px; margin: 0.5rem 0; }
    .story { white-space: pre-wrap; line-height: 1.5; }
    .image-box img { width: 100%; height: auto; }
    .image-box figcaption { color: #666; text-align: center; font-size: 14px; }
"#;

/// Full single-page document. `prompt` refills the input field.
pub fn page(prompt: &str, generation: Option<&Generation>) -> String {
    let mut body = String::new();

    match generation {
        None => {
            let _ = writeln!(body, r#"<p class="info">{}</p>"#, escape_html(IDLE_HINT));
        }
        Some(Generation::Rejected) => {
            let _ = writeln!(
                body,
                r#"<p class="warning">{}</p>"#,
                escape_html(INVALID_PROMPT_WARNING)
            );
        }
        Some(Generation::Completed(report)) => {
            let _ = writeln!(body, "<h2>📖 {}</h2>", STORY_HEADING);
            let _ = writeln!(
                body,
                r#"<div class="story">{}</div>"#,
                escape_html(&report.story.display_text())
            );

            match &report.image {
                ImageResult::Generated(image) => {
                    let _ = writeln!(body, r#"<div class="image-box">"#);
                    let _ = writeln!(body, "<h2>🖼️ {}</h2>", IMAGE_HEADING);
                    let _ = writeln!(
                        body,
                        r#"<figure><img src="{}" alt="{}"><figcaption>{}</figcaption></figure>"#,
                        image.data_url(),
                        IMAGE_CAPTION,
                        IMAGE_CAPTION
                    );
                    let _ = writeln!(body, "</div>");
                }
                unavailable => {
                    for warning in image_warnings(unavailable) {
                        let _ = writeln!(
                            body,
                            r#"<p class="warning">{}</p>"#,
                            escape_html(&warning)
                        );
                    }
                }
            }
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Imaginate</title>
<style>{style}</style>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="/generate">
<label for="prompt">{label}</label>
<input type="text" id="prompt" name="prompt" value="{prompt}" placeholder="{placeholder}">
<button type="submit">Generate</button>
</form>
{body}</body>
</html>
"#,
        style = STYLE,
        title = escape_html(TITLE),
        label = escape_html(PROMPT_LABEL),
        prompt = escape_html(prompt),
        placeholder = escape_html(PROMPT_PLACEHOLDER),
        body = body,
    )
}
