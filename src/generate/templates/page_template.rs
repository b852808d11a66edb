use crate::generate::{
    dtos::generate_image_dto::GenerateImageDto, enums::image_format::ImageFormat,
    errors::GenerateApiError, models::generation_result::GenerationResult,
};

static APP_NAME: &str = "AI Image Generator";

pub enum PageNotice<'a> {
    Result(&'a GenerationResult),
    Warning(String),
    Error(String),
}

impl<'a> From<&GenerateApiError> for PageNotice<'a> {
    fn from(error: &GenerateApiError) -> Self {
        let message = error.value().message;

        match error.is_warning() {
            true => Self::Warning(message),
            false => Self::Error(message),
        }
    }
}

/// The whole single page: the form, re-filled with `dto`, followed by the
/// outcome of the last submission if there is one.
pub fn render_page(dto: &GenerateImageDto, notice: Option<&PageNotice>) -> String {
    let notice_html = match notice {
        Some(notice) => render_notice(notice),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{app_name}</title>
</head>
<body>
    <main>
        <h1>{app_name}</h1>
        <p>Generate high-quality images with AI. Powered by Hugging Face.</p>
        <form method="post" action="/generate" onsubmit="this.querySelector('button').disabled = true; document.getElementById('busy').hidden = false;">
            <label>Your Prompt
                <input type="text" name="prompt" value="{prompt}" placeholder="Describe the image you want...">
            </label>
            <label>Creativity (Guidance Scale)
                <input type="number" name="guidance_scale" value="{guidance_scale}" min="1.0" max="20.0" step="0.5" required>
            </label>
            <label>Image Height (px)
                <input type="number" name="height" value="{height}" min="256" max="1024" step="64" required>
            </label>
            <label>Image Width (px)
                <input type="number" name="width" value="{width}" min="256" max="1024" step="64" required>
            </label>
            <fieldset>
                <legend>Download Format</legend>
                {format_options}
            </fieldset>
            <button type="submit">Generate Image</button>
            <p id="busy" hidden>Generating image... Please wait...</p>
        </form>
        {notice_html}
    </main>
</body>
</html>
"#,
        app_name = APP_NAME,
        prompt = escape_html(&dto.prompt),
        guidance_scale = dto.guidance_scale,
        height = dto.height,
        width = dto.width,
        format_options = render_format_options(dto.format),
        notice_html = notice_html,
    )
}

fn render_format_options(selected: ImageFormat) -> String {
    [ImageFormat::Png, ImageFormat::Jpg]
        .iter()
        .map(|format| {
            format!(
                r#"<label><input type="radio" name="format" value="{value}"{checked}> {value}</label>"#,
                value = format.value(),
                checked = if *format == selected { " checked" } else { "" },
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ")
}

fn render_notice(notice: &PageNotice) -> String {
    match notice {
        PageNotice::Warning(message) => render_alert("warning", message, None),
        PageNotice::Error(message) => render_alert("error", message, None),
        PageNotice::Result(result) => render_result(result),
    }
}

fn render_result(result: &GenerationResult) -> String {
    match result {
        GenerationResult::Success {
            suggested_filename,
            format,
            ..
        } => format!(
            r#"<section class="result success">
            <figure>
                <img src="{src}" alt="Generated Image" width="400">
                <figcaption>{caption}</figcaption>
            </figure>
            <a href="{href}" download="{filename}">Download {ext} Image</a>
        </section>"#,
            src = result.inline_src().unwrap_or_default(),
            caption = escape_html(&result.message()),
            href = result.download_href().unwrap_or_default(),
            filename = escape_html(suggested_filename),
            ext = format.value(),
        ),
        GenerationResult::Pending => render_alert("warning", &result.message(), None),
        GenerationResult::Forbidden => render_alert("error", &result.message(), None),
        GenerationResult::Failure {
            diagnostic_text, ..
        } => render_alert("error", &result.message(), Some(diagnostic_text.as_str())),
        GenerationResult::Exception { description } => {
            render_alert("error", &result.message(), Some(description.as_str()))
        }
    }
}

fn render_alert(level: &str, message: &str, detail: Option<&str>) -> String {
    let detail_html = match detail {
        Some(detail) => format!("\n            <pre><code>{}</code></pre>", escape_html(detail)),
        None => String::new(),
    };

    format!(
        r#"<section class="result {level}" role="alert">
            <p>{message}</p>{detail_html}
        </section>"#,
        level = level,
        message = escape_html(message),
        detail_html = detail_html,
    )
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
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
