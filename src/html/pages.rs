//! Full-page views

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::reader::ReaderSession;

use super::assets::{
    ACQUISITION_SCRIPT, ACQUISITION_STYLE, BASE_STYLE, READER_SCRIPT, READER_STYLE,
};

fn page(title: &str, style: &str, body: &str, script: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
         <title>{}</title><style>{}{}</style></head><body>{}<script>{}</script></body></html>",
        encode_text(title),
        BASE_STYLE,
        style,
        body,
        script,
    )
}

/// Upload view, optionally showing a message from the last attempt
pub fn acquisition_page(message: Option<&str>, busy: bool) -> String {
    let message_html = message
        .map(|m| format!("<p class=\"message\" role=\"alert\">{}</p>", encode_text(m)))
        .unwrap_or_default();

    let body = format!(
        "<main class=\"landing\">\
         <h1>Paper to eBook</h1>\
         <p class=\"tagline\">Transform dense research papers into beautiful, readable eBooks instantly.</p>\
         <form id=\"upload-form\" action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\
         <div id=\"drop-zone\" class=\"drop-zone\">\
         <p id=\"drop-label\">{}</p><p class=\"hint\">or browse files</p>\
         <input id=\"file-upload\" type=\"file\" name=\"file\" accept=\".pdf\">\
         </div></form>{}\
         <p id=\"busy\" class=\"busy\"{}>Converting your paper...</p>\
         </main>",
        if busy { "Processing..." } else { "Drop your PDF here" },
        message_html,
        if busy { "" } else { " hidden" },
    );

    page("Paper to eBook", ACQUISITION_STYLE, &body, ACQUISITION_SCRIPT)
}

/// Reader view: outline on the left, sections on the right
pub fn reader_page(session: &ReaderSession) -> String {
    let title = &session.document().title;

    let body = format!(
        "<div class=\"reader\">\
         <aside class=\"sidebar\">\
         <header><h2 class=\"truncate\" title=\"{}\">{}</h2><p class=\"caption\">Table of Contents</p></header>\
         <nav id=\"toc\">{}</nav>\
         <footer><a href=\"/\">&larr; Upload another paper</a></footer>\
         </aside>\
         <main class=\"content\">{}</main>\
         </div>",
        encode_double_quoted_attribute(title),
        encode_text(title),
        session.render_toc(),
        session.pane().render(),
    );

    page(title, READER_STYLE, &body, READER_SCRIPT)
}
