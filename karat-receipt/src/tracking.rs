//! Tracking QR labels for orders and repairs
//!
//! The label embeds a remotely generated QR image. Receipt renderers never
//! use this; it is a separate printable.

use crate::error::RenderResult;
use crate::html::escape_html;
use url::Url;

/// Public QR image service used when the caller does not configure one
pub const DEFAULT_QR_SERVICE: &str = "https://api.qrserver.com/v1/create-qr-code/?size=150x150";

/// QR image URL encoding `id` as the `data` query parameter
///
/// Existing query parameters on `base` are kept.
pub fn tracking_qr_url(base: &str, id: &str) -> RenderResult<Url> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut().append_pair("data", id);
    Ok(url)
}

/// Standalone HTML label showing the tracking QR and its identifier
pub fn render_tracking_label(base: &str, id: &str, caption: Option<&str>) -> RenderResult<String> {
    let url = tracking_qr_url(base, id)?;
    let caption = caption
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| format!("<div class=\"caption\">{}</div>\n", escape_html(c)))
        .unwrap_or_default();

    Ok(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{id}</title>\n\
         <style>\nbody{{margin:0;text-align:center;font-family:'Courier New',Courier,monospace}}\n\
         img{{width:150px;height:150px}}\n.id{{font-weight:bold;margin-top:4px}}\n</style>\n\
         </head>\n<body>\n{caption}<img src=\"{src}\" alt=\"{id}\">\n<div class=\"id\">{id}</div>\n\
         </body>\n</html>\n",
        id = escape_html(id),
        src = escape_html(url.as_str()),
        caption = caption,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_url_encodes_identifier() {
        let url = tracking_qr_url(DEFAULT_QR_SERVICE, "RP 42/A&B").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.qrserver.com/v1/create-qr-code/?size=150x150&data=RP+42%2FA%26B"
        );
    }

    #[test]
    fn test_invalid_base_is_an_error() {
        assert!(tracking_qr_url("not a url", "ORD-1").is_err());
    }

    #[test]
    fn test_label_embeds_escaped_url() {
        let html = render_tracking_label(DEFAULT_QR_SERVICE, "ORD-7", Some("Repair")).unwrap();
        assert!(html.contains(
            r#"<img src="https://api.qrserver.com/v1/create-qr-code/?size=150x150&amp;data=ORD-7" alt="ORD-7">"#
        ));
        assert!(html.contains("<div class=\"caption\">Repair</div>"));
        assert!(html.contains("<div class=\"id\">ORD-7</div>"));
    }
}
