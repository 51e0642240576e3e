//! Document-level side effects: custom font injection.

use platform_host::FontInstaller;

const FONT_LINK_ID: &str = "arcade-custom-font";

/// Installs the font stylesheet at `url` and applies `family` to the document body.
///
/// The stylesheet link is created once and re-pointed on later calls. An empty `url` removes it;
/// an empty `family` clears the body override.
///
/// # Errors
///
/// Returns an error when the document is unavailable or DOM mutation fails.
pub fn apply_font_settings(url: &str, family: &str) -> Result<(), String> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| "document unavailable".to_string())?;

        let existing = document.get_element_by_id(FONT_LINK_ID);
        if url.trim().is_empty() {
            if let Some(link) = existing {
                link.remove();
            }
        } else {
            let link = match existing {
                Some(element) => element
                    .dyn_into::<web_sys::HtmlLinkElement>()
                    .map_err(|_| format!("#{FONT_LINK_ID} is not a link element"))?,
                None => {
                    let link = document
                        .create_element("link")
                        .map_err(|e| format!("create link failed: {e:?}"))?
                        .dyn_into::<web_sys::HtmlLinkElement>()
                        .map_err(|_| "created element is not a link".to_string())?;
                    link.set_id(FONT_LINK_ID);
                    link.set_rel("stylesheet");
                    document
                        .head()
                        .ok_or_else(|| "document head unavailable".to_string())?
                        .append_child(&link)
                        .map_err(|e| format!("append font link failed: {e:?}"))?;
                    link
                }
            };
            link.set_href(url.trim());
        }

        let body = document
            .body()
            .ok_or_else(|| "document body unavailable".to_string())?;
        let style = body.style();
        if family.trim().is_empty() {
            style
                .remove_property("font-family")
                .map_err(|e| format!("clear font-family failed: {e:?}"))?;
        } else {
            style
                .set_property("font-family", &font_family_value(family))
                .map_err(|e| format!("set font-family failed: {e:?}"))?;
        }
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (url, family, FONT_LINK_ID);
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// [`FontInstaller`] that mutates the live document.
pub struct WebFontInstaller;

impl FontInstaller for WebFontInstaller {
    fn apply(&self, url: &str, family: &str) -> Result<(), String> {
        apply_font_settings(url, family)
    }
}

/// CSS `font-family` value with a generic fallback appended.
pub fn font_family_value(family: &str) -> String {
    format!("{}, sans-serif", family.trim())
}
