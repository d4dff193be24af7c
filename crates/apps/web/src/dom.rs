use constellation::{OverlayAnchor, OverlayStyle, StyleSink};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlElement};

pub const LAT_ATTR: &str = "data-lat";
pub const LON_ATTR: &str = "data-lon";

/// Degrees from an attribute value; absent or unparsable values mean 0.
pub fn parse_degrees(value: Option<String>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Collects every element matching `selector` with its lat/lon attributes.
///
/// The elements stay owned by the page; we only keep references.
pub fn collect_anchors(
    document: &Document,
    selector: &str,
) -> Result<Vec<OverlayAnchor<HtmlElement>>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    let mut anchors = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else { continue };
        let Ok(element) = node.dyn_into::<HtmlElement>() else {
            continue;
        };
        let lat = parse_degrees(element.get_attribute(LAT_ATTR));
        let lon = parse_degrees(element.get_attribute(LON_ATTR));
        anchors.push(OverlayAnchor::from_degrees(element, lat, lon));
    }
    Ok(anchors)
}

/// Writes overlay styles straight onto element inline styles.
#[derive(Debug, Default)]
pub struct DomStyleSink {
    failures: u64,
}

impl DomStyleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> u64 {
        self.failures
    }
}

impl StyleSink<HtmlElement> for DomStyleSink {
    fn apply(&mut self, handle: &HtmlElement, style: &OverlayStyle) {
        let css = handle.style();
        let result = css
            .set_property("transform", &style.transform_css())
            .and_then(|_| css.set_property("opacity", &style.opacity_css()))
            .and_then(|_| css.set_property("z-index", &style.z_index_css()));

        if let Err(err) = result {
            // Log the first failure only; this runs every frame.
            if self.failures == 0 {
                web_sys::console::error_1(&JsValue::from_str(&format!(
                    "overlay style update failed: {:?}",
                    err
                )));
            }
            self.failures += 1;
        }
    }
}
