//! Browser transport to the graph frame.

use spec_atlas_bridge::{BridgeError, SurfacePort};

/// Posts protocol messages into an `<iframe>` looked up by element id.
///
/// The frame is looked up on every post, so the port stays valid across
/// re-renders of the graph panel.
#[derive(Debug, Clone)]
pub struct IframePort {
    element_id: String,
}

impl IframePort {
    #[must_use]
    pub fn new(element_id: impl Into<String>) -> Self {
        Self {
            element_id: element_id.into(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
impl IframePort {
    /// Returns true if `event` was posted by the frame's current window.
    #[must_use]
    pub fn sent_by_frame(&self, event: &web_sys::MessageEvent) -> bool {
        use wasm_bindgen::JsValue;

        let Ok(window) = self.frame_window() else {
            return false;
        };
        event
            .source()
            .is_some_and(|source| JsValue::from(source) == JsValue::from(window))
    }

    /// Returns true if the frame's own document has finished loading.
    ///
    /// The placeholder `about:blank` document a frame starts with does not
    /// count. Needs same-origin access; a cross-origin frame reports false.
    #[must_use]
    pub fn document_complete(&self) -> bool {
        self.frame()
            .ok()
            .and_then(|frame| frame.content_document())
            .is_some_and(|document| {
                document.ready_state() == "complete"
                    && document.url().is_ok_and(|url| url != "about:blank")
            })
    }

    fn frame(&self) -> Result<web_sys::HtmlIFrameElement, BridgeError> {
        use wasm_bindgen::JsCast;

        web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(&self.element_id))
            .ok_or_else(|| BridgeError::SurfaceInaccessible {
                reason: format!("no element '{}'", self.element_id),
            })?
            .dyn_into::<web_sys::HtmlIFrameElement>()
            .map_err(|_| BridgeError::SurfaceInaccessible {
                reason: format!("element '{}' is not a frame", self.element_id),
            })
    }

    fn frame_window(&self) -> Result<web_sys::Window, BridgeError> {
        self.frame()?
            .content_window()
            .ok_or_else(|| BridgeError::SurfaceInaccessible {
                reason: "frame has no window".to_string(),
            })
    }
}

impl SurfacePort for IframePort {
    #[cfg(target_arch = "wasm32")]
    fn post(&self, message: &str) -> spec_atlas_core::Result<(), BridgeError> {
        self.frame_window()?
            .post_message(&wasm_bindgen::JsValue::from_str(message), "*")
            .map_err(|e| BridgeError::SurfaceInaccessible {
                reason: format!("{e:?}"),
            })?;
        Ok(())
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn post(&self, _message: &str) -> spec_atlas_core::Result<(), BridgeError> {
        Err(BridgeError::SurfaceInaccessible {
            reason: format!("frame '{}' only exists in the browser", self.element_id),
        }
        .into())
    }
}
