//! Graph panel: the sandboxed frame hosting the graph document.

use crate::surface::IframePort;
use leptos::prelude::*;
use spec_atlas_bridge::{GraphBridge, SurfaceStatus};

/// Element id of the graph frame, shared with [`IframePort`].
pub const GRAPH_FRAME_ID: &str = "graph-frame";

const LOAD_FAILED: &str = "Failed to load graph visualization";

/// Graph panel component.
///
/// Shows a loading overlay until the surface is ready and a terminal
/// "Graph Unavailable" panel if it fails. The conversation keeps working
/// either way.
#[component]
pub fn GraphPanel(graph_url: String, bridge: RwSignal<GraphBridge<IframePort>>) -> impl IntoView {
    let status = Memo::new(move |_| bridge.with(|bridge| bridge.status().clone()));
    let shown_url = graph_url.clone();

    view! {
        <div class="graph-panel">
            {move || match status.get() {
                SurfaceStatus::Loading => Some(view! {
                    <div class="graph-overlay">
                        <div class="spinner"></div>
                        <h3>"Loading Graph"</h3>
                        <p>"Initializing 3GPP Knowledge Graph..."</p>
                    </div>
                }.into_any()),
                SurfaceStatus::Ready => None,
                SurfaceStatus::Failed { reason } => Some(view! {
                    <div class="graph-overlay failed">
                        <h3>"Graph Unavailable"</h3>
                        <p>{reason}</p>
                        <p class="hint">
                            {format!("Make sure your graph.html is accessible at {shown_url}")}
                        </p>
                    </div>
                }.into_any()),
            }}
            <iframe
                id=GRAPH_FRAME_ID
                class="graph-frame"
                src=graph_url
                title="3GPP Knowledge Graph"
                sandbox="allow-scripts allow-same-origin allow-forms"
                on:load=move |_| {
                    bridge.update(|bridge| {
                        bridge.surface_loaded();
                    });
                }
                on:error=move |_| bridge.update(|bridge| bridge.surface_failed(LOAD_FAILED))
            ></iframe>
        </div>
    }
}
