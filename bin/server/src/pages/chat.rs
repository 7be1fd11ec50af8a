//! Chat page: the graph panel next to the conversation.

mod graph;
mod server;

pub use graph::{GRAPH_FRAME_ID, GraphPanel};
pub use server::{Ask, LoadViewConfig, ViewConfig, ask, load_view_config};

use crate::surface::IframePort;
use leptos::prelude::*;
use leptos::task::spawn_local;
use spec_atlas_answer::BackendError;
use spec_atlas_bridge::GraphBridge;
use spec_atlas_conversation::{
    InputSizing, KeyAction, Message, MessageBody, Modifiers, QueryDispatcher, Resolution, Sender,
    key_action, render_message,
};

/// The chat page component.
#[component]
pub fn ChatPage() -> impl IntoView {
    let view_config = Resource::new(|| (), |_| load_view_config());

    view! {
        <div class="chat-page">
            <Suspense fallback=move || view! { <p class="page-loading">"Loading..."</p> }>
                {move || {
                    view_config.get().map(|result| {
                        match result {
                            Ok(config) => view! { <ChatLayout config=config/> }.into_any(),
                            Err(e) => view! {
                                <div class="page-error">
                                    <p>{format!("Failed to load configuration: {e}")}</p>
                                </div>
                            }.into_any(),
                        }
                    })
                }}
            </Suspense>
        </div>
    }
}

/// Owns the conversation and the graph bridge for one page view.
#[component]
fn ChatLayout(config: ViewConfig) -> impl IntoView {
    let bridge = RwSignal::new(GraphBridge::new(IframePort::new(GRAPH_FRAME_ID)));
    let dispatcher = RwSignal::new(QueryDispatcher::new(config.backend_endpoint));

    let teardown = dispatcher.with_untracked(QueryDispatcher::teardown_token);
    on_cleanup(move || teardown.cancel());

    let listener = window_event_listener(leptos::ev::message, move |ev| {
        #[cfg(target_arch = "wasm32")]
        {
            if !bridge.with_untracked(|bridge| bridge.port().sent_by_frame(&ev)) {
                return;
            }
        }
        if let Some(raw) = ev.data().as_string() {
            bridge.update(|bridge| {
                bridge.handle_surface_message(&raw);
            });
        }
    });
    on_cleanup(move || listener.remove());

    // The server-rendered frame can finish loading before hydration attaches
    // `on:load` or the listener above, so its signals may already be gone.
    Effect::new(move || {
        #[cfg(target_arch = "wasm32")]
        {
            let loaded = bridge.with_untracked(|bridge| bridge.port().document_complete());
            bridge.update(|bridge| {
                if loaded {
                    bridge.surface_loaded();
                } else {
                    bridge.hello();
                }
            });
        }
    });

    view! {
        <div class="chat-layout">
            <section class="graph-column">
                <GraphPanel graph_url=config.graph_url bridge=bridge/>
            </section>
            <section class="chat-column">
                <ConversationPanel dispatcher=dispatcher bridge=bridge/>
            </section>
        </div>
    }
}

/// Conversation panel component.
#[component]
fn ConversationPanel(
    dispatcher: RwSignal<QueryDispatcher>,
    bridge: RwSignal<GraphBridge<IframePort>>,
) -> impl IntoView {
    let (input, set_input) = signal(String::new());
    let textarea_ref = NodeRef::<leptos::html::Textarea>::new();
    let end_ref = NodeRef::<leptos::html::Div>::new();

    let messages = Memo::new(move |_| dispatcher.with(|d| d.state().messages.clone()));
    let pending = Memo::new(move |_| dispatcher.with(|d| d.state().pending));
    let can_send = move || !pending.get() && !input.get().trim().is_empty();

    // Keep the newest message in view
    Effect::new(move || {
        messages.track();
        pending.track();
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(end) = end_ref.get() {
                scroll_into_view(&end);
            }
        }
    });

    // Grow the composer with its content
    Effect::new(move || {
        input.track();
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(textarea) = textarea_ref.get() {
                fit_composer(&textarea, InputSizing::default());
            }
        }
    });

    let submit = move || {
        let raw = input.get_untracked();
        let Some(Ok(query)) = dispatcher.try_update(|d| d.begin(&raw)) else {
            return;
        };
        set_input.set(String::new());

        spawn_local(async move {
            let Some(result) = query
                .cancel
                .run_until_cancelled(ask(query.request.query.clone()))
                .await
            else {
                return;
            };

            let resolution = dispatcher.try_update(|d| {
                let result = result.map_err(|e| BackendError::Unreachable {
                    endpoint: d.backend_location().to_string(),
                    reason: e.to_string(),
                });
                d.complete(query.query_id, result)
            });

            if let Some(Resolution::Answered {
                highlight: Some(highlight),
            }) = resolution
            {
                bridge.try_update(|bridge| bridge.apply(&highlight));
            }
        });
    };

    view! {
        <div class="chat-panel">
            <div class="chat-header">
                <h2>"3GPP Assistant"</h2>
                <p>"Ask questions about 3GPP specifications and changes"</p>
            </div>

            <div class="chat-messages">
                {move || messages.with(Vec::is_empty).then(|| view! { <Welcome/> })}
                <For
                    each=move || messages.get()
                    key=Message::id
                    children=move |message| view! { <MessageBubble message=message/> }
                />
                {move || pending.get().then(|| view! { <Thinking/> })}
                <div node_ref=end_ref></div>
            </div>

            <div class="chat-input-area">
                <form
                    class="chat-input-container"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <textarea
                        node_ref=textarea_ref
                        class="chat-input"
                        rows="1"
                        placeholder="Ask about 3GPP specifications..."
                        prop:value=move || input.get()
                        prop:disabled=move || pending.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            let modifiers = Modifiers {
                                shift: ev.shift_key(),
                                ctrl: ev.ctrl_key(),
                                alt: ev.alt_key(),
                                meta: ev.meta_key(),
                            };
                            if key_action(&ev.key(), modifiers) == KeyAction::Submit {
                                ev.prevent_default();
                                submit();
                            }
                        }
                    ></textarea>
                    <button
                        type="submit"
                        class="send-button"
                        aria-label="Send message"
                        disabled=move || !can_send()
                    >
                        "Send"
                    </button>
                </form>
                <p class="chat-hint">"Press Enter to send, Shift+Enter for new line"</p>
            </div>
        </div>
    }
}

/// Empty-state welcome with example prompts.
#[component]
fn Welcome() -> impl IntoView {
    view! {
        <div class="chat-welcome">
            <h3>"Welcome to 3GPP Chat"</h3>
            <p>
                "I can help you understand 3GPP specifications, find specific information, "
                "and explain changes between document versions."
            </p>
            <p class="example">"💡 Try asking: \"What are the key changes in this version?\""</p>
            <p class="example">"🔍 Or: \"Explain the handover procedures\""</p>
        </div>
    }
}

#[component]
fn Thinking() -> impl IntoView {
    view! {
        <div class="message-container assistant">
            <div class="message-bubble assistant thinking">
                <span class="dot"></span>
                <span class="dot"></span>
                <span class="dot"></span>
                <span>"Thinking..."</span>
            </div>
        </div>
    }
}

/// A single message. Assistant text is rendered markdown, user text is literal.
#[component]
fn MessageBubble(message: Message) -> impl IntoView {
    let sender = match message.sender() {
        Sender::User => "user",
        Sender::Assistant => "assistant",
    };
    let content = match render_message(&message) {
        MessageBody::Html(html) => {
            view! { <div class="message-content" inner_html=html></div> }.into_any()
        }
        MessageBody::Text(text) => view! { <div class="message-content">{text}</div> }.into_any(),
    };

    view! {
        <div class=format!("message-container {sender}")>
            <div class=format!("message-bubble {sender}")>{content}</div>
        </div>
    }
}

#[cfg(target_arch = "wasm32")]
fn scroll_into_view(element: &web_sys::Element) {
    let options = web_sys::ScrollIntoViewOptions::new();
    options.set_behavior(web_sys::ScrollBehavior::Smooth);
    element.scroll_into_view_with_scroll_into_view_options(&options);
}

#[cfg(target_arch = "wasm32")]
fn fit_composer(textarea: &web_sys::HtmlTextAreaElement, sizing: InputSizing) {
    // Cosmetic only: a rejected write leaves the stylesheet height in place.
    let style = textarea.style();
    style
        .set_property("height", &format!("{}px", sizing.min_px))
        .and_then(|()| {
            let content = u32::try_from(textarea.scroll_height()).unwrap_or(0);
            style.set_property("height", &format!("{}px", sizing.height_for(content)))
        })
        .ok();
}
