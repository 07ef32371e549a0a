use std::sync::Arc;

use dioxus::html::input_data::keyboard_types::Key;
use dioxus::prelude::*;

use super::components::*;
use super::types::Theme;
use crate::assistant_core::{ConversationHistory, Resolver, Role};

const SIDEBAR_CARDS: [(&str, &str); 4] = [
    (
        "Symptom Checker",
        "Get AI-driven suggestions for common health symptoms.",
    ),
    (
        "Appointment Guidance",
        "Learn how to book doctor consultations.",
    ),
    (
        "Medication Advice",
        "Understand general medication guidance.",
    ),
    ("Health Tips", "Receive wellness and fitness tips."),
];

/// Root props for one liveview session.
pub struct AppProps {
    pub resolver: Arc<Resolver>,
}

pub fn app(cx: Scope<AppProps>) -> Element {
    let resolver = &cx.props.resolver;
    let draft = use_state(cx, String::new);
    let history = use_ref(cx, ConversationHistory::new);
    let pending = use_state(cx, || None::<String>);
    let send_lock = use_state(cx, || false);
    let theme = use_state(cx, Theme::default);

    let send = move || {
        if **send_lock {
            return;
        }
        let text = draft.get().clone();
        if text.trim().is_empty() {
            return;
        }
        send_lock.set(true);
        pending.set(Some(text.clone()));
        draft.set(String::new());

        cx.spawn({
            to_owned![send_lock, pending, history];
            let resolver = Arc::clone(resolver);

            async move {
                // The turn is resolved on its own so the session history
                // isn't borrowed while the model runs.
                let mut turn = ConversationHistory::new();
                if let Err(err) = resolver.resolve(&text, &mut turn).await {
                    tracing::debug!("message rejected: {err}");
                }
                history.write().append(turn);

                pending.set(None);
                send_lock.set(false);
            }
        });
    };

    let send_enter = move |e: Event<KeyboardData>| {
        if let Key::Enter = e.data.key() {
            send();
        }
    };

    let send_button = move |_| {
        send();
    };

    let current = *theme.get();
    let page_style = current.style();
    let pending_text = pending.get().clone();
    let show_prompt = history.read().is_empty() && pending_text.is_none();

    cx.render(rsx!(
        style { include_str!("./style.css") }
        div {
            id: "page",
            style: "{page_style}",
            div {
                id: "theme-container",
                span { "Choose Theme Mode " }
                select {
                    id: "theme-select",
                    onchange: move |e| theme.set(Theme::from_name(&e.value)),
                    Theme::ALL.iter().map(|&choice| {
                        let name = choice.name();
                        let selected = choice == current;
                        rsx!(option { value: "{name}", selected: selected, "{name}" })
                    })
                }
            }
            div {
                id: "sidebar",
                h2 { "AI Healthcare Insights" }
                SIDEBAR_CARDS.iter().map(|(title, body)| {
                    rsx!(InfoCard { title: title.to_string(), body: body.to_string() })
                })
            }
            div {
                id: "main-column",
                div {
                    id: "header",
                    h1 { "AI Healthcare Assistant" }
                    h4 { "Ask health-related questions and get AI-generated responses!" }
                }
                div {
                    id: "chat-window",
                    class: "chat-window",
                    for msg in history.read().iter() {
                        match msg.role {
                            Role::User => rsx!(UserMessage { content: msg.content.clone() }),
                            Role::Assistant => rsx!(AssistantMessage { content: msg.content.clone() }),
                        }
                    }
                    pending_text.map(|text| rsx!(UserMessage { content: text }))
                    if **send_lock {
                        rsx!(Loading {})
                    }
                    if show_prompt {
                        rsx!(p {
                            class: "empty-state",
                            "Do you have any health-related questions? I'm here to help!"
                        })
                    }
                }
                div {
                    id: "input-area",
                    input {
                        id: "user-input",
                        placeholder: "Type your health-related query...",
                        value: "{draft}",
                        oninput: move |e| draft.set(e.value.clone()),
                        onkeydown: send_enter,
                    }
                    button {
                        id: "send-button",
                        onclick: send_button,
                        "Send"
                    }
                }
            }
        }
    ))
}
