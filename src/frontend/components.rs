#![allow(non_snake_case)]

use dioxus::prelude::*;

#[derive(PartialEq, Props)]
pub struct ContentProps {
    content: String,
}

pub fn UserMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message user-message",
            "{cx.props.content}"
        }
    ))
}

pub fn AssistantMessage(cx: Scope<ContentProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message assistant-message",
            "{cx.props.content}"
        }
    ))
}

pub fn Loading(cx: Scope) -> Element {
    cx.render(rsx!(
        div {
            class: "chat-message assistant-message",
            div {
                class: "spinner",
            }
            span {
                class: "processing",
                "Processing..."
            }
        }
    ))
}

#[derive(PartialEq, Props)]
pub struct InfoCardProps {
    title: String,
    body: String,
}

pub fn InfoCard(cx: Scope<InfoCardProps>) -> Element {
    cx.render(rsx!(
        div {
            class: "info-card",
            strong { "{cx.props.title}: " }
            "{cx.props.body}"
        }
    ))
}
