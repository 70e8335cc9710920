use std::future::Future;

use anyhow::{anyhow, Context, Result};
use leptos::logging::log;
use leptos::{html, prelude::*, task::spawn_local};
use leptos_use::{use_event_listener_with_options, UseEventListenerOptions};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CssStyleDeclaration, Document, Element, EventTarget, HtmlElement, HtmlVideoElement, SvgElement,
};

use crate::lang::{self, Lang};

pub const CONTAINER_ID: &str = "mobileVideoContainer";
pub const VIDEO_ID: &str = "mobileVideo";
pub const VIDEO_SRC: &str = "3dbuilder/Video/Plug.mp4";
pub const HOME_URL: &str = "https://cubik.one/";

/// Replace the page with the mobile placeholder: hide everything currently in
/// `<body>`, then mount the placeholder card. Safe to call repeatedly, only
/// the first call does anything. Never fails; an injection error is logged
/// and the page is left as it was.
#[wasm_bindgen(js_name = showPlaceholder)]
pub fn show_placeholder() {
    let document = document();
    if document.get_element_by_id(CONTAINER_ID).is_some() {
        return;
    }
    let lang = lang::resolve();
    lang::apply_document_lang(&document, lang);
    match inject(&document, lang) {
        Ok(()) => log!("[INFO] [placeholder] shown (lang: {})", lang),
        Err(e) => log!("[ERROR] [placeholder] injection failed: {:?}", e),
    }
}

fn inject(document: &Document, lang: Lang) -> Result<()> {
    let body = document.body().context("document has no body")?;
    suppress_children(&body);
    let container = document
        .create_element("div")
        .map_err(|e| anyhow!("failed to create placeholder container: {:?}", e))?;
    container.set_id(CONTAINER_ID);
    body.append_child(&container)
        .map_err(|e| anyhow!("failed to attach placeholder container: {:?}", e))?;
    let container: HtmlElement = container
        .dyn_into()
        .map_err(|_| anyhow!("placeholder container is not an html element"))?;
    leptos::mount::mount_to(container, move || view! { <PlaceholderCard lang /> }).forget();
    Ok(())
}

/// Hide every existing body child via inline style. The placeholder container
/// itself is skipped, everything else stays in the DOM untouched.
fn suppress_children(body: &HtmlElement) {
    let children = body.children();
    for idx in 0..children.length() {
        let Some(child) = children.item(idx) else {
            continue;
        };
        if child.id() == CONTAINER_ID {
            continue;
        }
        if let Some(style) = inline_style(&child) {
            let _ = style.set_property("display", "none");
        }
    }
}

/// Inline style of a body child. SVG islands directly under `<body>` carry
/// one just like HTML elements; anything without an inline style object is
/// left alone.
fn inline_style(child: &Element) -> Option<CssStyleDeclaration> {
    if let Some(el) = child.dyn_ref::<HtmlElement>() {
        return Some(el.style());
    }
    child.dyn_ref::<SvgElement>().map(|el| el.style())
}

/// The placeholder itself: looping teaser video, localized message and a link
/// back to the landing page. Playback starts muted; the first touch or click
/// on the video area restarts playback with sound.
#[component]
fn PlaceholderCard(lang: Lang) -> impl IntoView {
    let strings = lang.strings();
    let video_ref: NodeRef<html::Video> = NodeRef::new();
    let wrap_ref: NodeRef<html::Div> = NodeRef::new();
    // Controls stay visible until autoplay is known to have started.
    let (controls, set_controls) = signal(true);

    Effect::new(move |_| {
        let Some(video) = video_ref.get() else {
            return;
        };
        configure_video(&video);
        if let Some(pending) = attempt_playback(&video, set_controls) {
            spawn_local(pending);
        }
    });

    let unlock = move |target: Option<EventTarget>| {
        let Some(video) = video_ref.get_untracked() else {
            return;
        };
        if target_within_anchor(target.as_ref()) {
            return;
        }
        if let Some(pending) = attempt_playback(&video, set_controls) {
            spawn_local(pending);
        }
        video.set_muted(false);
    };

    let once = UseEventListenerOptions::default().once(true);
    let _ = use_event_listener_with_options(
        wrap_ref,
        leptos::ev::touchstart,
        move |ev| unlock(ev.target()),
        once,
    );
    let _ = use_event_listener_with_options(
        wrap_ref,
        leptos::ev::click,
        move |ev| unlock(ev.target()),
        once,
    );

    view! {
        <div class="mobile-card">
            <div class="mobile-video-wrap" node_ref=wrap_ref>
                <video
                    id=VIDEO_ID
                    src=VIDEO_SRC
                    node_ref=video_ref
                    prop:muted=true
                    prop:controls=move || controls.get()
                />
            </div>
            <div class="mobile-msg">{strings.message}</div>
            <a class="mobile-home-btn" href=HOME_URL target="_self" rel="noopener">
                {strings.home}
            </a>
        </div>
    }
}

fn configure_video(video: &HtmlVideoElement) {
    video.set_loop(true);
    video.set_muted(true);
    video.set_preload("auto");
    // iOS only honors inline playback through the attribute form.
    let _ = video.set_attribute("playsinline", "");
    let _ = video.set_attribute("webkit-playsinline", "");
    let _ = video.set_attribute("muted", "");
}

/// Start muted playback. The mute and the `play()` call happen synchronously
/// so a caller may unmute right afterwards; the returned future resolves the
/// play promise and toggles the controls. `None` means `play()` itself threw
/// and the controls are already showing.
fn attempt_playback(
    video: &HtmlVideoElement,
    set_controls: WriteSignal<bool>,
) -> Option<impl Future<Output = ()>> {
    video.set_muted(true);
    let promise = match video.play() {
        Ok(promise) => promise,
        Err(_) => {
            apply_playback_outcome(set_controls, false);
            return None;
        }
    };
    Some(async move {
        let started = JsFuture::from(promise).await.is_ok();
        apply_playback_outcome(set_controls, started);
    })
}

/// Controls are hidden while playback runs and shown as the fallback when it
/// was blocked. A blocked start is an expected outcome, not an error.
fn apply_playback_outcome(set_controls: WriteSignal<bool>, started: bool) {
    set_controls.set(!started);
}

/// Whether the event target sits inside a link. Clicks on links keep their
/// normal navigation behavior instead of unlocking sound.
fn target_within_anchor(target: Option<&EventTarget>) -> bool {
    target
        .and_then(|target| target.dyn_ref::<Element>())
        .and_then(|element| element.closest("a").ok().flatten())
        .is_some()
}
