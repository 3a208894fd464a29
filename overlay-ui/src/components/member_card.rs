//! Member Card Component
//!
//! Avatar and name for one participant, with a details popover on hover.

use leptos::*;

use jamfeed::overlay::{place_popover, Rect};

use crate::state::global::{GlobalState, MemberWidget};

/// Member card with popover
#[component]
pub fn MemberCard(widget: MemberWidget) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let gutter = state.settings.popover_gutter;

    let trigger = create_node_ref::<html::Div>();
    let popover = create_rw_signal(None::<String>);

    // Every open recomputes all four insets
    let open = move |_| {
        let Some(el) = trigger.get() else {
            return;
        };
        let bounds = el.get_bounding_client_rect();
        let trigger_rect = Rect::new(bounds.left(), bounds.top(), bounds.width(), bounds.height());

        popover.set(Some(place_popover(&trigger_rect, &viewport(), gutter).style()));
    };

    let avatar_id = widget.avatar_id();
    let MemberWidget {
        member,
        dom_id,
        style,
    } = widget;

    let class = if style.is_some() {
        "member placed"
    } else {
        "member"
    };

    let languages = if member.languages.is_empty() {
        "-".to_string()
    } else {
        member
            .languages
            .iter()
            .map(|l| l.label())
            .collect::<Vec<_>>()
            .join(", ")
    };
    let timezone = member.timezone_label();
    let solo = member.solo_label();

    view! {
        <div
            id=dom_id
            class=class
            style=style.unwrap_or_default()
            node_ref=trigger
            on:mouseenter=open
            on:click=open
            on:mouseleave=move |_| popover.set(None)
        >
            <img id=avatar_id class="avatar" src=member.avatar alt=member.name.clone() />
            <span class="member-name">{member.name.clone()}</span>

            {move || popover.get().map(|inset| view! {
                <div class="popover" style=inset>
                    <p class="popover-name">{member.name.clone()}</p>
                    <p>"Timezone: " {timezone.clone()}</p>
                    <p>"Solo: " {solo}</p>
                    <p>"Languages: " {languages.clone()}</p>
                </div>
            })}
        </div>
    }
}

/// Viewport rectangle in client coordinates
fn viewport() -> Rect {
    let window = window();
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);

    Rect::new(0.0, 0.0, width, height)
}
