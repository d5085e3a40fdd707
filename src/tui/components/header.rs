//! Board header bar component
//!
//! Displays the business name, the connection mode, and the wall clock.

use iocraft::prelude::*;

use crate::tui::theme::theme;

/// Props for the Header component
#[derive(Default, Props)]
pub struct HeaderProps {
    /// Business name shown on the left
    pub business_name: String,

    /// Wall-clock sample, `HH:MM:SS`
    pub clock: String,

    /// Whether the change-stream subscription is connected
    pub stream_live: bool,
}

/// Header bar showing business name, feed mode and clock
#[component]
pub fn Header(props: &HeaderProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();

    element! {
        View(
            width: 100pct,
            height: 1,
            flex_direction: FlexDirection::Row,
            flex_shrink: 0.0,
            justify_content: JustifyContent::SpaceBetween,
            padding_left: 1,
            padding_right: 1,
            background_color: theme.highlight,
        ) {
            Text(
                content: props.business_name.clone(),
                color: theme.text,
                weight: Weight::Bold,
            )
            View(flex_direction: FlexDirection::Row, gap: 2) {
                Text(
                    content: if props.stream_live { "en vivo" } else { "sondeo" },
                    color: theme.text_dimmed,
                )
                Text(
                    content: props.clock.clone(),
                    color: theme.text,
                    weight: Weight::Bold,
                )
            }
        }
    }
}
