//! One display column of the queue board.
//!
//! The board renders two of these side by side: waiting tickets on the
//! left, tickets being served on the right.

use iocraft::prelude::*;

use crate::tui::model::RowViewModel;
use crate::tui::theme::theme;

/// Props for the QueueColumn component
#[derive(Default, Props)]
pub struct QueueColumnProps {
    /// Column title, e.g. "EN ESPERA"
    pub title: String,

    /// Rows to render, in display order
    pub rows: Vec<RowViewModel>,

    /// Accent color for the title and highlighted rows
    pub accent: Option<Color>,
}

/// A titled column of ticket rows
#[component]
pub fn QueueColumn(props: &QueueColumnProps) -> impl Into<AnyElement<'static>> {
    let theme = theme();
    let accent = props.accent.unwrap_or(theme.highlight);

    element! {
        View(
            flex_grow: 1.0,
            flex_shrink: 0.0,
            height: 100pct,
            flex_direction: FlexDirection::Column,
            padding_left: 1,
            padding_right: 1,
            border_edges: Edges::Right,
            border_style: BorderStyle::Single,
            border_color: theme.border,
            overflow: Overflow::Hidden,
        ) {
            View(
                width: 100pct,
                height: 2,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                border_edges: Edges::Bottom,
                border_style: BorderStyle::Single,
                border_color: theme.border,
            ) {
                Text(
                    content: props.title.clone(),
                    color: accent,
                    weight: Weight::Bold,
                )
                Text(
                    content: props.rows.len().to_string(),
                    color: theme.text_dimmed,
                )
            }

            #(props.rows.iter().map(|row| {
                let color = if row.highlight { theme.call_out } else { theme.text };
                let weight = if row.highlight { Weight::Bold } else { Weight::Normal };
                element! {
                    View(
                        width: 100pct,
                        margin_top: 1,
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                    ) {
                        View(flex_direction: FlexDirection::Row, gap: 1) {
                            Text(
                                content: row.label.clone(),
                                color: theme.label_color,
                                weight,
                            )
                            Text(
                                content: row.name.clone(),
                                color,
                                weight,
                            )
                        }
                        Text(
                            content: row.detail.clone(),
                            color: if row.highlight { color } else { theme.text_dimmed },
                            weight,
                        )
                    }
                }
            }))
        }
    }
}
