use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, Utc};
use leptos::html::{Canvas, Div};
use leptos::prelude::*;
use leptos_use::use_element_size;
use plotters_canvas::CanvasBackend;
use pricestf_api_types::currency::{is_key_priced, NormalizedPoint};
use pricestf_api_types::Price;
use pricestf_charts::{draw_price_history_chart, ChartLayout, ChartOptions, PriceUnit};

use crate::components::loading::Loading;

#[component]
pub(crate) fn PriceHistoryChart(
    #[prop(into)] sku: Signal<String>,
    #[prop(into)] points: Signal<Vec<NormalizedPoint>>,
    #[prop(into)] key_price: Signal<Option<Price>>,
) -> impl IntoView {
    let canvas = NodeRef::<Canvas>::new();
    let wrapper = NodeRef::<Div>::new();
    let wrapper_size = use_element_size(wrapper);
    let width = wrapper_size.width;
    let height = wrapper_size.height;
    let layout = StoredValue::new(Option::<ChartLayout>::None);
    let hovered = RwSignal::new(Option::<NormalizedPoint>::None);

    let hidden = Memo::new(move |_| {
        width.track();
        height.track();
        let Some(canvas) = canvas.get() else {
            return true;
        };
        let Some(key_price) = key_price.get() else {
            return true;
        };
        let Some(backend) = CanvasBackend::with_canvas_object(canvas) else {
            return true;
        };
        let drawn = points.with(|points| {
            let sku = sku.get();
            let unit = if is_key_priced(&sku, &key_price, points) {
                PriceUnit::Keys
            } else {
                PriceUnit::Refined
            };
            let options = ChartOptions {
                caption: sku,
                unit,
                key_rate: key_price.sell().half_scrap,
            };
            draw_price_history_chart(Rc::new(RefCell::new(backend)), points, &options)
        });
        // if there's an error drawing, we should hide the canvas
        match drawn {
            Ok(chart_layout) => {
                layout.set_value(Some(chart_layout));
                false
            }
            Err(error) => {
                log::debug!("chart not drawn: {error}");
                layout.set_value(None);
                true
            }
        }
    });

    let on_mousemove = move |event: web_sys::MouseEvent| {
        let time = layout.with_value(|layout| {
            layout
                .as_ref()
                .and_then(|layout| layout.time_at_pixel(event.offset_x()))
        });
        let Some(time) = time else {
            return;
        };
        hovered.set(points.with_untracked(|points| nearest_point(points, time)));
    };

    view! {
        <div class="mx-auto h-72" class:hidden=move || !hidden.get()>
            <div class="flex justify-center pt-16"><Loading /></div>
        </div>
        <div node_ref=wrapper class="flex flex-col h-72 mx-auto" class:hidden=hidden>
            <canvas
                width=width
                height=move || height.get().min(480.0)
                style=move || {
                    format!("width: {}px; height: {}px", width.get(), height.get().min(480.0))
                }
                node_ref=canvas
                on:mousemove=on_mousemove
                on:mouseleave=move |_| hovered.set(None)
            ></canvas>
        </div>
        {move || {
            hovered.get().map(|point| {
                view! {
                    <div class="text-center text-sm mt-2 text-gray-700">
                        <span class="font-bold">
                            {point.created_at.format("%b %e, %Y %H:%M").to_string()}
                        </span>
                        " Buy: " {point.buy_display.clone()} " / Sell: " {point.sell_display.clone()}
                    </div>
                }
            })
        }}
    }
}

/// The sample closest in time to the cursor; the tooltip shows its
/// precomputed display strings rather than the raw scalar.
pub(crate) fn nearest_point(
    points: &[NormalizedPoint],
    time: DateTime<Utc>,
) -> Option<NormalizedPoint> {
    points
        .iter()
        .min_by_key(|point| (point.created_at - time).num_milliseconds().abs())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(minute: u32) -> NormalizedPoint {
        NormalizedPoint {
            buy_value: 1,
            sell_value: 2,
            buy_display: "0.05 ref".to_string(),
            sell_display: "0.11 ref".to_string(),
            created_at: Utc.with_ymd_and_hms(2022, 2, 10, 12, minute, 0).unwrap(),
        }
    }

    #[test]
    fn picks_nearest_sample() {
        let points = vec![point(0), point(10), point(20)];
        let cursor = Utc.with_ymd_and_hms(2022, 2, 10, 12, 12, 0).unwrap();
        assert_eq!(nearest_point(&points, cursor), Some(point(10)));
        assert_eq!(nearest_point(&[], cursor), None);
    }
}
