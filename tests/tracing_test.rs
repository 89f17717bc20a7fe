//! Region events logged on rayon workers belong to the `generate` span

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::{Rgb, RgbImage};
use region_palette::extract_palettes;
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

#[derive(Clone, Default)]
struct RegionEvents {
    total: Arc<AtomicUsize>,
    in_generate: Arc<AtomicUsize>,
}

impl<S> Layer<S> for RegionEvents
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
        if event.metadata().target() != "region_palette::pipeline" {
            return;
        }
        self.total.fetch_add(1, Ordering::SeqCst);
        let inside = ctx
            .event_scope(event)
            .is_some_and(|mut scope| scope.any(|span| span.name() == "generate"));
        if inside {
            self.in_generate.fetch_add(1, Ordering::SeqCst);
        }
    }
}

#[test]
fn test_region_events_attach_to_generate_span() {
    let events = RegionEvents::default();
    let subscriber = tracing_subscriber::registry().with(events.clone());
    tracing::subscriber::set_global_default(subscriber).unwrap();

    let image = RgbImage::from_fn(8, 50, |_, y| {
        if y < 10 {
            Rgb([220, 30, 30])
        } else {
            Rgb([0, 34, 204])
        }
    });
    extract_palettes(&image).unwrap();

    assert_eq!(events.total.load(Ordering::SeqCst), 3);
    assert_eq!(events.in_generate.load(Ordering::SeqCst), 3);
}
